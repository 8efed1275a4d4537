//! Vectors.
//!
//! The [`Vector`]s are aware of what kind of ring the elements come from,
//! i.e. the generic is the [`Ring`] and not the ring element. Which means you
//! can't have vectors of things that are not in rings. The reason is that we
//! otherwise couldn't implement the functions that depend on what the ring
//! is, e.g. arithmetic operations. Those take the ring as an argument, since
//! for [`crate::rings::PrimeField`] the modulus is stored there.

use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use crate::rings::{Ring, RingElement};

/// A vector over the ring `R`.
#[derive(Clone, PartialEq)]
pub struct Vector<R: Ring> {
    entries: Vec<R::Element>,
}

impl<R: Ring> Vector<R> {
    /// Returns a zero vector.
    pub fn zero(dim: usize) -> Self {
        Self { entries: vec![R::zero(); dim] }
    }

    /// Creates a vector from the given entries.
    pub fn from_entries<U, V>(a: U) -> Self
    where
        U: IntoIterator<Item = V>,
        V: Into<R::Element>,
    {
        Self { entries: a.into_iter().map(Into::into).collect() }
    }

    /// Creates a vector from small integers, converting each one into the
    /// ring.
    pub fn from_i64s(a: &[i64], r: &R) -> Self {
        Self {
            entries: a.iter().map(|&i| r.element_from_i64(i)).collect(),
        }
    }

    /// Creates a vector from the given entries without conversion.
    pub fn from_raw_entries(entries: Vec<R::Element>) -> Self {
        Self { entries }
    }

    /// The dimension of the vector.
    pub fn dim(&self) -> usize {
        self.entries.len()
    }

    /// Reference to an entry at a given index.
    pub fn entry(&self, idx: usize) -> &R::Element {
        &self.entries[idx]
    }

    /// Mutable reference to an entry at a given index.
    pub fn entry_mut(&mut self, idx: usize) -> &mut R::Element {
        &mut self.entries[idx]
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, R::Element> {
        self.entries.iter()
    }

    /// Swaps two entries.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.entries.swap(i, j);
    }

    /// Appends an entry to the end of the vector.
    pub fn append(&mut self, e: R::Element) {
        self.entries.push(e);
    }

    /// Returns the vector made of the entries in `range`.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Self { entries: self.entries[range].to_vec() }
    }

    /// Call a function on each entry and return the resulting vector.
    pub fn transform<U, F>(&self, f: F) -> Vector<U>
    where
        U: Ring,
        F: FnMut(&R::Element) -> U::Element,
    {
        Vector { entries: self.entries.iter().map(f).collect() }
    }

    /// Is this the zero vector?
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|e| e.is_zero())
    }

    /// Negates the vector.
    pub fn neg_assign(&mut self, r: &R) {
        for e in &mut self.entries {
            r.neg_assign(e);
        }
    }

    /// Negates the vector.
    pub fn neg(mut self, r: &R) -> Self {
        self.neg_assign(r);
        self
    }

    /// Adds another vector to this one.
    pub fn add_assign(&mut self, rhs: &Self, r: &R) {
        assert!(self.dim() == rhs.dim(), "Can not add vectors of different dimensions.");
        for (e, f) in self.entries.iter_mut().zip(rhs.iter()) {
            r.add_assign(e, f);
        }
    }

    /// Adds two vectors.
    pub fn add(mut self, rhs: &Self, r: &R) -> Self {
        self.add_assign(rhs, r);
        self
    }

    /// Computes `self += c * v`.
    pub fn mul_add_assign(&mut self, c: &R::Element, v: &Self, r: &R) {
        assert!(self.dim() == v.dim());
        for (e, f) in self.entries.iter_mut().zip(v.iter()) {
            r.mul_add_assign(e, c, f);
        }
    }

    /// Computes `self -= c * v`.
    pub fn mul_sub_assign(&mut self, c: &R::Element, v: &Self, r: &R) {
        assert!(self.dim() == v.dim());
        for (e, f) in self.entries.iter_mut().zip(v.iter()) {
            r.mul_sub_assign(e, c, f);
        }
    }

    /// Multiplies every entry by `c`.
    pub fn mul_assign(&mut self, c: &R::Element, r: &R) {
        for e in &mut self.entries {
            r.mul_assign(e, c);
        }
    }

    /// The dot product of two vectors.
    pub fn dot(&self, other: &Self, r: &R) -> R::Element {
        assert!(self.dim() == other.dim());
        self.iter()
            .zip(other.iter())
            .fold(R::zero(), |mut acc, (a, b)| {
                r.mul_add_assign(&mut acc, a, b);
                acc
            })
    }

    /// The square of the L2 norm of the vector.
    pub fn norm_sqr(&self, r: &R) -> R::Element {
        self.dot(self, r)
    }
}

impl<R: Ring> Index<usize> for Vector<R> {
    type Output = R::Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<R: Ring> IndexMut<usize> for Vector<R> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

impl<'a, R: Ring> IntoIterator for &'a Vector<R> {
    type Item = &'a R::Element;
    type IntoIter = std::slice::Iter<'a, R::Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<R: Ring> FromIterator<R::Element> for Vector<R> {
    fn from_iter<I: IntoIterator<Item = R::Element>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<R: Ring> Debug for Vector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        let mut iter = self.iter();
        if let Some(e) = iter.next() {
            write!(f, "{e}")?;
            for e in iter {
                write!(f, ", {e}")?;
            }
        }
        write!(f, "]")
    }
}
