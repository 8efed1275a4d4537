//! Matrices.
//! See the module documentation for [`crate::vector`].
//! The same thing applies here.
//!
//! A matrix is stored as a list of row [`Vector`]s, so handing out rows and
//! pairs of mutable rows is just slice indexing. The number of columns is
//! stored separately so that it is known even when there are no rows.

use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use itertools::Itertools;

use crate::rings::Ring;
use crate::vector::Vector;

/// A matrix over the ring `R`.
#[derive(Clone, PartialEq)]
pub struct Matrix<R: Ring> {
    rows: Vec<Vector<R>>,
    cols: usize,
}

impl<R: Ring> Matrix<R> {
    /// Returns a zero matrix.
    pub fn zero(r: usize, c: usize) -> Self {
        Self { rows: vec![Vector::zero(c); r], cols: c }
    }

    /// Returns an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { R::one() } else { R::zero() })
    }

    /// Creates a matrix whose entry `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(r: usize, c: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> R::Element,
    {
        let rows = (0..r)
            .map(|i| (0..c).map(|j| f(i, j)).collect())
            .collect();
        Self { rows, cols: c }
    }

    /// Creates a matrix from rows.
    /// Panics if the rows have different lengths.
    pub fn from_rows<U, V>(rows: &[U]) -> Self
    where
        U: AsRef<[V]>,
        V: Into<R::Element> + Clone,
    {
        let vectors = rows
            .iter()
            .map(|r| Vector::from_entries(r.as_ref().iter().cloned()))
            .collect();
        Self::from_row_vectors(vectors, rows.first().map_or(0, |r| r.as_ref().len()))
    }

    /// Creates a matrix from rows of small integers, converting every entry
    /// into the ring.
    pub fn from_i64_rows<U: AsRef<[i64]>>(rows: &[U], r: &R) -> Self {
        let vectors = rows
            .iter()
            .map(|row| Vector::from_i64s(row.as_ref(), r))
            .collect();
        Self::from_row_vectors(vectors, rows.first().map_or(0, |r| r.as_ref().len()))
    }

    /// Creates a matrix from row vectors with `cols` entries each.
    /// Panics if a row has a different dimension.
    pub fn from_row_vectors(rows: Vec<Vector<R>>, cols: usize) -> Self {
        assert!(
            rows.iter().all(|r| r.dim() == cols),
            "All rows must have {cols} entries."
        );
        Self { rows, cols }
    }

    /// The number of rows of the matrix.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns of the matrix.
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Is the matrix empty, i.e. has it zero rows or columns?
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0 || self.num_cols() == 0
    }

    /// Returns the row `r`.
    pub fn row(&self, r: usize) -> &Vector<R> {
        &self.rows[r]
    }

    /// Returns the row `r` mutably.
    pub fn row_mut(&mut self, r: usize) -> &mut Vector<R> {
        &mut self.rows[r]
    }

    /// Returns a reference to the entry at row `r` and column `c`.
    pub fn entry(&self, r: usize, c: usize) -> &R::Element {
        self.rows[r].entry(c)
    }

    /// Returns a mutable reference to the entry at row `r` and column `c`.
    pub fn entry_mut(&mut self, r: usize, c: usize) -> &mut R::Element {
        self.rows[r].entry_mut(c)
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> std::slice::Iter<'_, Vector<R>> {
        self.rows.iter()
    }

    /// Call a function on each entry and return the resulting matrix.
    pub fn transform<U: Ring, F: FnMut(&R::Element) -> U::Element>(
        &self,
        mut f: F,
    ) -> Matrix<U> {
        Matrix {
            rows: self.rows.iter().map(|r| r.transform(&mut f)).collect(),
            cols: self.cols,
        }
    }

    /// Swap two rows.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Swap two columns.
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        for row in &mut self.rows {
            row.swap(i, j);
        }
    }

    /// Returns mutable references to two rows of the matrix. Panics if the
    /// indices are the same.
    pub fn get_rows_mut(
        &mut self,
        i: usize,
        j: usize,
    ) -> (&mut Vector<R>, &mut Vector<R>) {
        assert_ne!(i, j, "Tried to mutably borrow the same row twice.");
        if i < j {
            let (lo, hi) = self.rows.split_at_mut(j);
            (&mut lo[i], &mut hi[0])
        } else {
            let (lo, hi) = self.rows.split_at_mut(i);
            (&mut hi[0], &mut lo[j])
        }
    }

    /// Creates the transpose of the matrix.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.num_cols(), self.num_rows(), |i, j| {
            self.entry(j, i).clone()
        })
    }

    /// Returns the matrix made of the first `n` rows.
    pub fn first_rows(&self, n: usize) -> Self {
        Self { rows: self.rows[..n].to_vec(), cols: self.cols }
    }

    /// Multiply a row by an element.
    /// Note that this is only an invertible operation if `c` is a unit.
    pub fn row_multiply(&mut self, row: usize, c: &R::Element, r: &R) {
        self.rows[row].mul_assign(c, r);
    }

    /// Add a scaled row to another row. N += M * c.
    /// `m` and `n` can not be equal.
    pub fn row_multiply_add(
        &mut self,
        n: usize,
        m: usize,
        c: &R::Element,
        r: &R,
    ) {
        let (row_n, row_m) = self.get_rows_mut(n, m);
        row_n.mul_add_assign(c, row_m, r);
    }

    /// Concatenates the columns of `rhs` to the right of this matrix.
    pub fn concat_cols(&self, rhs: &Self) -> Self {
        assert_eq!(
            self.num_rows(),
            rhs.num_rows(),
            "Can only concatenate matrices with the same number of rows."
        );
        let rows = self
            .rows
            .iter()
            .zip(rhs.rows.iter())
            .map(|(l, r)| l.iter().chain(r.iter()).cloned().collect())
            .collect();
        Self { rows, cols: self.cols + rhs.cols }
    }

    /// Appends `v` as a new last column.
    pub fn with_column(&self, v: &Vector<R>) -> Self {
        assert_eq!(self.num_rows(), v.dim());
        let rows = self
            .rows
            .iter()
            .zip(v.iter())
            .map(|(row, e)| row.iter().chain(std::iter::once(e)).cloned().collect())
            .collect();
        Self { rows, cols: self.cols + 1 }
    }

    /// Appends a row.
    pub fn append_row(&mut self, row: Vector<R>) {
        assert_eq!(row.dim(), self.cols);
        self.rows.push(row);
    }

    /// Removes all rows that are zero.
    pub fn remove_zero_rows(&mut self) {
        self.rows.retain(|r| !r.is_zero());
    }

    /// Post-multiply a matrix with a vector.
    pub fn mul_vec_post(&self, rhs: &Vector<R>, r: &R) -> Vector<R> {
        assert_eq!(self.num_cols(), rhs.dim());
        self.rows.iter().map(|row| row.dot(rhs, r)).collect()
    }

    /// Multiply two matrices.
    pub fn mul(&self, rhs: &Self, ring: &R) -> Self {
        assert_eq!(self.num_cols(), rhs.num_rows());
        let t = rhs.transposed();
        let rows = self
            .rows
            .iter()
            .map(|row| t.rows().map(|col| row.dot(col, ring)).collect())
            .collect();
        Self { rows, cols: rhs.num_cols() }
    }
}

impl<R: Ring> Index<usize> for Matrix<R> {
    type Output = Vector<R>;

    fn index(&self, index: usize) -> &Self::Output {
        self.row(index)
    }
}

impl<R: Ring> IndexMut<usize> for Matrix<R> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.row_mut(index)
    }
}

impl<R: Ring> Index<(usize, usize)> for Matrix<R> {
    type Output = R::Element;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        self.entry(r, c)
    }
}

impl<R: Ring> IndexMut<(usize, usize)> for Matrix<R> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut Self::Output {
        self.entry_mut(r, c)
    }
}

impl<R: Ring> Debug for Matrix<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}]", self.rows.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};

    use super::*;
    use crate::rings::{PrimeField, Z};

    #[test]
    fn transpose_and_multiply() {
        let a = Matrix::<Z>::from_rows(&[[1, 2, 3], [4, 5, 6]]);
        let t = a.transposed();
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.num_cols(), 2);
        assert_eq!(t, Matrix::from_rows(&[[1, 4], [2, 5], [3, 6]]));

        let p = a.mul(&t, &Z);
        assert_eq!(p, Matrix::from_rows(&[[14, 32], [32, 77]]));

        let v = Vector::from_entries([1, 0, -1]);
        assert_eq!(a.mul_vec_post(&v, &Z), Vector::from_entries([-2, -2]));
    }

    #[test]
    fn concat_and_column() {
        let f = PrimeField::new(11u32.into());
        let a = Matrix::from_i64_rows(&[[1, 2], [3, 4]], &f);
        let ai = a.concat_cols(&Matrix::identity(2));
        assert_eq!(ai, Matrix::from_i64_rows(&[[1, 2, 1, 0], [3, 4, 0, 1]], &f));

        let b = Vector::from_i64s(&[-1, 5], &f);
        let ab = a.with_column(&b);
        assert_eq!(ab.num_cols(), 3);
        assert_eq!(ab[(0, 2)], BigUint::from(10u32));
        assert_eq!(ab[(1, 2)], BigUint::from(5u32));
    }

    #[test]
    fn row_operations() {
        let mut a = Matrix::<Z>::from_rows(&[[1, 2], [3, 4], [0, 0]]);
        a.row_multiply_add(1, 0, &BigInt::from(-3), &Z);
        assert_eq!(a[1], Vector::from_entries([0, -2]));

        a.swap_cols(0, 1);
        assert_eq!(a, Matrix::from_rows(&[[2, 1], [-2, 0], [0, 0]]));
        a.swap_cols(0, 1);

        let (r0, r1) = a.get_rows_mut(1, 0);
        std::mem::swap(r0, r1);
        assert_eq!(a[0], Vector::from_entries([0, -2]));

        a.remove_zero_rows();
        assert_eq!(a.num_rows(), 2);
        assert_eq!(a.num_cols(), 2);
    }

    #[test]
    fn empty_matrix_keeps_columns() {
        let mut a = Matrix::<Z>::zero(2, 3);
        a.remove_zero_rows();
        assert!(a.is_empty());
        assert_eq!(a.num_cols(), 3);
        assert!(Matrix::<Z>::zero(0, 0).is_empty());
    }
}
