//! Integer lattices and LLL reduction.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed as _;
use tracing::debug;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::rings::{ExpFloat, Field, Float, PrimeField, Q, Ring, RingElement as _, Z};
use crate::solver::reduced_row_echelon;
use crate::vector::Vector;

/// A lattice, i.e. the integer span of a set of vectors.
/// The basis vectors are the rows of the matrix. The matrix always stores the
/// ambient dimension (the number of columns) even if there are zero rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    /// The basis matrix of the lattice.
    pub basis: Matrix<Z>,
}

impl Lattice {
    /// The lattice basis are the rows of the matrix.
    /// The rows have to be linearly independent for [`Lattice::lll`].
    pub fn from_basis(basis: Matrix<Z>) -> Self {
        Self { basis }
    }

    /// The lattice generated by the rows of `generators` (lifted to the
    /// integers) together with `p * Z^n`, i.e. every integer vector whose
    /// reduction mod p lies in the row space of `generators`.
    ///
    /// The generators may be linearly dependent. The returned basis is always
    /// of full rank: the reduced row echelon form of the generators mod p,
    /// lifted to the integers, followed by `p * e_j` for every column `j`
    /// without a pivot.
    pub fn q_ary(generators: &Matrix<PrimeField>, f: &PrimeField) -> Result<Self> {
        let n = generators.num_cols();
        let mut echelon = generators.clone();
        let pivots = reduced_row_echelon(&mut echelon, f)?;
        debug!(dim = n, rank = pivots.len(), "building q-ary lattice");

        let mut basis = echelon.transform::<Z, _>(|e| BigInt::from(e.clone()));
        let p = BigInt::from(f.modulus().clone());
        for j in (0..n).filter(|j| !pivots.contains(j)) {
            let mut row = Vector::<Z>::zero(n);
            row[j] = p.clone();
            basis.append_row(row);
        }

        Ok(Self { basis })
    }

    /// Returns the rank of the lattice, i.e. the number if basis vectors.
    pub fn rank(&self) -> usize {
        self.basis.num_rows()
    }

    /// Returns the dimension of the ambient space.
    pub fn ambient_dim(&self) -> usize {
        self.basis.num_cols()
    }

    /// Performs LLL basis reduction and returns the number of swaps.
    /// See [`lll`].
    pub fn lll<W: WorkingType>(&mut self, delta: &BigRational, wt: &W) -> Result<usize> {
        lll(&mut self.basis, delta, wt)
    }

    /// Returns the basis vectors with the smallest non-zero norm, in basis
    /// order. More than one vector means the shortest vector is ambiguous
    /// as far as the basis can tell.
    pub fn shortest_nonzero(&self) -> Vec<&Vector<Z>> {
        let mut min_norm_sqr: Option<BigInt> = None;
        let mut shortest = Vec::new();
        for v in self.basis.rows() {
            let norm_sqr = v.norm_sqr(&Z);
            if norm_sqr.is_zero() {
                continue;
            }

            if min_norm_sqr.as_ref().is_none_or(|min| &norm_sqr < min) {
                min_norm_sqr = Some(norm_sqr);
                shortest.clear();
                shortest.push(v);
            } else if min_norm_sqr.as_ref() == Some(&norm_sqr) {
                shortest.push(v);
            }
        }
        shortest
    }
}

/// The numbers LLL does the Gram-Schmidt computations in.
///
/// [`Q`] is exact, but every operation normalizes a fraction, which gets
/// slow once the entries have a few hundred bits. [`Float`] is what should
/// normally be used.
pub trait WorkingType: Field {
    /// Converts an integer.
    fn from_integer(&self, e: &BigInt) -> Self::Element;

    /// Converts a fraction.
    fn from_rational(&self, e: &BigRational) -> Self::Element;

    /// Rounds to the nearest integer.
    fn round(&self, e: &Self::Element) -> BigInt;

    /// Is `|e| <= bound`?
    fn abs_le(&self, e: &Self::Element, bound: &Self::Element) -> bool;

    fn is_lt(&self, l: &Self::Element, r: &Self::Element) -> bool;

    fn is_positive(&self, e: &Self::Element) -> bool;

    /// The bound on the Gram-Schmidt coefficients `|mu_ij|` that size
    /// reduction achieves. `1/2` if the arithmetic is exact, a bit more
    /// otherwise.
    fn eta(&self) -> Self::Element;
}

impl WorkingType for Q {
    fn from_integer(&self, e: &BigInt) -> Self::Element {
        BigRational::from_integer(e.clone())
    }

    fn from_rational(&self, e: &BigRational) -> Self::Element {
        e.clone()
    }

    fn round(&self, e: &Self::Element) -> BigInt {
        Q::round_to_integer(e)
    }

    fn abs_le(&self, e: &Self::Element, bound: &Self::Element) -> bool {
        &e.abs() <= bound
    }

    fn is_lt(&self, l: &Self::Element, r: &Self::Element) -> bool {
        l < r
    }

    fn is_positive(&self, e: &Self::Element) -> bool {
        e.is_positive()
    }

    fn eta(&self) -> Self::Element {
        BigRational::new(1.into(), 2.into())
    }
}

impl WorkingType for Float {
    fn from_integer(&self, e: &BigInt) -> Self::Element {
        ExpFloat::from_bigint(e)
    }

    fn from_rational(&self, e: &BigRational) -> Self::Element {
        ExpFloat::from_rational(e)
    }

    fn round(&self, e: &Self::Element) -> BigInt {
        e.round()
    }

    fn abs_le(&self, e: &Self::Element, bound: &Self::Element) -> bool {
        !bound.is_lt(e.abs())
    }

    fn is_lt(&self, l: &Self::Element, r: &Self::Element) -> bool {
        l.is_lt(*r)
    }

    fn is_positive(&self, e: &Self::Element) -> bool {
        !e.is_zero() && !e.is_negative()
    }

    fn eta(&self) -> Self::Element {
        ExpFloat::new(0.51, 0)
    }
}

/// The state of an LLL reduction.
///
/// The Gram matrix of the basis is kept exactly and the Gram-Schmidt data
/// is recomputed from it instead of updated, so rounding errors of the
/// working type don't pile up.
struct Reduction<'a, W: WorkingType> {
    basis: &'a mut Matrix<Z>,
    gram: Matrix<Z>,

    /// `r[(i, j)] = <b_i, b*_j>` for `j <= i`, so `r[(i, i)]` is the squared
    /// norm of `b*_i`.
    r: Matrix<W>,

    /// `mu[(i, j)] = r[(i, j)] / r[(j, j)]` for `j < i`.
    mu: Matrix<W>,

    wt: &'a W,
}

impl<'a, W: WorkingType> Reduction<'a, W> {
    fn new(basis: &'a mut Matrix<Z>, wt: &'a W) -> Self {
        let n = basis.num_rows();
        let gram = basis.mul(&basis.transposed(), &Z);
        Self {
            basis,
            gram,
            r: Matrix::zero(n, n),
            mu: Matrix::zero(n, n),
            wt,
        }
    }

    /// Recomputes row `k` of `r` and `mu`. Rows `0..k` have to be up to
    /// date.
    fn update_gso_row(&mut self, k: usize) {
        let wt = self.wt;
        for j in 0..=k {
            let mut acc = wt.from_integer(&self.gram[(k, j)]);
            for l in 0..j {
                wt.mul_sub_assign(&mut acc, &self.mu[(j, l)], &self.r[(k, l)]);
            }

            if j < k {
                self.mu[(k, j)] = wt.div(acc.clone(), &self.r[(j, j)]);
            }
            self.r[(k, j)] = acc;
        }
    }

    fn check_independent(&self, k: usize) -> Result<()> {
        if self.wt.is_positive(&self.r[(k, k)]) {
            Ok(())
        } else {
            Err(Error::Shape(format!(
                "basis vector {k} is linearly dependent on the previous ones"
            )))
        }
    }

    /// Size reduces `b_k` until every `|mu[(k, j)]| <= eta`. Row `k` of the
    /// Gram-Schmidt data is up to date afterwards.
    fn size_reduce(&mut self, k: usize) {
        let wt = self.wt;
        let eta = wt.eta();
        loop {
            self.update_gso_row(k);
            if (0..k).all(|j| wt.abs_le(&self.mu[(k, j)], &eta)) {
                return;
            }

            // Large approximate coefficients are only right in their leading
            // bits, so this can take a few rounds.
            let mut mu_k = self.mu.row(k).clone();
            let mut coeffs = Vec::new();
            for j in (0..k).rev() {
                let x = wt.round(&mu_k[j]);
                if x.is_zero() {
                    continue;
                }

                let x_w = wt.from_integer(&x);
                for l in 0..j {
                    wt.mul_sub_assign(&mut mu_k[l], &x_w, &self.mu[(j, l)]);
                }
                coeffs.push((j, x));
            }

            if coeffs.is_empty() {
                return;
            }
            self.subtract_rows(k, &coeffs);
        }
    }

    /// `b_k -= x_j * b_j` for every `(j, x_j)` in `coeffs`. No `j` may be
    /// `k`.
    fn subtract_rows(&mut self, k: usize, coeffs: &[(usize, BigInt)]) {
        for (j, x) in coeffs {
            let (b_k, b_j) = self.basis.get_rows_mut(k, *j);
            b_k.mul_sub_assign(x, b_j, &Z);
        }

        // <b_k - sum x_j b_j, b_i> = <b_k, b_i> - sum x_j <b_j, b_i>
        for i in (0..self.basis.num_rows()).filter(|&i| i != k) {
            let mut g = self.gram[(k, i)].clone();
            for (j, x) in coeffs {
                Z.mul_sub_assign(&mut g, x, &self.gram[(*j, i)]);
            }
            self.gram[(i, k)] = g.clone();
            self.gram[(k, i)] = g;
        }
        self.gram[(k, k)] = self.basis[k].norm_sqr(&Z);
    }

    /// Swaps `b_k` and `b_{k-1}`. The Gram-Schmidt data of both is stale
    /// afterwards.
    fn swap(&mut self, k: usize) {
        self.basis.swap_rows(k, k - 1);
        self.gram.swap_rows(k, k - 1);
        self.gram.swap_cols(k, k - 1);
    }

    /// Does the Lovasz condition `|b*_k|^2 >= (delta - mu^2) |b*_{k-1}|^2`
    /// hold?
    fn lovasz(&self, k: usize, delta: &W::Element) -> bool {
        let wt = self.wt;
        let m = self.mu[(k, k - 1)].clone();
        let rhs = wt.mul(wt.sub(delta.clone(), &wt.square(m)), &self.r[(k - 1, k - 1)]);
        !wt.is_lt(&self.r[(k, k)], &rhs)
    }
}

/// Performs LLL basis reduction on the rows of `basis` and returns the
/// number of swaps.
///
/// The Gram-Schmidt data is computed in the working type from an exact
/// Gram matrix, and size reduction is repeated until the coefficients are
/// small, like in the L² algorithm by Nguyen and Stehlé. With [`Float`]
/// this handles entries of any size as long as there are at most a few
/// dozen rows.
///
/// The rows have to be linearly independent, otherwise [`Error::Shape`] is
/// returned. `delta` should be in `(1/4, 1)`; the usual choice is `99/100`.
pub fn lll<W: WorkingType>(
    basis: &mut Matrix<Z>,
    delta: &BigRational,
    wt: &W,
) -> Result<usize> {
    let n = basis.num_rows();
    if n == 0 {
        return Ok(0);
    }

    let delta = wt.from_rational(delta);
    let mut red = Reduction::new(basis, wt);
    red.update_gso_row(0);
    red.check_independent(0)?;

    let mut swaps = 0;
    let mut k = 1;
    while k < n {
        red.size_reduce(k);
        red.check_independent(k)?;

        if red.lovasz(k, &delta) {
            k += 1;
            continue;
        }

        red.swap(k);
        swaps += 1;
        if k == 1 {
            red.update_gso_row(0);
        } else {
            k -= 1;
        }
    }

    debug!(rank = n, swaps, "LLL done");
    Ok(swaps)
}
