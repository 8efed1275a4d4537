//! The public data of a noisy linear system `A * s + e = b (mod p)`.

use num_bigint::BigInt;
use rand::Rng;
use rand::distr::{Distribution as _, Uniform};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::rings::{PrimeField, Ring as _, Z};
use crate::vector::Vector;

/// An instance of the problem: `A` is `n x k`, `b` has `n` entries and
/// `A * s + e = b` holds for a secret `s` with `k` entries and a small error
/// `e`.
///
/// The fields are only reachable through accessors so that every instance
/// has passed the checks in [`Instance::new`].
#[derive(Clone, Debug)]
pub struct Instance {
    a: Matrix<PrimeField>,
    b: Vector<PrimeField>,
    field: PrimeField,
}

impl Instance {
    /// Creates an instance and checks the shapes.
    ///
    /// There have to be more equations than unknowns, otherwise any `b` is
    /// consistent with a zero error and there is nothing to recover.
    pub fn new(
        a: Matrix<PrimeField>,
        b: Vector<PrimeField>,
        field: PrimeField,
    ) -> Result<Self> {
        if a.is_empty() {
            return Err(Error::Shape("the coefficient matrix is empty".into()));
        }
        if b.dim() != a.num_rows() {
            return Err(Error::Shape(format!(
                "the target has {} entries but there are {} equations",
                b.dim(),
                a.num_rows()
            )));
        }
        if a.num_rows() <= a.num_cols() {
            return Err(Error::Shape(format!(
                "{} equations are not enough for {} unknowns",
                a.num_rows(),
                a.num_cols()
            )));
        }

        Ok(Self { a, b, field })
    }

    /// Computes `b = A * s + e` and returns the resulting instance.
    pub fn plant(
        field: PrimeField,
        a: Matrix<PrimeField>,
        secret: &Vector<PrimeField>,
        error: &Vector<Z>,
    ) -> Result<Self> {
        if secret.dim() != a.num_cols() || error.dim() != a.num_rows() {
            return Err(Error::Shape(format!(
                "cannot plant a secret of length {} and an error of length {} into a {}x{} system",
                secret.dim(),
                error.dim(),
                a.num_rows(),
                a.num_cols()
            )));
        }

        let e = error.transform::<PrimeField, _>(|e| field.element_from_bigint(e));
        let b = a.mul_vec_post(secret, &field).add(&e, &field);
        Self::new(a, b, field)
    }

    /// Samples a uniform `A` with `rows` equations and an error with entries
    /// uniform in `[-error_bound, error_bound]`, and plants `secret`.
    /// Returns the instance and the planted error.
    pub fn random<R: Rng>(
        field: PrimeField,
        rows: usize,
        secret: &Vector<PrimeField>,
        error_bound: i64,
        rng: &mut R,
    ) -> Result<(Self, Vector<Z>)> {
        let a = Matrix::from_fn(rows, secret.dim(), |_, _| field.random(rng));
        let dist = Uniform::new_inclusive(-error_bound, error_bound)
            .map_err(|e| Error::Shape(format!("invalid error bound {error_bound}: {e}")))?;
        let error: Vector<_> = (0..rows).map(|_| BigInt::from(dist.sample(rng))).collect();
        let instance = Self::plant(field, a, secret, &error)?;
        Ok((instance, error))
    }

    /// The coefficient matrix `A`.
    pub fn a(&self) -> &Matrix<PrimeField> {
        &self.a
    }

    /// The right-hand side `b`.
    pub fn b(&self) -> &Vector<PrimeField> {
        &self.b
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// The number of equations.
    pub fn num_equations(&self) -> usize {
        self.a.num_rows()
    }

    /// The number of unknowns, i.e. the length of the secret.
    pub fn secret_dim(&self) -> usize {
        self.a.num_cols()
    }

    /// Does `A * s + e = b` hold in every equation?
    pub fn is_consistent(&self, secret: &Vector<PrimeField>, error: &Vector<PrimeField>) -> bool {
        self.a
            .mul_vec_post(secret, &self.field)
            .add(error, &self.field)
            == self.b
    }
}
