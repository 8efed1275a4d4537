//! Recovers the secret of a noisy linear system with a small error.
//!
//! The attack runs in three steps:
//! 1. Solve `[A | I | b]` to get some `s'` and `E` with `A * s' + E = b`.
//!    `E` differs from the real error `e` by an element of the column space
//!    of `A`.
//! 2. So `e` lies in the lattice of integer vectors that are, mod p, in the
//!    span of the columns of `A` and `E`. It is much shorter than everything
//!    else in there, so LLL finds it.
//! 3. Solve `A * s = b - e` to get the secret.

use num_rational::BigRational;
use tracing::{debug, info, warn};

use crate::encoding::to_fixed_bytes;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::lattice::Lattice;
use crate::rings::{Float, PrimeField, Ring as _, Z};
use crate::solver::{augment, augment_with_identity, solve_mod_p};
use crate::vector::Vector;

/// Tunables of the attack.
#[derive(Clone, Debug)]
pub struct RecoveryParams {
    /// Width of the byte strings the secret components are encoded as.
    pub byte_width: usize,

    /// The LLL parameter. The reduction itself runs in [`Float`].
    pub delta: BigRational,
}

impl Default for RecoveryParams {
    fn default() -> Self {
        Self {
            byte_width: 50,
            delta: BigRational::new(99.into(), 100.into()),
        }
    }
}

/// The result of a successful attack.
#[derive(Clone, Debug)]
pub struct Recovery {
    pub secret: Vector<PrimeField>,
    pub error: Vector<Z>,
}

impl Recovery {
    /// Encodes every secret component as a big-endian string of `width`
    /// bytes.
    pub fn fragments(&self, width: usize) -> Result<Vec<Vec<u8>>> {
        self.secret.iter().map(|s| to_fixed_bytes(s, width)).collect()
    }
}

/// Solves `[A | I | b]` and returns the part of the solution that belongs
/// to the identity block. It has one entry per equation and satisfies
/// `b - E in col(A)`.
///
/// The first `k` pivots are those of the leading `k x k` block of `A`, so if
/// that block is singular this fails with [`Error::SingularPivot`].
pub fn estimate_error(inst: &Instance) -> Result<Vector<PrimeField>> {
    let k = inst.secret_dim();
    let n = inst.num_equations();
    let x = solve_mod_p(&augment_with_identity(inst.a(), inst.b()), inst.field())?;
    Ok(x.slice(k..k + n))
}

/// The lattice spanned by the columns of `A`, the error estimate and
/// `p * Z^n`.
pub fn error_lattice(inst: &Instance, estimate: &Vector<PrimeField>) -> Result<Lattice> {
    if estimate.dim() != inst.num_equations() {
        return Err(Error::Shape(format!(
            "error estimate has {} entries but there are {} equations",
            estimate.dim(),
            inst.num_equations()
        )));
    }

    let mut generators = inst.a().transposed();
    generators.append_row(estimate.clone());
    Lattice::q_ary(&generators, inst.field())
}

/// Solves the first `k` equations with the error removed from the
/// right-hand side.
pub fn solve_corrected(inst: &Instance, error: &Vector<Z>) -> Result<Vector<PrimeField>> {
    let f = inst.field();
    let k = inst.secret_dim();
    if error.dim() != inst.num_equations() {
        return Err(Error::Shape(format!(
            "error has {} entries but there are {} equations",
            error.dim(),
            inst.num_equations()
        )));
    }

    let rhs: Vector<PrimeField> = inst
        .b()
        .iter()
        .zip(error)
        .take(k)
        .map(|(b, e)| f.sub(b.clone(), &f.element_from_bigint(e)))
        .collect();
    solve_mod_p(&augment(&inst.a().first_rows(k), &rhs), f)
}

/// Is `error` the error of `inst` for some secret?
fn is_valid_error(inst: &Instance, error: &Vector<Z>) -> Result<bool> {
    let secret = solve_corrected(inst, error)?;
    let f = inst.field();
    let e = error.transform::<PrimeField, _>(|e| f.element_from_bigint(e));
    Ok(inst.is_consistent(&secret, &e))
}

/// Finds the short error of `inst`.
///
/// The shortest vectors of the reduced lattice are tried in basis order,
/// each first as is and then negated. The first one for which every
/// equation is consistent is returned.
///
/// A singular leading block of `A` is an [`Error::SingularPivot`], and
/// [`Error::ErrorNotRecovered`] means no candidate fit.
pub fn recover_error(inst: &Instance, params: &RecoveryParams) -> Result<Vector<Z>> {
    let estimate = estimate_error(inst)?;
    let mut lattice = error_lattice(inst, &estimate)?;
    info!(dim = lattice.rank(), "reducing error lattice");
    let swaps = lattice.lll(&params.delta, &Float)?;
    debug!(swaps, "reduced error lattice");

    let candidates = lattice.shortest_nonzero();
    if candidates.is_empty() {
        return Err(Error::EmptyLattice);
    }
    if candidates.len() > 1 {
        warn!(
            count = candidates.len(),
            norm_sqr = %candidates[0].norm_sqr(&Z),
            "several shortest vectors, trying them in basis order"
        );
    }

    for v in candidates {
        for candidate in [v.clone(), v.clone().neg(&Z)] {
            if is_valid_error(inst, &candidate)? {
                return Ok(candidate);
            }
        }
    }

    Err(Error::ErrorNotRecovered)
}

/// Runs the whole attack.
pub fn recover_secret(inst: &Instance, params: &RecoveryParams) -> Result<Recovery> {
    info!(
        equations = inst.num_equations(),
        unknowns = inst.secret_dim(),
        modulus_bits = inst.field().modulus().bits(),
        "recovering secret"
    );
    let error = recover_error(inst, params)?;
    let secret = solve_corrected(inst, &error)?;
    info!("secret recovered");
    Ok(Recovery { secret, error })
}
