//! The kinds of numbers
//! ([rings](https://en.wikipedia.org/wiki/Ring_(mathematics))) the attack
//! works with.
//!
//! The most important trait is [`Ring`] which stores information about the
//! ring we are working in, and all operations on the ring are implemented in
//! this trait. For [`Z`] and [`Q`] it is empty, for [`PrimeField`] it
//! contains the modulus.
//!
//! An instance of [`Ring`] needs to be passed to any function that uses the
//! ring. This seems unnecessary for [`Z`] but for [`PrimeField`] we don't know
//! how to (e.g.) add elements otherwise. The other option would be to store
//! the modulus with every element which would waste memory, and we'd have to
//! check that the moduli are equal for every arithmetic operation.
//!
//! Four rings show up in the attack:
//! - [`PrimeField`]: the public system `A·s + e = b` lives here.
//! - [`Z`]: lattice bases and the recovered error.
//! - [`Q`]: exact Gram-Schmidt coefficients.
//! - [`Float`]: approximate Gram-Schmidt coefficients, which is what LLL
//!   normally works with.

mod float;
mod integers;
mod prime_field;
mod rationals;
mod traits;

pub use float::*;
pub use integers::*;
pub use prime_field::*;
pub use rationals::*;
pub use traits::*;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};

impl_ring_element!(BigUint);
impl_ring_element!(BigInt);
impl_ring_element!(BigRational);

/// Negates an element without allocating. There should really be a `NegAssign`
/// trait for this in `num_traits`.
pub(crate) fn neg_assign<T: std::ops::Neg<Output = T> + Default>(e: &mut T) {
    *e = -std::mem::take(e);
}

/// Negates the element mod m without allocating.
/// See [`neg_assign`].
pub(crate) fn neg_assign_mod(e: &mut BigUint, m: &BigUint) {
    if Zero::is_zero(e) {
        return;
    }
    *e = m - std::mem::take(e);
}

/// When `m` is guaranteed to be in `[0, 2n)` where `n` is the modulus,
/// reduce mod n. Checking `m >= n` and subtracting is cheaper than `%`.
pub(crate) fn reduce_simple(m: &mut BigUint, n: &BigUint) {
    if &*m >= n {
        *m -= n;
    }
}
