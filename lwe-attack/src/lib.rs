//! Recovers the secret of a linear system mod p with a small additive error,
//! `A * s + e = b (mod p)`, using modular elimination and LLL.
//!
//! The entry point is [`recovery::recover_secret`].

pub mod encoding;
pub mod error;
pub mod instance;
pub mod lattice;
pub mod matrix;
pub mod recovery;
pub mod rings;
pub mod solver;
pub mod vector;

pub use error::{Error, Result};
