//! Error types for the attack.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Elimination hit a pivot that is zero mod p.
    #[error("pivot in row {row} is not invertible mod p")]
    SingularPivot { row: usize },

    #[error("malformed input: {0}")]
    Shape(String),

    #[error("lattice reduction produced no non-zero vector")]
    EmptyLattice,

    /// None of the shortest lattice vectors makes the system consistent.
    /// Usually the error is too large for the modulus and dimension.
    #[error("no short lattice vector is a consistent error for the system")]
    ErrorNotRecovered,

    #[error("value needs {needed} bytes but the width is {width}")]
    Overflow { needed: usize, width: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
