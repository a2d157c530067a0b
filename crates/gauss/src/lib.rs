mod dense;

pub use dense::solve;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The coefficient matrix and right-hand side do not form a square system.
    #[error(
        "dimension mismatch: matrix is {nrows}x{ncols}, right-hand side has {rhs} entries"
    )]
    DimensionMismatch {
        nrows: usize,
        ncols: usize,
        rhs: usize,
    },

    /// A zero pivot was selected during elimination; the system has no unique
    /// solution.
    #[error("A singular matrix was encountered during elimination (col {col})")]
    SingularMatrix { col: usize },
}
