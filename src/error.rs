//! Error types for grid access and the open set.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate fell outside `[0, width) x [0, height)`.
    #[error("({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// `extract_min` was called on an empty open set.
    #[error("extract_min called on an empty open set")]
    EmptyOpenSet,
}

pub type Result<T> = std::result::Result<T, GridError>;
