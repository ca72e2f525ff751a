use thiserror::Error;

use crate::point::LatticePoint;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Model set is empty")]
    EmptyModel,

    #[error("Insufficient model points: need at least {required}, got {actual}")]
    InsufficientModelPoints { required: usize, actual: usize },

    #[error("Degenerate anchors: model points 0 and 1 coincide at {0}")]
    DegenerateAnchors(LatticePoint),

    #[error("Coordinate out of range: {0} has a component beyond {max}", max = LatticePoint::MAX_COORDINATE)]
    CoordinateOutOfRange(LatticePoint),

    #[error("Cannot compute bounds of an empty point set")]
    EmptyPointSet,

    #[error("Search volume {volume} exceeds limit {limit}")]
    SearchVolumeTooLarge { volume: u128, limit: u128 },

    #[error("A search is already running on this engine")]
    EngineBusy,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error was caused by the supplied point sets
    /// (as opposed to the engine's own state)
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::EngineBusy)
    }
}
