use thiserror::Error;

pub type Result<T> = std::result::Result<T, FiniteDiffError>;

/// Errors reported by weight generation, weight application and the batch driver.
#[derive(Debug, Error)]
pub enum FiniteDiffError {
    /// Grid (or window) holds fewer points than the requested stencil needs.
    #[error("grid too small: need at least {required} points, got {actual}")]
    TooSmallGrid { required: usize, actual: usize },

    /// Window width `ntail + nhead` cannot resolve the requested derivative order.
    #[error("too few points in window: need at least {required}, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("leading dimension of {name} must be at least {required}, got {actual}")]
    WrongLeadingDimension {
        name: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("buffer {name} too short: need {required} elements, got {actual}")]
    BufferTooShort {
        name: &'static str,
        required: usize,
        actual: usize,
    },

    /// Scratch buffer could not be reserved.
    #[error("failed to allocate scratch space for {elements} elements")]
    AllocationFailed { elements: usize },

    #[error("invalid worker count: {0}")]
    InvalidWorkerCount(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("values are not strictly increasing at index {index}")]
    NotMonotonic { index: usize },
}

/// Allocates a zeroed buffer, reporting failure instead of aborting.
pub(crate) fn try_zeroed(elements: usize) -> Result<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(elements)
        .map_err(|_| FiniteDiffError::AllocationFailed { elements })?;
    buffer.resize(elements, 0.0);
    Ok(buffer)
}
