use std::fmt;
use thiserror::Error;

/// Coarse classification shared by the estimator and metrics errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural contract violation: mismatched lengths or too few points.
    InvalidInput,
    /// No unique least-squares line exists for the input.
    DegenerateInput,
    /// The estimator was used before a successful fit.
    NotFitted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::DegenerateInput => write!(f, "degenerate input"),
            ErrorKind::NotFitted => write!(f, "not fitted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    LengthMismatch { len_x: usize, len_y: usize },
    #[error("not enough points: got {len}, need at least {needed}")]
    NotEnoughPoints { len: usize, needed: usize },
    #[error("degenerate x: no variance in x")]
    DegenerateX,
    #[error("model must be fitted before use")]
    NotFitted,
}

impl FitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FitError::LengthMismatch { .. } | FitError::NotEnoughPoints { .. } => {
                ErrorKind::InvalidInput
            },
            FitError::DegenerateX => ErrorKind::DegenerateInput,
            FitError::NotFitted => ErrorKind::NotFitted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("y_true and y_pred have different lengths: {len_true} vs {len_pred}")]
    LengthMismatch { len_true: usize, len_pred: usize },
    #[error("metrics need at least one observation")]
    Empty,
}

impl MetricsError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl From<MetricsError> for FitError {
    fn from(e: MetricsError) -> Self {
        match e {
            MetricsError::LengthMismatch { len_true, len_pred } => {
                FitError::LengthMismatch { len_x: len_pred, len_y: len_true }
            },
            MetricsError::Empty => FitError::NotEnoughPoints { len: 0, needed: 1 },
        }
    }
}

pub type FitResult<T> = Result<T, FitError>;
pub type MetricsResult<T> = Result<T, MetricsError>;
