use thiserror::Error;
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
    #[error("channel {channel} has a zero peak; it cannot be normalized")]
    DegenerateNormalization { channel: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
impl FigureError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FigureError::InvalidParameter(msg.into())
    }
    /// Shorthand for comparing two lengths that must agree.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), FigureError> {
        if expected == actual {
            Ok(())
        } else {
            Err(FigureError::InvalidDimension { expected, actual })
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for FigureError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        FigureError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for FigureError {
    fn from(value: image::ImageError) -> Self {
        FigureError::Plot(value.to_string())
    }
}
