use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("legend auto-padding did not converge after {passes} layout passes")]
    LayoutNotConverged { passes: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
