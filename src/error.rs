use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("invalid bound {0}: must be positive")]
    InvalidBound(i64),

    #[error("invalid width {0}: must be positive")]
    InvalidWidth(i64),

    #[error("invalid style: {0}")]
    InvalidStyle(&'static str),

    #[error("failed to write progress output: {0}")]
    Output(#[from] std::io::Error),
}
