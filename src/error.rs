pub type StencilResult<T> = Result<T, StencilError>;

#[derive(thiserror::Error, Debug)]
pub enum StencilError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("report error: {0}")]
    Report(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StencilError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }
}
