use thiserror::Error;

#[derive(Error, Debug)]
pub enum KaifongError {
    #[error("Index error: {0}")]
    IndexError(#[from] crate::index::IndexError),
    #[error("Taxonomy error: {0}")]
    TaxonomyError(#[from] kaifong_districts::TaxonomyError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, KaifongError>;
