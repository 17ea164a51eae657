use thiserror::Error;

#[derive(Error, Debug)]
pub enum WayfinderError {
    #[error("Gazetteer error: {0}")]
    Gazetteer(#[from] crate::gazetteer::GazetteerError),
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
    #[error("Resolution error: {0}")]
    Resolve(#[from] crate::resolve::ResolveError),
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WayfinderError>;
