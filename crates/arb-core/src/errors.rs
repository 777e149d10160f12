/// Core error type for the relay bot.
///
/// Adapter crates map their specific errors into this type so the relay can
/// tell user-correctable input apart from startup and transport failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
