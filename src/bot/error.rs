use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Classifier error: {0}")]
    Classifier(#[from] reqwest::Error),

    /// Command misuse; the dispatcher turns this into a usage reply.
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        Error::Usage(msg.into())
    }

    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }
}
