use thiserror::Error;

/// Failure taxonomy shared by the clients, the parser and the store.
///
/// The HTTP service maps these onto status codes; the CLI prints them
/// through `anyhow`.
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential or contact value is missing.
    #[error("{0}")]
    Config(String),

    /// The caller supplied something unusable (bad coordinate syntax,
    /// out-of-range values, an address no upstream knows).
    #[error("{0}")]
    InvalidInput(String),

    /// An upstream service was unreachable or answered with a
    /// non-success status.
    #[error("error contacting {service}: {detail}")]
    Connectivity {
        service: &'static str,
        detail: String,
    },

    /// An upstream service answered 2xx but the payload did not have the
    /// expected shape.
    #[error("malformed response from {service}: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },

    /// The persistence layer failed; any open transaction has already
    /// been rolled back.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn connectivity(service: &'static str, detail: impl ToString) -> Self {
        Error::Connectivity { service, detail: detail.to_string() }
    }

    pub(crate) fn malformed(service: &'static str, detail: impl ToString) -> Self {
        Error::MalformedResponse { service, detail: detail.to_string() }
    }
}
