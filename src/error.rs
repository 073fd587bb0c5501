//! The crate level error type shared by the API client, session storage and
//! report export.

/// The errors that may occur in the dashboard.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was left empty.
    ///
    /// The field name is the user facing label, e.g. "category".
    #[error("the {0} field is required")]
    MissingField(&'static str),

    /// The amount typed into the form is not a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a status the endpoint does not accept.
    ///
    /// `message` holds the `message` field of the JSON error body when the
    /// server sent one.
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The response body did not match the schema expected for the endpoint.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Local storage is unavailable or holds a malformed session record.
    #[error("session storage error: {0}")]
    Storage(String),

    /// The report could not be handed to the browser for download.
    #[error("could not export report: {0}")]
    Report(String),
}

impl Error {
    /// The text to show the user: the server provided message if there is
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<gloo_net::Error> for Error {
    fn from(error: gloo_net::Error) -> Self {
        Error::Network(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Decode(error.to_string())
    }
}
