//! Error type shared by every fallible container operation.

use thiserror::Error;

/// Boxed cause of an encoding failure, as produced by a [`KeyCodec`].
///
/// [`KeyCodec`]: crate::KeyCodec
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    /// The key could not be turned into its canonical byte representation,
    /// so it has no slot in any table.
    #[error("key cannot be canonically encoded: {source}")]
    UnsupportedKey {
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub fn unsupported_key(source: impl Into<BoxError>) -> Self {
        Error::UnsupportedKey {
            source: source.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::unsupported_key(e)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
