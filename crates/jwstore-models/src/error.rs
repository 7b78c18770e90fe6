use jwstore::ErrorKind;
use thiserror::Error;

/// Errors from decoding signed fields of API responses
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("response has no {0}")]
    MissingSignedData(&'static str),
    #[error(transparent)]
    Verification(#[from] jwstore::Error),
}

impl DecodeError {
    /// Kind of the underlying verification failure, if verification ran
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::MissingSignedData(_) => None,
            Self::Verification(e) => Some(e.kind()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
