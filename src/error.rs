//! Error type shared by every module of the crate.

use thiserror::Error;

/// Everything that can go wrong in `yanggang`.
///
/// Only [`Error::Clipboard`] can happen after a report has been produced; the
/// CLI treats it as a warning. The other variants are input errors raised at
/// the command boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("clipboard: {0}")]
    Clipboard(String),

    #[error("unknown option: {0:?} (see `yanggang options`)")]
    UnknownOption(String),

    #[error("sales amount is required")]
    MissingAmount,

    #[error("invalid sales amount: {0:?}")]
    InvalidAmount(String),

    #[error("invalid timestamp {0:?}, expected \"YYYY-MM-DD HH:MM\"")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
