use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or encoding wire types.
///
/// Decoding is total (see [`crate::Codec::decode`]) and never returns this
/// type; it only guards the handful of genuinely-fallible constructor paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("key {0} exceeds the maximum representable key ({max})", max = crate::constants::MAX_KEY)]
    KeyOutOfRange(u8),
}
