use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing a [`crate::Table`] or [`crate::Agent`].
///
/// Construction is the only fallible step; once a table exists, absent keys,
/// capacity pressure, and malformed frames are all plain values to handle
/// inline, not errors to propagate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("VS_SIZE {0} is outside the supported range 8..=64")]
    SizeOutOfRange(u8),

    #[error(
        "VS_SIZE_MIN_ACTIVE ({min_active}) + VS_SIZE_MIN_PASSIVE ({min_passive}) exceeds VS_SIZE ({vs_size})"
    )]
    ReservationsExceedSize {
        vs_size: u8,
        min_active: u8,
        min_passive: u8,
    },

    #[error(transparent)]
    Proto(#[from] vs_proto::Error),
}
