//! # VS Proto
//!
//! Wire types for Calico's virtual stigmergy gossip protocol: the [`Tuple`]
//! and [`Broadcast`] value types, and the 9-byte [`Codec`] that packs a
//! broadcast for radio transmission.
//!
//! This crate has no engine state. Everything here is a plain data type or a
//! pure function; the stateful table and protocol machinery live in
//! `vs-core`.

pub mod codec;
pub mod constants;
pub mod error;
pub mod tuple;

pub use codec::Codec;
pub use error::{Error, Result};
pub use tuple::{Action, Broadcast, Tuple};
