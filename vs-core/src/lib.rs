//! # VS Core
//!
//! The stateful half of Calico's virtual stigmergy: a fixed-capacity
//! dual-segment [`Table`], the inbound gossip [`Protocol`] state machine,
//! pluggable [`ConflictResolver`]s, and the [`Agent`] facade tying them
//! together behind the put/get surface a swarm agent actually calls.
//!
//! ## Architecture
//!
//! - **Table**: active/passive segments sharing one fixed-size array, with
//!   age-based eviction on the active side and distance-based eviction on
//!   the passive side.
//! - **Protocol**: compares an inbound broadcast's timestamp against the
//!   locally-held one and decides whether to insert, rebroadcast, resolve a
//!   conflict, or ignore.
//! - **Agent**: owns one `Table`, the local id and position, and a
//!   `ConflictResolver`; exposes `put`/`get`/`has`/`size`/... and the single
//!   inbound entry point `handle_broadcast`.
//!
//! This crate has no global or static state; every agent is an explicit
//! value a host constructs and owns.

pub mod agent;
pub mod config;
pub mod conflict;
pub mod error;
pub mod protocol;
pub mod table;

pub use agent::{Agent, BroadcastTransmitter, NullTransmitter};
pub use config::TableConfig;
pub use conflict::{ConflictResolver, LargestIdWins};
pub use error::{Error, Result};
pub use table::Table;

pub use vs_proto::{Action, Broadcast, Codec, Tuple};
