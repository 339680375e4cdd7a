use crate::constants::MAX_KEY;
use crate::error::{Error, Result};

/// A versioned key/value record with spatial and identity metadata.
///
/// `timestamp == 0` marks a tuple as uninitialised/empty; `last_accessed` is
/// local bookkeeping and is never transmitted over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tuple {
    pub key: u8,
    pub value: u16,
    pub pos_x: u8,
    pub pos_y: u8,
    pub id: u8,
    pub timestamp: u16,
    pub last_accessed: u64,
}

impl Tuple {
    /// An empty tuple: `timestamp == 0`, every other field zeroed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A default tuple for a key this agent has no data for, carrying only
    /// the key and the local agent id (used when a GET is emitted for an
    /// unknown key).
    pub fn default_for(key: u8, local_id: u8) -> Self {
        Self {
            key,
            id: local_id,
            ..Self::default()
        }
    }

    pub fn is_present(&self) -> bool {
        self.timestamp > 0
    }
}

/// The action carried by a [`Broadcast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Put,
}

/// A transient record carrying one tuple plus the action it was sent under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broadcast {
    pub action: Action,
    pub tuple: Tuple,
}

impl Broadcast {
    pub fn new(action: Action, tuple: Tuple) -> Result<Self> {
        if tuple.key > MAX_KEY {
            return Err(Error::KeyOutOfRange(tuple.key));
        }
        Ok(Self { action, tuple })
    }
}
