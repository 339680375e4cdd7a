use tracing::trace;
use vs_proto::{Action, Broadcast, Codec, Tuple};

use crate::config::TableConfig;
use crate::conflict::{ConflictResolver, LargestIdWins};
use crate::error::Result;
use crate::protocol::{self, Outcome};
use crate::table::Table;

/// The host-implemented hook VS calls whenever it needs to emit a
/// broadcast. The host owns radio queuing and scheduling; VS calls this at
/// most once per inbound broadcast it rebroadcasts, and at most once per
/// local `put`/`get`.
pub trait BroadcastTransmitter {
    fn on_broadcast_transmit(&mut self, broadcast: Broadcast);
}

/// A no-op transmitter, useful for tests and for agents that only read.
#[derive(Debug, Default)]
pub struct NullTransmitter;

impl BroadcastTransmitter for NullTransmitter {
    fn on_broadcast_transmit(&mut self, _broadcast: Broadcast) {}
}

/// One virtual stigmergy participant: owns a [`Table`], the local id and
/// position, and a [`ConflictResolver`].
///
/// `R` is the conflict-resolution policy, defaulted to [`LargestIdWins`];
/// swapping it never touches table or protocol code, matching the pluggable
/// comparator capability called for in the design notes.
pub struct Agent<R: ConflictResolver = LargestIdWins> {
    table: Table,
    local_id: u8,
    initialized: bool,
    resolver: R,
}

impl Agent<LargestIdWins> {
    /// Constructs an agent with the default conflict resolver. Must still be
    /// [`Agent::init`]ed before `local_id` is meaningful.
    pub fn new(config: TableConfig) -> Result<Self> {
        Self::with_resolver(config, LargestIdWins)
    }
}

impl<R: ConflictResolver> Agent<R> {
    pub fn with_resolver(config: TableConfig, resolver: R) -> Result<Self> {
        Ok(Self {
            table: Table::new(config)?,
            local_id: 0,
            initialized: false,
            resolver,
        })
    }

    /// Idempotent: the first call sets `local_id` and returns `true`;
    /// subsequent calls return `false` without side effect.
    pub fn init(&mut self, local_id: u8) -> bool {
        if self.initialized {
            return false;
        }
        self.local_id = local_id;
        self.initialized = true;
        true
    }

    pub fn local_id(&self) -> u8 {
        self.local_id
    }

    pub fn location_x(&self) -> u8 {
        self.table.location().0
    }

    pub fn location_y(&self) -> u8 {
        self.table.location().1
    }

    pub fn set_location(&mut self, x: u8, y: u8) {
        self.table.set_location(x, y);
    }

    pub fn has(&self, key: u8) -> bool {
        self.table.has(key)
    }

    pub fn size(&self) -> usize {
        self.table.size()
    }

    /// Equivalent to `put_at(key, value, location_x(), location_y())`.
    pub fn put(&mut self, key: u8, value: u16, transmitter: &mut impl BroadcastTransmitter) -> Result<()> {
        let (x, y) = self.table.location();
        self.put_at(key, value, x, y, transmitter)
    }

    pub fn put_at(
        &mut self,
        key: u8,
        value: u16,
        pos_x: u8,
        pos_y: u8,
        transmitter: &mut impl BroadcastTransmitter,
    ) -> Result<()> {
        let mut tuple = self.table.retrieve(key, true);
        tuple.id = self.local_id;
        tuple.timestamp = tuple.timestamp.wrapping_add(1);
        tuple.key = key;
        tuple.value = value;
        tuple.pos_x = pos_x;
        tuple.pos_y = pos_y;

        self.table.insert(key, tuple, true);
        self.broadcast(key, Action::Put, transmitter)
    }

    /// Equivalent to `get_tuple(key).value`.
    pub fn get(&mut self, key: u8, transmitter: &mut impl BroadcastTransmitter) -> Result<u16> {
        Ok(self.get_tuple(key, transmitter)?.value)
    }

    /// Reads `key`, promoting it to active if it was only held passively,
    /// and emits a GET broadcast so peers can refresh us if we're stale.
    pub fn get_tuple(&mut self, key: u8, transmitter: &mut impl BroadcastTransmitter) -> Result<Tuple> {
        let tuple = self.table.retrieve(key, true);
        self.broadcast(key, Action::Get, transmitter)?;
        Ok(tuple)
    }

    /// Every valid tuple within `radius` of `(pos_x, pos_y)`.
    pub fn get_tuple_at(&self, pos_x: u8, pos_y: u8, radius: u8) -> Vec<Tuple> {
        self.table.scan_within(pos_x, pos_y, radius)
    }

    /// Removes tuples that have aged out or drifted out of range. Not
    /// called implicitly by `handle_broadcast`; a host should call this
    /// from its own periodic tick if it wants pruning at all.
    pub fn prune(&mut self) {
        self.table.prune();
    }

    /// The single inbound entry point: decodes `frame`, and if it is a VS
    /// broadcast, runs it through the protocol state machine.
    ///
    /// Returns `false` if `frame` was not a VS broadcast (mirroring
    /// `decodeVsBroadcast`'s boolean), `true` otherwise.
    pub fn on_broadcast_received(
        &mut self,
        frame: &[u8; 9],
        transmitter: &mut impl BroadcastTransmitter,
    ) -> bool {
        let Some(broadcast) = Codec::decode(frame) else {
            return false;
        };
        self.handle_broadcast(broadcast, transmitter);
        true
    }

    /// Runs the protocol state machine for an already-decoded broadcast.
    pub fn handle_broadcast(&mut self, broadcast: Broadcast, transmitter: &mut impl BroadcastTransmitter) {
        let key = broadcast.tuple.key;
        let outcome = protocol::handle_inbound(
            &mut self.table,
            &mut self.resolver,
            self.local_id,
            key,
            broadcast.action,
            broadcast.tuple,
        );

        if let Outcome::RebroadcastPut(tuple) = outcome {
            if let Ok(out) = Broadcast::new(Action::Put, tuple) {
                transmitter.on_broadcast_transmit(out);
            }
        }
    }

    fn broadcast(&mut self, key: u8, action: Action, transmitter: &mut impl BroadcastTransmitter) -> Result<()> {
        let tuple = self.table.retrieve(key, false);
        let outgoing = if tuple.is_present() {
            tuple
        } else {
            Tuple::default_for(key, self.local_id)
        };
        let broadcast = Broadcast::new(action, outgoing)?;
        trace!(key, action = ?action, "emitting broadcast");
        transmitter.on_broadcast_transmit(broadcast);
        Ok(())
    }
}
