use std::collections::VecDeque;

use tracing::trace;
use vs_core::{Broadcast, BroadcastTransmitter};

/// An outgoing broadcast tagged with the sender so the bus can skip
/// delivering it back to its own source.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    pub sender: usize,
    pub broadcast: Broadcast,
}

/// An in-memory stand-in for the radio: each agent's transmit hook pushes
/// here instead of touching real hardware, and [`Bus::drain`] hands the
/// queued broadcasts to every other agent.
#[derive(Debug, Default)]
pub struct Bus {
    queue: VecDeque<Envelope>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }
}

/// Binds a [`Bus`] to the agent index transmitting through it, so each
/// agent's `Agent::put`/`get` calls enqueue without the agent needing to
/// know its own index.
pub struct BusHandle<'a> {
    pub bus: &'a mut Bus,
    pub sender: usize,
}

impl BroadcastTransmitter for BusHandle<'_> {
    fn on_broadcast_transmit(&mut self, broadcast: Broadcast) {
        trace!(sender = self.sender, "enqueuing broadcast onto simulated bus");
        self.bus.queue.push_back(Envelope {
            sender: self.sender,
            broadcast,
        });
    }
}
