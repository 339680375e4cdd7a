use tracing::info;
use vs_core::{Agent, TableConfig};

use crate::bus::{Bus, BusHandle};
use crate::config::RunConfig;

/// A small swarm of in-process agents sharing one simulated [`Bus`].
pub struct Swarm {
    agents: Vec<Agent>,
    bus: Bus,
}

impl Swarm {
    pub fn new(config: &RunConfig) -> vs_core::Result<Self> {
        let mut agents = Vec::with_capacity(config.agent_count as usize);
        for i in 0..config.agent_count {
            let mut agent = Agent::new(TableConfig::with_size(config.vs_size))?;
            agent.init(i + 1);
            if let Some(&(x, y)) = config.start_positions.get(i as usize) {
                agent.set_location(x, y);
            }
            agents.push(agent);
        }
        Ok(Self {
            agents,
            bus: Bus::new(),
        })
    }

    pub fn agent(&self, index: usize) -> &Agent {
        &self.agents[index]
    }

    pub fn agent_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    /// One agent writes a key at its current location, broadcasting it onto
    /// the shared bus.
    pub fn put(&mut self, agent_index: usize, key: u8, value: u16) -> vs_core::Result<()> {
        let mut handle = BusHandle {
            bus: &mut self.bus,
            sender: agent_index,
        };
        self.agents[agent_index].put(key, value, &mut handle)
    }

    /// Delivers every broadcast enqueued since the last drain to every agent
    /// other than its sender, looping until the bus goes quiet (a rebroadcast
    /// can itself enqueue further broadcasts).
    pub fn settle(&mut self) {
        loop {
            let envelopes = self.bus.drain();
            if envelopes.is_empty() {
                break;
            }
            for envelope in envelopes {
                for (i, agent) in self.agents.iter_mut().enumerate() {
                    if i == envelope.sender {
                        continue;
                    }
                    let mut handle = BusHandle {
                        bus: &mut self.bus,
                        sender: i,
                    };
                    agent.handle_broadcast(envelope.broadcast, &mut handle);
                }
            }
        }
    }

    pub fn run_ticks(&mut self, ticks: u32) {
        for tick in 0..ticks {
            info!(tick, "settling bus");
            self.settle();
            for agent in &mut self.agents {
                agent.prune();
            }
        }
    }
}
