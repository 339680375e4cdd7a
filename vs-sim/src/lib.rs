//! Demo harness for Calico virtual stigmergy: runs a handful of in-process
//! agents exchanging broadcasts over a simulated radio bus, for manual
//! experimentation and for exercising end-to-end gossip scenarios outside of
//! unit tests. Not part of the VS core's public contract.

pub mod bus;
pub mod config;
pub mod sim;

pub use bus::{Bus, BusHandle, Envelope};
pub use config::RunConfig;
pub use sim::Swarm;
