use serde::{Deserialize, Serialize};
use std::io;
use std::io::Write;
use std::path::Path;

/// A small saved run configuration: how many agents to simulate, where they
/// start, and how many ticks to run before exiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub agent_count: u8,
    pub start_positions: Vec<(u8, u8)>,
    pub ticks: u32,
    pub vs_size: u8,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            agent_count: 2,
            start_positions: vec![(0, 0), (10, 10)],
            ticks: 10,
            vs_size: 8,
        }
    }
}

pub fn load_config(path: &Path) -> RunConfig {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|data| serde_json::from_str::<RunConfig>(&data).ok())
        .unwrap_or_default()
}

pub fn save_config(path: &Path, config: &RunConfig) -> io::Result<()> {
    let data = serde_json::to_string_pretty(config)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(data.as_bytes())
}
