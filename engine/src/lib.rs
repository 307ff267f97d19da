pub mod config;
pub mod decoder;
pub mod error;
pub mod gate;
pub mod genome;
pub mod layout;
pub mod network;
pub mod topology;

pub use config::{NetworkConfig, MAX_GATE_WIDTH};
pub use decoder::{decode, decode_with_stats, DecodeStats};
pub use error::{ConfigError, NetworkError};
pub use gate::{Gate, GateTable, TableMode};
pub use genome::{Genome, GATE_MARKER};
pub use layout::{Section, StateLayout};
pub use network::MarkovNetwork;
pub use topology::{feedback_cells, wiring_graph};
