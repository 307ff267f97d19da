use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::StateLayout;

/// Widest gate the decoder accepts on either side.
pub const MAX_GATE_WIDTH: usize = 8;

/// Parameters for constructing a [`crate::MarkovNetwork`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of caller-driven input cells at the front of the state vector.
    pub num_input_states: usize,
    /// Number of internal memory cells between inputs and outputs.
    pub num_memory_states: usize,
    /// Number of output cells at the end of the state vector.
    pub num_output_states: usize,
    /// Length of the randomly generated genome. Ignored when `genome` is set.
    pub random_genome_length: usize,
    /// Marker pairs written into a random genome so it starts with a few
    /// gates. Seeds landing on the same offset collapse into one gate.
    /// Ignored when `genome` is set.
    pub seed_gate_count: usize,
    /// Probabilistic gates sample from cumulative rows; deterministic gates
    /// always pick the row's largest raw byte.
    pub probabilistic: bool,
    pub max_gate_inputs: usize,
    pub max_gate_outputs: usize,
    /// Seed for genome generation and activation draws. `None` seeds from
    /// the operating system.
    pub rng_seed: Option<u64>,
    /// Explicit genome to decode instead of a random one.
    pub genome: Option<Vec<u8>>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            num_input_states: 1,
            num_memory_states: 0,
            num_output_states: 1,
            random_genome_length: 10_000,
            seed_gate_count: 4,
            probabilistic: true,
            max_gate_inputs: 4,
            max_gate_outputs: 4,
            rng_seed: None,
            genome: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(num_input_states: usize, num_memory_states: usize, num_output_states: usize) -> Self {
        Self {
            num_input_states,
            num_memory_states,
            num_output_states,
            ..Self::default()
        }
    }

    pub fn with_genome(mut self, genome: impl Into<Vec<u8>>) -> Self {
        self.genome = Some(genome.into());
        self
    }

    pub fn with_random_genome(mut self, length: usize, seed_gate_count: usize) -> Self {
        self.genome = None;
        self.random_genome_length = length;
        self.seed_gate_count = seed_gate_count;
        self
    }

    pub fn with_probabilistic(mut self, probabilistic: bool) -> Self {
        self.probabilistic = probabilistic;
        self
    }

    pub fn with_gate_width(mut self, max_inputs: usize, max_outputs: usize) -> Self {
        self.max_gate_inputs = max_inputs;
        self.max_gate_outputs = max_outputs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn layout(&self) -> StateLayout {
        StateLayout::new(
            self.num_input_states,
            self.num_memory_states,
            self.num_output_states,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_input_states == 0 {
            return Err(ConfigError::NoInputStates);
        }
        if self.num_output_states == 0 {
            return Err(ConfigError::NoOutputStates);
        }
        if !(1..=MAX_GATE_WIDTH).contains(&self.max_gate_inputs) {
            return Err(ConfigError::GateInputsOutOfRange(self.max_gate_inputs));
        }
        if !(1..=MAX_GATE_WIDTH).contains(&self.max_gate_outputs) {
            return Err(ConfigError::GateOutputsOutOfRange(self.max_gate_outputs));
        }
        if self.genome.is_none() && self.seed_gate_count > 0 && self.random_genome_length < 2 {
            return Err(ConfigError::GenomeTooShort(self.random_genome_length));
        }
        Ok(())
    }
}
