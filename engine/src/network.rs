use std::ops::Range;

use bitvec::prelude::*;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::NetworkConfig;
use crate::decoder::decode_with_stats;
use crate::error::NetworkError;
use crate::gate::{Gate, TableMode};
use crate::genome::Genome;
use crate::layout::StateLayout;

/// A genome-encoded network of probabilistic or deterministic logic gates
/// over a fixed vector of binary states.
#[derive(Debug, Clone)]
pub struct MarkovNetwork {
    layout: StateLayout,
    mode: TableMode,
    genome: Genome,
    gates: Vec<Gate>,
    states: BitVec<u8, Lsb0>,
    rng: ChaCha8Rng,
}

impl MarkovNetwork {
    /// Validate `config`, obtain the genome (explicit or random) and decode
    /// its gates. All states start `false`.
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate()?;
        let layout = config.layout();
        let mode = TableMode::from_probabilistic(config.probabilistic);
        let mut rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let genome = match config.genome {
            Some(bytes) => Genome::new(bytes),
            None => Genome::random(
                config.random_genome_length,
                config.seed_gate_count,
                &mut rng,
            ),
        };
        let (gates, stats) = decode_with_stats(
            genome.as_bytes(),
            layout.total(),
            mode,
            config.max_gate_inputs,
            config.max_gate_outputs,
        );
        tracing::debug!(
            inputs = layout.num_input,
            memory = layout.num_memory,
            outputs = layout.num_output,
            gates = gates.len(),
            truncated = stats.truncated,
            ?mode,
            "built markov network"
        );
        Ok(Self {
            layout,
            mode,
            genome,
            gates,
            states: bitvec![u8, Lsb0; 0; layout.total()],
            rng,
        })
    }

    /// Overwrite the input cells. Any value other than `V::default()` counts
    /// as `true`. Nothing changes on a length mismatch.
    pub fn update_input_states<V>(&mut self, values: &[V]) -> Result<(), NetworkError>
    where
        V: Copy + PartialEq + Default,
    {
        if values.len() != self.layout.num_input {
            return Err(NetworkError::InputLengthMismatch {
                expected: self.layout.num_input,
                actual: values.len(),
            });
        }
        for (i, v) in values.iter().enumerate() {
            self.states.set(i, *v != V::default());
        }
        Ok(())
    }

    /// Run `rounds` sequential passes over the gates, drawing from the
    /// network's own generator.
    pub fn activate(&mut self, rounds: usize) {
        run_rounds(
            &self.gates,
            &mut self.states,
            self.layout.input_range(),
            rounds,
            &mut self.rng,
        );
    }

    /// Same as [`MarkovNetwork::activate`] with caller-supplied draws.
    pub fn activate_with_rng(&mut self, rounds: usize, rng: &mut dyn RngCore) {
        run_rounds(
            &self.gates,
            &mut self.states,
            self.layout.input_range(),
            rounds,
            rng,
        );
    }

    pub fn get_output_states(&self) -> Vec<bool> {
        self.states[self.layout.output_range()].iter().by_vals().collect()
    }

    /// Clear every cell, inputs included.
    pub fn reset_states(&mut self) {
        self.states.fill(false);
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn num_input_states(&self) -> usize {
        self.layout.num_input
    }

    pub fn num_memory_states(&self) -> usize {
        self.layout.num_memory
    }

    pub fn num_output_states(&self) -> usize {
        self.layout.num_output
    }

    pub fn layout(&self) -> StateLayout {
        self.layout
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn states(&self) -> &BitSlice<u8, Lsb0> {
        &self.states
    }
}

/// Gates run in discovery order against one shared state vector, so a gate
/// sees every write made earlier in the same round. Inputs are put back to
/// their pre-activation values after each round.
fn run_rounds(
    gates: &[Gate],
    states: &mut BitSlice<u8, Lsb0>,
    inputs: Range<usize>,
    rounds: usize,
    rng: &mut dyn RngCore,
) {
    let saved_inputs = states[inputs.clone()].to_bitvec();
    for round in 0..rounds {
        for (idx, gate) in gates.iter().enumerate() {
            let roll: f64 = rng.gen();
            let column = gate.fire(states, roll);
            tracing::trace!(round, gate = idx, column, "fired gate");
        }
        states[inputs.clone()].copy_from_bitslice(&saved_inputs);
    }
}
