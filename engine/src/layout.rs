use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Region of the state vector a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Input = 0,
    Memory = 1,
    Output = 2,
}

/// Fixed partition of the state vector: inputs first, then memory, then outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateLayout {
    pub num_input: usize,
    pub num_memory: usize,
    pub num_output: usize,
}

impl StateLayout {
    pub fn new(num_input: usize, num_memory: usize, num_output: usize) -> Self {
        Self {
            num_input,
            num_memory,
            num_output,
        }
    }

    pub fn total(&self) -> usize {
        self.num_input + self.num_memory + self.num_output
    }

    pub fn input_range(&self) -> Range<usize> {
        0..self.num_input
    }

    pub fn memory_range(&self) -> Range<usize> {
        self.num_input..self.num_input + self.num_memory
    }

    pub fn output_range(&self) -> Range<usize> {
        self.num_input + self.num_memory..self.total()
    }

    pub fn section_of(&self, index: usize) -> Option<Section> {
        if self.input_range().contains(&index) {
            Some(Section::Input)
        } else if self.memory_range().contains(&index) {
            Some(Section::Memory)
        } else if self.output_range().contains(&index) {
            Some(Section::Output)
        } else {
            None
        }
    }
}
