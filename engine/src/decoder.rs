//! Genome scanning.
//!
//! Each gate is encoded as
//!
//! ```text
//! 42 213 | n_in n_out | in_addr[max_in] | out_addr[max_out] | table[2^in * 2^out]
//! ```
//!
//! The scan advances one byte at a time whether or not a gate was decoded, so
//! marker pairs inside an earlier gate's body start further, overlapping gates.

use serde::Serialize;

use crate::gate::{Gate, GateTable, TableMode};
use crate::genome::GATE_MARKER;

/// Counters collected during one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Marker pairs seen.
    pub markers: usize,
    /// Gates produced.
    pub decoded: usize,
    /// Markers too close to the end of the genome to hold a gate.
    pub truncated: usize,
}

/// Decode every gate in `genome`, in discovery order.
pub fn decode(
    genome: &[u8],
    total_states: usize,
    mode: TableMode,
    max_inputs: usize,
    max_outputs: usize,
) -> Vec<Gate> {
    decode_with_stats(genome, total_states, mode, max_inputs, max_outputs).0
}

pub fn decode_with_stats(
    genome: &[u8],
    total_states: usize,
    mode: TableMode,
    max_inputs: usize,
    max_outputs: usize,
) -> (Vec<Gate>, DecodeStats) {
    let mut gates = Vec::new();
    let mut stats = DecodeStats::default();

    for start in 0..genome.len().saturating_sub(1) {
        if genome[start..start + 2] != GATE_MARKER {
            continue;
        }
        stats.markers += 1;
        match decode_gate(genome, start + 2, total_states, mode, max_inputs, max_outputs) {
            Some(gate) => {
                tracing::trace!(
                    offset = start,
                    inputs = gate.input_addresses.len(),
                    outputs = gate.output_addresses.len(),
                    "decoded gate"
                );
                gates.push(gate);
            }
            None => {
                tracing::trace!(offset = start, "gate body runs past end of genome");
                stats.truncated += 1;
            }
        }
    }
    stats.decoded = gates.len();

    tracing::debug!(
        genome_len = genome.len(),
        markers = stats.markers,
        decoded = stats.decoded,
        truncated = stats.truncated,
        "decoded genome"
    );
    (gates, stats)
}

/// Decode one gate whose size bytes start at `cursor`. `None` when the genome
/// ends before the gate body does.
fn decode_gate(
    genome: &[u8],
    mut cursor: usize,
    total_states: usize,
    mode: TableMode,
    max_inputs: usize,
    max_outputs: usize,
) -> Option<Gate> {
    if cursor + 2 > genome.len() {
        return None;
    }
    let num_inputs = genome[cursor] as usize % max_inputs + 1;
    let num_outputs = genome[cursor + 1] as usize % max_outputs + 1;
    cursor += 2;

    let rows = 1usize << num_inputs;
    let cols = 1usize << num_outputs;
    if cursor + max_inputs + max_outputs + rows * cols > genome.len() {
        return None;
    }

    let input_addresses = read_addresses(&genome[cursor..cursor + num_inputs], total_states);
    cursor += max_inputs;
    let output_addresses = read_addresses(&genome[cursor..cursor + num_outputs], total_states);
    cursor += max_outputs;

    let table = GateTable::from_raw(&genome[cursor..cursor + rows * cols], rows, cols, mode);
    Some(Gate {
        input_addresses,
        output_addresses,
        table,
    })
}

fn read_addresses(bytes: &[u8], total_states: usize) -> Vec<usize> {
    bytes.iter().map(|&b| b as usize % total_states).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_json_snapshot;

    /// Marker, sizes, 4 input bytes, 4 output bytes and a table of `table_len`.
    fn gate_bytes(n_in: u8, n_out: u8, addrs: [u8; 8], table_len: usize, fill: u8) -> Vec<u8> {
        let mut g = vec![42, 213, n_in, n_out];
        g.extend_from_slice(&addrs);
        g.extend(std::iter::repeat(fill).take(table_len));
        g
    }

    #[test]
    fn single_minimal_gate() {
        let mut genome = vec![42, 213, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0];
        genome.extend_from_slice(&[10, 250, 5, 1]);
        let gates = decode(&genome, 2, TableMode::Deterministic, 4, 4);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].input_addresses, vec![0]);
        assert_eq!(gates[0].output_addresses, vec![1]);
        assert_eq!(gates[0].table.row(0), &[0.0, 1.0]);
        assert_eq!(gates[0].table.row(1), &[1.0, 0.0]);
    }

    #[test]
    fn sizes_and_addresses_wrap() {
        // 5 % 4 + 1 = 2 inputs, 7 % 4 + 1 = 4 outputs, 4 x 16 table
        let genome = gate_bytes(5, 7, [9, 200, 255, 3, 14, 15, 16, 17], 64, 1);
        let gates = decode(&genome, 15, TableMode::Probabilistic, 4, 4);
        assert_eq!(gates.len(), 1);
        let gate = &gates[0];
        assert_eq!(gate.input_addresses, vec![9, 200 % 15]);
        assert_eq!(gate.output_addresses, vec![14, 0, 1, 2]);
        assert_eq!(gate.table.rows(), 4);
        assert_eq!(gate.table.cols(), 16);
    }

    #[test]
    fn truncated_gate_is_skipped() {
        let mut genome = gate_bytes(0, 0, [0; 8], 4, 1);
        genome.pop();
        let (gates, stats) = decode_with_stats(&genome, 3, TableMode::Probabilistic, 4, 4);
        assert!(gates.is_empty());
        assert_eq!(
            stats,
            DecodeStats {
                markers: 1,
                decoded: 0,
                truncated: 1
            }
        );
    }

    #[test]
    fn marker_at_tail_is_skipped() {
        let (gates, stats) = decode_with_stats(&[7, 42, 213], 3, TableMode::Deterministic, 4, 4);
        assert!(gates.is_empty());
        assert_eq!(stats.markers, 1);
        assert_eq!(stats.truncated, 1);
    }

    #[test]
    fn empty_and_single_byte_genomes() {
        assert!(decode(&[], 3, TableMode::Deterministic, 4, 4).is_empty());
        assert!(decode(&[42], 3, TableMode::Deterministic, 4, 4).is_empty());
    }

    #[test]
    fn marker_inside_body_decodes_overlapping_gate() {
        // second marker sits in the first gate's address bytes
        let mut genome = vec![42, 213, 0, 0, 42, 213, 0, 0, 0, 0, 0, 0];
        genome.extend(std::iter::repeat(1).take(12));
        let (gates, stats) = decode_with_stats(&genome, 250, TableMode::Deterministic, 4, 4);
        assert_eq!(stats.markers, 2);
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].input_addresses, vec![42]);
        assert_eq!(gates[0].output_addresses, vec![0]);
        assert_eq!(gates[1].input_addresses, vec![0]);
    }

    #[test]
    fn narrower_gate_width() {
        // max 2 inputs / 1 output: body is 2 + 1 address bytes
        let genome = vec![42, 213, 3, 9, 1, 2, 0, 5, 6, 7, 8, 1, 2, 3, 4];
        let gates = decode(&genome, 3, TableMode::Deterministic, 2, 1);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].input_addresses, vec![1, 2]);
        assert_eq!(gates[0].output_addresses, vec![0]);
        assert_eq!(gates[0].table.rows(), 4);
        assert_eq!(gates[0].table.cols(), 2);
    }

    #[test]
    fn decode_is_pure() {
        let genome = gate_bytes(1, 2, [3, 4, 5, 6, 7, 8, 9, 10], 32, 4);
        let a = decode(&genome, 11, TableMode::Probabilistic, 4, 4);
        let b = decode(&genome, 11, TableMode::Probabilistic, 4, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn stats_snapshot() {
        let mut genome = gate_bytes(0, 0, [1, 0, 0, 0, 2, 0, 0, 0], 4, 3);
        genome.extend(gate_bytes(1, 1, [0; 8], 16, 5));
        genome.extend_from_slice(&[42, 213, 3]);
        let (_, stats) = decode_with_stats(&genome, 4, TableMode::Deterministic, 4, 4);
        assert_json_snapshot!(stats, @r###"
        {
          "markers": 3,
          "decoded": 2,
          "truncated": 1
        }
        "###);
    }
}
