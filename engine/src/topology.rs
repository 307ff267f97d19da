use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::gate::Gate;
use crate::layout::{Section, StateLayout};
use crate::network::MarkovNetwork;

/// State cells as nodes, one edge per (input address, output address) pair of
/// every gate. Edge weights are the gate's discovery index.
pub fn wiring_graph(layout: &StateLayout, gates: &[Gate]) -> DiGraph<Section, usize> {
    let mut graph = DiGraph::<Section, usize>::new();
    for (range, section) in [
        (layout.input_range(), Section::Input),
        (layout.memory_range(), Section::Memory),
        (layout.output_range(), Section::Output),
    ] {
        for _ in range {
            graph.add_node(section);
        }
    }

    for (idx, gate) in gates.iter().enumerate() {
        for &from in &gate.input_addresses {
            for &to in &gate.output_addresses {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), idx);
            }
        }
    }

    graph
}

/// Cells lying on a directed cycle of the wiring graph, ascending.
pub fn feedback_cells(graph: &DiGraph<Section, usize>) -> Vec<usize> {
    let mut cells: Vec<usize> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .flatten()
        .map(|n| n.index())
        .collect();
    cells.sort_unstable();
    cells
}

impl MarkovNetwork {
    pub fn wiring_graph(&self) -> DiGraph<Section, usize> {
        wiring_graph(&self.layout(), self.gates())
    }
}
