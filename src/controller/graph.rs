#![allow(dead_code)]

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::function::DiscreteFunction;
use crate::registry::VarId;

// Opaque identifier for a factor node, assigned by the caller of MaxSumController.
pub type FactorId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerNode {
    Variable(VarId),
    Factor(FactorId),
}

type ControllerGraph = DiGraph<ControllerNode, (), usize>;

// The bipartite factor/variable topology. Edges carry no payload, messages live in the
// controller's own maps keyed by (FactorId, VarId), so rebuilding this graph after a
// set_factor/remove_factor never invalidates message storage.
pub struct FactorGraph {
    graph: ControllerGraph,
    variable_nodes: HashMap<VarId, NodeIndex<usize>>,
    factor_nodes: HashMap<FactorId, NodeIndex<usize>>,
}

impl FactorGraph {
    pub fn empty() -> Self {
        FactorGraph {
            graph: DiGraph::default(),
            variable_nodes: HashMap::new(),
            factor_nodes: HashMap::new(),
        }
    }

    // Rebuilds the topology from scratch from the current factor set. Cheap relative to message
    // computation and avoids petgraph's node-index renumbering on removal entirely.
    pub fn build(factors: &HashMap<FactorId, DiscreteFunction>) -> Self {
        let mut graph = DiGraph::default();
        let mut variable_nodes = HashMap::new();
        let mut factor_nodes = HashMap::new();

        let mut ids: Vec<FactorId> = factors.keys().copied().collect();
        ids.sort_unstable();

        for fid in ids {
            let factor = &factors[&fid];
            let fnode = graph.add_node(ControllerNode::Factor(fid));
            factor_nodes.insert(fid, fnode);
            for &v in factor.vars() {
                let vnode = *variable_nodes
                    .entry(v)
                    .or_insert_with(|| graph.add_node(ControllerNode::Variable(v)));
                graph.add_edge(fnode, vnode, ());
                graph.add_edge(vnode, fnode, ());
            }
        }
        debug!(
            "rebuilt factor graph: {} factor nodes, {} variable nodes",
            factor_nodes.len(),
            variable_nodes.len()
        );

        FactorGraph { graph, variable_nodes, factor_nodes }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_nodes.len()
    }

    pub fn factor_count(&self) -> usize {
        self.factor_nodes.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.variable_nodes.keys().copied()
    }

    pub fn has_factor(&self, id: FactorId) -> bool {
        self.factor_nodes.contains_key(&id)
    }

    // The factors whose domain includes var, empty if var is not part of any factor (or unknown
    // to this graph).
    pub fn factors_incident_to(&self, var: VarId) -> Vec<FactorId> {
        let Some(&vnode) = self.variable_nodes.get(&var) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(vnode, Direction::Outgoing)
            .filter_map(|n| match self.graph[n] {
                ControllerNode::Factor(fid) => Some(fid),
                ControllerNode::Variable(_) => None,
            })
            .collect()
    }
}
