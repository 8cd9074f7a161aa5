use std::collections::HashMap;
use std::str::FromStr;

use petgraph::prelude::*;
use petgraph::Graph;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::system_package_name;
use crate::constants::PARTICIPANT_DISPLAY_WEIGHT;
use crate::constants::ROOT_DISPLAY_WEIGHT;
use crate::model::address::Address;
use crate::model::transaction::Digest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Wallet,
    Contract,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Wallet => "wallet",
            NodeKind::Contract => "contract",
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root" => Ok(NodeKind::Root),
            "wallet" => Ok(NodeKind::Wallet),
            "contract" => Ok(NodeKind::Contract),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}

/// Flow direction of an edge relative to the root address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    In,
    Out,
    Internal,
    Other,
}

impl Flow {
    /// Classification order matters: a self-transfer of the root is
    /// internal, not out.
    pub fn classify(sender: Address, recipient: Address, root: Address) -> Self {
        if sender == root && recipient == root {
            Flow::Internal
        } else if sender == root {
            Flow::Out
        } else if recipient == root {
            Flow::In
        } else {
            Flow::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Transfer,
    Failed,
}

/// Graph node. Canonical entities stay free of layout state; any (x, y)
/// position lives in a renderer-owned side table keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressNode {
    #[serde(rename = "id")]
    pub address: Address,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(rename = "val")]
    pub display_weight: u32,
}

impl AddressNode {
    pub fn root(address: Address) -> Self {
        Self {
            name: format!("Root: {}", address.short()),
            address,
            kind: NodeKind::Root,
            display_weight: ROOT_DISPLAY_WEIGHT,
        }
    }

    pub fn participant(address: Address) -> Self {
        let (kind, name) = match system_package_name(&address) {
            Some(label) => (NodeKind::Contract, format!("Contract: {label}")),
            None => (NodeKind::Wallet, format!("User: {}", address.short())),
        };
        Self {
            address,
            name,
            kind,
            display_weight: PARTICIPANT_DISPLAY_WEIGHT,
        }
    }

    /// Case-insensitive text-stage match over id, kind and display name.
    /// `query` must already be lowercased.
    pub fn matches_query(&self, query: &str) -> bool {
        self.address.to_string().contains(query)
            || self.kind.as_str().contains(query)
            || self.name.to_lowercase().contains(query)
    }
}

/// One edge per (sender, recipient) pair observed in a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEdge {
    pub source: Address,
    pub target: Address,
    pub value: u64,
    #[serde(rename = "transactionId")]
    pub transaction_id: Digest,
    #[serde(rename = "transactionType")]
    pub kind: EdgeKind,
    pub flow: Flow,
}

/// Directed flow graph around a root address. Wraps a petgraph graph with
/// an address-to-index side map so node insertion is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowGraph {
    graph: Graph<AddressNode, TransferEdge>,
    #[serde(skip)]
    node_indices: HashMap<Address, NodeIndex>,
    root: Address,
}

impl FlowGraph {
    pub fn new(root: Address) -> Self {
        Self {
            graph: Graph::new(),
            node_indices: HashMap::new(),
            root,
        }
    }

    pub fn root(&self) -> Address {
        self.root
    }

    // Rebuild the node_indices map from the graph (needed after deserialization)
    pub fn rebuild_indices(&mut self) {
        self.node_indices.clear();
        for node_index in self.graph.node_indices() {
            if let Some(node) = self.graph.node_weight(node_index) {
                self.node_indices.insert(node.address, node_index);
            }
        }
    }

    fn ensure_indices(&mut self) {
        if self.node_indices.is_empty() && self.graph.node_count() > 0 {
            self.rebuild_indices();
        }
    }

    /// Inserts a node unless one already exists for the address. The first
    /// occurrence wins; later occurrences never overwrite kind or weight.
    pub fn add_node(&mut self, node: AddressNode) -> NodeIndex {
        self.ensure_indices();

        if let Some(&idx) = self.node_indices.get(&node.address) {
            return idx;
        }

        let address = node.address;
        let idx = self.graph.add_node(node);
        self.node_indices.insert(address, idx);

        idx
    }

    /// Inserts an edge between two existing nodes. Returns false and does
    /// nothing when either endpoint is missing.
    pub fn add_edge(&mut self, edge: TransferEdge) -> bool {
        self.ensure_indices();

        let (Some(&source), Some(&target)) = (
            self.node_indices.get(&edge.source),
            self.node_indices.get(&edge.target),
        ) else {
            return false;
        };

        self.graph.add_edge(source, target, edge);
        true
    }

    pub fn node(&self, address: &Address) -> Option<&AddressNode> {
        let idx = self.node_indices.get(address)?;
        self.graph.node_weight(*idx)
    }

    pub fn contains_node(&self, address: &Address) -> bool {
        self.node_indices.contains_key(address)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> Vec<AddressNode> {
        self.graph.node_weights().cloned().collect()
    }

    pub fn edges(&self) -> Vec<TransferEdge> {
        self.graph.edge_weights().cloned().collect()
    }
}

/// Renderer-facing shape of a graph: `render(nodes, edges)`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<AddressNode>,
    pub links: Vec<TransferEdge>,
}

impl From<&FlowGraph> for GraphView {
    fn from(graph: &FlowGraph) -> Self {
        Self {
            nodes: graph.nodes(),
            links: graph.edges(),
        }
    }
}
