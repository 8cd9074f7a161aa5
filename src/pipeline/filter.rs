use std::collections::HashMap;
use std::collections::HashSet;

use chrono::DateTime;
use chrono::Utc;

use crate::model::address::Address;
use crate::model::filter::FilterState;
use crate::model::graph::AddressNode;
use crate::model::graph::FlowGraph;
use crate::model::graph::TransferEdge;
use crate::model::transaction::Digest;
use crate::model::transaction::TransactionRecord;
use crate::utils::end_of_day;
use crate::utils::start_of_day;

/// Derives a consistent viewable subgraph. Node-level stages (text, kind)
/// and edge-level stages (flow, amount, date) are orthogonal; the final
/// reconciliation pass guarantees no edge references a filtered-out node
/// and no filtered-in node survives without an edge, root excepted.
pub struct FilterPipeline;

impl FilterPipeline {
    /// Pure and total: degenerate inputs produce empty results, never
    /// errors. A fully unrestricted state returns a structural copy.
    pub fn apply(
        graph: &FlowGraph,
        records: &[TransactionRecord],
        filter: &FilterState,
    ) -> FlowGraph {
        if filter.is_unrestricted() {
            return graph.clone();
        }

        let root = graph.root();

        // Stage 1: text
        let mut nodes: Vec<AddressNode> = graph.nodes();
        if !filter.text_query.is_empty() {
            let query = filter.text_query.to_lowercase();
            nodes.retain(|node| node.matches_query(&query));
        }

        // Stage 2: kind. An empty set means no restriction, not exclude-all.
        if !filter.allowed_node_kinds.is_empty() {
            nodes.retain(|node| filter.allowed_node_kinds.contains(&node.kind));
        }

        // Stage 3: flow
        let mut edges: Vec<TransferEdge> = graph.edges();
        edges.retain(|edge| filter.flow_mode.admits(edge.flow));

        // Stage 4: amount, bounds inclusive
        if let Some(min) = filter.min_amount {
            edges.retain(|edge| edge.value >= min);
        }
        if let Some(max) = filter.max_amount {
            edges.retain(|edge| edge.value <= max);
        }

        // Stage 5: date. An edge whose transaction has no resolvable
        // timestamp is dropped whenever either bound is set.
        if filter.has_date_bound() {
            let timestamps: HashMap<&Digest, DateTime<Utc>> =
                records.iter().map(|record| (&record.id, record.timestamp)).collect();
            let window_start = filter.start_date.map(start_of_day);
            let window_end = filter.end_date.map(end_of_day);

            edges.retain(|edge| match timestamps.get(&edge.transaction_id) {
                Some(ts) => {
                    window_start.is_none_or(|start| *ts >= start)
                        && window_end.is_none_or(|end| *ts <= end)
                }
                None => false,
            });
        }

        // Reconciliation: endpoints of surviving edges, union root, intersected
        // with the stage-1/2 survivors. The root is never dropped by filtering.
        let mut touched: HashSet<Address> = HashSet::new();
        for edge in &edges {
            touched.insert(edge.source);
            touched.insert(edge.target);
        }
        touched.insert(root);

        let mut survivors: Vec<AddressNode> = nodes
            .into_iter()
            .filter(|node| touched.contains(&node.address))
            .collect();
        if !survivors.iter().any(|node| node.address == root) {
            if let Some(root_node) = graph.node(&root) {
                survivors.push(root_node.clone());
            }
        }

        let final_ids: HashSet<Address> = survivors.iter().map(|node| node.address).collect();
        edges.retain(|edge| final_ids.contains(&edge.source) && final_ids.contains(&edge.target));

        let mut filtered = FlowGraph::new(root);
        for node in survivors {
            filtered.add_node(node);
        }
        for edge in edges {
            filtered.add_edge(edge);
        }
        filtered
    }
}
