use crate::constants::FAN_OUT_NOMINAL_VALUE;
use crate::model::address::Address;
use crate::model::graph::AddressNode;
use crate::model::graph::EdgeKind;
use crate::model::graph::Flow;
use crate::model::graph::FlowGraph;
use crate::model::graph::TransferEdge;
use crate::model::transaction::TransactionRecord;

/// Pure records-to-graph transform. Total: an empty record list yields a
/// graph containing only the root node.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(records: &[TransactionRecord], root: Address) -> FlowGraph {
        let mut graph = FlowGraph::new(root);
        graph.add_node(AddressNode::root(root));

        for record in records {
            graph.add_node(AddressNode::participant(record.sender));

            for recipient in &record.recipients {
                graph.add_node(AddressNode::participant(*recipient));

                // Per-recipient share is not separable on fan-out
                let value = if record.recipients.len() == 1 {
                    record.amount
                } else {
                    FAN_OUT_NOMINAL_VALUE
                };

                let kind = if record.status.is_success() {
                    EdgeKind::Transfer
                } else {
                    EdgeKind::Failed
                };

                graph.add_edge(TransferEdge {
                    source: record.sender,
                    target: *recipient,
                    value,
                    transaction_id: record.id.clone(),
                    kind,
                    flow: Flow::classify(record.sender, *recipient, root),
                });
            }
        }

        graph
    }
}
