pub mod address;
pub mod filter;
pub mod graph;
pub mod transaction;

pub use address::Address;
pub use address::ObjectId;
pub use address::Owner;
pub use filter::FilterState;
pub use filter::FlowMode;
pub use graph::AddressNode;
pub use graph::EdgeKind;
pub use graph::Flow;
pub use graph::FlowGraph;
pub use graph::GraphView;
pub use graph::NodeKind;
pub use graph::TransferEdge;
pub use transaction::Digest;
pub use transaction::ExecutionStatus;
pub use transaction::TransactionRecord;
