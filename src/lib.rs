pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod rpc;
pub mod session;
pub mod tracing;
pub mod utils;

pub use error::IngestError;
pub use error::Result;
pub use model::Address;
pub use model::FilterState;
pub use model::FlowGraph;
pub use model::TransactionRecord;
pub use pipeline::FilterPipeline;
pub use pipeline::GraphBuilder;
pub use pipeline::Ingestor;
pub use session::GraphSession;
pub use session::SessionState;
