pub mod filter;
pub mod graph;
pub mod ingest;

pub use filter::FilterPipeline;
pub use graph::GraphBuilder;
pub use ingest::Ingestor;
