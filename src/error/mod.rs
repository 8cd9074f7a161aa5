pub mod client;
pub mod config;
pub mod ingest;

pub use anyhow::anyhow;
pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use client::ClientError;
pub use config::ConfigError;
pub use ingest::IngestError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
    ($err:expr) => {
        anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
    };
}
