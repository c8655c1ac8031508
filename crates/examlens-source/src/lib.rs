//! examlens-source: where raw exam records come from.
//!
//! Implements the `RecordSource` trait for json-server style snapshots on
//! disk and for in-memory fixtures, and loads the `examlens.toml`
//! configuration.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::{load_config, load_config_from, ExamlensConfig, ExportConfig};
pub use error::SourceError;
pub use file::JsonFileSource;
pub use memory::MemorySource;
