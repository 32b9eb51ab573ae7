pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;

pub use bridge::AdbBridge;
pub use config::Config;
pub use error::BridgeError;
pub use extract::{extract_package, write_report, ExtractionReport};
