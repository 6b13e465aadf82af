pub mod aggregate;
pub mod classify;
pub mod config;
pub mod emitter;
pub mod file_discovery;
pub mod parser;
pub mod shade;

pub use aggregate::{Aggregator, Document};
pub use classify::{Category, Classifier};
pub use config::Config;
pub use emitter::render;
pub use file_discovery::FileDiscovery;
pub use parser::LinePatterns;

pub type Result<T> = anyhow::Result<T>;
