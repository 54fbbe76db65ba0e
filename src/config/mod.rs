pub mod config;

pub use config::{Config, DisplayConfig, IconConfig, TableConfig};
