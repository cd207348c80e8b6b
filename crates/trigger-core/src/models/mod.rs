pub mod config;
pub mod timer;

pub use config::{ColorConfig, CommandMode, Config, LayoutConfig};
pub use timer::{Timer, TimerId};
