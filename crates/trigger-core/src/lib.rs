pub mod command;
pub mod duration;
pub mod error;
pub mod models;
pub mod render;
pub mod storage;
pub mod timer;

pub use command::{Command, CommandMode, Key, Session};
pub use error::{Error, Result};
pub use models::{Config, Timer, TimerId};
pub use render::{MemoryRenderer, Renderer, Screen, TimerView};
pub use timer::{SharedTimer, TickHandle, TickScheduler, TimerRegistry};
