pub mod registry;
pub mod scheduler;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::Timer;

pub use registry::TimerRegistry;
pub use scheduler::{TickHandle, TickScheduler};

/// A timer shared between the command loop and its tick driver. All reads of
/// `(running, started_at, elapsed)` go through this one lock.
pub type SharedTimer = Arc<RwLock<Timer>>;
