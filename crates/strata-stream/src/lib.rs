//! Streaming coordinator: keeps chunks resident around a moving viewpoint.
#![forbid(unsafe_code)]

mod budget;
mod config;
mod load_queue;
mod sink;
mod store;
mod world;

pub use budget::FrameBudget;
pub use config::{BudgetConfig, StreamConfig};
pub use load_queue::LoadQueue;
pub use sink::{NullSink, RenderSink};
pub use store::{ChunkState, ChunkStore};
pub use world::{SpawnPoint, TickReport, World};

use strata_runtime::RuntimeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("render distance must be non-negative, got {0}")]
    RenderDistance(i32),
    #[error("budget floor {floor_ms}ms exceeds ceiling {ceiling_ms}ms")]
    Budget { floor_ms: u64, ceiling_ms: u64 },
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
