use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Chebyshev radius, in chunks, that is kept loaded and meshed.
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    /// Generation threads; `0` uses the available parallelism.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_max_dispatch")]
    pub max_dispatch_per_tick: usize,
    #[serde(default = "default_max_meshes")]
    pub max_meshes_per_tick: usize,
    #[serde(default)]
    pub budget: BudgetConfig,
}
fn default_render_distance() -> i32 {
    8
}
fn default_max_dispatch() -> usize {
    100
}
fn default_max_meshes() -> usize {
    8
}
impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            workers: 0,
            max_dispatch_per_tick: default_max_dispatch(),
            max_meshes_per_tick: default_max_meshes(),
            budget: BudgetConfig::default(),
        }
    }
}

impl StreamConfig {
    /// Queue bound and retention radius: one ring past the render distance.
    pub fn keep_distance(&self) -> i32 {
        self.render_distance + 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_target_ms")]
    pub target_ms: u64,
    #[serde(default = "default_floor_ms")]
    pub floor_ms: u64,
    #[serde(default = "default_ceiling_ms")]
    pub ceiling_ms: u64,
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
}
fn default_target_ms() -> u64 {
    16
}
fn default_floor_ms() -> u64 {
    8
}
fn default_ceiling_ms() -> u64 {
    32
}
fn default_step_ms() -> u64 {
    1
}
impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            target_ms: default_target_ms(),
            floor_ms: default_floor_ms(),
            ceiling_ms: default_ceiling_ms(),
            step_ms: default_step_ms(),
        }
    }
}

impl BudgetConfig {
    pub fn target(&self) -> Duration {
        Duration::from_millis(self.target_ms)
    }
    pub fn floor(&self) -> Duration {
        Duration::from_millis(self.floor_ms)
    }
    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}
