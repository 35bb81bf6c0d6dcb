use std::time::{Duration, Instant};

use crate::config::BudgetConfig;

/// Adaptive per-tick time allowance. Grows by one step after a tick that
/// finished under the target and shrinks by one step after an overrun,
/// always staying within `[floor, ceiling]`.
#[derive(Clone, Debug)]
pub struct FrameBudget {
    budget: Duration,
    last_tick: Duration,
    target: Duration,
    floor: Duration,
    ceiling: Duration,
    step: Duration,
}

impl FrameBudget {
    pub fn new(cfg: &BudgetConfig) -> Self {
        let (floor, ceiling) = (cfg.floor(), cfg.ceiling());
        Self {
            budget: cfg.target().max(floor).min(ceiling),
            last_tick: Duration::ZERO,
            target: cfg.target(),
            floor,
            ceiling,
            step: cfg.step(),
        }
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[inline]
    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.last_tick = elapsed;
        if elapsed < self.target {
            self.budget = (self.budget + self.step).min(self.ceiling);
        } else if elapsed > self.target {
            self.budget = self.budget.saturating_sub(self.step).max(self.floor);
        }
    }

    /// True once the tick that started at `since` has used up the allowance.
    pub fn exhausted(&self, since: Instant) -> bool {
        since.elapsed() >= self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn grows_to_ceiling_and_shrinks_to_floor() {
        let mut b = FrameBudget::new(&BudgetConfig::default());
        assert_eq!(b.budget(), ms(16));
        b.record(ms(4));
        assert_eq!(b.budget(), ms(17));
        for _ in 0..100 {
            b.record(ms(1));
        }
        assert_eq!(b.budget(), ms(32));
        for _ in 0..100 {
            b.record(ms(40));
        }
        assert_eq!(b.budget(), ms(8));
        assert_eq!(b.last_tick(), ms(40));
    }

    #[test]
    fn on_target_tick_keeps_budget() {
        let mut b = FrameBudget::new(&BudgetConfig::default());
        b.record(ms(16));
        assert_eq!(b.budget(), ms(16));
    }

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        let cfg = BudgetConfig {
            target_ms: 0,
            floor_ms: 0,
            ceiling_ms: 0,
            step_ms: 1,
        };
        let b = FrameBudget::new(&cfg);
        assert!(b.exhausted(Instant::now()));
        let roomy = FrameBudget::new(&BudgetConfig {
            target_ms: 60_000,
            floor_ms: 60_000,
            ceiling_ms: 60_000,
            step_ms: 1,
        });
        assert!(!roomy.exhausted(Instant::now()));
    }
}
