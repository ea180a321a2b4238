use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::game::error::{GenerationError, Result};

/// Star placement may try `PLACEMENT_FACTOR * stars` coordinates.
pub const PLACEMENT_FACTOR: usize = 100;
pub const NUDGE_CAP: usize = 1_000;
pub const MINING_CAP: usize = 10_000;
pub const TEMPLATE_CAP: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    StarPlacement,
    Diameter,
    Temperature,
    Pressure,
    MiningDifficulty,
    HomeTemplate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::StarPlacement => "star placement",
            Stage::Diameter => "diameter",
            Stage::Temperature => "temperature",
            Stage::Pressure => "pressure",
            Stage::MiningDifficulty => "mining difficulty",
            Stage::HomeTemplate => "home system template",
        };
        f.write_str(label)
    }
}

/// Shared cancellation signal. Clones observe the same flag, so a caller can
/// keep one half and hand the other to a generation run on another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct Attempts<'a> {
    stage: Stage,
    limit: usize,
    used: usize,
    cancel: &'a CancelFlag,
}

impl<'a> Attempts<'a> {
    pub fn new(stage: Stage, limit: usize, cancel: &'a CancelFlag) -> Self {
        Self {
            stage,
            limit,
            used: 0,
            cancel,
        }
    }

    pub fn tick(&mut self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(GenerationError::Cancelled { stage: self.stage });
        }
        if self.used >= self.limit {
            return Err(GenerationError::Stalled {
                stage: self.stage,
                attempts: self.used,
            });
        }
        self.used += 1;
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalls_after_limit() {
        let cancel = CancelFlag::new();
        let mut attempts = Attempts::new(Stage::Pressure, 3, &cancel);
        for _ in 0..3 {
            attempts.tick().unwrap();
        }
        let err = attempts.tick().unwrap_err();
        assert_eq!(
            err,
            GenerationError::Stalled {
                stage: Stage::Pressure,
                attempts: 3
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "generation stalled in pressure after 3 attempts"
        );
    }

    #[test]
    fn cancellation_is_seen_through_clones() {
        let cancel = CancelFlag::new();
        let remote = cancel.clone();
        let mut attempts = Attempts::new(Stage::StarPlacement, 10, &cancel);
        attempts.tick().unwrap();
        remote.cancel();
        assert_eq!(
            attempts.tick().unwrap_err(),
            GenerationError::Cancelled {
                stage: Stage::StarPlacement
            }
        );
        assert_eq!(attempts.used(), 1);
    }
}
