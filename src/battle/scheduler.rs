//! Suspension points.
//!
//! The battle pauses at fixed points so presentation can animate (draws,
//! hits, enemy wind-ups). How long a pause lasts, and whether it waits at
//! all, is up to the `Scheduler`. Tests use `InstantScheduler`; a live
//! client uses `TokioScheduler`.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Timings;

/// Why the battle is pausing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pause {
    Draw,
    HitInterval,
    EffectDelay,
    TriggerStagger,
    EndTurn,
    EnemyImpact,
    EnemyRecovery,
    EnemyNonAttack,
    EnemyStunned,
    EnemyGap,
    PlanSettle,
}

impl Pause {
    /// Default duration from the timing table.
    #[must_use]
    pub const fn millis(self, timings: &Timings) -> u64 {
        match self {
            Pause::Draw => timings.draw,
            Pause::HitInterval => timings.hit_interval,
            Pause::EffectDelay => 0,
            Pause::TriggerStagger => timings.trigger_stagger,
            Pause::EndTurn => timings.end_turn,
            Pause::EnemyImpact => timings.enemy_impact,
            Pause::EnemyRecovery => timings.enemy_recovery,
            Pause::EnemyNonAttack => timings.enemy_non_attack,
            Pause::EnemyStunned => timings.enemy_stunned,
            Pause::EnemyGap => timings.enemy_gap,
            Pause::PlanSettle => timings.plan_settle,
        }
    }
}

/// One requested pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub pause: Pause,
    pub millis: u64,
}

/// Decides how a pause is realized.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn pause(&self, step: Step);
}

/// Returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantScheduler;

#[async_trait]
impl Scheduler for InstantScheduler {
    async fn pause(&self, _step: Step) {}
}

/// Sleeps on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn pause(&self, step: Step) {
        if step.millis > 0 {
            tokio::time::sleep(Duration::from_millis(step.millis)).await;
        }
    }
}

/// Returns immediately and remembers every step.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    steps: Mutex<Vec<Step>>,
}

impl RecordingScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        match self.steps.lock() {
            Ok(steps) => steps.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recorded pauses of one kind.
    #[must_use]
    pub fn count(&self, pause: Pause) -> usize {
        self.steps().iter().filter(|s| s.pause == pause).count()
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn pause(&self, step: Step) {
        match self.steps.lock() {
            Ok(mut steps) => steps.push(step),
            Err(poisoned) => poisoned.into_inner().push(step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_scheduler() {
        let scheduler = RecordingScheduler::new();
        scheduler.pause(Step { pause: Pause::Draw, millis: 150 }).await;
        scheduler.pause(Step { pause: Pause::Draw, millis: 150 }).await;
        scheduler.pause(Step { pause: Pause::EnemyGap, millis: 400 }).await;

        assert_eq!(scheduler.count(Pause::Draw), 2);
        assert_eq!(scheduler.steps().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_sleeps() {
        let start = tokio::time::Instant::now();
        TokioScheduler.pause(Step { pause: Pause::EndTurn, millis: 800 }).await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[test]
    fn test_default_durations() {
        let timings = Timings::default();
        assert_eq!(Pause::TriggerStagger.millis(&timings), 300);
        assert_eq!(Pause::EffectDelay.millis(&timings), 0);
    }
}
