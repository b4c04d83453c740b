//! Enemy roster and encounter pools.

use crate::ai::{ActionOverride, Behavior, Comparator, Condition, EnemyDefinition, Encounter, IntentKind, Metric};
use crate::status::StatusId;

/// Every enemy kind.
#[must_use]
pub fn enemy_table() -> Vec<EnemyDefinition> {
    vec![
        EnemyDefinition::new(
            "noise",
            "Noise Mote",
            1.0,
            Behavior::new().then(IntentKind::Attack).with_actions(vec![IntentKind::Attack]),
        ),
        EnemyDefinition::new(
            "discord",
            "Discordant Guard",
            1.5,
            Behavior::new()
                .then(IntentKind::Attack)
                .then(IntentKind::Attack)
                .then(IntentKind::Attack)
                .then(IntentKind::Defend),
        ),
        EnemyDefinition::new(
            "silence",
            "Conductor of Silence",
            2.5,
            Behavior::new()
                .rule(
                    Condition::compare(Metric::Stacks(StatusId::VULNERABLE), Comparator::Gt, 0.0),
                    IntentKind::Cleanse,
                )
                .then(IntentKind::Attack)
                .then(IntentKind::Attack)
                .then(IntentKind::Buff)
                .with_override(IntentKind::Buff, ActionOverride::new().with_icon("ui/mana"))
                .with_override(IntentKind::Cleanse, ActionOverride::new().with_icon("ui/debuff")),
        ),
        EnemyDefinition::new(
            "bayinhe",
            "Malicious Music Box",
            1.2,
            Behavior::new()
                .rule(
                    Condition::compare(Metric::Stacks(StatusId::STRENGTH), Comparator::Ge, 6.0),
                    IntentKind::HeavyAttack,
                )
                .then(IntentKind::BuffStrength)
                .then(IntentKind::BuffStrength)
                .then(IntentKind::HeavyAttack),
        ),
        EnemyDefinition::new(
            "changshiban",
            "Noise Choir",
            1.8,
            Behavior::new()
                .then(IntentKind::WeakAttack)
                .then(IntentKind::Attack)
                .then(IntentKind::WeakAttack),
        ),
        EnemyDefinition::new(
            "shihengwuzhe",
            "Unbalanced Dancer",
            2.0,
            Behavior::new()
                .then_weighted(vec![(IntentKind::HeavyAttack, 0.7), (IntentKind::Fortify, 0.3)])
                .then_weighted(vec![(IntentKind::HeavyAttack, 0.7), (IntentKind::Fortify, 0.3)]),
        ),
    ]
}

#[must_use]
pub fn enemy(key: &str) -> Option<EnemyDefinition> {
    enemy_table().into_iter().find(|e| e.key == key)
}

/// Enemy keys an encounter of `tier` draws from.
#[must_use]
pub const fn pool(tier: Encounter) -> &'static [&'static str] {
    match tier {
        Encounter::Normal => &["noise", "bayinhe", "changshiban"],
        Encounter::Elite => &["discord", "shihengwuzhe"],
        Encounter::Boss => &["silence"],
    }
}

/// Background track for a fight led by enemy `key`.
#[must_use]
pub fn theme(key: &str) -> &'static str {
    match key {
        "silence" => "bgm/scythian_suite",
        "shihengwuzhe" => "bgm/string_quartet",
        "discord" => "bgm/mahler_symphony",
        "changshiban" => "bgm/bin_ich_nun_frei",
        _ => "bgm/bruckner",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_resolve() {
        for tier in [Encounter::Normal, Encounter::Elite, Encounter::Boss] {
            for key in pool(tier) {
                assert!(enemy(key).is_some(), "unknown enemy {key}");
            }
        }
    }

    #[test]
    fn test_boss_hp() {
        let boss = enemy("silence").unwrap();
        // floor(30 * 3.0 * 2.5)
        assert_eq!(boss.max_hp(0, Encounter::Boss), 225);
    }

    #[test]
    fn test_theme_fallback() {
        assert_eq!(theme("noise"), "bgm/bruckner");
        assert_eq!(theme("silence"), "bgm/scythian_suite");
    }
}
