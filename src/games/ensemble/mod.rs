//! The ensemble: eight performers, their cards, relics and the enemies
//! they face.
//!
//! Everything here is content. It plugs into the battle through the same
//! seams any other content would: a `CardRegistry`, a
//! `CustomEffectRegistry`, hook listeners and `EnemyDefinition`s.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_cadence::ai::Encounter;
//! use rust_cadence::battle::InstantScheduler;
//! use rust_cadence::core::{BattleConfig, Phase};
//! use rust_cadence::games::ensemble;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let mut battle = ensemble::new_battle(BattleConfig::default().with_seed(7), &["cellist", "pianist"], &["baton"])
//!     .with_scheduler(Arc::new(InstantScheduler));
//! ensemble::spawn(&mut battle, "noise", Encounter::Normal);
//!
//! battle.prepare().await.unwrap();
//! battle.begin().await.unwrap();
//! assert_eq!(battle.phase(), Phase::Player);
//! // pianist +1 cap, baton +1 on turn one
//! assert_eq!(battle.state().mana.current, 5);
//! # });
//! ```

pub mod cards;
pub mod customs;
pub mod enemies;
pub mod relics;
pub mod roles;

use tracing::{info, warn};

use crate::ai::Encounter;
use crate::battle::{Battle, BattleContent, Notice};
use crate::cards::CardId;
use crate::core::{BattleConfig, UnitId};
use crate::status::StatusTable;

pub use roles::{role, RoleDefinition, ROLES};
pub use relics::{relic, RelicDefinition, RELICS};

/// Cards, statuses and custom strategies of the ensemble.
#[must_use]
pub fn content() -> BattleContent {
    BattleContent::new(cards::card_table(), StatusTable::standard(), customs::custom_effects())
}

/// Build an idle battle for `party` (back line first, front line last)
/// carrying `relic_keys`. Unknown keys are skipped with a warning.
#[must_use]
pub fn new_battle(mut config: BattleConfig, party: &[&str], relic_keys: &[&str]) -> Battle {
    let lineup: Vec<&RoleDefinition> = party
        .iter()
        .filter_map(|&key| {
            let found = role(key);
            if found.is_none() {
                warn!(role = key, "unknown role, skipped");
            }
            found
        })
        .collect();
    let deck: Vec<CardId> = lineup.iter().flat_map(|r| r.starting_deck()).collect();

    if relic_keys.contains(&relics::SHEET_MUSIC) {
        for &card in &deck {
            let level = config.card_level(card) + 1;
            config = config.with_card_level(card, level);
        }
    }

    let mut battle = Battle::new(config, content());
    for def in &lineup {
        battle.add_ally(def.key, def.name, def.hp);
        roles::register_passive(battle.hooks_mut(), def.key);
    }
    for &key in relic_keys {
        if !relics::register_relic(battle.hooks_mut(), key) {
            warn!(relic = key, "unknown relic, skipped");
        }
    }
    battle.set_deck(deck);
    info!(party = lineup.len(), relics = relic_keys.len(), "ensemble battle created");
    battle
}

/// Spawn one enemy by key.
pub fn spawn(battle: &mut Battle, key: &str, tier: Encounter) -> Option<UnitId> {
    let Some(def) = enemies::enemy(key) else {
        warn!(enemy = key, "unknown enemy");
        return None;
    };
    Some(battle.add_enemy(&def, tier))
}

/// Spawn a random enemy from the tier's pool and cue its theme.
pub fn spawn_encounter(battle: &mut Battle, tier: Encounter) -> Option<UnitId> {
    let key = *battle.rng_mut().choose(enemies::pool(tier))?;
    let id = spawn(battle, key, tier)?;
    battle.notices().publish(Notice::StopBgm);
    battle.notices().publish(Notice::PlayBgm(enemies::theme(key).to_string()));
    Some(id)
}
