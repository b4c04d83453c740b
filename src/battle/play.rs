//! Player input: selection, targeting and card resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cards::{CardKind, CardTag};
use crate::core::BattleError;
use crate::effects::{Cast, EffectKind, EffectProcessor, TargetScope};
use crate::hooks::{trigger, CardPlay, HookEvent, ValueQuery};

use super::notice::{LogCategory, Notice};
use super::scheduler::Pause;
use super::Battle;

/// What `select_card` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The card now waits for a target.
    Selected,
    /// The card was already selected and the selection was cleared.
    Deselected,
    /// The card needed no target and was played at once.
    Played,
}

impl Battle {
    /// Pick a card from the hand. Targeted cards toggle the selection;
    /// others play immediately, aimed at the first living enemy.
    pub async fn select_card(&mut self, hand_index: usize) -> Result<SelectOutcome, BattleError> {
        self.ensure_player_input()?;
        let card = self.check_playable(hand_index)?;
        let kind = self.cards.kind_of(card).ok_or(BattleError::UnknownCard(card))?;

        if !kind.is_targeted() {
            let aim = self.state.first_living_enemy().unwrap_or(0);
            self.play_card(hand_index, aim).await?;
            return Ok(SelectOutcome::Played);
        }
        if self.state.selected == Some(hand_index) {
            self.deselect();
            return Ok(SelectOutcome::Deselected);
        }
        self.state.selected = Some(hand_index);
        self.notify(Notice::UpdateUi);
        Ok(SelectOutcome::Selected)
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.state.selected = None;
        self.notify(Notice::UpdateUi);
    }

    /// Track the enemy under the pointer.
    pub fn hover_enemy(&mut self, index: Option<usize>) {
        self.state.hovered = index;
    }

    /// Resolve the pending selection against a target.
    ///
    /// An explicit index must be a living enemy. Without one the hovered
    /// enemy is used, then index 0 for area cards, then the first living
    /// enemy. With nobody left to hit the selection is simply cleared.
    pub async fn target_enemy(&mut self, index: Option<usize>) -> Result<(), BattleError> {
        let selected = self.state.selected.ok_or(BattleError::NothingSelected)?;

        if let Some(index) = index {
            if !self.state.is_enemy_alive(index) {
                self.notify(Notice::Toast("That target is already down".into()));
                return Err(BattleError::InvalidTarget(index));
            }
            return self.play_card(selected, index).await;
        }

        if let Some(hovered) = self.state.hovered.filter(|&h| self.state.is_enemy_alive(h)) {
            return self.play_card(selected, hovered).await;
        }

        let area = self
            .state
            .piles
            .hand()
            .get(selected)
            .and_then(|&card| self.cards.get(card))
            .is_some_and(|def| {
                def.effects
                    .iter()
                    .any(|e| e.target == TargetScope::All && matches!(e.kind, EffectKind::Damage))
            });
        if area {
            return self.play_card(selected, 0).await;
        }

        match self.state.first_living_enemy() {
            Some(first) => self.play_card(selected, first).await,
            None => {
                self.deselect();
                Ok(())
            }
        }
    }

    /// Validate a hand slot for play: known card, performers standing,
    /// enough mana. Surfaces failures as toasts too.
    fn check_playable(&self, hand_index: usize) -> Result<crate::cards::CardId, BattleError> {
        let card = *self
            .state
            .piles
            .hand()
            .get(hand_index)
            .ok_or(BattleError::HandIndex(hand_index))?;
        let def = self.cards.get(card).ok_or(BattleError::UnknownCard(card))?;

        if !self.is_card_playable(def) {
            self.notify(Notice::Toast("That performer is down!".into()));
            return Err(BattleError::PerformerDown(card));
        }
        let cost = self.card_cost(card);
        let available = self.state.mana.current;
        if available < cost {
            self.notify(Notice::Toast("Not enough mana".into()));
            return Err(BattleError::InsufficientMana { cost, available });
        }
        Ok(card)
    }

    /// Play the card at `hand_index` against the enemy at `target_index`.
    ///
    /// All checks happen before the lock is taken; once taken it is held
    /// through every trigger and released on the single exit path.
    pub async fn play_card(&mut self, hand_index: usize, target_index: usize) -> Result<(), BattleError> {
        self.ensure_player_input()?;
        let card = self.check_playable(hand_index)?;

        let cards = Arc::clone(&self.cards);
        let def = cards.get(card).ok_or(BattleError::UnknownCard(card))?;
        if def.kind.is_targeted() && !self.state.is_enemy_alive(target_index) {
            return Err(BattleError::InvalidTarget(target_index));
        }
        let cost = self.card_cost(card);

        self.state.processing = true;
        self.state.selected = None;

        self.state.mana.current -= cost;
        let counters = &mut self.state.counters;
        counters.mana_spent += cost;
        counters.first_card_played = true;
        counters.cards_played += 1;
        if def.kind == CardKind::Attack {
            counters.attacks_played += 1;
        }
        if def.tag == CardTag::Attack {
            self.state.crescendo += 1;
        }

        self.notify(Notice::AnimateCardPlay { card });
        self.state.piles.discard_from_hand(hand_index);
        self.log(format!("Played {}", def.name), LogCategory::Player);
        debug!(card = %card, cost, target = target_index, "card played");

        let caster = def
            .owner
            .as_deref()
            .and_then(|role| self.state.ally_by_key(role))
            .filter(|&id| self.state.unit(id).is_some_and(|u| u.is_alive()))
            .or_else(|| self.state.front_ally());

        let mut event = HookEvent::CardPlay(CardPlay { card, caster, target_index, triggers: 1 });
        trigger(self, &mut event).await;
        let triggers = match event {
            HookEvent::CardPlay(play) => play.triggers,
            _ => 1,
        };

        let level = self.card_level(card);
        let mut multiplier = 1.0 + 0.5 * f64::from(level);
        let bonus = std::mem::take(&mut self.state.variation_bonus);
        if bonus > 0.0 {
            multiplier += bonus;
            if let Some(id) = caster {
                let text = format!("Variation +{}%!", (bonus * 100.0).round() as i64);
                self.notify(Notice::float(id, text, "#f0c040"));
            }
        }

        let mut value = def.value;
        if value > 0 {
            value = self.hooks.process_value(self, &ValueQuery::Damage { card, caster }, value);
            value = (value as f64 * multiplier).ceil() as i64;
        }

        if def.effects.is_empty() {
            warn!(card = %card, "card has no effects");
        }
        let cast = Cast {
            card: Some(card),
            caster,
            target_index,
            card_value: value,
            multiplier,
            level,
        };
        for round in 0..triggers {
            if round > 0 {
                self.pause(Pause::TriggerStagger).await;
            }
            if self.is_over() {
                break;
            }
            for effect in &def.effects {
                if self.is_over() {
                    break;
                }
                EffectProcessor::apply(self, effect, &cast).await;
            }
            self.notify(Notice::UpdateUi);
        }

        if !self.is_over() {
            let mut after = HookEvent::AfterCardPlay { card, caster, target_index };
            trigger(self, &mut after).await;
        }

        self.state.processing = false;
        self.notify(Notice::UpdateUi);
        Ok(())
    }
}
