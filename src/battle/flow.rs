//! Phase transitions: preparation, player turn start, enemy turn and the
//! terminal states.

use tracing::debug;

use crate::ai::{EnemyPlanner, Intent, IntentKind};
use crate::cards::CardId;
use crate::core::{BattleError, Phase, UnitId};
use crate::hooks::{trigger, HookEvent, ValueQuery};
use crate::status::StatusId;

use super::notice::{LogCategory, Notice};
use super::scheduler::Pause;
use super::Battle;

const BUFF_STRENGTH: i64 = 2;
const BUFF_STRENGTH_HEAVY: i64 = 3;

impl Battle {
    /// `Idle → Prepare`. Fires `BattleInit` and plans the opening intents.
    pub async fn prepare(&mut self) -> Result<(), BattleError> {
        if self.state.phase != Phase::Idle {
            return Err(BattleError::WrongPhase { actual: self.state.phase });
        }
        self.state.phase = Phase::Prepare;
        self.notify(Notice::ClearLog);
        debug!(allies = self.state.allies().len(), enemies = self.state.enemies().len(), "battle prepared");

        trigger(self, &mut HookEvent::BattleInit).await;
        self.plan_enemies();
        self.notify(Notice::RenderBattlefield);
        Ok(())
    }

    /// Swap two formation slots. Only allowed while preparing.
    pub fn swap_allies(&mut self, a: usize, b: usize) -> Result<(), BattleError> {
        if self.state.phase != Phase::Prepare {
            return Err(BattleError::WrongPhase { actual: self.state.phase });
        }
        if !self.state.swap_allies(a, b) {
            return Err(BattleError::InvalidFormation(a, b));
        }
        for slot in [a, b] {
            if let Some(&unit) = self.state.allies().get(slot) {
                self.notify(Notice::HighlightUnit { unit, on: false });
            }
        }
        self.notify(Notice::RenderBattlefield);
        Ok(())
    }

    /// `Prepare → Player`: start the first turn.
    pub async fn begin(&mut self) -> Result<(), BattleError> {
        if self.state.phase != Phase::Prepare {
            return Err(BattleError::WrongPhase { actual: self.state.phase });
        }
        self.notify(Notice::RenderBattlefield);
        self.start_turn().await;
        Ok(())
    }

    /// Start a player turn. Holds the lock until the opening draw is done.
    pub(crate) async fn start_turn(&mut self) {
        self.state.processing = true;
        self.state.phase = Phase::Player;
        self.state.turn += 1;
        self.state.reset_turn();
        let turn = self.state.turn;
        debug!(turn, "player turn started");

        if turn == 1 {
            trigger(self, &mut HookEvent::BattleStart).await;
        } else {
            self.decay_ally_block();
        }
        self.log(format!("=== Turn {turn} ==="), LogCategory::System);

        for id in self.state.living_allies() {
            if let Some(unit) = self.state.unit_mut(id) {
                self.status.process_turn_start(unit);
            }
        }

        let max = self.state.mana.max;
        self.state.mana.current = self.hooks.process_value(self, &ValueQuery::TurnMana { turn }, max).max(0);

        trigger(self, &mut HookEvent::TurnStart { turn }).await;

        if !self.is_over() {
            let count = self.state.mana.per_turn_draw;
            self.draw_cards(count).await;
        }

        self.state.processing = false;
        self.notify(Notice::UpdateUi);
    }

    /// Halve every ally's block, keeping at least the retained amount.
    fn decay_ally_block(&mut self) {
        for id in self.state.allies().to_vec() {
            let retain = self.hooks.process_value(self, &ValueQuery::BlockRetain { unit: id }, 0);
            let Some(unit) = self.state.unit_mut(id) else {
                continue;
            };
            let keep = if unit.retain_block {
                unit.retain_block = false;
                unit.block
            } else {
                retain
            };
            unit.block = (unit.block / 2).max(unit.block.min(keep)).max(0);
        }
    }

    /// Draw up to `count` cards one step at a time, reshuffling the
    /// discard pile when the draw pile runs out. Stops early when both are
    /// empty.
    pub async fn draw_cards(&mut self, count: usize) -> Vec<CardId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(next) = self.state.piles.draw_one(&mut self.rng) else {
                break;
            };
            if next.reshuffled {
                debug!("discard pile shuffled into draw pile");
            }
            drawn.push(next.card);
            self.notify(Notice::UpdateUi);
            self.pause(Pause::Draw).await;
        }
        drawn
    }

    /// `Player → EnemyTurn`, then run the enemy turn and the next player
    /// turn start.
    pub async fn end_turn(&mut self) -> Result<(), BattleError> {
        self.ensure_player_input()?;
        self.state.processing = true;
        self.state.selected = None;

        for id in self.state.living_allies() {
            if let Some(unit) = self.state.unit_mut(id) {
                self.status.process_turn_end(unit);
            }
        }
        self.state.piles.discard_hand();
        self.state.phase = Phase::EnemyTurn;
        debug!(turn = self.state.turn, "enemy turn");
        self.notify(Notice::UpdateUi);

        self.pause(Pause::EndTurn).await;
        self.enemy_action().await;

        self.state.processing = false;
        Ok(())
    }

    /// Every living enemy acts in roster order, then intents are re-planned
    /// and the next player turn starts.
    async fn enemy_action(&mut self) {
        if self.is_over() {
            return;
        }
        let turn = self.state.turn;
        trigger(self, &mut HookEvent::EnemyTurnStart { turn }).await;

        let enemies = self.state.enemies().to_vec();
        for &id in &enemies {
            if self.is_over() {
                return;
            }
            let Some(enemy) = self.state.unit_mut(id).filter(|u| u.is_alive()) else {
                continue;
            };
            let stunned = self.status.has_status(enemy, StatusId::STUNNED);
            enemy.block = 0;
            self.status.process_turn_start(enemy);
            let name = enemy.name.clone();
            let intent = enemy.intent.clone().unwrap_or_else(Intent::none);

            if stunned {
                debug!(enemy = %id, "stunned, skipping");
                self.notify(Notice::Toast(format!("{name} is stunned!")));
                self.pause(Pause::EnemyStunned).await;
            } else {
                self.resolve_intent(id, &intent).await;
                if self.is_over() {
                    return;
                }
            }
            self.notify(Notice::UpdateUi);
            self.pause(Pause::EnemyGap).await;
        }

        for &id in &enemies {
            if let Some(enemy) = self.state.unit_mut(id).filter(|u| !u.dead) {
                self.status.process_turn_end(enemy);
            }
        }

        self.plan_enemies();
        self.pause(Pause::PlanSettle).await;
        if !self.is_over() {
            self.start_turn().await;
        }
    }

    /// Carry out one enemy's planned intent.
    async fn resolve_intent(&mut self, id: UnitId, intent: &Intent) {
        debug!(enemy = %id, kind = ?intent.kind, value = intent.value, "enemy acts");

        if intent.kind.is_attack() {
            self.pause(Pause::EnemyImpact).await;
            if self.is_over() {
                return;
            }
            if let Some(target) = self.state.front_ally() {
                self.damage_ally(Some(id), target, intent.value, false).await;
            }
            if !self.is_over() {
                self.pause(Pause::EnemyRecovery).await;
            }
            return;
        }

        let Some(max_hp) = self.state.unit(id).map(|u| u.max_hp) else {
            return;
        };
        let or_value = |computed: i64| if intent.value > 0 { intent.value } else { computed };

        match intent.kind {
            IntentKind::Defend => self.grant_block(id, or_value(max_hp / 10)),
            IntentKind::Fortify => self.grant_block(id, or_value(max_hp / 4)),
            IntentKind::Buff => {
                self.add_status(id, StatusId::STRENGTH, or_value(BUFF_STRENGTH));
            }
            IntentKind::BuffStrength => {
                self.add_status(id, StatusId::STRENGTH, or_value(BUFF_STRENGTH_HEAVY));
            }
            IntentKind::Cleanse => {
                self.remove_status(id, StatusId::VULNERABLE);
                self.notify(Notice::float(id, "Cleansed", "#ffffff"));
            }
            IntentKind::Heal => {
                self.heal_unit(id, or_value(max_hp / 10));
            }
            IntentKind::None | IntentKind::Attack | IntentKind::HeavyAttack | IntentKind::WeakAttack => {}
        }
        self.notify(Notice::UpdateUi);
        self.pause(Pause::EnemyNonAttack).await;
    }

    /// Plan the next intent of every enemy.
    pub fn plan_enemies(&mut self) {
        let ctx = self.plan_context();
        for id in self.state.enemies().to_vec() {
            let Some(behavior) = self.behaviors.get(&id).cloned() else {
                continue;
            };
            let Some(enemy) = self.state.unit_mut(id) else {
                continue;
            };
            let intent = EnemyPlanner::plan_intent(enemy, &behavior, &ctx, &mut self.rng);
            enemy.intent = Some(intent);
        }
        self.notify(Notice::UpdateUi);
    }

    /// Every enemy is down.
    pub(crate) fn win(&mut self) {
        if self.is_over() {
            return;
        }
        self.state.phase = Phase::Victory;
        self.state.selected = None;
        self.state.piles.merge_into_draw();
        debug!(turn = self.state.turn, "victory");
        self.notify(Notice::StopBgm);
        self.notify(Notice::PlaySound("victory".into()));
        self.log("Victory!", LogCategory::System);
        self.notify(Notice::UpdateUi);
    }

    /// Every ally is down.
    pub(crate) fn lose(&mut self) {
        if self.is_over() {
            return;
        }
        self.state.phase = Phase::Defeat;
        self.state.selected = None;
        debug!(turn = self.state.turn, "defeat");
        self.notify(Notice::StopBgm);
        self.notify(Notice::Toast("The performance is over...".into()));
        self.notify(Notice::UpdateUi);
    }

    /// Reject input while locked or outside the player phase.
    pub(crate) fn ensure_player_input(&self) -> Result<(), BattleError> {
        if self.state.processing {
            return Err(BattleError::Busy);
        }
        if self.state.phase != Phase::Player {
            return Err(BattleError::WrongPhase { actual: self.state.phase });
        }
        Ok(())
    }
}
