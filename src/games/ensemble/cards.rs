//! The ensemble card pool.
//!
//! Primary damage and block effects carry no explicit value so they
//! inherit the card value after `ModifyDamage` and the level multiplier.
//! Secondary effects carry their own value.

use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry, CardTag};
use crate::effects::{EffectDescriptor, TargetScope};
use crate::status::StatusId;

use super::customs;

/// Delay before a status lands after the hit that carries it.
const STATUS_DELAY_MS: u64 = 350;

fn attack(id: u32, name: &str, cost: i64, value: i64) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, CardKind::Attack)
        .with_cost(cost)
        .with_value(value)
}

fn defend(id: u32, name: &str, cost: i64, value: i64) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, CardKind::Defend)
        .with_cost(cost)
        .with_value(value)
        .with_tag(CardTag::Defend)
}

fn skill(id: u32, name: &str, kind: CardKind, cost: i64, value: i64) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, kind)
        .with_cost(cost)
        .with_value(value)
        .with_tag(CardTag::Buff)
}

fn delayed_status(status: StatusId, amount: i64, message: &str) -> EffectDescriptor {
    EffectDescriptor::status(status, amount)
        .delay(STATUS_DELAY_MS)
        .with_message(message)
}

/// Every card the ensemble can field.
#[must_use]
pub fn card_table() -> CardRegistry {
    let mut cards = CardRegistry::new();
    for card in pianist()
        .into_iter()
        .chain(common())
        .chain(violinist())
        .chain(vocalist())
        .chain(cellist())
        .chain(brass())
        .chain(conductor())
        .chain(flutist())
        .chain(percussionist())
        .chain(ensembles())
    {
        cards.register(card);
    }
    cards
}

fn pianist() -> Vec<CardDefinition> {
    vec![
        attack(1, "Appassionata", 2, 16)
            .owned_by("pianist")
            .with_effect(EffectDescriptor::damage().with_vfx("heavy_hit")),
        skill(19, "Polyphony", CardKind::Skill, 1, 0)
            .owned_by("pianist")
            .with_effect(EffectDescriptor::custom(customs::POLYPHONY)),
        attack(30, "Coda", 1, 6)
            .owned_by("pianist")
            .with_effect(EffectDescriptor::custom(customs::HAND_SCALE)),
    ]
}

fn common() -> Vec<CardDefinition> {
    vec![
        CardDefinition::new(CardId::new(2), "Dissonance", CardKind::Debuff)
            .with_cost(1)
            .with_value(5)
            .with_effect(EffectDescriptor::damage().with_vfx("dissonance"))
            .with_effect(delayed_status(StatusId::VULNERABLE, 1, "Vulnerable +1")),
        defend(3, "Rest", 1, 7).with_effect(EffectDescriptor::block().with_vfx("shield")),
        attack(4, "Trill", 0, 5)
            .with_effect(EffectDescriptor::damage())
            .with_effect(EffectDescriptor::draw(1)),
        attack(6, "Solo", 2, 14).with_effect(EffectDescriptor::damage().piercing()),
        attack(7, "Presto", 0, 4)
            .with_effect(EffectDescriptor::damage())
            .with_effect(EffectDescriptor::mana(1)),
        attack(17, "Crescendo", 1, 6).with_effect(EffectDescriptor::custom(customs::CRESCENDO)),
        skill(18, "Variation", CardKind::Skill, 1, 0).with_effect(EffectDescriptor::custom(customs::VARIATION)),
    ]
}

fn violinist() -> Vec<CardDefinition> {
    vec![
        attack(5, "Bowing", 1, 6)
            .owned_by("violinist")
            .with_effect(EffectDescriptor::damage().hits(2)),
        attack(20, "Double Stop", 1, 4)
            .owned_by("violinist")
            .with_effect(EffectDescriptor::custom(customs::DOUBLE_STOP)),
        attack(31, "Pizzicato", 0, 3)
            .owned_by("violinist")
            .with_effect(EffectDescriptor::damage())
            .with_effect(delayed_status(StatusId::VULNERABLE, 2, "Vulnerable +2")),
    ]
}

fn vocalist() -> Vec<CardDefinition> {
    vec![
        attack(8, "Screech", 1, 10)
            .owned_by("vocalist")
            .with_effect(EffectDescriptor::damage())
            .with_effect(delayed_status(StatusId::RESONANCE, 1, "Resonance +1")),
        skill(9, "Resonance", CardKind::Buff, 1, 3)
            .owned_by("vocalist")
            .with_effect(
                EffectDescriptor::status(StatusId::RESONANCE, 3)
                    .scaled()
                    .target(TargetScope::All)
                    .with_message("Resonance +3"),
            ),
        CardDefinition::new(CardId::new(10), "Aria", CardKind::Special)
            .with_cost(2)
            .with_value(10)
            .owned_by("vocalist")
            .with_effect(EffectDescriptor::custom(customs::DETONATE)),
    ]
}

fn cellist() -> Vec<CardDefinition> {
    vec![
        defend(11, "Low Hum", 1, 12)
            .owned_by("cellist")
            .with_effect(EffectDescriptor::block()),
        CardDefinition::new(CardId::new(12), "Ensemble Strike", CardKind::Special)
            .with_cost(2)
            .with_value(100)
            .owned_by("cellist")
            .with_effect(EffectDescriptor::custom(customs::BLOCK_STRIKE)),
        defend(13, "String Bulwark", 1, 5)
            .owned_by("cellist")
            .with_effect(EffectDescriptor::block())
            .with_effect(EffectDescriptor::draw(1)),
    ]
}

fn brass() -> Vec<CardDefinition> {
    vec![
        attack(14, "Shock Horn", 1, 8)
            .owned_by("brass")
            .with_effect(EffectDescriptor::damage())
            .with_effect(delayed_status(StatusId::VULNERABLE, 2, "Vulnerable +2")),
        attack(15, "Blast Note", 2, 18)
            .owned_by("brass")
            .with_effect(EffectDescriptor::damage().target(TargetScope::All)),
        attack(16, "Apocalypse Symphony", 3, 35)
            .owned_by("brass")
            .with_effect(EffectDescriptor::damage().with_vfx("heavy_hit")),
    ]
}

fn conductor() -> Vec<CardDefinition> {
    vec![
        skill(21, "Upbeat", CardKind::Skill, 0, 0)
            .owned_by("conductor")
            .with_effect(EffectDescriptor::custom(customs::UPBEAT)),
        attack(22, "Hush", 1, 8)
            .owned_by("conductor")
            .with_effect(EffectDescriptor::damage())
            .with_effect(EffectDescriptor::custom(customs::WEAKEN)),
        attack(23, "Tutti", 2, 15)
            .owned_by("conductor")
            .with_effect(EffectDescriptor::damage())
            .with_effect(EffectDescriptor::block().with_value(8).scaled().target(TargetScope::All)),
    ]
}

fn flutist() -> Vec<CardDefinition> {
    vec![
        attack(24, "Flutter Tongue", 0, 3)
            .owned_by("flutist")
            .with_effect(EffectDescriptor::custom(customs::FLUTTER)),
        skill(25, "Breath Control", CardKind::Skill, 1, 0)
            .owned_by("flutist")
            .with_effect(EffectDescriptor::custom(customs::BREATH)),
        attack(26, "Piercing Tone", 1, 8)
            .owned_by("flutist")
            .with_effect(EffectDescriptor::damage().piercing())
            .with_effect(EffectDescriptor::draw(1)),
    ]
}

fn percussionist() -> Vec<CardDefinition> {
    vec![
        attack(27, "Drum Roll", 1, 4)
            .owned_by("percussionist")
            .with_effect(EffectDescriptor::damage().hits(4)),
        attack(28, "Cymbal Crash", 2, 10)
            .owned_by("percussionist")
            .with_effect(EffectDescriptor::damage().with_vfx("heavy_hit"))
            .with_effect(delayed_status(StatusId::STUNNED, 1, "Enemy stunned!").with_vfx("stun")),
        defend(29, "Timpani", 1, 10)
            .owned_by("percussionist")
            .with_effect(EffectDescriptor::block())
            .with_effect(EffectDescriptor::custom(customs::RETAIN)),
    ]
}

fn ensembles() -> Vec<CardDefinition> {
    vec![
        CardDefinition::new(CardId::new(101), "Winterreise", CardKind::Duo)
            .with_cost(1)
            .with_value(12)
            .requiring("pianist")
            .requiring("vocalist")
            .with_effect(EffectDescriptor::damage().with_vfx("ice"))
            .with_effect(EffectDescriptor::toast("Winter falls..."))
            .with_effect(EffectDescriptor::status(StatusId::STUNNED, 1).with_message("Enemy frozen!")),
        CardDefinition::new(CardId::new(102), "Kreutzer Sonata", CardKind::Duo)
            .with_value(6)
            .requiring("pianist")
            .requiring("violinist")
            .with_effect(EffectDescriptor::damage().hits(4).interval(150).with_vfx("slash")),
        CardDefinition::new(CardId::new(103), "Green Shade", CardKind::Duo)
            .with_cost(1)
            .with_value(15)
            .with_tag(CardTag::Defend)
            .requiring("violinist")
            .requiring("vocalist")
            .with_effect(EffectDescriptor::heal().target(TargetScope::All).with_vfx("heal"))
            .with_effect(EffectDescriptor::block().with_value(5).scaled().target(TargetScope::All))
            .with_effect(EffectDescriptor::toast("A sacred calm")),
        CardDefinition::new(CardId::new(104), "Adagio for Strings", CardKind::Duo)
            .with_cost(1)
            .with_value(30)
            .with_tag(CardTag::Defend)
            .requiring("violinist")
            .requiring("cellist")
            .with_effect(EffectDescriptor::block().target(TargetScope::Front).with_vfx("shield"))
            .with_effect(EffectDescriptor::custom(customs::ADAGIO)),
        CardDefinition::new(CardId::new(105), "Carnival of the Animals", CardKind::Duo)
            .with_cost(2)
            .with_value(8)
            .requiring("pianist")
            .requiring("cellist")
            .with_effect(EffectDescriptor::damage().hits(5).interval(120)),
        CardDefinition::new(CardId::new(106), "Elegy", CardKind::Trio)
            .with_cost(2)
            .with_value(30)
            .requiring("pianist")
            .requiring("vocalist")
            .requiring("cellist")
            .with_effect(EffectDescriptor::damage().piercing().with_vfx("soundwave"))
            .with_effect(EffectDescriptor::heal().with_value(20).scaled().target(TargetScope::All)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::EffectKind;

    #[test]
    fn test_card_table_is_complete() {
        let cards = card_table();
        assert_eq!(cards.len(), 37);
        for id in (1..=31).chain(101..=106) {
            assert!(cards.contains(CardId::new(id)), "missing card {id}");
        }
    }

    #[test]
    fn test_every_card_has_effects() {
        for card in card_table().iter() {
            assert!(!card.effects.is_empty(), "{} has no effects", card.name);
        }
    }

    #[test]
    fn test_duo_requirements() {
        let cards = card_table();
        let elegy = cards.get(CardId::new(106)).unwrap();
        assert_eq!(elegy.requires.len(), 3);
        assert!(elegy.owner.is_none());
        assert!(!elegy.kind.is_targeted());
    }

    #[test]
    fn test_blast_note_hits_everyone() {
        let cards = card_table();
        let blast = cards.get(CardId::new(15)).unwrap();
        assert_eq!(blast.effects[0].kind, EffectKind::Damage);
        assert_eq!(blast.effects[0].target, TargetScope::All);
    }

    #[test]
    fn test_status_riders_are_delayed() {
        let cards = card_table();
        let shock = cards.get(CardId::new(14)).unwrap();
        assert_eq!(shock.effects[1].delay_ms, Some(STATUS_DELAY_MS));
    }
}
