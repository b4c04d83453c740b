//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a battle can reference.
//! Piles hold only ids; everything else is looked up here.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::error::ConfigError;

use super::definition::{CardDefinition, CardId, CardKind};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_cadence::cards::{CardDefinition, CardId, CardKind, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Strike", CardKind::Attack));
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Strike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a registry from a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cards: Vec<CardDefinition> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for card in cards {
            registry.register(card);
        }
        Ok(registry)
    }

    /// Register a card definition. A later definition with the same id
    /// replaces the earlier one.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            warn!(card = %card.id, "card definition replaced");
        }
        if card.effects.is_empty() {
            warn!(card = %card.id, "card has no effects");
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Kind of a card, if it is registered.
    #[must_use]
    pub fn kind_of(&self, id: CardId) -> Option<CardKind> {
        self.get(id).map(|c| c.kind)
    }

    /// Cards owned by a role.
    pub fn owned_by<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a CardDefinition> {
        self.cards
            .values()
            .filter(move |c| c.owner.as_deref() == Some(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Strike", CardKind::Attack));

        assert!(registry.contains(CardId::new(1)));
        assert_eq!(registry.kind_of(CardId::new(1)), Some(CardKind::Attack));
        assert_eq!(registry.kind_of(CardId::new(2)), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replace_keeps_single_entry() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Old", CardKind::Attack));
        registry.register(CardDefinition::new(CardId::new(1), "New", CardKind::Attack));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "New");
    }

    #[test]
    fn test_owned_by() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "A", CardKind::Attack).owned_by("cellist"));
        registry.register(CardDefinition::new(CardId::new(2), "B", CardKind::Attack).owned_by("brass"));
        registry.register(CardDefinition::new(CardId::new(3), "C", CardKind::Defend).owned_by("cellist"));

        let mut ids: Vec<_> = registry.owned_by("cellist").map(|c| c.id.raw()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{ "id": 7, "name": "Presto", "cost": 0, "kind": "atk", "value": 4 }]"#;
        let registry = CardRegistry::from_json(json).unwrap();
        assert_eq!(registry.get(CardId::new(7)).unwrap().value, 4);
    }
}
