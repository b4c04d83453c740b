//! Card piles.
//!
//! A battle has three ordered piles of card ids: draw, hand and discard.
//! The top of the draw pile is the end of its vector. When the draw pile
//! runs dry the discard pile is shuffled back in before drawing continues.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::rng::GameRng;

/// Which pile a card sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
}

/// Result of drawing one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub card: CardId,
    /// The discard pile was shuffled into the draw pile first.
    pub reshuffled: bool,
}

/// The draw, hand and discard piles of one battle.
///
/// ## Usage
///
/// ```
/// use rust_cadence::cards::CardId;
/// use rust_cadence::core::GameRng;
/// use rust_cadence::zones::CardPiles;
///
/// let mut rng = GameRng::new(1);
/// let mut piles = CardPiles::new();
/// piles.set_deck(vec![CardId::new(1), CardId::new(2)]);
///
/// let drawn = piles.draw_one(&mut rng).unwrap();
/// assert_eq!(drawn.card, CardId::new(2));
/// assert_eq!(piles.hand().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    draw: Vec<CardId>,
    hand: Vec<CardId>,
    discard: Vec<CardId>,
}

impl CardPiles {
    /// Create empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every pile: the deck becomes the draw pile, hand and
    /// discard are emptied.
    pub fn set_deck(&mut self, deck: Vec<CardId>) {
        self.draw = deck;
        self.hand.clear();
        self.discard.clear();
    }

    #[must_use]
    pub fn pile(&self, pile: Pile) -> &[CardId] {
        match pile {
            Pile::Draw => &self.draw,
            Pile::Hand => &self.hand,
            Pile::Discard => &self.discard,
        }
    }

    #[must_use]
    pub fn draw_pile(&self) -> &[CardId] {
        &self.draw
    }

    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[CardId] {
        &self.discard
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }

    /// Shuffle the draw pile.
    pub fn shuffle_draw(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.draw);
    }

    /// Move the top card of the draw pile into the hand.
    ///
    /// Reshuffles the discard pile into the draw pile when the draw pile is
    /// empty. Returns `None` when both are empty.
    pub fn draw_one(&mut self, rng: &mut GameRng) -> Option<Drawn> {
        let mut reshuffled = false;
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.draw.append(&mut self.discard);
            rng.shuffle(&mut self.draw);
            reshuffled = true;
        }

        let card = self.draw.pop()?;
        self.hand.push(card);
        Some(Drawn { card, reshuffled })
    }

    /// Move the card at `index` in the hand to the discard pile.
    pub fn discard_from_hand(&mut self, index: usize) -> Option<CardId> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.discard.push(card);
        Some(card)
    }

    /// Move the whole hand to the discard pile.
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    /// Merge hand and discard back into the draw pile.
    pub fn merge_into_draw(&mut self) {
        self.draw.append(&mut self.hand);
        self.draw.append(&mut self.discard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().copied().map(CardId::new).collect()
    }

    #[test]
    fn test_draw_from_top() {
        let mut rng = GameRng::new(1);
        let mut piles = CardPiles::new();
        piles.set_deck(ids(&[1, 2, 3]));

        assert_eq!(piles.draw_one(&mut rng).unwrap().card, CardId::new(3));
        assert_eq!(piles.draw_one(&mut rng).unwrap().card, CardId::new(2));
        assert_eq!(piles.hand(), ids(&[3, 2]).as_slice());
    }

    #[test]
    fn test_reshuffle_when_draw_empty() {
        let mut rng = GameRng::new(1);
        let mut piles = CardPiles::new();
        piles.set_deck(ids(&[1, 2]));
        piles.draw_one(&mut rng);
        piles.draw_one(&mut rng);
        piles.discard_hand();

        let drawn = piles.draw_one(&mut rng).unwrap();
        assert!(drawn.reshuffled);
        assert_eq!(piles.discard_pile().len(), 0);
        assert_eq!(piles.total(), 2);
    }

    #[test]
    fn test_draw_stops_when_exhausted() {
        let mut rng = GameRng::new(1);
        let mut piles = CardPiles::new();
        piles.set_deck(ids(&[1]));
        assert!(piles.draw_one(&mut rng).is_some());
        assert!(piles.draw_one(&mut rng).is_none());
    }

    #[test]
    fn test_discard_from_hand() {
        let mut rng = GameRng::new(1);
        let mut piles = CardPiles::new();
        piles.set_deck(ids(&[1, 2]));
        piles.draw_one(&mut rng);
        piles.draw_one(&mut rng);

        assert_eq!(piles.discard_from_hand(0), Some(CardId::new(2)));
        assert_eq!(piles.discard_from_hand(5), None);
        assert_eq!(piles.hand(), ids(&[1]).as_slice());
        assert_eq!(piles.discard_pile(), ids(&[2]).as_slice());
    }

    #[test]
    fn test_merge_into_draw() {
        let mut rng = GameRng::new(1);
        let mut piles = CardPiles::new();
        piles.set_deck(ids(&[1, 2, 3]));
        piles.draw_one(&mut rng);
        piles.draw_one(&mut rng);
        piles.discard_from_hand(0);

        piles.merge_into_draw();
        assert_eq!(piles.draw_pile().len(), 3);
        assert!(piles.hand().is_empty());
        assert!(piles.discard_pile().is_empty());
    }
}
