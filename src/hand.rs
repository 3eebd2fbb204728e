//! Hand valuation and hand storage.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Highest total a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// Computes the blackjack total of a sequence of cards.
///
/// Every Ace starts at 11; while the total is over 21 and an Ace is still
/// counted high, that Ace drops to 1. An empty slice is worth 0.
#[must_use]
pub fn valuate(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let limit = usize::from(BLACKJACK);
    let mut value: usize = 0;
    let mut aces: usize = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value += usize::from(card.value());
    }

    while value > limit && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= limit;
    (u8::try_from(value).unwrap_or(u8::MAX), is_soft)
}

/// An ordered hand of cards with a cached total.
///
/// The total is recomputed from the full card list on every change, so adding
/// a card can retroactively downgrade an Ace that was counted high.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    value: u8,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            value: 0,
        }
    }

    /// Adds a card to the hand and returns the new total.
    pub fn add_card(&mut self, card: Card) -> u8 {
        self.cards.push(card);
        self.revaluate()
    }

    fn revaluate(&mut self) -> u8 {
        self.value = valuate(&self.cards);
        self.value
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the cached total.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value == BLACKJACK
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.value > BLACKJACK
    }

    /// Returns whether the hand holds exactly two cards of equal blackjack
    /// value. A King and a Queen qualify.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [first, second] if first.value() == second.value())
    }

    /// Value of the first card only, with an Ace counted as 1.
    ///
    /// This is the dealer's up-card as shown before the dealer's turn. It is
    /// a face value, not a hand total, so the Ace is never counted high.
    #[must_use]
    pub fn up_card_value(&self) -> u8 {
        self.cards
            .first()
            .map_or(0, |card| if card.is_ace() { 1 } else { card.value() })
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            let card = self.cards.pop();
            self.revaluate();
            card
        } else {
            None
        }
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.value = 0;
    }
}
