//! Card values supplied by the driver.

use crate::error::CardError;

/// Lowest valid rank (Ace).
pub const MIN_RANK: u8 = 1;

/// Highest valid rank (King).
pub const MAX_RANK: u8 = 13;

/// A drawn card.
///
/// Only the rank matters to the rules: suits are a presentation concern and
/// stay with the card source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// The Ace.
    pub const ACE: Self = Self::new(1);
    /// The Jack.
    pub const JACK: Self = Self::new(11);
    /// The Queen.
    pub const QUEEN: Self = Self::new(12);
    /// The King.
    pub const KING: Self = Self::new(13);

    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. The engine rejects
    /// cards outside 1..=13 when they are added to a hand; use
    /// [`Card::try_from`] to validate up front.
    #[must_use]
    pub const fn new(rank: u8) -> Self {
        Self { rank }
    }

    /// Returns whether the rank lies in 1..=13.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.rank >= MIN_RANK && self.rank <= MAX_RANK
    }

    /// Returns whether the card is an Ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }

    /// Returns the blackjack value of the card with the Ace counted high.
    ///
    /// Face cards count 10. Invalid ranks count 0.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self.rank {
            1 => 11,
            2..=10 => self.rank,
            11..=13 => 10,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = CardError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        let card = Self::new(rank);
        if card.is_valid() {
            Ok(card)
        } else {
            Err(CardError::InvalidRank(rank))
        }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
