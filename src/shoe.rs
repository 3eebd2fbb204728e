//! Card sources for drivers.
//!
//! The engine never draws; a driver pulls cards from a [`CardSource`] and
//! feeds them in. [`Shoe`] is a seeded single-deck source for demos and
//! simulations.

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, MAX_RANK, MIN_RANK};

/// Produces drawn cards.
///
/// Any iterator of cards is a source, which makes scripted sequences easy:
///
/// ```
/// use bjround::{Card, CardSource};
///
/// let mut source = [Card::ACE, Card::KING].into_iter();
/// assert_eq!(source.draw(), Some(Card::ACE));
/// ```
pub trait CardSource {
    /// Draws the next card, or `None` if the source is exhausted.
    fn draw(&mut self) -> Option<Card>;
}

impl<I> CardSource for I
where
    I: Iterator<Item = Card>,
{
    fn draw(&mut self) -> Option<Card> {
        self.next()
    }
}

/// A single shuffled deck that reshuffles itself when it runs out.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Cards left to draw; the next card is at the end.
    cards: Vec<Card>,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::with_capacity(DECK_SIZE),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.reshuffle();
        shoe
    }

    /// Replaces the remaining cards with a full freshly shuffled deck.
    pub fn reshuffle(&mut self) {
        self.cards.clear();
        for _ in 0..4 {
            for rank in MIN_RANK..=MAX_RANK {
                self.cards.push(Card::new(rank));
            }
        }

        self.cards.shuffle(&mut self.rng);
        log::debug!("shoe reshuffled");
    }

    /// Returns the number of cards left before the next reshuffle.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Iterator for Shoe {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            self.reshuffle();
        }
        self.cards.pop()
    }
}
