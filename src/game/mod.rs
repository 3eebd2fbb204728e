//! Round engine and state management.

use core::fmt;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{ActionError, OptionsError};
use crate::event::{RoundEvent, RoundObserver};
use crate::hand::Hand;
use crate::options::RoundOptions;
use crate::payout;
use crate::result::{HandSettlement, RoundOutcome, RoundSettlement};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{HandSlot, RoundPhase, VariantFlags};

/// A single-seat blackjack round engine.
///
/// The engine owns the chip account, the three hands of a round (player
/// primary, player split, dealer) and the round phase. It never draws cards:
/// the driver feeds them through [`add_player_card`](Self::add_player_card)
/// and [`add_dealer_card`](Self::add_dealer_card) and signals decisions, and
/// the engine reports back through [`RoundObserver`]s.
pub struct RoundEngine {
    /// Table options.
    options: RoundOptions,
    /// Current round phase.
    phase: RoundPhase,
    /// Chips not currently at stake.
    chips: usize,
    /// Stake per player hand. Zero outside a round.
    current_bet: usize,
    /// The hand dealt at the start of the round.
    player_hand: Hand,
    /// The hand created by a split.
    split_hand: Hand,
    /// Dealer's hand.
    dealer_hand: Hand,
    /// Split and double-down state.
    flags: VariantFlags,
    /// Outcome of the last finished round.
    last_outcome: RoundOutcome,
    /// Settlement of the last finished round.
    last_settlement: Option<RoundSettlement>,
    /// Notification subscribers.
    observers: Vec<Box<dyn RoundObserver>>,
}

impl RoundEngine {
    /// Creates an engine with default options and the given chip balance.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{RoundEngine, RoundPhase};
    ///
    /// let engine = RoundEngine::new(1000);
    /// assert_eq!(engine.phase(), RoundPhase::Idle);
    /// assert_eq!(engine.chips(), 1000);
    /// ```
    #[must_use]
    pub fn new(chips: usize) -> Self {
        Self::build(RoundOptions::default(), chips)
    }

    /// Creates an engine with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`RoundOptions::validate`].
    pub fn with_options(options: RoundOptions, chips: usize) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::build(options, chips))
    }

    fn build(options: RoundOptions, chips: usize) -> Self {
        Self {
            options,
            phase: RoundPhase::Idle,
            chips,
            current_bet: 0,
            player_hand: Hand::new(),
            split_hand: Hand::new(),
            dealer_hand: Hand::new(),
            flags: VariantFlags::default(),
            last_outcome: RoundOutcome::None,
            last_settlement: None,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for every subsequent notification.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: RoundObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: RoundEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        self.phase = phase;
        log::debug!("round phase changed to {phase:?}");
        self.emit(RoundEvent::PhaseChanged(phase));
    }

    /// Clears hands, flags and the previous result.
    fn clear_round(&mut self) {
        self.player_hand.clear();
        self.split_hand.clear();
        self.dealer_hand.clear();
        self.flags = VariantFlags::default();
        self.last_outcome = RoundOutcome::None;
        self.last_settlement = None;
    }

    /// Ends a round played with a single hand.
    fn end_round(&mut self, outcome: RoundOutcome) {
        let payout = payout::payout(outcome, self.current_bet, &self.options);
        let hand = HandSettlement {
            slot: HandSlot::Primary,
            outcome,
            bet: self.current_bet,
            payout,
            player_value: self.player_hand.value(),
        };

        self.finish(RoundSettlement {
            outcome,
            payout,
            staked: self.current_bet,
            dealer_value: self.dealer_hand.value(),
            hands: alloc::vec![hand],
        });
    }

    /// Credits the payout and moves to `RoundEnd`.
    fn finish(&mut self, settlement: RoundSettlement) {
        let outcome = settlement.outcome;
        let payout = settlement.payout;

        self.chips = self.chips.saturating_add(payout);
        self.current_bet = 0;
        self.flags.can_double = false;
        self.flags.can_split = false;
        self.last_outcome = outcome;
        self.last_settlement = Some(settlement);

        self.set_phase(RoundPhase::RoundEnd);
        self.emit(RoundEvent::RoundEnded { outcome, payout });

        log::info!(
            "round ended: {outcome:?}, payout {payout}, chips {}",
            self.chips
        );
    }

    /// Returns to `Idle` after a round, clearing the table.
    ///
    /// If the chips can no longer cover the minimum bet the engine moves to
    /// [`RoundPhase::GameOver`] instead. Returns the new phase.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the game is over.
    pub fn reset_round(&mut self) -> Result<RoundPhase, ActionError> {
        if !self.phase.can_start_round() {
            log::warn!("cannot reset round in phase {:?}", self.phase);
            return Err(ActionError::InvalidState);
        }

        self.clear_round();
        self.current_bet = 0;

        if self.chips < self.options.minimum_bet {
            log::info!("chips {} below minimum bet, game over", self.chips);
            self.set_phase(RoundPhase::GameOver);
        } else {
            self.set_phase(RoundPhase::Idle);
        }

        Ok(self.phase)
    }

    /// Starts over with a fresh chip balance.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn new_game(&mut self, chips: usize) -> Result<(), ActionError> {
        if self.phase.is_in_round() {
            log::warn!("cannot start a new game in phase {:?}", self.phase);
            return Err(ActionError::InvalidState);
        }

        self.clear_round();
        self.current_bet = 0;
        self.chips = chips;
        self.set_phase(RoundPhase::Idle);
        Ok(())
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &RoundOptions {
        &self.options
    }

    /// Returns the current round phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns the chips not currently at stake.
    #[must_use]
    pub const fn chips(&self) -> usize {
        self.chips
    }

    /// Returns the stake per player hand (zero outside a round).
    #[must_use]
    pub const fn current_bet(&self) -> usize {
        self.current_bet
    }

    /// Returns whether the chips cover `amount`.
    #[must_use]
    pub const fn can_afford_bet(&self, amount: usize) -> bool {
        self.chips >= amount
    }

    /// Returns the player's primary hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Returns the split hand, if the player split this round.
    #[must_use]
    pub const fn split_hand(&self) -> Option<&Hand> {
        if self.flags.has_split {
            Some(&self.split_hand)
        } else {
            None
        }
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Returns which player hand receives cards and decisions.
    #[must_use]
    pub const fn active_slot(&self) -> HandSlot {
        if self.flags.is_playing_split_hand {
            HandSlot::Split
        } else {
            HandSlot::Primary
        }
    }

    /// Returns the hand receiving cards and decisions.
    #[must_use]
    pub const fn active_hand(&self) -> &Hand {
        match self.active_slot() {
            HandSlot::Primary => &self.player_hand,
            HandSlot::Split => &self.split_hand,
        }
    }

    const fn active_hand_mut(&mut self) -> &mut Hand {
        match self.active_slot() {
            HandSlot::Primary => &mut self.player_hand,
            HandSlot::Split => &mut self.split_hand,
        }
    }

    /// Returns the total of the primary hand.
    #[must_use]
    pub const fn player_value(&self) -> u8 {
        self.player_hand.value()
    }

    /// Returns the dealer's full total.
    #[must_use]
    pub const fn dealer_value(&self) -> u8 {
        self.dealer_hand.value()
    }

    /// Returns the value of the dealer's up-card only.
    #[must_use]
    pub fn visible_dealer_value(&self) -> u8 {
        self.dealer_hand.up_card_value()
    }

    /// Returns the split and double-down state.
    #[must_use]
    pub const fn flags(&self) -> VariantFlags {
        self.flags
    }

    /// Returns whether doubling down is currently offered.
    #[must_use]
    pub const fn can_double(&self) -> bool {
        self.flags.can_double
    }

    /// Returns whether splitting is currently offered.
    #[must_use]
    pub const fn can_split(&self) -> bool {
        self.flags.can_split
    }

    /// Returns the outcome of the last finished round.
    #[must_use]
    pub const fn last_outcome(&self) -> RoundOutcome {
        self.last_outcome
    }

    /// Returns the settlement of the last finished round.
    #[must_use]
    pub const fn last_settlement(&self) -> Option<&RoundSettlement> {
        self.last_settlement.as_ref()
    }
}

impl fmt::Display for RoundEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Phase: {:?}", self.phase)?;
        writeln!(
            f,
            "Player hand: {} ({} cards)",
            self.player_hand.value(),
            self.player_hand.len()
        )?;
        if let Some(split) = self.split_hand() {
            writeln!(f, "Split hand: {} ({} cards)", split.value(), split.len())?;
        }
        writeln!(
            f,
            "Dealer hand: {} ({} cards)",
            self.dealer_hand.value(),
            self.dealer_hand.len()
        )?;
        writeln!(f, "Current bet: {}", self.current_bet)?;
        write!(f, "Chips: {}", self.chips)
    }
}
