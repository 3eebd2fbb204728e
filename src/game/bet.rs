use crate::card::Card;
use crate::error::{ActionError, BetError, CardError};
use crate::event::{RoundEvent, Side};
use crate::result::RoundOutcome;

use super::{RoundEngine, RoundPhase};

impl RoundEngine {
    /// Starts a new round with the specified bet.
    ///
    /// Debits the bet, clears all hands and flags, and moves through
    /// `Betting` into `Dealing`.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress, the bet lies
    /// outside the configured bounds, or the chips do not cover it.
    pub fn start_round(&mut self, bet: usize) -> Result<(), BetError> {
        if !self.phase.can_start_round() {
            log::warn!("cannot start round in phase {:?}", self.phase);
            return Err(BetError::InvalidState);
        }

        if bet < self.options.minimum_bet {
            log::warn!("bet {bet} below minimum {}", self.options.minimum_bet);
            return Err(BetError::BelowMinimum {
                bet,
                minimum: self.options.minimum_bet,
            });
        }

        if bet > self.options.maximum_bet {
            log::warn!("bet {bet} above maximum {}", self.options.maximum_bet);
            return Err(BetError::AboveMaximum {
                bet,
                maximum: self.options.maximum_bet,
            });
        }

        if bet > self.chips {
            log::warn!("bet {bet} exceeds chips {}", self.chips);
            return Err(BetError::InsufficientFunds);
        }

        self.clear_round();
        self.set_phase(RoundPhase::Betting);

        self.chips -= bet;
        self.current_bet = bet;

        self.set_phase(RoundPhase::Dealing);
        log::info!("round started with bet {bet}, chips {}", self.chips);

        Ok(())
    }

    /// Adds a card to the player's active hand and returns its new total.
    ///
    /// While dealing, the primary hand takes up to two cards and a natural is
    /// resolved as soon as both opening hands are complete. During the player
    /// turn the card goes to the active hand and busts, the forced card of a
    /// double down, and split/double eligibility are handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the rank is invalid, the phase is neither
    /// `Dealing` nor `PlayerTurn`, or the opening hand is already complete.
    pub fn add_player_card(&mut self, card: Card) -> Result<u8, CardError> {
        if !card.is_valid() {
            log::warn!("rejected player card with rank {}", card.rank);
            return Err(CardError::InvalidRank(card.rank));
        }

        match self.phase {
            RoundPhase::Dealing => {
                if self.player_hand.len() >= 2 {
                    log::warn!("player opening hand already complete");
                    return Err(CardError::HandComplete);
                }

                let value = self.player_hand.add_card(card);
                log::debug!("player dealt rank {}, total {value}", card.rank);
                self.resolve_naturals();
                Ok(value)
            }
            RoundPhase::PlayerTurn => Ok(self.play_card(card)),
            phase => {
                log::warn!("cannot add player card in phase {phase:?}");
                Err(CardError::InvalidState)
            }
        }
    }

    /// Adds a card to the dealer's hand and returns the dealer's new total.
    ///
    /// # Errors
    ///
    /// Returns an error if the rank is invalid, the phase is neither
    /// `Dealing` nor `DealerTurn`, or the opening hand is already complete.
    pub fn add_dealer_card(&mut self, card: Card) -> Result<u8, CardError> {
        if !card.is_valid() {
            log::warn!("rejected dealer card with rank {}", card.rank);
            return Err(CardError::InvalidRank(card.rank));
        }

        match self.phase {
            RoundPhase::Dealing => {
                if self.dealer_hand.len() >= 2 {
                    log::warn!("dealer opening hand already complete");
                    return Err(CardError::HandComplete);
                }

                let value = self.dealer_hand.add_card(card);
                log::debug!("dealer dealt rank {}, total {value}", card.rank);
                self.resolve_naturals();
                Ok(value)
            }
            RoundPhase::DealerTurn => {
                let value = self.dealer_hand.add_card(card);
                log::debug!("dealer draws rank {}, total {value}", card.rank);
                Ok(value)
            }
            phase => {
                log::warn!("cannot add dealer card in phase {phase:?}");
                Err(CardError::InvalidState)
            }
        }
    }

    /// Returns whether both opening hands hold two cards.
    #[must_use]
    pub fn opening_hands_dealt(&self) -> bool {
        self.player_hand.len() == 2 && self.dealer_hand.len() == 2
    }

    /// Ends the round if either opening hand is a natural.
    fn resolve_naturals(&mut self) {
        if !self.opening_hands_dealt() {
            return;
        }

        let dealer_blackjack = self.dealer_hand.is_blackjack();

        if self.player_hand.is_blackjack() {
            self.emit(RoundEvent::Blackjack(Side::Player));
            if dealer_blackjack {
                self.emit(RoundEvent::Blackjack(Side::Dealer));
                self.end_round(RoundOutcome::Push);
            } else {
                self.end_round(RoundOutcome::PlayerBlackjack);
            }
        } else if dealer_blackjack {
            self.emit(RoundEvent::Blackjack(Side::Dealer));
            self.end_round(RoundOutcome::DealerWin);
        }
    }

    /// Moves from `Dealing` to `PlayerTurn` once the opening hands are dealt.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `Dealing` or either opening hand
    /// is missing cards.
    pub fn begin_player_turn(&mut self) -> Result<(), ActionError> {
        if self.phase != RoundPhase::Dealing {
            log::warn!("cannot begin player turn in phase {:?}", self.phase);
            return Err(ActionError::InvalidState);
        }

        if !self.opening_hands_dealt() {
            log::warn!(
                "cannot begin player turn with {} player and {} dealer cards",
                self.player_hand.len(),
                self.dealer_hand.len()
            );
            return Err(ActionError::DealingIncomplete);
        }

        self.set_phase(RoundPhase::PlayerTurn);
        self.refresh_eligibility();

        Ok(())
    }
}
