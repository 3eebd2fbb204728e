use crate::card::Card;
use crate::error::ActionError;
use crate::event::RoundEvent;
use crate::result::RoundOutcome;

use super::{HandSlot, RoundEngine, RoundPhase};

impl RoundEngine {
    fn ensure_player_turn(&self, action: &str) -> Result<(), ActionError> {
        if self.phase == RoundPhase::PlayerTurn {
            Ok(())
        } else {
            log::warn!("cannot {action} in phase {:?}", self.phase);
            Err(ActionError::InvalidState)
        }
    }

    /// Adds a card to the active hand during the player turn.
    pub(super) fn play_card(&mut self, card: Card) -> u8 {
        let slot = self.active_slot();
        let value = self.active_hand_mut().add_card(card);
        log::debug!("{slot:?} hand takes rank {}, total {value}", card.rank);

        if self.active_hand().is_bust() {
            self.bust_active_hand();
        } else if self.flags.has_doubled {
            // The double down's single card ends the turn.
            self.flags.can_double = false;
            self.flags.can_split = false;
            self.set_phase(RoundPhase::DealerTurn);
        } else {
            self.refresh_eligibility();
        }

        value
    }

    /// Recomputes split/double eligibility for the active hand.
    pub(super) fn refresh_eligibility(&mut self) {
        let hand = self.active_hand();
        let two_cards = self.phase == RoundPhase::PlayerTurn && hand.len() == 2;
        // Either variant rules out the other for the rest of the round.
        let untouched = !self.flags.has_doubled && !self.flags.has_split;
        let affordable = self.chips >= self.current_bet;
        let pair = hand.is_pair();

        self.flags.can_double = two_cards && untouched && affordable;
        self.flags.can_split = two_cards && untouched && affordable && pair;
    }

    fn bust_active_hand(&mut self) {
        self.flags.can_double = false;
        self.flags.can_split = false;
        self.emit(RoundEvent::PlayerBusted);

        match self.active_slot() {
            HandSlot::Primary if self.flags.has_split => {
                log::debug!("primary hand busts, playing split hand");
                self.switch_to_split_hand();
            }
            HandSlot::Primary => self.end_round(RoundOutcome::PlayerBust),
            HandSlot::Split if self.player_hand.is_bust() => {
                let mut settlement = self.split_settlement();
                settlement.outcome = RoundOutcome::PlayerBust;
                self.finish(settlement);
            }
            HandSlot::Split => self.set_phase(RoundPhase::DealerTurn),
        }
    }

    fn switch_to_split_hand(&mut self) {
        self.flags.is_playing_split_hand = true;
        self.refresh_eligibility();
    }

    /// Player action: Hit.
    ///
    /// The engine does not draw; this only checks that the active hand may
    /// take a card. The driver then feeds it through
    /// [`add_player_card`](Self::add_player_card).
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `PlayerTurn`.
    pub fn player_hit(&self) -> Result<(), ActionError> {
        self.ensure_player_turn("hit")?;
        log::debug!("player hits on {:?} hand", self.active_slot());
        Ok(())
    }

    /// Player action: Stand.
    ///
    /// Standing on the primary hand of a split round passes control to the
    /// split hand; any other stand ends the player turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `PlayerTurn`, or the player has
    /// doubled down and the hand has not yet received its one card.
    pub fn player_stand(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn("stand")?;

        if self.flags.has_doubled && self.active_hand().len() == 2 {
            log::warn!("cannot stand before the double down card is dealt");
            return Err(ActionError::InvalidState);
        }

        if self.flags.has_split && !self.flags.is_playing_split_hand {
            log::debug!("player stands on primary hand, playing split hand");
            self.switch_to_split_hand();
            return Ok(());
        }

        log::debug!("player stands");
        self.flags.can_double = false;
        self.flags.can_split = false;
        self.set_phase(RoundPhase::DealerTurn);

        Ok(())
    }

    /// Player action: Double down.
    ///
    /// Debits the current bet again and doubles it. The next card added to
    /// the hand is the only one it receives; it ends the player turn.
    ///
    /// Eligibility is checked against the live hand and chip balance, not the
    /// cached [`can_double`](Self::can_double) flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `PlayerTurn`, the hand does not
    /// hold exactly two cards, a variant was already chosen this round, or
    /// the chips do not cover the extra stake.
    pub fn double_down(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn("double down")?;

        if self.flags.has_doubled || self.flags.has_split || self.active_hand().len() != 2 {
            log::warn!("double down not available");
            return Err(ActionError::CannotDouble);
        }

        let bet = self.current_bet;
        if self.chips < bet {
            log::warn!("double down needs {bet} chips, have {}", self.chips);
            return Err(ActionError::InsufficientFunds);
        }

        self.chips -= bet;
        self.current_bet = bet.saturating_mul(2);
        self.flags.has_doubled = true;
        self.flags.can_double = false;
        self.flags.can_split = false;

        log::info!("player doubles down, bet now {}", self.current_bet);
        Ok(())
    }

    /// Player action: Split a pair into two hands.
    ///
    /// Debits the current bet again so each hand carries one stake, and moves
    /// the second card into the split hand. The primary hand is played first.
    ///
    /// Eligibility is checked against the live hand and chip balance, not the
    /// cached [`can_split`](Self::can_split) flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `PlayerTurn`, the primary hand is
    /// not a two-card pair of equal value, a variant was already chosen this
    /// round, or the chips do not cover the extra stake.
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn("split")?;

        if self.flags.has_split || self.flags.has_doubled || !self.player_hand.is_pair() {
            log::warn!("split not available");
            return Err(ActionError::CannotSplit);
        }

        let bet = self.current_bet;
        if self.chips < bet {
            log::warn!("split needs {bet} chips, have {}", self.chips);
            return Err(ActionError::InsufficientFunds);
        }

        let Some(card) = self.player_hand.take_split_card() else {
            return Err(ActionError::CannotSplit);
        };

        self.chips -= bet;
        self.split_hand.clear();
        self.split_hand.add_card(card);
        self.flags.has_split = true;
        self.flags.is_playing_split_hand = false;
        self.flags.can_double = false;
        self.flags.can_split = false;

        log::info!("player splits, {bet} riding on each hand");
        Ok(())
    }
}
