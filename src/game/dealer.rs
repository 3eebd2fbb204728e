use crate::error::ActionError;
use crate::event::RoundEvent;
use crate::hand::Hand;
use crate::payout;
use crate::result::{HandSettlement, RoundOutcome, RoundSettlement};

use super::{HandSlot, RoundEngine, RoundPhase};

impl RoundEngine {
    /// Returns whether the dealer must draw another card.
    ///
    /// The engine does not draw for the dealer: the driver loops on this,
    /// feeding cards through [`add_dealer_card`](Self::add_dealer_card), then
    /// calls [`complete_dealer_turn`](Self::complete_dealer_turn).
    #[must_use]
    pub const fn dealer_should_hit(&self) -> bool {
        self.dealer_hand.value() < self.options.dealer_stand_threshold
    }

    /// Finishes the dealer turn and settles the round.
    ///
    /// Returns the displayed outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `DealerTurn`.
    pub fn complete_dealer_turn(&mut self) -> Result<RoundOutcome, ActionError> {
        if self.phase != RoundPhase::DealerTurn {
            log::warn!("cannot complete dealer turn in phase {:?}", self.phase);
            return Err(ActionError::InvalidState);
        }

        let dealer_bust = self.dealer_hand.is_bust();
        if dealer_bust {
            self.emit(RoundEvent::DealerBusted);
        }

        if self.flags.has_split {
            let settlement = self.split_settlement();
            self.finish(settlement);
        } else if dealer_bust {
            self.end_round(RoundOutcome::DealerBust);
        } else {
            let outcome =
                payout::determine_winner(self.player_hand.value(), self.dealer_hand.value());
            self.end_round(outcome);
        }

        Ok(self.last_outcome)
    }

    /// Settles both hands of a split round against the dealer.
    pub(super) fn split_settlement(&self) -> RoundSettlement {
        let dealer_value = self.dealer_hand.value();
        let bet = self.current_bet;

        let settle = |slot: HandSlot, hand: &Hand| {
            let outcome = payout::settle_hand(hand.value(), dealer_value);
            HandSettlement {
                slot,
                outcome,
                bet,
                payout: payout::payout(outcome, bet, &self.options),
                player_value: hand.value(),
            }
        };

        let hands = alloc::vec![
            settle(HandSlot::Primary, &self.player_hand),
            settle(HandSlot::Split, &self.split_hand),
        ];
        let total: usize = hands.iter().map(|hand| hand.payout).sum();

        RoundSettlement {
            outcome: payout::split_display_outcome(total, bet),
            payout: total,
            staked: bet.saturating_mul(2),
            dealer_value,
            hands,
        }
    }
}
