//! Payout calculation.
//!
//! Payouts are the chips credited back at round end, stake included: a push
//! returns exactly the bet, a loss returns nothing.

use crate::hand::BLACKJACK;
use crate::options::RoundOptions;
use crate::result::RoundOutcome;

/// Returns the chips credited for `outcome` on a stake of `bet`.
#[must_use]
pub const fn payout(outcome: RoundOutcome, bet: usize, options: &RoundOptions) -> usize {
    match outcome {
        RoundOutcome::PlayerBlackjack => {
            bet.saturating_add(bet.saturating_mul(options.blackjack_multiplier))
        }
        RoundOutcome::PlayerWin | RoundOutcome::DealerBust => {
            bet.saturating_mul(options.win_multiplier)
        }
        RoundOutcome::Push => bet,
        RoundOutcome::PlayerBust | RoundOutcome::DealerWin | RoundOutcome::None => 0,
    }
}

/// Compares two standing totals: higher wins, equal pushes.
#[must_use]
pub const fn determine_winner(player_value: u8, dealer_value: u8) -> RoundOutcome {
    if player_value > dealer_value {
        RoundOutcome::PlayerWin
    } else if dealer_value > player_value {
        RoundOutcome::DealerWin
    } else {
        RoundOutcome::Push
    }
}

/// Settles one finished hand against the dealer.
///
/// A busted hand loses whatever the dealer holds; otherwise a busted dealer
/// pays, and otherwise the higher total wins.
#[must_use]
pub const fn settle_hand(player_value: u8, dealer_value: u8) -> RoundOutcome {
    if player_value > BLACKJACK {
        RoundOutcome::PlayerBust
    } else if dealer_value > BLACKJACK {
        RoundOutcome::DealerBust
    } else {
        determine_winner(player_value, dealer_value)
    }
}

/// Collapses a split round into one displayed outcome.
///
/// The summed payout is compared with the two stakes actually at risk
/// (`2 × bet`). A win on one hand and a loss on the other shows as whatever
/// that comparison yields; individual hand outcomes live in the settlement.
#[must_use]
pub const fn split_display_outcome(total_payout: usize, bet: usize) -> RoundOutcome {
    let staked = bet.saturating_mul(2);
    if total_payout > staked {
        RoundOutcome::PlayerWin
    } else if total_payout == staked {
        RoundOutcome::Push
    } else {
        RoundOutcome::DealerWin
    }
}
