//! Round outcome and settlement types.

extern crate alloc;

use alloc::vec::Vec;

use crate::game::HandSlot;

/// Terminal outcome of a round, or of a single hand inside a split round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundOutcome {
    /// No round has ended yet.
    #[default]
    None,
    /// Player has the higher total.
    PlayerWin,
    /// Dealer has the higher total, or holds a natural.
    DealerWin,
    /// Equal totals; the stake is returned.
    Push,
    /// Player was dealt a natural.
    PlayerBlackjack,
    /// Player went over 21.
    PlayerBust,
    /// Dealer went over 21.
    DealerBust,
}

/// Settlement of a single player hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandSettlement {
    /// Which player hand this is.
    pub slot: HandSlot,
    /// The outcome of this hand against the dealer.
    pub outcome: RoundOutcome,
    /// The stake riding on this hand.
    pub bet: usize,
    /// The chips returned for this hand (stake included).
    pub payout: usize,
    /// The player's hand total.
    pub player_value: u8,
}

/// Settlement of a whole round, recorded when the round ends.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSettlement {
    /// The displayed outcome. For split rounds this is derived from the total
    /// payout, see [`split_display_outcome`](crate::payout::split_display_outcome).
    pub outcome: RoundOutcome,
    /// Total chips credited back to the account.
    pub payout: usize,
    /// Total chips staked this round.
    pub staked: usize,
    /// The dealer's final total.
    pub dealer_value: u8,
    /// Per-hand results, in play order.
    pub hands: Vec<HandSettlement>,
}

impl RoundSettlement {
    /// Net result (positive = profit, negative = loss).
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "chip values fit in isize")]
    pub const fn net(&self) -> isize {
        self.payout as isize - self.staked as isize
    }
}
