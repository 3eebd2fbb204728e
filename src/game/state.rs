//! Round phase and hand bookkeeping types.

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    /// No round in progress.
    #[default]
    Idle,
    /// The stake is being taken.
    Betting,
    /// Opening cards are being dealt.
    Dealing,
    /// Waiting for player decisions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round finished, showing results.
    RoundEnd,
    /// Chips no longer cover the minimum bet.
    GameOver,
}

impl RoundPhase {
    /// Returns whether a new round may start from this phase.
    #[must_use]
    pub const fn can_start_round(self) -> bool {
        matches!(self, Self::Idle | Self::RoundEnd)
    }

    /// Returns whether a round is being played in this phase.
    #[must_use]
    pub const fn is_in_round(self) -> bool {
        matches!(
            self,
            Self::Betting | Self::Dealing | Self::PlayerTurn | Self::DealerTurn
        )
    }
}

/// Identifies one of the player's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandSlot {
    /// The hand dealt at the start of the round.
    #[default]
    Primary,
    /// The hand created by a split.
    Split,
}

/// Split and double-down state for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantFlags {
    /// The player doubled down this round.
    pub has_doubled: bool,
    /// Doubling down is currently offered.
    pub can_double: bool,
    /// The player split this round.
    pub has_split: bool,
    /// Splitting is currently offered.
    pub can_split: bool,
    /// The split hand is the active hand.
    pub is_playing_split_hand: bool,
}
