//! Error types for engine operations.
//!
//! Every error is a rejection: the engine validates before it mutates, so an
//! `Err` always leaves the round exactly as it was.

use thiserror::Error;

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// A round is already in progress.
    #[error("a round is already in progress")]
    InvalidState,
    /// Bet is below the table minimum.
    #[error("bet {bet} is below the minimum of {minimum}")]
    BelowMinimum {
        /// The rejected bet.
        bet: usize,
        /// The configured minimum.
        minimum: usize,
    },
    /// Bet is above the table maximum.
    #[error("bet {bet} is above the maximum of {maximum}")]
    AboveMaximum {
        /// The rejected bet.
        bet: usize,
        /// The configured maximum.
        maximum: usize,
    },
    /// Insufficient chips.
    #[error("insufficient chips for this bet")]
    InsufficientFunds,
}

/// Errors that can occur when feeding a card to a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    /// Rank outside 1..=13.
    #[error("invalid card rank {0}")]
    InvalidRank(u8),
    /// The hand does not accept cards in the current phase.
    #[error("hand does not accept cards in the current phase")]
    InvalidState,
    /// The opening hand already holds two cards.
    #[error("opening hand already holds two cards")]
    HandComplete,
}

/// Errors that can occur during player decisions and phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round phase for this action.
    #[error("invalid round phase for this action")]
    InvalidState,
    /// The opening hands have not both received two cards.
    #[error("opening hands are not fully dealt")]
    DealingIncomplete,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Insufficient chips for this action.
    #[error("insufficient chips for this action")]
    InsufficientFunds,
}

/// Errors produced by [`RoundOptions::validate`](crate::RoundOptions::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Minimum bet is zero.
    #[error("minimum bet must be positive")]
    ZeroMinimumBet,
    /// Minimum bet exceeds maximum bet.
    #[error("minimum bet {minimum} exceeds maximum bet {maximum}")]
    BetRangeInverted {
        /// The configured minimum.
        minimum: usize,
        /// The configured maximum.
        maximum: usize,
    },
    /// A payout multiplier is zero.
    #[error("payout multipliers must be positive")]
    ZeroMultiplier,
    /// Dealer stand threshold is above 21.
    #[error("dealer stand threshold {0} is above 21")]
    ThresholdTooHigh(u8),
}

/// Errors produced by the [`driver`](crate::driver) helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DriveError {
    /// The card source ran out of cards.
    #[error("card source is exhausted")]
    Exhausted,
    /// The engine rejected a card.
    #[error("card rejected: {0}")]
    Card(#[from] CardError),
    /// The engine rejected an action.
    #[error("action rejected: {0}")]
    Action(#[from] ActionError),
}
