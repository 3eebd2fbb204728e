//! Table configuration options.

use crate::error::OptionsError;
use crate::hand::BLACKJACK;

/// Configuration options for a round engine.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjround::RoundOptions;
///
/// let options = RoundOptions::default()
///     .with_dealer_stand_threshold(17)
///     .with_minimum_bet(25)
///     .with_maximum_bet(500);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoundOptions {
    /// Dealer keeps drawing while their total is below this value.
    pub dealer_stand_threshold: u8,
    /// Blackjack winnings per unit staked; the stake is returned on top.
    ///
    /// The default of 2 is a simplified 2:1 instead of the casino 3:2.
    pub blackjack_multiplier: usize,
    /// Total returned per unit staked on a won hand (stake included).
    pub win_multiplier: usize,
    /// Smallest accepted bet.
    pub minimum_bet: usize,
    /// Largest accepted bet.
    pub maximum_bet: usize,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            dealer_stand_threshold: 17,
            blackjack_multiplier: 2,
            win_multiplier: 2,
            minimum_bet: 10,
            maximum_bet: 1000,
        }
    }
}

impl RoundOptions {
    /// Sets the dealer stand threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_dealer_stand_threshold(16);
    /// assert_eq!(options.dealer_stand_threshold, 16);
    /// ```
    #[must_use]
    pub const fn with_dealer_stand_threshold(mut self, threshold: u8) -> Self {
        self.dealer_stand_threshold = threshold;
        self
    }

    /// Sets the blackjack payout multiplier.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_blackjack_multiplier(3);
    /// assert_eq!(options.blackjack_multiplier, 3);
    /// ```
    #[must_use]
    pub const fn with_blackjack_multiplier(mut self, multiplier: usize) -> Self {
        self.blackjack_multiplier = multiplier;
        self
    }

    /// Sets the win payout multiplier.
    #[must_use]
    pub const fn with_win_multiplier(mut self, multiplier: usize) -> Self {
        self.win_multiplier = multiplier;
        self
    }

    /// Sets the minimum bet.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_minimum_bet(5);
    /// assert_eq!(options.minimum_bet, 5);
    /// ```
    #[must_use]
    pub const fn with_minimum_bet(mut self, minimum: usize) -> Self {
        self.minimum_bet = minimum;
        self
    }

    /// Sets the maximum bet.
    #[must_use]
    pub const fn with_maximum_bet(mut self, maximum: usize) -> Self {
        self.maximum_bet = maximum;
        self
    }

    /// Checks the options for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum bet is zero or above the maximum, a
    /// payout multiplier is zero, or the stand threshold is above 21.
    pub const fn validate(&self) -> Result<(), OptionsError> {
        if self.minimum_bet == 0 {
            return Err(OptionsError::ZeroMinimumBet);
        }
        if self.minimum_bet > self.maximum_bet {
            return Err(OptionsError::BetRangeInverted {
                minimum: self.minimum_bet,
                maximum: self.maximum_bet,
            });
        }
        if self.blackjack_multiplier == 0 || self.win_multiplier == 0 {
            return Err(OptionsError::ZeroMultiplier);
        }
        if self.dealer_stand_threshold > BLACKJACK {
            return Err(OptionsError::ThresholdTooHigh(self.dealer_stand_threshold));
        }
        Ok(())
    }
}
