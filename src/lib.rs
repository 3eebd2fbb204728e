//! A single-table blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`RoundEngine`] that enforces the rules of one
//! player's round against the dealer: phase transitions, hand valuation,
//! split and double down, and payouts. The engine never draws cards; a driver
//! (a UI scene, a simulation, the helpers in [`driver`]) feeds them in and
//! subscribes to [`RoundEvent`]s to react.
//!
//! # Example
//!
//! ```
//! use bjround::{Card, RoundEngine, RoundOutcome, RoundPhase};
//!
//! let mut engine = RoundEngine::new(1000);
//! engine.start_round(100).unwrap();
//!
//! engine.add_player_card(Card::ACE).unwrap();
//! engine.add_dealer_card(Card::new(9)).unwrap();
//! engine.add_player_card(Card::KING).unwrap();
//! engine.add_dealer_card(Card::new(7)).unwrap();
//!
//! assert_eq!(engine.phase(), RoundPhase::RoundEnd);
//! assert_eq!(engine.last_outcome(), RoundOutcome::PlayerBlackjack);
//! assert_eq!(engine.chips(), 1200);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod driver;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod options;
pub mod payout;
pub mod result;
pub mod shoe;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE};
pub use error::{ActionError, BetError, CardError, DriveError, OptionsError};
pub use event::{EventQueue, RoundEvent, RoundObserver, Side};
pub use game::{HandSlot, RoundEngine, RoundPhase, VariantFlags};
pub use hand::{Hand, valuate};
pub use options::RoundOptions;
pub use result::{HandSettlement, RoundOutcome, RoundSettlement};
pub use shoe::{CardSource, Shoe};
