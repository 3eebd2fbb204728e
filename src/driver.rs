//! Helpers that drive a [`RoundEngine`] from a [`CardSource`].
//!
//! These do what a table scene would do: deal in the usual order, feed hit
//! cards, and loop the dealer until they stand.

use crate::card::Card;
use crate::error::DriveError;
use crate::game::{RoundEngine, RoundPhase};
use crate::result::RoundOutcome;
use crate::shoe::CardSource;

fn draw<S>(source: &mut S) -> Result<Card, DriveError>
where
    S: CardSource + ?Sized,
{
    source.draw().ok_or(DriveError::Exhausted)
}

/// Deals player, dealer, player, dealer, then begins the player turn.
///
/// If a natural ends the round during the deal the player turn is not
/// begun. Returns the phase the engine is left in.
///
/// # Errors
///
/// Returns an error if the source runs dry or the engine rejects a card or
/// the phase transition (for example when no round was started).
pub fn deal_opening_hands<S>(
    engine: &mut RoundEngine,
    source: &mut S,
) -> Result<RoundPhase, DriveError>
where
    S: CardSource + ?Sized,
{
    for _ in 0..2 {
        engine.add_player_card(draw(source)?)?;
        engine.add_dealer_card(draw(source)?)?;
    }

    if engine.phase() == RoundPhase::Dealing {
        engine.begin_player_turn()?;
    }

    Ok(engine.phase())
}

/// Hits the active player hand with one card and returns the hand's total.
///
/// # Errors
///
/// Returns an error if it is not the player turn or the source runs dry.
pub fn hit<S>(engine: &mut RoundEngine, source: &mut S) -> Result<u8, DriveError>
where
    S: CardSource + ?Sized,
{
    engine.player_hit()?;
    Ok(engine.add_player_card(draw(source)?)?)
}

/// Draws dealer cards while the dealer must hit, then settles the round.
///
/// # Errors
///
/// Returns an error if it is not the dealer turn or the source runs dry.
pub fn play_dealer_turn<S>(
    engine: &mut RoundEngine,
    source: &mut S,
) -> Result<RoundOutcome, DriveError>
where
    S: CardSource + ?Sized,
{
    if engine.phase() == RoundPhase::DealerTurn {
        while engine.dealer_should_hit() {
            engine.add_dealer_card(draw(source)?)?;
        }
    }

    Ok(engine.complete_dealer_turn()?)
}
