//! Notifications emitted by the engine for the presentation layer.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::game::RoundPhase;
use crate::result::RoundOutcome;
use crate::sync::Mutex;

/// Which side of the table an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// A state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundEvent {
    /// The round phase changed.
    PhaseChanged(RoundPhase),
    /// A player hand went over 21.
    PlayerBusted,
    /// The dealer went over 21.
    DealerBusted,
    /// A natural blackjack was dealt.
    Blackjack(Side),
    /// The round ended and the payout was credited.
    RoundEnded {
        /// The displayed outcome.
        outcome: RoundOutcome,
        /// Chips credited back to the account.
        payout: usize,
    },
}

/// Receives engine notifications.
///
/// Closures taking `&RoundEvent` implement this trait directly.
pub trait RoundObserver {
    /// Called synchronously for every event, in emission order.
    fn notify(&mut self, event: &RoundEvent);
}

impl<F> RoundObserver for F
where
    F: FnMut(&RoundEvent),
{
    fn notify(&mut self, event: &RoundEvent) {
        self(event);
    }
}

/// A shared event buffer.
///
/// Subscribe one clone to the engine and keep another to drain from, e.g. once
/// per frame in a UI loop.
///
/// ```
/// use bjround::{EventQueue, RoundEngine, RoundEvent, RoundPhase};
///
/// let queue = EventQueue::new();
/// let mut engine = RoundEngine::new(1000);
/// engine.subscribe(queue.clone());
///
/// engine.start_round(100).unwrap();
/// assert!(queue.drain().contains(&RoundEvent::PhaseChanged(RoundPhase::Dealing)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<VecDeque<RoundEvent>>>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every buffered event, oldest first.
    pub fn drain(&self) -> Vec<RoundEvent> {
        self.events.lock().drain(..).collect()
    }

    /// Removes and returns the oldest buffered event.
    pub fn pop(&self) -> Option<RoundEvent> {
        self.events.lock().pop_front()
    }

    /// Returns the number of buffered events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl RoundObserver for EventQueue {
    fn notify(&mut self, event: &RoundEvent) {
        self.events.lock().push_back(*event);
    }
}
