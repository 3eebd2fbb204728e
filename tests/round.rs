//! Round engine integration tests.

extern crate alloc;

use alloc::rc::Rc;
use core::cell::RefCell;

use bjround::{
    ActionError, BetError, Card, CardError, EventQueue, HandSlot, OptionsError, RoundEngine,
    RoundEvent, RoundOptions, RoundOutcome, RoundPhase, Side,
};

const fn card(rank: u8) -> Card {
    Card::new(rank)
}

/// Starts a round and deals player, dealer, player, dealer.
fn dealt(chips: usize, bet: usize, player: [u8; 2], dealer: [u8; 2]) -> RoundEngine {
    let mut engine = RoundEngine::new(chips);
    engine.start_round(bet).unwrap();
    engine.add_player_card(card(player[0])).unwrap();
    engine.add_dealer_card(card(dealer[0])).unwrap();
    engine.add_player_card(card(player[1])).unwrap();
    engine.add_dealer_card(card(dealer[1])).unwrap();
    engine
}

fn player_turn(chips: usize, bet: usize, player: [u8; 2], dealer: [u8; 2]) -> RoundEngine {
    let mut engine = dealt(chips, bet, player, dealer);
    engine.begin_player_turn().unwrap();
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    engine
}

#[test]
fn start_round_rejects_bad_bets_without_side_effects() {
    let mut engine = RoundEngine::new(1000);

    assert_eq!(
        engine.start_round(5).unwrap_err(),
        BetError::BelowMinimum {
            bet: 5,
            minimum: 10
        }
    );
    assert_eq!(
        engine.start_round(1001).unwrap_err(),
        BetError::AboveMaximum {
            bet: 1001,
            maximum: 1000
        }
    );
    assert_eq!(engine.chips(), 1000);
    assert_eq!(engine.phase(), RoundPhase::Idle);

    let mut poor = RoundEngine::new(50);
    assert_eq!(
        poor.start_round(100).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(poor.chips(), 50);
    assert_eq!(poor.current_bet(), 0);
    assert_eq!(poor.phase(), RoundPhase::Idle);
}

#[test]
fn start_round_debits_and_enters_dealing() {
    let queue = EventQueue::new();
    let mut engine = RoundEngine::new(1000);
    engine.subscribe(queue.clone());

    engine.start_round(100).unwrap();
    assert_eq!(engine.chips(), 900);
    assert_eq!(engine.current_bet(), 100);
    assert_eq!(engine.phase(), RoundPhase::Dealing);
    assert_eq!(
        queue.drain(),
        vec![
            RoundEvent::PhaseChanged(RoundPhase::Betting),
            RoundEvent::PhaseChanged(RoundPhase::Dealing),
        ]
    );

    assert_eq!(engine.start_round(100).unwrap_err(), BetError::InvalidState);
    assert_eq!(engine.chips(), 900);
}

#[test]
fn player_natural_pays_blackjack_multiplier() {
    let queue = EventQueue::new();
    let mut engine = RoundEngine::new(1000);
    engine.subscribe(queue.clone());
    engine.start_round(100).unwrap();
    queue.drain();

    engine.add_player_card(Card::ACE).unwrap();
    engine.add_dealer_card(card(9)).unwrap();
    engine.add_player_card(Card::KING).unwrap();
    assert_eq!(engine.phase(), RoundPhase::Dealing);
    engine.add_dealer_card(card(7)).unwrap();

    assert_eq!(engine.phase(), RoundPhase::RoundEnd);
    assert_eq!(engine.last_outcome(), RoundOutcome::PlayerBlackjack);
    assert_eq!(engine.chips(), 1200);
    assert_eq!(engine.current_bet(), 0);
    assert_eq!(
        queue.drain(),
        vec![
            RoundEvent::Blackjack(Side::Player),
            RoundEvent::PhaseChanged(RoundPhase::RoundEnd),
            RoundEvent::RoundEnded {
                outcome: RoundOutcome::PlayerBlackjack,
                payout: 300,
            },
        ]
    );

    let settlement = engine.last_settlement().unwrap();
    assert_eq!(settlement.payout, 300);
    assert_eq!(settlement.net(), 200);
}

#[test]
fn both_naturals_push() {
    let engine = dealt(1000, 100, [1, 12], [13, 1]);

    assert_eq!(engine.last_outcome(), RoundOutcome::Push);
    assert_eq!(engine.chips(), 1000);
}

#[test]
fn dealer_natural_wins_during_deal() {
    let engine = dealt(1000, 100, [10, 9], [1, 11]);

    assert_eq!(engine.phase(), RoundPhase::RoundEnd);
    assert_eq!(engine.last_outcome(), RoundOutcome::DealerWin);
    assert_eq!(engine.chips(), 900);
}

#[test]
fn dealing_rules() {
    let mut engine = RoundEngine::new(1000);
    assert_eq!(
        engine.add_player_card(card(5)).unwrap_err(),
        CardError::InvalidState
    );
    assert_eq!(
        engine.begin_player_turn().unwrap_err(),
        ActionError::InvalidState
    );

    engine.start_round(10).unwrap();
    assert_eq!(
        engine.add_player_card(card(14)).unwrap_err(),
        CardError::InvalidRank(14)
    );
    assert_eq!(
        engine.add_dealer_card(card(0)).unwrap_err(),
        CardError::InvalidRank(0)
    );

    engine.add_player_card(card(5)).unwrap();
    engine.add_player_card(card(6)).unwrap();
    assert_eq!(
        engine.add_player_card(card(7)).unwrap_err(),
        CardError::HandComplete
    );
    assert_eq!(
        engine.begin_player_turn().unwrap_err(),
        ActionError::DealingIncomplete
    );

    engine.add_dealer_card(card(9)).unwrap();
    engine.add_dealer_card(card(8)).unwrap();
    engine.begin_player_turn().unwrap();
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    assert_eq!(
        engine.add_dealer_card(card(2)).unwrap_err(),
        CardError::InvalidState
    );
}

#[test]
fn visible_dealer_value_shows_up_card_only() {
    let engine = player_turn(1000, 10, [10, 6], [1, 6]);

    assert_eq!(engine.visible_dealer_value(), 1);
    assert_eq!(engine.dealer_value(), 17);
}

#[test]
fn stand_twice_transitions_once() {
    let queue = EventQueue::new();
    let mut engine = player_turn(1000, 100, [10, 7], [9, 8]);
    engine.subscribe(queue.clone());

    engine.player_stand().unwrap();
    assert_eq!(engine.player_stand().unwrap_err(), ActionError::InvalidState);

    assert_eq!(engine.phase(), RoundPhase::DealerTurn);
    assert_eq!(
        queue.drain(),
        vec![RoundEvent::PhaseChanged(RoundPhase::DealerTurn)]
    );
}

#[test]
fn basic_round_flow_dealer_busts() {
    let queue = EventQueue::new();
    let mut engine = player_turn(1000, 100, [10, 6], [9, 7]);
    engine.subscribe(queue.clone());

    engine.player_hit().unwrap();
    assert_eq!(engine.add_player_card(card(4)).unwrap(), 20);
    engine.player_stand().unwrap();

    assert!(engine.dealer_should_hit());
    engine.add_dealer_card(Card::KING).unwrap();
    assert!(!engine.dealer_should_hit());

    assert_eq!(
        engine.complete_dealer_turn().unwrap(),
        RoundOutcome::DealerBust
    );
    assert_eq!(engine.chips(), 1100);
    assert!(queue.drain().contains(&RoundEvent::DealerBusted));

    assert_eq!(
        engine.complete_dealer_turn().unwrap_err(),
        ActionError::InvalidState
    );
}

#[test]
fn player_bust_ends_round() {
    let queue = EventQueue::new();
    let mut engine = player_turn(1000, 100, [10, 6], [9, 7]);
    engine.subscribe(queue.clone());

    assert_eq!(engine.add_player_card(Card::QUEEN).unwrap(), 26);

    assert_eq!(engine.phase(), RoundPhase::RoundEnd);
    assert_eq!(engine.last_outcome(), RoundOutcome::PlayerBust);
    assert_eq!(engine.chips(), 900);
    assert_eq!(
        queue.drain(),
        vec![
            RoundEvent::PlayerBusted,
            RoundEvent::PhaseChanged(RoundPhase::RoundEnd),
            RoundEvent::RoundEnded {
                outcome: RoundOutcome::PlayerBust,
                payout: 0,
            },
        ]
    );
}

#[test]
fn higher_total_wins_and_ties_push() {
    let mut lose = player_turn(1000, 100, [10, 7], [10, 8]);
    lose.player_stand().unwrap();
    assert_eq!(lose.complete_dealer_turn().unwrap(), RoundOutcome::DealerWin);
    assert_eq!(lose.chips(), 900);

    let mut push = player_turn(1000, 100, [10, 8], [10, 8]);
    push.player_stand().unwrap();
    assert_eq!(push.complete_dealer_turn().unwrap(), RoundOutcome::Push);
    assert_eq!(push.chips(), 1000);

    let mut win = player_turn(1000, 100, [10, 9], [10, 8]);
    win.player_stand().unwrap();
    assert_eq!(win.complete_dealer_turn().unwrap(), RoundOutcome::PlayerWin);
    assert_eq!(win.chips(), 1100);
}

#[test]
fn dealer_stand_threshold_is_configurable() {
    let options = RoundOptions::default().with_dealer_stand_threshold(18);
    let mut engine = RoundEngine::with_options(options, 1000).unwrap();
    engine.start_round(10).unwrap();
    engine.add_player_card(card(10)).unwrap();
    engine.add_dealer_card(card(10)).unwrap();
    engine.add_player_card(card(8)).unwrap();
    engine.add_dealer_card(card(7)).unwrap();

    assert!(engine.dealer_should_hit());
}

#[test]
fn double_down_takes_one_card_and_ends_turn() {
    let mut engine = player_turn(1000, 100, [5, 6], [9, 7]);
    assert!(engine.can_double());
    assert!(!engine.can_split());

    engine.double_down().unwrap();
    assert_eq!(engine.chips(), 800);
    assert_eq!(engine.current_bet(), 200);
    assert!(engine.flags().has_doubled);
    assert!(!engine.can_double());
    assert!(!engine.can_split());
    assert_eq!(engine.split().unwrap_err(), ActionError::CannotSplit);

    assert_eq!(engine.add_player_card(Card::KING).unwrap(), 21);
    assert_eq!(engine.phase(), RoundPhase::DealerTurn);
    assert_eq!(
        engine.add_player_card(card(2)).unwrap_err(),
        CardError::InvalidState
    );
    assert_eq!(engine.player_stand().unwrap_err(), ActionError::InvalidState);

    engine.add_dealer_card(card(2)).unwrap();
    assert_eq!(
        engine.complete_dealer_turn().unwrap(),
        RoundOutcome::PlayerWin
    );
    assert_eq!(engine.chips(), 1200);
}

#[test]
fn stand_waits_for_the_double_down_card() {
    let mut engine = player_turn(1000, 100, [5, 6], [10, 7]);
    engine.double_down().unwrap();

    assert_eq!(engine.player_stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    assert_eq!(engine.player_hand().len(), 2);
    assert_eq!(engine.current_bet(), 200);

    assert_eq!(engine.add_player_card(card(9)).unwrap(), 20);
    assert_eq!(engine.phase(), RoundPhase::DealerTurn);
}

#[test]
fn double_down_bust_loses_both_stakes() {
    let mut engine = player_turn(1000, 100, [10, 2], [9, 7]);

    engine.double_down().unwrap();
    engine.add_player_card(Card::QUEEN).unwrap();

    assert_eq!(engine.last_outcome(), RoundOutcome::PlayerBust);
    assert_eq!(engine.chips(), 800);
}

#[test]
fn double_down_rechecks_eligibility() {
    let mut poor = player_turn(150, 100, [5, 6], [9, 7]);
    assert!(!poor.can_double());
    assert_eq!(
        poor.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(poor.chips(), 50);
    assert_eq!(poor.current_bet(), 100);

    let mut engine = player_turn(1000, 100, [2, 3], [9, 7]);
    engine.add_player_card(card(4)).unwrap();
    assert!(!engine.can_double());
    assert_eq!(engine.double_down().unwrap_err(), ActionError::CannotDouble);

    let mut dealing = dealt(1000, 100, [2, 3], [9, 7]);
    assert_eq!(
        dealing.double_down().unwrap_err(),
        ActionError::InvalidState
    );
}

#[test]
fn split_eights_creates_two_hands() {
    let mut engine = player_turn(1000, 100, [8, 8], [10, 7]);
    assert!(engine.can_split());
    assert!(engine.can_double());

    engine.split().unwrap();

    assert_eq!(engine.chips(), 800);
    assert_eq!(engine.current_bet(), 100);
    assert_eq!(engine.player_hand().cards(), &[card(8)]);
    assert_eq!(engine.split_hand().unwrap().cards(), &[card(8)]);
    assert!(!engine.can_double());
    assert!(!engine.can_split());
    assert_eq!(engine.active_slot(), HandSlot::Primary);

    engine.add_player_card(card(8)).unwrap();
    assert!(!engine.can_split());
    assert_eq!(engine.split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(engine.double_down().unwrap_err(), ActionError::CannotDouble);
}

#[test]
fn twenty_one_after_split_is_not_a_natural() {
    let queue = EventQueue::new();
    let mut engine = player_turn(1000, 100, [10, 10], [9, 8]);
    engine.subscribe(queue.clone());
    engine.split().unwrap();

    assert_eq!(engine.add_player_card(Card::ACE).unwrap(), 21);
    assert_eq!(engine.player_hand().len(), 2);
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    assert_eq!(engine.last_outcome(), RoundOutcome::None);
    assert!(
        !queue
            .drain()
            .iter()
            .any(|event| matches!(event, RoundEvent::Blackjack(_)))
    );

    engine.player_stand().unwrap();
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    assert_eq!(engine.active_slot(), HandSlot::Split);
}

#[test]
fn face_cards_split_and_unequal_values_do_not() {
    let mut faces = player_turn(1000, 100, [13, 12], [10, 7]);
    assert!(faces.can_split());
    faces.split().unwrap();

    let mut mixed = player_turn(1000, 100, [8, 9], [10, 7]);
    assert!(!mixed.can_split());
    assert_eq!(mixed.split().unwrap_err(), ActionError::CannotSplit);
    assert_eq!(mixed.chips(), 900);
}

#[test]
fn split_rechecks_chips() {
    let mut engine = player_turn(150, 100, [8, 8], [10, 7]);
    assert!(!engine.can_split());
    assert_eq!(engine.split().unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(engine.player_hand().len(), 2);
    assert!(engine.split_hand().is_none());
}

/// Plays a split of two tens: primary draws to 20 and stands, split hand
/// draws to 24 and busts, dealer holds 18.
fn split_win_and_bust(options: RoundOptions) -> RoundEngine {
    let mut engine = RoundEngine::with_options(options, 1000).unwrap();
    engine.start_round(100).unwrap();
    engine.add_player_card(Card::KING).unwrap();
    engine.add_dealer_card(card(10)).unwrap();
    engine.add_player_card(Card::QUEEN).unwrap();
    engine.add_dealer_card(card(8)).unwrap();
    engine.begin_player_turn().unwrap();

    engine.split().unwrap();
    assert_eq!(engine.add_player_card(Card::JACK).unwrap(), 20);
    engine.player_stand().unwrap();
    assert_eq!(engine.active_slot(), HandSlot::Split);
    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);

    engine.add_player_card(card(5)).unwrap();
    engine.add_player_card(card(9)).unwrap();
    assert_eq!(engine.phase(), RoundPhase::DealerTurn);
    assert!(!engine.dealer_should_hit());

    engine.complete_dealer_turn().unwrap();
    engine
}

#[test]
fn split_win_and_bust_settles_each_hand() {
    let engine = split_win_and_bust(RoundOptions::default());

    let settlement = engine.last_settlement().unwrap();
    assert_eq!(settlement.hands.len(), 2);
    assert_eq!(settlement.hands[0].outcome, RoundOutcome::PlayerWin);
    assert_eq!(settlement.hands[0].payout, 200);
    assert_eq!(settlement.hands[1].outcome, RoundOutcome::PlayerBust);
    assert_eq!(settlement.hands[1].payout, 0);
    assert_eq!(settlement.staked, 200);

    // 100 * 2 + 0 == 2 * 100
    assert_eq!(settlement.payout, 200);
    assert_eq!(engine.last_outcome(), RoundOutcome::Push);
    assert_eq!(engine.chips(), 1000);
}

#[test]
fn split_display_outcome_follows_total_payout() {
    let generous = split_win_and_bust(RoundOptions::default().with_win_multiplier(3));
    assert_eq!(generous.last_settlement().unwrap().payout, 300);
    assert_eq!(generous.last_outcome(), RoundOutcome::PlayerWin);

    let stingy = split_win_and_bust(RoundOptions::default().with_win_multiplier(1));
    assert_eq!(stingy.last_settlement().unwrap().payout, 100);
    assert_eq!(stingy.last_outcome(), RoundOutcome::DealerWin);
}

#[test]
fn primary_bust_passes_to_split_hand() {
    let queue = EventQueue::new();
    let mut engine = player_turn(1000, 100, [8, 8], [10, 6]);
    engine.subscribe(queue.clone());
    engine.split().unwrap();

    engine.add_player_card(card(7)).unwrap();
    engine.add_player_card(Card::KING).unwrap();

    assert_eq!(engine.phase(), RoundPhase::PlayerTurn);
    assert_eq!(engine.active_slot(), HandSlot::Split);
    assert!(queue.drain().contains(&RoundEvent::PlayerBusted));

    engine.add_player_card(Card::KING).unwrap();
    engine.player_stand().unwrap();
    assert_eq!(engine.phase(), RoundPhase::DealerTurn);

    engine.add_dealer_card(card(9)).unwrap();
    // The split hand collects on the dealer's 25, the busted primary does not.
    assert_eq!(engine.complete_dealer_turn().unwrap(), RoundOutcome::Push);
    let settlement = engine.last_settlement().unwrap();
    assert_eq!(settlement.hands[0].outcome, RoundOutcome::PlayerBust);
    assert_eq!(settlement.hands[1].outcome, RoundOutcome::DealerBust);
    assert_eq!(settlement.payout, 200);
    assert_eq!(engine.chips(), 1000);
    assert!(queue.drain().contains(&RoundEvent::DealerBusted));
}

#[test]
fn both_split_hands_bust_ends_round() {
    let mut engine = player_turn(1000, 100, [8, 8], [10, 7]);
    engine.split().unwrap();

    engine.add_player_card(card(6)).unwrap();
    engine.add_player_card(Card::KING).unwrap();
    engine.add_player_card(card(5)).unwrap();
    engine.add_player_card(Card::QUEEN).unwrap();

    assert_eq!(engine.phase(), RoundPhase::RoundEnd);
    assert_eq!(engine.last_outcome(), RoundOutcome::PlayerBust);
    assert_eq!(engine.chips(), 800);
}

#[test]
fn split_hands_both_win_on_dealer_bust() {
    let mut engine = player_turn(1000, 100, [9, 9], [10, 6]);
    engine.split().unwrap();

    engine.add_player_card(card(9)).unwrap();
    engine.player_stand().unwrap();
    engine.add_player_card(card(2)).unwrap();
    engine.player_stand().unwrap();

    engine.add_dealer_card(card(8)).unwrap();
    assert_eq!(
        engine.complete_dealer_turn().unwrap(),
        RoundOutcome::PlayerWin
    );
    assert_eq!(engine.chips(), 1200);
}

#[test]
fn observers_receive_every_event_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut engine = RoundEngine::new(1000);
    engine.subscribe(move |event: &RoundEvent| sink.borrow_mut().push(*event));

    engine.start_round(10).unwrap();
    engine.add_player_card(card(10)).unwrap();
    engine.add_dealer_card(card(10)).unwrap();
    engine.add_player_card(card(9)).unwrap();
    engine.add_dealer_card(card(7)).unwrap();
    engine.begin_player_turn().unwrap();
    engine.player_stand().unwrap();
    engine.complete_dealer_turn().unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            RoundEvent::PhaseChanged(RoundPhase::Betting),
            RoundEvent::PhaseChanged(RoundPhase::Dealing),
            RoundEvent::PhaseChanged(RoundPhase::PlayerTurn),
            RoundEvent::PhaseChanged(RoundPhase::DealerTurn),
            RoundEvent::PhaseChanged(RoundPhase::RoundEnd),
            RoundEvent::RoundEnded {
                outcome: RoundOutcome::PlayerWin,
                payout: 20,
            },
        ]
    );
}

#[test]
fn reset_round_and_game_over() {
    let mut engine = player_turn(1000, 100, [10, 7], [9, 8]);
    assert_eq!(engine.reset_round().unwrap_err(), ActionError::InvalidState);

    engine.player_stand().unwrap();
    engine.complete_dealer_turn().unwrap();
    assert_eq!(engine.reset_round().unwrap(), RoundPhase::Idle);
    assert_eq!(engine.last_outcome(), RoundOutcome::None);
    assert!(engine.player_hand().is_empty());
    assert!(engine.dealer_hand().is_empty());

    let mut broke = player_turn(105, 100, [10, 6], [9, 8]);
    broke.add_player_card(Card::KING).unwrap();
    assert_eq!(broke.chips(), 5);
    assert!(!broke.can_afford_bet(10));
    assert_eq!(broke.reset_round().unwrap(), RoundPhase::GameOver);
    assert_eq!(broke.start_round(10).unwrap_err(), BetError::InvalidState);

    broke.new_game(500).unwrap();
    assert_eq!(broke.phase(), RoundPhase::Idle);
    assert_eq!(broke.chips(), 500);
    broke.start_round(10).unwrap();
    assert_eq!(broke.new_game(500).unwrap_err(), ActionError::InvalidState);
}

#[test]
fn new_round_can_start_from_round_end() {
    let mut engine = dealt(1000, 100, [1, 13], [9, 7]);
    assert_eq!(engine.phase(), RoundPhase::RoundEnd);

    engine.start_round(50).unwrap();
    assert_eq!(engine.chips(), 1150);
    assert!(engine.player_hand().is_empty());
    assert_eq!(engine.last_outcome(), RoundOutcome::None);
    assert!(engine.last_settlement().is_none());
}

#[test]
fn invalid_options_are_rejected() {
    let inverted = RoundOptions::default()
        .with_minimum_bet(500)
        .with_maximum_bet(100);
    assert_eq!(
        RoundEngine::with_options(inverted, 1000).err(),
        Some(OptionsError::BetRangeInverted {
            minimum: 500,
            maximum: 100
        })
    );

    let zero = RoundOptions::default().with_minimum_bet(0);
    assert_eq!(
        RoundEngine::with_options(zero, 1000).err(),
        Some(OptionsError::ZeroMinimumBet)
    );

    let threshold = RoundOptions::default().with_dealer_stand_threshold(22);
    assert_eq!(
        threshold.validate().unwrap_err(),
        OptionsError::ThresholdTooHigh(22)
    );
}

#[test]
fn display_summarises_state() {
    let engine = player_turn(1000, 100, [10, 7], [9, 8]);
    let summary = engine.to_string();

    assert!(summary.contains("Phase: PlayerTurn"));
    assert!(summary.contains("Player hand: 17 (2 cards)"));
    assert!(summary.contains("Chips: 900"));
}
