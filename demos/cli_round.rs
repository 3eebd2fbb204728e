//! CLI blackjack table driven by a seeded shoe.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjround::driver::{deal_opening_hands, hit, play_dealer_turn};
use bjround::{
    Card, EventQueue, Hand, HandSlot, RoundEngine, RoundEvent, RoundPhase, Shoe, Side,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("Blackjack CLI demo (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut shoe = Shoe::new(seed);

    let mut engine = RoundEngine::new(1000);
    let events = EventQueue::new();
    engine.subscribe(events.clone());

    loop {
        if engine.phase() == RoundPhase::GameOver {
            println!("You are out of chips. Game over.");
            break;
        }

        let chips = engine.chips();
        let options = *engine.options();
        let max = options.maximum_bet.min(chips);
        let Some(bet) = prompt_usize(&format!(
            "Bet amount ({}-{max}, 0 to quit): ",
            options.minimum_bet
        )) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = engine.start_round(bet) {
            println!("Bet error: {err}");
            continue;
        }

        if let Err(err) = deal_opening_hands(&mut engine, &mut shoe) {
            println!("Deal error: {err}");
            break;
        }
        print_events(&events);

        while engine.phase() == RoundPhase::PlayerTurn {
            print_table(&engine, false);
            println!("{}", format_actions(&engine));

            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => hit(&mut engine, &mut shoe).map(|_| ()),
                "s" | "stand" => engine.player_stand().map_err(Into::into),
                "d" | "double" => engine
                    .double_down()
                    .map_err(Into::into)
                    .and_then(|()| hit(&mut engine, &mut shoe).map(|_| ())),
                "p" | "split" => engine.split().map_err(Into::into),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
            print_events(&events);
        }

        if engine.phase() == RoundPhase::DealerTurn {
            if let Err(err) = play_dealer_turn(&mut engine, &mut shoe) {
                println!("Dealer error: {err}");
                break;
            }
            print_events(&events);
        }

        print_table(&engine, true);
        if let Some(settlement) = engine.last_settlement() {
            println!(
                "Payout: {} (net {}) | chips {}",
                settlement.payout,
                settlement.net(),
                engine.chips()
            );
        }

        if let Err(err) = engine.reset_round() {
            println!("Reset error: {err}");
            break;
        }
        events.drain();
    }
}

fn print_events(events: &EventQueue) {
    for event in events.drain() {
        match event {
            RoundEvent::PlayerBusted => println!("{}", colorize("Bust!", "31")),
            RoundEvent::DealerBusted => println!("{}", colorize("Dealer busts!", "32")),
            RoundEvent::Blackjack(Side::Player) => println!("{}", colorize("Blackjack!", "32")),
            RoundEvent::Blackjack(Side::Dealer) => println!("Dealer has blackjack."),
            RoundEvent::RoundEnded { outcome, payout } => {
                println!("Round over: {outcome:?}, payout {payout}");
            }
            RoundEvent::PhaseChanged(_) => {}
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(engine: &RoundEngine, reveal: bool) {
    let dealer = engine.dealer_hand();
    let (dealer_view, dealer_value) = if reveal {
        (format_hand(dealer), engine.dealer_value())
    } else {
        (format_up_card(dealer), engine.visible_dealer_value())
    };
    println!("\nDealer: {dealer_view} (value {dealer_value})");

    let active = engine.active_slot();
    let mut hands = vec![(HandSlot::Primary, engine.player_hand())];
    if let Some(split) = engine.split_hand() {
        hands.push((HandSlot::Split, split));
    }

    for (slot, hand) in hands {
        let marker = if !reveal && slot == active { "*" } else { " " };
        println!(
            "{marker} {slot:?}: {} | value {}",
            format_hand(hand),
            hand.value()
        );
    }
    println!("  Bet {} | chips {}\n", engine.current_bet(), engine.chips());
}

fn format_actions(engine: &RoundEngine) -> String {
    let parts = [
        format_action("hit", "h", true),
        format_action("stand", "s", true),
        format_action("double", "d", engine.can_double()),
        format_action("split", "p", engine.can_split()),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_up_card(dealer: &Hand) -> String {
    let mut parts = Vec::new();
    if let Some(card) = dealer.cards().first() {
        parts.push(format_card(card));
    }
    if dealer.len() > 1 {
        parts.push("??".to_string());
    }
    parts.join(" ")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    match card.rank {
        1 => colorize("A", "34"),
        11 => colorize("J", "34"),
        12 => colorize("Q", "34"),
        13 => colorize("K", "34"),
        rank => rank.to_string(),
    }
}
