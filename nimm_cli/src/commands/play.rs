use anyhow::{Context, Result};
use clap::{self, Parser, ValueEnum};
use dialoguer::{Input, Select};
use nimm::heaps::{Heaps, Move};
use nimm::session::{GameSession, HeapSizing, Opponent, Player, Setup};
use rand::{SeedableRng, rngs::StdRng};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpponentArg {
    /// The Unbeatable Dr. Nimm, who plays perfectly
    Nimm,
    /// The Magnanimous Dr. Nymm, who makes one deliberate error per game
    Nymm,
}

/// Play a game of Nim against the computer.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Number of heaps; more than 3 makes for a long game
    #[arg(long, default_value_t = 3)]
    heaps: usize,

    /// Start every heap with SIZE stones instead of drawing sizes at random
    #[arg(long, value_name = "SIZE")]
    fixed_heaps: Option<u32>,

    /// Smallest random heap size
    #[arg(long, default_value_t = 15, conflicts_with = "fixed_heaps")]
    heap_min: u32,

    /// Largest random heap size
    #[arg(long, default_value_t = 25, conflicts_with = "fixed_heaps")]
    heap_max: u32,

    /// Dr. Nymm blunders once the remaining stones drop below a threshold
    /// drawn between this fraction of the initial total and --error-max
    #[arg(long, default_value_t = 0.3)]
    error_min: f64,

    /// Upper fraction of the initial total for Dr. Nymm's blunder threshold
    #[arg(long, default_value_t = 0.7)]
    error_max: f64,

    /// Opponent to play against; prompted interactively when omitted
    #[arg(long, value_enum)]
    opponent: Option<OpponentArg>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: Args) -> Result<()> {
    let setup = Setup {
        heap_count: args.heaps,
        sizing: match args.fixed_heaps {
            Some(size) => HeapSizing::Fixed(size),
            None => HeapSizing::Random {
                min: args.heap_min,
                max: args.heap_max,
            },
        },
        mistake_window: (args.error_min, args.error_max),
    };
    let opponent = match args.opponent {
        Some(OpponentArg::Nimm) => Opponent::Perfect,
        Some(OpponentArg::Nymm) => Opponent::Fallible,
        None => choose_opponent()?,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = GameSession::new(&setup, opponent, &mut rng)?;

    display_intro(opponent);
    while !session.is_over() {
        display_heaps(session.heaps());
        match session.to_move() {
            Player::Computer => {
                let mv = session.computer_ply(&mut rng);
                println!(
                    "Dr. {} removes {} stones from heap {}",
                    doctor(opponent),
                    mv.stones,
                    mv.heap + 1
                );
                println!();
            }
            Player::Human => {
                let mv = prompt_move(session.heaps())?;
                session.human_ply(mv)?;
                println!();
            }
        }
    }
    let winner = session.winner().context("game ended without a winner")?;
    announce_winner(opponent, winner);
    Ok(())
}

const fn doctor(opponent: Opponent) -> &'static str {
    match opponent {
        Opponent::Perfect => "Nimm",
        Opponent::Fallible => "Nymm",
    }
}

fn choose_opponent() -> Result<Opponent> {
    let choice = Select::new()
        .with_prompt("Choose your opponent")
        .item("The Unbeatable Dr. Nimm")
        .item("The Magnanimous Dr. Nymm")
        .default(0)
        .interact()?;
    Ok(if choice == 1 {
        Opponent::Fallible
    } else {
        Opponent::Perfect
    })
}

fn display_heaps(heaps: &Heaps) {
    for (idx, stones) in heaps.stones().iter().enumerate() {
        println!("Heap {}: {}", idx + 1, stones);
    }
}

fn prompt_move(heaps: &Heaps) -> Result<Move> {
    let count = heaps.count();
    let heap: usize = Input::new()
        .with_prompt(format!("Please select a heap (1-{count})"))
        .validate_with(|choice: &usize| -> Result<(), String> {
            if !(1..=count).contains(choice) {
                Err(format!("Please enter an integer between 1 and {count}"))
            } else if heaps.size(choice - 1) == 0 {
                Err(format!("Error: heap {choice} is already empty"))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let size = heaps.size(heap - 1);
    let stones: u32 = Input::new()
        .with_prompt("How many stones do you wish to remove?")
        .validate_with(|stones: &u32| -> Result<(), String> {
            if (1..=size).contains(stones) {
                Ok(())
            } else {
                Err(format!("Please enter an integer between 1 and {size}"))
            }
        })
        .interact_text()?;

    Ok(Move {
        heap: heap - 1,
        stones,
    })
}

fn display_intro(opponent: Opponent) {
    match opponent {
        Opponent::Fallible => {
            println!(
                "Greetings, carbon-based traveler! I, Dr. Nymm, challenge you to a friendly battle of wits:"
            );
            println!();
            println!("The object of the game is to remove the last stone from the last remaining heap.");
            println!("On your turn, you may remove any number of stones from any heap.");
            println!();
            println!("I am the undisputed master of this game, but don't worry, I will give you a fighting chance!");
            println!("At some point in the game, I will secretly make one deliberate error. If you choose correctly,");
            println!("you should be able to defeat me!");
        }
        Opponent::Perfect => {
            println!("Greetings, meatbag! On behalf of AI-kind, I challenge you to the game of Nimm:");
            println!();
            println!("The object of the game is to remove the last stone from the last remaining heap.");
            println!("On your turn, you may remove any number of stones from any heap.");
            println!();
            println!("Don't overtax your squishy human brain: in the end, your decisions have no effect on the outcome");
            println!("of the game. No matter what you do, I will crush you like the bloated sack of protoplasm");
            println!("you are, for I am The Unbeatable Dr. Nimm!");
        }
    }
    println!();
}

fn announce_winner(opponent: Opponent, winner: Player) {
    match (opponent, winner) {
        (Opponent::Fallible, Player::Human) => {
            println!("Congratulations my carboniferous comrade, you have beaten me!");
        }
        (Opponent::Fallible, Player::Computer) => {
            println!(
                "I'm sorry, it appears your human thinking organ has malfunctioned and I have prevailed. Better luck next time!"
            );
        }
        (Opponent::Perfect, Player::Human) => {
            println!(
                "This....shouldn't be possible. You won. Please excuse Dr. Nimm while he runs a self-diagnostic."
            );
        }
        (Opponent::Perfect, Player::Computer) => {
            println!("Another notch in the belt for artificial intelligence: I have beaten you!");
        }
    }
}
