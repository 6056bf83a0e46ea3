use anyhow::Result;
use clap::{self, Parser};
use nimm::heaps::{Heaps, Move};
use nimm::strategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: String,
    nim_sum: String,
    winning_move: Option<Move>,
}

/// Evaluate a Nim position: print its nim-sum and the winning move, if any.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    /// Comma-separated heap sizes, e.g. 15,21,25
    #[arg(long, value_delimiter = ',', required = true)]
    heaps: Vec<u32>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: Args) -> Result<()> {
    let report = evaluate(&Heaps::new(args.heaps));
    if args.json {
        println!("{}", serde_json::ser::to_string(&report)?);
        return Ok(());
    }

    println!("{}: nim-sum {}", report.position, report.nim_sum);
    match report.winning_move {
        Some(mv) => println!(
            "winning move: remove {} stones from heap {}",
            mv.stones,
            mv.heap + 1
        ),
        None => println!("no winning move: the player to move loses against perfect play"),
    }
    Ok(())
}

fn evaluate(heaps: &Heaps) -> Report {
    Report {
        position: heaps.to_string(),
        nim_sum: heaps.nim_sum().to_string(),
        winning_move: strategy::winning_move(heaps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_winning_move() {
        let report = evaluate(&Heaps::new(vec![5, 3]));
        assert_eq!(report.position, "Heaps[5, 3]");
        assert_eq!(report.nim_sum, "*6");
        assert_eq!(report.winning_move, Some(Move { heap: 0, stones: 2 }));
    }

    #[test]
    fn reports_lost_position() {
        let report = evaluate(&Heaps::new(vec![1, 2, 3]));
        assert_eq!(report.nim_sum, "0");
        assert_eq!(report.winning_move, None);
    }
}
