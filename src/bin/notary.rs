// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::{self, Read};

use anyhow::Context;
use notary::{Game, GameStatus};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Referees a game of chess given in algebraic notation, one move per argument.
#[derive(Debug, StructOpt)]
struct Options {
    /// Moves to play from the starting position, e.g. `e4 e5 Nf3`.
    #[structopt(name = "MOVES")]
    moves: Vec<String>,

    /// Read whitespace-separated moves from stdin after the ones given as arguments.
    #[structopt(long)]
    stdin: bool,

    /// Print the final report as JSON instead of text.
    #[structopt(long)]
    json: bool,

    /// Don't draw the final board.
    #[structopt(short, long)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    history: Vec<String>,
    status: GameStatus,
    rejected: Option<Rejection>,
}

#[derive(Debug, Serialize)]
struct Rejection {
    ply: usize,
    notation: String,
    reason: String,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::WARN)
        .with_env_filter(EnvFilter::from_env("NOTARY_LOG"))
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Options::from_args();
    let mut moves = args.moves.clone();
    if args.stdin {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read moves from stdin")?;
        moves.extend(buf.split_whitespace().map(str::to_string));
    }

    let mut game = Game::new();
    let mut rejected = None;
    for (ply, notation) in moves.iter().enumerate() {
        if let Err(e) = game.make_move(notation) {
            rejected = Some(Rejection {
                ply: ply + 1,
                notation: notation.clone(),
                reason: e.to_string(),
            });
            break;
        }
    }

    let report = Report {
        history: game.history().iter().map(|n| n.to_string()).collect(),
        status: game.status(),
        rejected,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !args.quiet {
        print!("{}", game.board());
    }

    for (i, pair) in report.history.chunks(2).enumerate() {
        println!("{:>3}. {}", i + 1, pair.join(" "));
    }

    println!("{:<10} {:?}", "Status:", report.status);
    if let Some(rejection) = report.rejected {
        println!(
            "{:<10} move {} ({}): {}",
            "Rejected:", rejection.ply, rejection.notation, rejection.reason
        );
    }

    Ok(())
}
