//! Interactive driver for `ebony`.
//!
//! Reads a starting position (FEN) from the first line of standard
//! input, then alternates between reading the human's (White's) moves
//! and playing the engine's (Black's) replies, printing the FEN after
//! every half-move, until the game reaches a terminal situation.

use std::io::{self, BufRead, Write};
use std::process;

use ebony_engine::coretypes::{File, PieceKind, Rank};
use ebony_engine::{Color, Game, Situation, Square};

fn promotion_piece_kind(ch: char) -> Option<PieceKind> {
    match ch {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}

/// Parses `<from-file><from-rank><to-file><to-rank>[promotion]`, e.g.
/// `e2e4` or `a7a8q`.
fn parse_move_line(line: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let chars: Vec<char> = line.trim().chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return None;
    }
    let from_file = File::try_from(chars[0]).ok()?;
    let from_rank = Rank::try_from(chars[1]).ok()?;
    let to_file = File::try_from(chars[2]).ok()?;
    let to_rank = Rank::try_from(chars[3]).ok()?;
    let promotion = match chars.get(4) {
        Some(&ch) => Some(promotion_piece_kind(ch)?),
        None => None,
    };
    Some((Square::new(from_file, from_rank), Square::new(to_file, to_rank), promotion))
}

fn result_banner(situation: Situation) -> &'static str {
    match situation {
        Situation::Checkmate(Color::White) => "Xeque-mate -- Vitoria: BRANCO",
        Situation::Checkmate(Color::Black) => "Xeque-mate -- Vitoria: PRETO",
        Situation::Stalemate => "Empate -- Afogamento",
        Situation::Fifty => "Empate -- Regra dos 50 Movimentos",
        Situation::InsufficientMaterial => "Empate -- Falta de Material",
        Situation::Threefold => "Empate -- Tripla Repeticao",
        Situation::Play => unreachable!("Play is not a terminal situation"),
    }
}

fn run() -> Result<(), String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let first_line = match lines.next() {
        Some(line) => line.map_err(|e| e.to_string())?,
        None => return Ok(()),
    };
    let mut game =
        Game::from_fen(first_line.trim()).map_err(|e| format!("fen invalida na entrada: {e}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        writeln!(out, "{}", game.fen()).map_err(|e| e.to_string())?;

        let situation = game.situation();
        if situation != Situation::Play {
            writeln!(out, "{}", result_banner(situation)).map_err(|e| e.to_string())?;
            return Ok(());
        }

        match game.board().side_to_move {
            Color::Black => {
                game.play_engine_move();
            }
            Color::White => loop {
                let line = match lines.next() {
                    Some(line) => line.map_err(|e| e.to_string())?,
                    None => return Ok(()),
                };
                let applied = parse_move_line(&line)
                    .map(|(from, to, promotion)| game.apply_move(from, to, promotion));
                if let Some(Ok(())) = applied {
                    break;
                }
                writeln!(out, "Movimento invalido. Tente novamente.").map_err(|e| e.to_string())?;
            },
        }
    }
}

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        process::exit(1);
    }
}
