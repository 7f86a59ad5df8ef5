//! USI command parser

use std::fmt;

use anyhow::{Result, anyhow};
use jhbr_core::search::SearchLimits;
use log::debug;

/// Commands understood by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum UsiCommand {
    Usi,
    IsReady,
    /// Accepted without effect.
    SetOption { name: String, value: Option<String> },
    UsiNewGame,
    Position(PositionCommand),
    Go(SearchLimits),
    Stop,
    PonderHit,
    Quit,
}

/// Arguments of `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCommand {
    /// SFEN of the base position, `None` for `startpos`.
    pub sfen: Option<String>,
    pub moves: Vec<String>,
}

impl fmt::Display for PositionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sfen {
            Some(sfen) => write!(f, "position sfen {sfen}")?,
            None => f.write_str("position startpos")?,
        }
        if !self.moves.is_empty() {
            write!(f, " moves {}", self.moves.join(" "))?;
        }
        Ok(())
    }
}

/// Parse one input line.
pub fn parse_usi_command(line: &str) -> Result<UsiCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Err(anyhow!("Empty command"));
    };

    match head {
        "usi" => Ok(UsiCommand::Usi),
        "isready" => Ok(UsiCommand::IsReady),
        "usinewgame" => Ok(UsiCommand::UsiNewGame),
        "stop" => Ok(UsiCommand::Stop),
        "ponderhit" => Ok(UsiCommand::PonderHit),
        "quit" => Ok(UsiCommand::Quit),
        "setoption" => parse_setoption(&parts[1..]),
        "position" => parse_position(&parts[1..]),
        "go" => parse_go(&parts[1..]),
        _ => Err(anyhow!("Unknown command: {head}")),
    }
}

fn parse_setoption(parts: &[&str]) -> Result<UsiCommand> {
    if parts.len() < 2 || parts[0] != "name" {
        return Err(anyhow!("Invalid setoption format"));
    }
    let value_pos = parts.iter().position(|&p| p == "value");
    let name = parts[1..value_pos.unwrap_or(parts.len())].join(" ");
    let value = value_pos
        .map(|pos| parts[pos + 1..].join(" "))
        .filter(|v| !v.is_empty());
    Ok(UsiCommand::SetOption { name, value })
}

fn parse_position(parts: &[&str]) -> Result<UsiCommand> {
    let moves_pos = parts.iter().position(|&p| p == "moves");
    let base_end = moves_pos.unwrap_or(parts.len());

    let sfen = match parts.first() {
        Some(&"startpos") if base_end == 1 => None,
        Some(&"sfen") if base_end > 1 => Some(parts[1..base_end].join(" ")),
        _ => return Err(anyhow!("Position must be 'startpos' or 'sfen <sfen>'")),
    };

    let moves = match moves_pos {
        Some(pos) => parts[pos + 1..].iter().map(|s| s.to_string()).collect(),
        None => Vec::new(),
    };
    Ok(UsiCommand::Position(PositionCommand { sfen, moves }))
}

fn parse_go(parts: &[&str]) -> Result<UsiCommand> {
    fn value<T: std::str::FromStr>(parts: &[&str], i: usize, key: &str) -> Result<T> {
        let raw = parts.get(i).ok_or_else(|| anyhow!("go {key} requires a value"))?;
        raw.parse().map_err(|_| anyhow!("Invalid {key} value: {raw}"))
    }

    let mut limits = SearchLimits::default();
    let mut i = 0;
    while i < parts.len() {
        let key = parts[i];
        match key {
            "infinite" => limits.infinite = true,
            "ponder" => limits.ponder = true,
            "btime" | "wtime" | "byoyomi" | "binc" | "winc" | "movetime" | "nodes" => {
                i += 1;
                let v: u64 = value(parts, i, key)?;
                match key {
                    "btime" => limits.btime = Some(v),
                    "wtime" => limits.wtime = Some(v),
                    "byoyomi" => limits.byoyomi = Some(v),
                    "binc" => limits.binc = Some(v),
                    "winc" => limits.winc = Some(v),
                    "movetime" => limits.movetime = Some(v),
                    _ => limits.nodes = Some(v),
                }
            }
            "depth" => {
                i += 1;
                limits.depth = Some(value(parts, i, key)?);
            }
            // `mate` searches are not supported; treat as a plain go.
            "mate" => {
                i += 1;
            }
            other => debug!("skipping go token: {other}"),
        }
        i += 1;
    }
    Ok(UsiCommand::Go(limits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands() {
        assert_eq!(parse_usi_command("usi").unwrap(), UsiCommand::Usi);
        assert_eq!(parse_usi_command("  isready  ").unwrap(), UsiCommand::IsReady);
        assert_eq!(parse_usi_command("usinewgame").unwrap(), UsiCommand::UsiNewGame);
        assert_eq!(parse_usi_command("ponderhit").unwrap(), UsiCommand::PonderHit);
        assert!(parse_usi_command("").is_err());
        assert!(parse_usi_command("bogus").is_err());
    }

    #[test]
    fn setoption_name_and_value() {
        assert_eq!(
            parse_usi_command("setoption name USI_Hash value 256").unwrap(),
            UsiCommand::SetOption { name: "USI_Hash".into(), value: Some("256".into()) }
        );
        assert_eq!(
            parse_usi_command("setoption name USI_Ponder").unwrap(),
            UsiCommand::SetOption { name: "USI_Ponder".into(), value: None }
        );
        assert!(parse_usi_command("setoption USI_Hash").is_err());
    }

    #[test]
    fn position_startpos_with_moves() {
        let cmd = parse_usi_command("position startpos moves 7g7f 3c3d").unwrap();
        let UsiCommand::Position(p) = cmd else { panic!("not a position: {cmd:?}") };
        assert_eq!(p.sfen, None);
        assert_eq!(p.moves, vec!["7g7f", "3c3d"]);
        assert_eq!(p.to_string(), "position startpos moves 7g7f 3c3d");
    }

    #[test]
    fn position_sfen() {
        let line = "position sfen 8k/9/8P/9/9/9/9/9/4K4 b G 1 moves G*1b";
        let UsiCommand::Position(p) = parse_usi_command(line).unwrap() else {
            panic!("not a position");
        };
        assert_eq!(p.sfen.as_deref(), Some("8k/9/8P/9/9/9/9/9/4K4 b G 1"));
        assert_eq!(p.moves, vec!["G*1b"]);
        assert_eq!(p.to_string(), line);
    }

    #[test]
    fn position_errors() {
        assert!(parse_usi_command("position").is_err());
        assert!(parse_usi_command("position sfen").is_err());
        assert!(parse_usi_command("position startpos 7g7f").is_err());
        assert!(parse_usi_command("position kifu").is_err());
    }

    #[test]
    fn go_parameters() {
        let UsiCommand::Go(limits) =
            parse_usi_command("go btime 1000 wtime 2000 byoyomi 3000 binc 10 winc 20 nodes 5000")
                .unwrap()
        else {
            panic!("not a go");
        };
        assert_eq!(limits.btime, Some(1000));
        assert_eq!(limits.wtime, Some(2000));
        assert_eq!(limits.byoyomi, Some(3000));
        assert_eq!(limits.binc, Some(10));
        assert_eq!(limits.winc, Some(20));
        assert_eq!(limits.nodes, Some(5000));
        assert!(!limits.infinite && !limits.ponder);

        let UsiCommand::Go(limits) = parse_usi_command("go ponder infinite depth 3").unwrap() else {
            panic!("not a go");
        };
        assert!(limits.ponder && limits.infinite);
        assert_eq!(limits.depth, Some(3));

        assert!(parse_usi_command("go btime").is_err());
        assert!(parse_usi_command("go nodes many").is_err());
    }

    #[test]
    fn go_skips_unknown_tokens() {
        let UsiCommand::Go(limits) =
            parse_usi_command("go searchmoves 7g7f 2g2f btime 500").unwrap()
        else {
            panic!("not a go");
        };
        assert_eq!(limits.btime, Some(500));
        assert_eq!(parse_usi_command("go sideways").unwrap(), UsiCommand::Go(SearchLimits::default()));
    }
}
