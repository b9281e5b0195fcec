//! Line-oriented interactive play: one command per input line.

use std::io::{BufRead, Write};

use anyhow::Result;
use twenty48_core::TileSource;
use twenty48_core::engine::Direction;
use twenty48_core::session::{GameState, Outcome, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

/// Map a typed key or word to a command. Case-insensitive; surrounding
/// whitespace ignored.
pub fn parse_command(input: &str) -> Option<Command> {
    let cmd = match input.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => Command::Move(Direction::Up),
        "s" | "down" => Command::Move(Direction::Down),
        "a" | "left" => Command::Move(Direction::Left),
        "d" | "right" => Command::Move(Direction::Right),
        "n" | "new" => Command::Restart,
        "q" | "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Run a session against `input`/`output` until quit or end of input.
pub fn run<S, R, W>(session: &mut Session<S>, input: R, mut output: W) -> Result<()>
where
    S: TileSource,
    R: BufRead,
    W: Write,
{
    render(session, &mut output)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                session.restart();
                render(session, &mut output)?;
            }
            Some(Command::Move(dir)) => {
                let result = session.apply_move(dir);
                match result.outcome {
                    Outcome::Rejected => writeln!(output, "{dir:?} does not move anything")?,
                    Outcome::Continue => render(session, &mut output)?,
                    Outcome::Won => {
                        render(session, &mut output)?;
                        writeln!(output, "You reached {}!", session.target())?;
                        if session.state() == GameState::Over {
                            game_over(result.score, &mut output)?;
                        } else {
                            writeln!(
                                output,
                                "Score: {}. Keep playing or 'n' for a new game.",
                                result.score
                            )?;
                        }
                    }
                    Outcome::Over => {
                        render(session, &mut output)?;
                        game_over(result.score, &mut output)?;
                    }
                }
            }
            None => writeln!(output, "unknown command {:?}; use w/a/s/d, n or q", line.trim())?,
        }
        output.flush()?;
    }
    Ok(())
}

fn render<S: TileSource, W: Write>(session: &Session<S>, output: &mut W) -> Result<()> {
    write!(output, "{}", session.board())?;
    writeln!(output, "Score: {}", session.score())?;
    Ok(())
}

fn game_over<W: Write>(score: u64, output: &mut W) -> Result<()> {
    writeln!(
        output,
        "No more moves. Final score: {score}. 'n' for a new game, 'q' to quit."
    )?;
    Ok(())
}
