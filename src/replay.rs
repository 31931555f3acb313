use std::io::{self, Write};

use crate::heading::Heading;
use crate::session::{GameSession, TickResult};

/// Replays `moves` one character per tick and writes every snapshot as a JSON line.
///
/// The first line is the snapshot before any tick. `U`, `D`, `L` and `R` request
/// a heading; any other character keeps the current one. Output stops after the
/// first snapshot in a terminal state, even if moves remain.
pub fn replay<W: Write>(session: &mut GameSession, moves: &str, mut out: W) -> io::Result<()> {
    write_line(&mut out, &session.snapshot())?;

    for symbol in moves.chars() {
        let requested = match Heading::try_from(symbol) {
            Ok(heading) => Some(heading),
            Err(error) => {
                tracing::debug!(%error, "treating move as no change");
                None
            }
        };

        let result = session.tick(requested);
        write_line(&mut out, &result)?;

        if result.state.is_terminal() {
            break;
        }
    }

    tracing::info!(
        score = session.score(),
        state = ?session.state(),
        ticks = session.tick_count(),
        "replay finished"
    );
    out.flush()
}

fn write_line<W: Write>(out: &mut W, result: &TickResult) -> io::Result<()> {
    serde_json::to_writer(&mut *out, result)?;
    writeln!(out)
}
