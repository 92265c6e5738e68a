// src/cli/progress.rs — Terminal progress for workflow transitions

use crate::core::session::{Session, SessionState};

/// Progress line for a state, if the state has one.
pub fn progress_line(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Analyzing => Some("[vision] Processing vision..."),
        SessionState::GeneratingImage => Some("[synth] Synthesizing look..."),
        SessionState::Result => Some("[done] Flat-lay ready"),
        SessionState::Error => Some("[error] Cycle failed"),
        SessionState::Idle => None,
    }
}

/// Build an observer that writes progress to stderr.
///
/// Stdout stays clean for the report. Pass to `Workflow::with_observer()`.
pub fn terminal_progress() -> impl Fn(&Session) + Send + Sync + 'static {
    move |session: &Session| {
        if let Some(line) = progress_line(session.state()) {
            eprintln!("{}", line);
        }
    }
}
