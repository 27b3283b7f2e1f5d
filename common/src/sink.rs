use std::io;

use crate::models::MatchResult;

/// Where matches are persisted.
///
/// A sink is owned by exactly one consumer thread for the duration of a
/// search, so implementations need `Send` but never `Sync`.
pub trait ResultSink: Send {
    /// Persists one match.
    fn record(&mut self, result: &MatchResult) -> io::Result<()>;

    /// Flushes everything recorded so far. Called once, after the result
    /// channel has closed.
    fn finish(&mut self) -> io::Result<()>;
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn record(&mut self, result: &MatchResult) -> io::Result<()> {
        (**self).record(result)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}
