//! Persists matches as `digest=address` lines.

use std::io::{self, Write};

use crossbeam_channel::Receiver;
use ipmd5_common::error::SearchError;
use ipmd5_common::models::MatchResult;
use ipmd5_common::sink::ResultSink;
use tracing::debug;

/// Writes one `digest=address` line per match.
///
/// Matches are rare, so lines go straight to `writer` and are flushed as
/// soon as they are recorded; a run that dies later still leaves everything
/// found so far on disk.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ResultSink for LineSink<W> {
    fn record(&mut self, result: &MatchResult) -> io::Result<()> {
        writeln!(self.writer, "{result}")?;
        self.writer.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Records every result until the channel closes, then finishes the sink.
///
/// Returns the number of results written. On a write error the receiver is
/// dropped, which is how workers learn that the sink is gone.
pub fn drain<S>(sink: &mut S, results: Receiver<MatchResult>) -> Result<u64, SearchError>
where
    S: ResultSink + ?Sized,
{
    let mut written: u64 = 0;

    for result in results.iter() {
        debug!(digest = %result.digest, addr = %result.addr, "writing match");
        sink.record(&result).map_err(SearchError::destination_io)?;
        written += 1;
    }

    sink.finish().map_err(SearchError::destination_io)?;
    Ok(written)
}
