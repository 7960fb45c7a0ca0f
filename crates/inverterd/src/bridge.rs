//! The bridge main loop
//!
//! Sequential read → dispatch → reply cycle over a pair of byte streams.
//! Generic over the streams so tests can drive it with in-memory pipes
//! while the binary wires up stdin/stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::dispatch;
use crate::session::Session;

/// Run the bridge until the input stream ends.
///
/// Every non-blank input line produces exactly one output line, flushed
/// before the next line is read so the peer observes the reply first.
/// Whitespace-only lines are skipped silently. Returns once end-of-input
/// is reached; no failure inside dispatch ever ends the loop.
pub async fn run_bridge<R, W>(
    reader: R,
    mut writer: W,
    mut session: Session,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = dispatch::handle_line(&mut session, line).await;

        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    debug!("input stream closed");
    Ok(())
}
