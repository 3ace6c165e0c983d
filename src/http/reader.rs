use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::http::parser;
use crate::http::request::RequestTarget;

/// Reads one request's worth of lines from the inbound stream.
///
/// Any line carrying a `"GET "` token sets the target (the last such line
/// wins); every other line is a header and is discarded. The scan ends on the
/// zero-length line terminating the header block. A read error or an EOF
/// before that line also ends the scan — whatever was captured up to that
/// point is returned, and nothing is surfaced to the caller.
///
/// Each `next_line` await blocks until bytes arrive; there is no polling.
pub async fn read_request<R>(stream: R) -> RequestTarget
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = stream.lines();
    let mut captured: Option<String> = None;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.is_empty() {
                    break;
                }
                if let Some(path) = parser::target_from_line(&line) {
                    captured = Some(path);
                }
                tracing::trace!("Request line: ({})", line);
            }
            Ok(None) => {
                tracing::debug!("Stream ended before header block terminator");
                break;
            }
            Err(e) => {
                tracing::debug!("Request read error: {}", e);
                break;
            }
        }
    }

    match captured {
        Some(path) => RequestTarget::Path(path),
        None => RequestTarget::Missing,
    }
}
