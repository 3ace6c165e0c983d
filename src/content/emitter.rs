use anyhow::Context;
use std::time::SystemTime;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::SiteConfig;
use crate::content::resolve;
use crate::http::response::ResponseHeader;
use crate::http::writer::ResponseWriter;

/// Emits response bodies: served files with marker insertion, the default
/// landing page, and the complete 404 response.
///
/// Holds the immutable site configuration; one emitter lives inside each
/// connection handler and nothing is shared across connections.
pub struct ContentEmitter {
    cfg: SiteConfig,
}

impl ContentEmitter {
    pub fn new(cfg: SiteConfig) -> Self {
        Self { cfg }
    }

    /// Site configuration this emitter serves under.
    pub fn site(&self) -> &SiteConfig {
        &self.cfg
    }

    /// Tries to open the file a resource path names.
    ///
    /// `None` covers "escapes/empties out under normalization", "does not
    /// exist or is unreadable", and "is not a regular file"; every `None`
    /// takes the 404 path. The directory check runs before any header byte
    /// is written — opening a directory succeeds on Linux but reading it
    /// fails, which would otherwise truncate the response after the header.
    pub async fn open(&self, target: &str) -> Option<File> {
        let path = resolve::resolve(&self.cfg.document_root, target)?;

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!("Resource {} not readable: {}", path.display(), e);
                return None;
            }
        };

        match file.metadata().await {
            Ok(meta) if meta.is_file() => Some(file),
            Ok(_) => {
                tracing::debug!("Resource {} is not a regular file", path.display());
                None
            }
            Err(e) => {
                tracing::debug!("Resource {} metadata error: {}", path.display(), e);
                None
            }
        }
    }

    /// Streams an opened file line by line, appending "\n" to every line.
    ///
    /// A line containing the date marker is followed by an inserted line
    /// holding the GMT timestamp; a line containing the server marker is
    /// followed by the server identity. Insertions, not replacements — the
    /// marker line itself is always emitted verbatim first, and a line
    /// carrying both markers gets both insertions, date first.
    pub async fn stream_file<W>(
        &self,
        file: File,
        out: &mut W,
        now: SystemTime,
    ) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let date = httpdate::fmt_http_date(now);
        let mut lines = BufReader::new(file).lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("reading resource file")?
        {
            out.write_all(line.as_bytes()).await?;
            out.write_all(b"\n").await?;

            if line.contains(&self.cfg.date_marker) {
                out.write_all(date.as_bytes()).await?;
                out.write_all(b"\n").await?;
            }
            if line.contains(&self.cfg.server_marker) {
                out.write_all(self.cfg.server_id.as_bytes()).await?;
                out.write_all(b"\n").await?;
            }
        }

        Ok(())
    }

    /// Fixed landing page served when the request carried no resource path.
    /// The success header has already been written by the caller.
    pub async fn write_default_page<W>(&self, out: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        out.write_all(b"<html><head></head><body>\n").await?;
        out.write_all(b"<h3>The server is up and running.</h3>\n")
            .await?;
        out.write_all(b"</body></html>\n").await?;
        Ok(())
    }

    /// Complete 404 response: its own full header block plus the fixed body.
    /// Only invoked when no success header has been written yet.
    pub async fn write_not_found<W>(&self, out: &mut W, now: SystemTime) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let header = ResponseHeader::not_found(now, &self.cfg.server_id, &self.cfg.content_type);
        ResponseWriter::new(&header).write_to_stream(out).await?;

        out.write_all(b"<html><head></head><body>\n").await?;
        out.write_all(b"<h2>404 Not Found</h2>\n").await?;
        out.write_all(b"</body></html>\n").await?;
        Ok(())
    }
}
