use std::time::SystemTime;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::SiteConfig;
use crate::content::ContentEmitter;
use crate::http::reader;
use crate::http::request::RequestTarget;
use crate::http::response::ResponseHeader;
use crate::http::writer::ResponseWriter;

pub struct Connection {
    stream: TcpStream,
    emitter: ContentEmitter,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Responding(RequestTarget),
    Flushing,
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, site: SiteConfig) -> Self {
        Self {
            stream,
            emitter: ContentEmitter::new(site),
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection through exactly one request/response cycle.
    ///
    /// No state is ever re-entered; the advertised `Connection: close` is
    /// real. Errors propagate to whoever spawned the handler, which logs them
    /// and drops the connection — they affect nothing beyond it.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    // Read errors are absorbed by the reader; whatever target
                    // it captured before failing is still served.
                    let target = reader::read_request(BufReader::new(&mut self.stream)).await;
                    self.state = ConnectionState::Responding(target);
                }

                ConnectionState::Responding(target) => {
                    self.respond(target).await?;
                    self.state = ConnectionState::Flushing;
                }

                ConnectionState::Flushing => {
                    self.stream.flush().await?;
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Writes the full response for the captured target.
    ///
    /// The success header is deferred until the resource file has actually
    /// been opened, so a response carries exactly one header block: either
    /// 200 + content, or the 404 emitter's own header + body.
    async fn respond(&mut self, target: RequestTarget) -> anyhow::Result<()> {
        let now = SystemTime::now();

        match target {
            RequestTarget::Missing => {
                self.write_ok_header(now).await?;
                self.emitter.write_default_page(&mut self.stream).await?;
            }

            RequestTarget::Path(path) => match self.emitter.open(&path).await {
                Some(file) => {
                    tracing::debug!("Serving {}", path);
                    self.write_ok_header(now).await?;
                    self.emitter
                        .stream_file(file, &mut self.stream, now)
                        .await?;
                }
                None => {
                    tracing::debug!("Not found: {}", path);
                    self.emitter.write_not_found(&mut self.stream, now).await?;
                }
            },
        }

        Ok(())
    }

    async fn write_ok_header(&mut self, now: SystemTime) -> anyhow::Result<()> {
        let site = self.emitter.site();
        let header = ResponseHeader::ok(now, &site.server_id, &site.content_type);
        ResponseWriter::new(&header)
            .write_to_stream(&mut self.stream)
            .await
    }
}
