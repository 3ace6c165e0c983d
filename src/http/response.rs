use bytes::{BufMut, Bytes, BytesMut};
use std::time::SystemTime;

const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes emitted by the server.
///
/// Only two outcomes exist in this pipeline:
/// - `Ok` (200): the resource (or the default landing page) is served
/// - `NotFound` (404): the resource path named no readable file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 ERROR
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Reason phrase exactly as it appears on the wire.
    ///
    /// The 404 phrase is "ERROR", not the RFC wording — naive clients match
    /// the status line textually and expect it verbatim.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "ERROR",
        }
    }
}

/// A complete response header block.
///
/// Exactly one header block is written per response, always before any body
/// byte. Field order is fixed — Date, Server, Connection, Content-Type — and
/// the block is terminated by a single blank line; clients split on the first
/// blank line to find the body.
///
/// The timestamp is taken as a value rather than read from the clock here, so
/// callers (and tests) control it.
#[derive(Debug, Clone)]
pub struct ResponseHeader {
    pub status: StatusCode,
    pub date: SystemTime,
    pub server_id: String,
    pub content_type: String,
}

impl ResponseHeader {
    /// Header for a successful response.
    pub fn ok(date: SystemTime, server_id: &str, content_type: &str) -> Self {
        Self {
            status: StatusCode::Ok,
            date,
            server_id: server_id.to_string(),
            content_type: content_type.to_string(),
        }
    }

    /// Header for the 404 response.
    pub fn not_found(date: SystemTime, server_id: &str, content_type: &str) -> Self {
        Self {
            status: StatusCode::NotFound,
            date,
            server_id: server_id.to_string(),
            content_type: content_type.to_string(),
        }
    }

    /// Serializes the block to its wire form.
    ///
    /// The Date field carries the timestamp as an RFC 7231 IMF-fixdate in
    /// GMT, e.g. "Thu, 01 Jan 1970 00:00:00 GMT".
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(160);

        // Status line
        let status_line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            self.status.as_u16(),
            self.status.reason_phrase()
        );
        buf.put_slice(status_line.as_bytes());

        buf.put_slice(b"Date: ");
        buf.put_slice(httpdate::fmt_http_date(self.date).as_bytes());
        buf.put_slice(b"\r\n");

        buf.put_slice(b"Server: ");
        buf.put_slice(self.server_id.as_bytes());
        buf.put_slice(b"\r\n");

        buf.put_slice(b"Connection: close\r\n");

        buf.put_slice(b"Content-Type: ");
        buf.put_slice(self.content_type.as_bytes());
        buf.put_slice(b"\r\n");

        // Header/body separator
        buf.put_slice(b"\r\n");

        buf.freeze()
    }
}
