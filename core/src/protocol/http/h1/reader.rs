/*
 * reader.rs
 * Copyright (C) 2026 The Communicator Authors
 *
 * This file is part of Communicator, an HTTP/1.1 client engine.
 *
 * Communicator is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Communicator is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Communicator.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Response reader: drives `ResponseParser` from a stream and assembles a `RawResponse`.
//!
//! Recognized headers (case-sensitive names) are resolved into typed fields as they arrive;
//! everything else is dropped. The body is kept as bytes; status, decoding and classification
//! happen in `response::finish`.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::HttpErr;
use crate::protocol::http::content::ContentType;
use crate::protocol::http::h1::parser::{Framing, H1ResponseHandler, ParseState, ResponseParser};
use crate::protocol::http::headers::{
    ConnectionDirective, ContentEncoding, ContentLanguage, TransferEncoding,
};
use crate::protocol::http::request::Method;
use crate::protocol::http::response::RawResponse;

/// Response heads larger than this without a blank line are rejected.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

const READ_CHUNK: usize = 8192;

/// Status line and recognized headers of a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    pub status_code: u16,
    pub status_message: String,
    pub content_length: Option<usize>,
    pub content_type: ContentType,
    pub transfer_encoding: TransferEncoding,
    pub content_encoding: ContentEncoding,
    pub connection: ConnectionDirective,
    pub language: ContentLanguage,
}

/// Decide how the body is delimited, given the head and the bytes already buffered behind it.
///
/// Precedence: chunked (without Content-Length), then Content-Length > 0, then the buffered
/// bytes of a binary body, otherwise no body. HEAD responses never have a body.
pub fn select_framing(head: &ResponseHead, method: Method, buffered: usize) -> Framing {
    if method == Method::Head {
        return Framing::NoBody;
    }
    if head.transfer_encoding == TransferEncoding::Chunked && head.content_length.is_none() {
        return Framing::Chunked;
    }
    match head.content_length {
        Some(n) if n > 0 => Framing::Length(n),
        _ if head.content_type.is_binary() && buffered > 0 => Framing::Buffered,
        _ => Framing::NoBody,
    }
}

/// Builds the head and body from parser events.
#[derive(Default)]
struct OutputCollector {
    head: ResponseHead,
    body: Vec<u8>,
}

impl H1ResponseHandler for OutputCollector {
    fn status(&mut self, code: u16, reason: &str) {
        self.head.status_code = code;
        self.head.status_message = reason.to_string();
    }

    fn header(&mut self, name: &str, value: &str) -> Result<(), HttpErr> {
        match name {
            "Transfer-Encoding" => {
                self.head.transfer_encoding = TransferEncoding::from_header(value)
            }
            "Content-Encoding" => self.head.content_encoding = ContentEncoding::from_header(value),
            "Content-Type" => self.head.content_type = ContentType::from_header(value),
            "Content-Length" => {
                let n = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| HttpErr::InvalidContentSize)?;
                self.head.content_length = Some(n);
            }
            "Content-Language" => self.head.language = ContentLanguage::from_header(value),
            "Connection" => self.head.connection = ConnectionDirective::from_header(value),
            _ => {}
        }
        Ok(())
    }

    fn body_chunk(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    fn complete(&mut self) {}
}

/// Read one response from `stream`. Any status is returned as parsed.
///
/// Blocks until the body is complete; there is no read deadline.
pub async fn read_response<S>(stream: &mut S, method: Method) -> Result<RawResponse, HttpErr>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    let mut parser = ResponseParser::new();
    let mut collector = OutputCollector::default();
    let mut framing = Framing::NoBody;
    let mut eof = false;

    loop {
        parser.receive(&mut buf, &mut collector)?;
        match parser.state() {
            ParseState::HeadersComplete => {
                framing = select_framing(&collector.head, method, buf.len());
                parser.set_framing(framing, &mut collector);
                continue;
            }
            ParseState::Done => break,
            _ => {}
        }
        if eof {
            parser.end_of_stream(&mut buf, &mut collector)?;
            match parser.state() {
                ParseState::HeadersComplete => continue,
                _ => break,
            }
        }
        if parser.in_head() && buf.len() > MAX_HEAD_SIZE {
            return Err(HttpErr::MissingHeaderTerminator);
        }
        buf.reserve(READ_CHUNK);
        if stream.read_buf(&mut buf).await? == 0 {
            eof = true;
        }
    }

    let OutputCollector { head, body } = collector;
    let content_length = match framing {
        Framing::NoBody => head.content_length.unwrap_or(0),
        _ => body.len(),
    };
    Ok(RawResponse {
        head,
        body,
        content_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::http::content::Body;
    use crate::protocol::http::response::{finish, HttpOutput};
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Yields the input in fixed-size pieces to exercise read boundaries.
    struct Pieces {
        data: Vec<u8>,
        pos: usize,
        step: usize,
    }

    impl Pieces {
        fn new(data: &[u8], step: usize) -> Self {
            Self { data: data.to_vec(), pos: 0, step }
        }
    }

    impl AsyncRead for Pieces {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            let end = (self.pos + self.step).min(self.data.len()).min(self.pos + buf.remaining());
            let start = self.pos;
            buf.put_slice(&self.data[start..end]);
            self.pos = end;
            Poll::Ready(Ok(()))
        }
    }

    async fn read(bytes: &[u8], step: usize) -> Result<HttpOutput, HttpErr> {
        read_response(&mut Pieces::new(bytes, step), Method::Get)
            .await?
            .into_output()
    }

    #[tokio::test]
    async fn content_length_body_any_split() {
        let body = b"0123456789abcdefghij";
        for n in [0usize, 1, 7, 20] {
            let mut msg = format!("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n", n)
                .into_bytes();
            msg.extend_from_slice(&body[..n]);
            for step in [1usize, 3, 16, 4096] {
                let out = read(&msg, step).await.unwrap();
                assert_eq!(out.body, Body::Text(String::from_utf8(body[..n].to_vec()).unwrap()));
                assert_eq!(out.content_length, n);
            }
        }
    }

    #[tokio::test]
    async fn extra_bytes_past_length_are_not_body() {
        let out = read(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nokEXTRA", 64).await.unwrap();
        assert_eq!(out.body, Body::Text("ok".into()));
    }

    #[tokio::test]
    async fn chunked_five_then_zero() {
        let msg = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nContent-Type: text/plain\r\n\r\n5\r\nhello\r\n0\r\n\r\n";
        for step in [1usize, 2, 5, 1024] {
            let out = read(msg, step).await.unwrap();
            assert_eq!(out.body, Body::Text("hello".into()));
            assert_eq!(out.content_length, 5);
            assert_eq!(out.transfer_encoding, TransferEncoding::Chunked);
        }
    }

    #[tokio::test]
    async fn chunked_multiple_chunks() {
        let msg = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n6\r\npedia \r\nE\r\nin \r\n\r\nchunks.\r\n0\r\n\r\n";
        let out = read(msg, 7).await.unwrap();
        assert_eq!(out.body, Body::Text("Wikipedia in \r\n\r\nchunks.".into()));
        assert_eq!(out.content_length, 24);
    }

    #[tokio::test]
    async fn typed_headers_are_resolved() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\nConnection: close\r\nContent-Language: fr\r\nContent-Encoding: identity\r\nX-Ignored: yes\r\nContent-Length: 2\r\n\r\n{}";
        let out = read(msg, 9).await.unwrap();
        assert_eq!(out.content_type, ContentType::ApplicationJson);
        assert_eq!(out.connection, ConnectionDirective::Close);
        assert_eq!(out.language, ContentLanguage::French);
        assert_eq!(out.content_encoding, ContentEncoding::Identity);
        assert_eq!(out.status_message, "OK");
    }

    #[tokio::test]
    async fn header_names_are_case_sensitive() {
        let msg = b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\n\r\nhello";
        let out = read(msg, 64).await.unwrap();
        assert_eq!(out.body, Body::Text(String::new()));
        assert_eq!(out.content_length, 0);
    }

    #[tokio::test]
    async fn non_numeric_length_is_invalid_size() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Length: ten\r\n\r\n";
        assert_eq!(read(msg, 64).await, Err(HttpErr::InvalidContentSize));
        let msg = b"HTTP/1.1 200 OK\r\nContent-Length: -1\r\n\r\n";
        assert_eq!(read(msg, 64).await, Err(HttpErr::InvalidContentSize));
    }

    #[tokio::test]
    async fn binary_body_takes_buffered_bytes() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\n\r\n\x89PNG\x00\x01";
        let out = read(msg, 4096).await.unwrap();
        assert_eq!(out.body, Body::Bytes(b"\x89PNG\x00\x01".to_vec()));
        assert_eq!(out.content_length, 6);
    }

    #[tokio::test]
    async fn binary_body_with_length_is_read_fully() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 4\r\n\r\n\x00\xff\x00\xff";
        let out = read(msg, 1).await.unwrap();
        assert_eq!(out.body, Body::Bytes(vec![0, 0xff, 0, 0xff]));
    }

    #[tokio::test]
    async fn non_200_is_returned_with_body_drained() {
        let msg = b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found";
        let out = read(msg, 4).await.unwrap();
        assert_eq!(out.status_code, 404);
        assert_eq!(out.status_message, "Not Found");
        assert_eq!(out.body, Body::Text("not found".into()));
    }

    #[tokio::test]
    async fn error_body_stays_raw_until_status_is_checked() {
        let msg = b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nContent-Length: 2\r\n\r\n\xff\xfe";
        let raw = read_response(&mut Pieces::new(msg, 1), Method::Get).await.unwrap();
        assert_eq!(raw.body, vec![0xff, 0xfe]);
        assert_eq!(raw.status_code(), 404);
        assert_eq!(finish(raw), Err(HttpErr::ResponseError(404)));
    }

    #[tokio::test]
    async fn compressed_text_is_unsupported_encoding() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Encoding: gzip\r\nContent-Length: 4\r\n\r\n\x1f\x8b\x08\x00";
        let raw = read_response(&mut Pieces::new(msg, 3), Method::Get).await.unwrap();
        assert_eq!(finish(raw), Err(HttpErr::UnsupportedContentEncoding));
    }

    #[tokio::test]
    async fn head_response_has_no_body() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Length: 42\r\n\r\n";
        let out = read_response(&mut Pieces::new(msg, 64), Method::Head).await.unwrap();
        assert!(out.body.is_empty());
        assert_eq!(out.content_length, 42);
    }

    #[tokio::test]
    async fn empty_stream_is_empty_request() {
        assert_eq!(read(b"", 64).await, Err(HttpErr::EmptyRequest));
    }

    #[tokio::test]
    async fn partial_head_at_eof_is_parsed() {
        let out = read(b"HTTP/1.1 200 OK\r\nContent-Type: text/html", 64).await.unwrap();
        assert_eq!(out.content_type, ContentType::TextHtml);
        assert_eq!(out.body, Body::Text(String::new()));
    }

    #[tokio::test]
    async fn truncated_body_is_invalid_size() {
        let msg = b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nshort";
        assert_eq!(read(msg, 64).await, Err(HttpErr::InvalidContentSize));
    }

    #[tokio::test]
    async fn oversized_head_is_rejected() {
        let mut msg = b"HTTP/1.1 200 OK\r\n".to_vec();
        msg.extend(std::iter::repeat(b'a').take(MAX_HEAD_SIZE + 10));
        assert_eq!(read(&msg, 8192).await, Err(HttpErr::MissingHeaderTerminator));
    }

    #[test]
    fn framing_precedence() {
        let mut head = ResponseHead {
            transfer_encoding: TransferEncoding::Chunked,
            ..Default::default()
        };
        assert_eq!(select_framing(&head, Method::Get, 0), Framing::Chunked);
        head.content_length = Some(3);
        assert_eq!(select_framing(&head, Method::Get, 0), Framing::Length(3));
        head.transfer_encoding = TransferEncoding::None;
        head.content_length = None;
        assert_eq!(select_framing(&head, Method::Get, 10), Framing::NoBody);
        head.content_type = ContentType::ImageGif;
        assert_eq!(select_framing(&head, Method::Get, 10), Framing::Buffered);
        assert_eq!(select_framing(&head, Method::Get, 0), Framing::NoBody);
        assert_eq!(select_framing(&head, Method::Head, 10), Framing::NoBody);
    }
}
