/*
 * parser.rs
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

//! HTTP/1.1 response push parser: status line, headers, body (Content-Length, chunked or buffered).
//!
//! States run `StatusLine -> Headers -> HeadersComplete -> {Body | Chunk* | Buffered} -> Done`.
//! At `HeadersComplete` the parser stops and the caller picks the framing via `set_framing`.

use bytes::{Buf, BytesMut};

use crate::error::HttpErr;

/// Callback for HTTP/1.1 response events. The reader implements this to build the output.
pub trait H1ResponseHandler {
    fn status(&mut self, code: u16, reason: &str);
    /// A header line. Returning an error aborts the parse.
    fn header(&mut self, name: &str, value: &str) -> Result<(), HttpErr>;
    fn body_chunk(&mut self, data: &[u8]);
    fn complete(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    StatusLine,
    Headers,
    /// Headers done; caller must call `set_framing()`.
    HeadersComplete,
    /// Fixed-length body.
    Body,
    /// Take whatever is buffered, then stop.
    Buffered,
    ChunkSize,
    ChunkData,
    /// CRLF after chunk data.
    ChunkDataEnd,
    /// After the zero-size chunk: optional trailers, then a blank line.
    ChunkTrailer,
    Done,
}

/// How the body following the head is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Length(usize),
    Chunked,
    Buffered,
    NoBody,
}

/// Push parser for one HTTP/1.1 response. Feed bytes via `receive`; consumed bytes are removed
/// from the buffer, partial lines stay in it.
#[derive(Debug)]
pub struct ResponseParser {
    state: ParseState,
    content_length: usize,
    bytes_received: usize,
    chunk_remaining: usize,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            content_length: 0,
            bytes_received: 0,
            chunk_remaining: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// True while the status line or headers are still being read.
    pub fn in_head(&self) -> bool {
        matches!(self.state, ParseState::StatusLine | ParseState::Headers)
    }

    /// Offset of the first CRLF in `buf`.
    fn find_crlf(buf: &[u8]) -> Option<usize> {
        buf.windows(2).position(|w| w == b"\r\n")
    }

    /// Consume and parse as much as possible from `buf`.
    pub fn receive<H: H1ResponseHandler>(
        &mut self,
        buf: &mut BytesMut,
        handler: &mut H,
    ) -> Result<(), HttpErr> {
        while !buf.is_empty() {
            match self.state {
                ParseState::StatusLine => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    let line = buf.split_to(line_end + 2);
                    let (code, reason) = parse_status_line(&line[..line_end])?;
                    handler.status(code, &reason);
                    self.state = ParseState::Headers;
                }
                ParseState::Headers => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    if line_end == 0 {
                        buf.advance(2);
                        self.state = ParseState::HeadersComplete;
                        return Ok(());
                    }
                    let line = buf.split_to(line_end + 2);
                    parse_header_line(&line[..line_end], handler)?;
                }
                ParseState::HeadersComplete | ParseState::Done => return Ok(()),
                ParseState::Body => {
                    let remaining = self.content_length - self.bytes_received;
                    let to_read = remaining.min(buf.len());
                    let chunk = buf.split_to(to_read);
                    handler.body_chunk(&chunk);
                    self.bytes_received += to_read;
                    if self.bytes_received >= self.content_length {
                        self.finish(handler);
                    }
                }
                ParseState::Buffered => {
                    let chunk = buf.split_to(buf.len());
                    handler.body_chunk(&chunk);
                    self.bytes_received += chunk.len();
                    self.finish(handler);
                }
                ParseState::ChunkSize => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    let line = buf.split_to(line_end + 2);
                    self.chunk_remaining = parse_chunk_size(&line[..line_end])?;
                    self.state = if self.chunk_remaining == 0 {
                        ParseState::ChunkTrailer
                    } else {
                        ParseState::ChunkData
                    };
                }
                ParseState::ChunkData => {
                    let to_read = self.chunk_remaining.min(buf.len());
                    let chunk = buf.split_to(to_read);
                    handler.body_chunk(&chunk);
                    self.chunk_remaining -= to_read;
                    self.bytes_received += to_read;
                    if self.chunk_remaining == 0 {
                        self.state = ParseState::ChunkDataEnd;
                    }
                }
                ParseState::ChunkDataEnd => {
                    if buf.len() < 2 {
                        if buf[0] != b'\r' {
                            return Err(HttpErr::MissingCRLF);
                        }
                        return Ok(());
                    }
                    if &buf[..2] != b"\r\n" {
                        return Err(HttpErr::MissingCRLF);
                    }
                    buf.advance(2);
                    self.state = ParseState::ChunkSize;
                }
                ParseState::ChunkTrailer => {
                    let line_end = match Self::find_crlf(buf) {
                        Some(n) => n,
                        None => return Ok(()),
                    };
                    // Trailer fields are skipped.
                    buf.advance(line_end + 2);
                    if line_end == 0 {
                        self.finish(handler);
                    }
                }
            }
        }
        Ok(())
    }

    /// Select body framing. Only valid in `HeadersComplete`.
    pub fn set_framing<H: H1ResponseHandler>(&mut self, framing: Framing, handler: &mut H) {
        if self.state != ParseState::HeadersComplete {
            return;
        }
        self.bytes_received = 0;
        match framing {
            Framing::Length(0) | Framing::NoBody => self.finish(handler),
            Framing::Length(n) => {
                self.content_length = n;
                self.state = ParseState::Body;
            }
            Framing::Chunked => self.state = ParseState::ChunkSize,
            Framing::Buffered => self.state = ParseState::Buffered,
        }
    }

    /// The peer closed the stream. A partial head is parsed as far as it goes; a truncated body
    /// is an error.
    pub fn end_of_stream<H: H1ResponseHandler>(
        &mut self,
        buf: &mut BytesMut,
        handler: &mut H,
    ) -> Result<(), HttpErr> {
        match self.state {
            ParseState::StatusLine => {
                if buf.is_empty() {
                    return Err(HttpErr::EmptyRequest);
                }
                let line = buf.split_to(buf.len());
                let (code, reason) = parse_status_line(&line)?;
                handler.status(code, &reason);
                self.state = ParseState::HeadersComplete;
            }
            ParseState::Headers => {
                if !buf.is_empty() {
                    let line = buf.split_to(buf.len());
                    parse_header_line(&line, handler)?;
                }
                self.state = ParseState::HeadersComplete;
            }
            ParseState::Body => return Err(HttpErr::InvalidContentSize),
            ParseState::ChunkSize | ParseState::ChunkData | ParseState::ChunkDataEnd => {
                return Err(HttpErr::InvalidData)
            }
            ParseState::ChunkTrailer | ParseState::Buffered => self.finish(handler),
            ParseState::HeadersComplete | ParseState::Done => {}
        }
        Ok(())
    }

    fn finish<H: H1ResponseHandler>(&mut self, handler: &mut H) {
        handler.complete();
        self.state = ParseState::Done;
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `HTTP/1.1 200 OK` -> (200, "OK"). Only HTTP/1.1 and HTTP/2.0 are accepted.
fn parse_status_line(line: &[u8]) -> Result<(u16, String), HttpErr> {
    let line = std::str::from_utf8(line).map_err(|_| HttpErr::InvalidData)?;
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/") {
        return Err(HttpErr::InvalidHTTPVersion);
    }
    if version != "HTTP/1.1" && version != "HTTP/2.0" {
        return Err(HttpErr::HTTPVersionUndefined);
    }
    let code = parts
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or(HttpErr::InvalidData)?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    log::debug!("response status: {} {} {}", version, code, reason);
    Ok((code, reason))
}

/// `Name: value`; lines without a colon are ignored.
fn parse_header_line<H: H1ResponseHandler>(line: &[u8], handler: &mut H) -> Result<(), HttpErr> {
    let line = std::str::from_utf8(line).map_err(|_| HttpErr::InvalidData)?;
    match line.find(':') {
        Some(colon) => handler.header(&line[..colon], line[colon + 1..].trim()),
        None => Ok(()),
    }
}

/// Hex chunk size; extensions after `;` are ignored.
fn parse_chunk_size(line: &[u8]) -> Result<usize, HttpErr> {
    let line = std::str::from_utf8(line).map_err(|_| HttpErr::InvalidData)?;
    let hex = line.split(';').next().unwrap_or("").trim();
    usize::from_str_radix(hex, 16).map_err(|_| HttpErr::InvalidData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        status: Option<(u16, String)>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        completed: bool,
    }

    impl H1ResponseHandler for Recorder {
        fn status(&mut self, code: u16, reason: &str) {
            self.status = Some((code, reason.to_string()));
        }
        fn header(&mut self, name: &str, value: &str) -> Result<(), HttpErr> {
            self.headers.push((name.to_string(), value.to_string()));
            Ok(())
        }
        fn body_chunk(&mut self, data: &[u8]) {
            self.body.extend_from_slice(data);
        }
        fn complete(&mut self) {
            self.completed = true;
        }
    }

    fn head(parser: &mut ResponseParser, rec: &mut Recorder, bytes: &[u8]) -> BytesMut {
        let mut buf = BytesMut::from(bytes);
        parser.receive(&mut buf, rec).unwrap();
        assert_eq!(parser.state(), ParseState::HeadersComplete);
        buf
    }

    #[test]
    fn status_and_headers_then_stop() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nX-A: b\r\n\r\nhello");
        assert_eq!(r.status, Some((200, "OK".to_string())));
        assert_eq!(r.headers.len(), 2);
        assert_eq!(&buf[..], b"hello");
    }

    #[test]
    fn length_body_across_receives() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\nhel");
        p.set_framing(Framing::Length(5), &mut r);
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::Body);
        buf.extend_from_slice(b"lo");
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::Done);
        assert_eq!(r.body, b"hello");
        assert!(r.completed);
    }

    #[test]
    fn chunked_body_split_mid_crlf() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r");
        p.set_framing(Framing::Chunked, &mut r);
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::ChunkDataEnd);
        buf.extend_from_slice(b"\n0\r\n\r\n");
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::Done);
        assert_eq!(r.body, b"hello");
    }

    #[test]
    fn chunk_trailers_are_skipped() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\n3;ext=1\r\nabc\r\n0\r\nExpires: never\r\n\r\n");
        p.set_framing(Framing::Chunked, &mut r);
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::Done);
        assert_eq!(r.body, b"abc");
        assert!(buf.is_empty());
    }

    #[test]
    fn chunk_without_crlf_is_rejected() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\n2\r\nabXY");
        p.set_framing(Framing::Chunked, &mut r);
        assert_eq!(p.receive(&mut buf, &mut r), Err(HttpErr::MissingCRLF));
    }

    #[test]
    fn bad_chunk_size_is_invalid_data() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\nzz\r\n");
        p.set_framing(Framing::Chunked, &mut r);
        assert_eq!(p.receive(&mut buf, &mut r), Err(HttpErr::InvalidData));
    }

    #[test]
    fn version_checks() {
        assert_eq!(parse_status_line(b"HTTP/2.0 200 OK"), Ok((200, "OK".to_string())));
        assert_eq!(parse_status_line(b"HTTP/1.0 200 OK"), Err(HttpErr::HTTPVersionUndefined));
        assert_eq!(parse_status_line(b"ICY 200 OK"), Err(HttpErr::InvalidHTTPVersion));
        assert_eq!(parse_status_line(b"HTTP/1.1 abc OK"), Err(HttpErr::InvalidData));
        assert_eq!(parse_status_line(b"HTTP/1.1 404 Not Found"), Ok((404, "Not Found".to_string())));
    }

    #[test]
    fn no_body_completes_immediately() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let _ = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\n");
        p.set_framing(Framing::NoBody, &mut r);
        assert_eq!(p.state(), ParseState::Done);
        assert!(r.completed);
    }

    #[test]
    fn eof_with_partial_head_is_tolerated() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Type: text/plain"[..]);
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::Headers);
        p.end_of_stream(&mut buf, &mut r).unwrap();
        assert_eq!(p.state(), ParseState::HeadersComplete);
        assert_eq!(r.headers, vec![("Content-Type".to_string(), "text/plain".to_string())]);
    }

    #[test]
    fn eof_before_anything_is_empty() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = BytesMut::new();
        assert_eq!(p.end_of_stream(&mut buf, &mut r), Err(HttpErr::EmptyRequest));
    }

    #[test]
    fn eof_inside_length_body_is_invalid_size() {
        let mut p = ResponseParser::new();
        let mut r = Recorder::default();
        let mut buf = head(&mut p, &mut r, b"HTTP/1.1 200 OK\r\n\r\nab");
        p.set_framing(Framing::Length(10), &mut r);
        p.receive(&mut buf, &mut r).unwrap();
        assert_eq!(p.end_of_stream(&mut buf, &mut r), Err(HttpErr::InvalidContentSize));
    }
}
