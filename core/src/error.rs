/*
 * error.rs
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

//! Error table for the HTTP engine: one flat enumeration shared by every component.
//!
//! Components return `Result<_, HttpErr>`; transport (`io::Error`) failures are normalized to
//! `ConnectionFailed` at the boundary.

use std::io;

/// Every failure the engine can report. No hierarchy: callers match on the kind directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpErr {
    #[error("DNS Resolution Failed")]
    DNSResolutionFailed,

    #[error("Connection Failed")]
    ConnectionFailed,

    /// Reserved: reads are not cancelled once body framing has begun.
    #[error("Request Timeout")]
    RequestTimeout,

    #[error("Invalid Data")]
    InvalidData,

    /// Caller asked for a textual body but the response carried raw bytes.
    #[error("Invalid Reading Data")]
    InvalidReadingData,

    /// Caller asked for raw bytes but the response carried a textual body.
    #[error("Invalid Content Type")]
    InvalidContentType,

    #[error("Failed To Make Persistent Connection")]
    FailedToMakePersistentConnection,

    #[error("Failed To Close Socket")]
    FailedToCloseSocket,

    /// The peer closed the stream before sending any response byte.
    #[error("Empty Request")]
    EmptyRequest,

    #[error("Invalid Method")]
    InvalidMethod,

    #[error("Missing CRLF")]
    MissingCRLF,

    #[error("Invalid HTTP Version")]
    InvalidHTTPVersion,

    #[error("Missing Header Terminator")]
    MissingHeaderTerminator,

    /// Any status other than 200.
    #[error("Response Error (status {0})")]
    ResponseError(u16),

    #[error("Invalid URL")]
    InvalidURL,

    /// Reserved: redirects are configuration placeholders only.
    #[error("Redirect Limit Exceeded")]
    RedirectLimitExceeded,

    #[error("Invalid Content Size")]
    InvalidContentSize,

    #[error("No Body For Method")]
    NoBodyForMethod,

    #[error("HTTP Version Undefined")]
    HTTPVersionUndefined,

    /// Reserved: unrecognized transfer encodings map to `TransferEncoding::None`.
    #[error("Unsupported Transfer Encoding")]
    UnsupportedTransferEncoding,

    #[error("Unsupported Content Encoding")]
    UnsupportedContentEncoding,

    /// Legacy: chunked bodies are decoded by the reader.
    #[error("Chunked Encoding Not Supported")]
    ChunkedEncodingNotSupported,
}

impl From<io::Error> for HttpErr {
    fn from(e: io::Error) -> Self {
        log::debug!("transport error: {}", e);
        HttpErr::ConnectionFailed
    }
}
