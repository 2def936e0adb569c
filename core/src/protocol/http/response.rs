/*
 * response.rs
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

//! HTTP output: the structured result of one exchange.
//!
//! The reader hands back a `RawResponse` with the body bytes untouched. `finish` turns it into an
//! `HttpOutput`: status check first, then the decoding hook, then content classification.

use crate::error::HttpErr;
use crate::protocol::http::content::{Body, ContentType};
use crate::protocol::http::decode::decode;
use crate::protocol::http::h1::reader::ResponseHead;
use crate::protocol::http::headers::{
    ConnectionDirective, ContentEncoding, ContentLanguage, TransferEncoding,
};

/// Status code accepted as success.
pub const STATUS_OK: u16 = 200;

/// A response as read off the wire: the typed head and the body bytes, not yet decoded.
///
/// `content_length` is the effective length: the declared value for length-framed bodies, the
/// sum of chunk sizes for chunked bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub head: ResponseHead,
    pub body: Vec<u8>,
    pub content_length: usize,
}

impl RawResponse {
    pub fn status_code(&self) -> u16 {
        self.head.status_code
    }

    pub fn is_success(&self) -> bool {
        self.head.status_code == STATUS_OK
    }

    /// True when the server asked for the connection to be closed after this response.
    pub fn closes_connection(&self) -> bool {
        self.head.connection == ConnectionDirective::Close
    }

    /// Turn any status other than 200 into `ResponseError`, whatever the body holds.
    pub fn check_status(self) -> Result<Self, HttpErr> {
        if self.is_success() {
            return Ok(self);
        }
        log::debug!(
            "response status {} {} treated as error",
            self.head.status_code,
            self.head.status_message
        );
        Err(HttpErr::ResponseError(self.head.status_code))
    }

    /// Undo the content encoding on the raw bytes, then classify them by content type.
    pub fn into_output(self) -> Result<HttpOutput, HttpErr> {
        let RawResponse {
            head,
            body,
            content_length,
        } = self;
        let body = decode(body, head.content_encoding)?;
        let body = Body::classify(head.content_type, body)?;
        Ok(HttpOutput {
            body,
            content_type: head.content_type,
            connection: head.connection,
            transfer_encoding: head.transfer_encoding,
            content_encoding: head.content_encoding,
            language: head.language,
            content_length,
            status_code: head.status_code,
            status_message: head.status_message,
        })
    }
}

/// Status check, then decoding, then classification.
pub fn finish(raw: RawResponse) -> Result<HttpOutput, HttpErr> {
    raw.check_status()?.into_output()
}

/// Parsed response: status, the recognized headers as typed fields, and the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutput {
    pub body: Body,
    pub content_type: ContentType,
    pub connection: ConnectionDirective,
    pub transfer_encoding: TransferEncoding,
    pub content_encoding: ContentEncoding,
    pub language: ContentLanguage,
    pub content_length: usize,
    pub status_code: u16,
    pub status_message: String,
}

impl HttpOutput {
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// True when the server asked for the connection to be closed after this response.
    pub fn closes_connection(&self) -> bool {
        self.connection == ConnectionDirective::Close
    }
}
