/*
 * mod.rs
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

//! HTTP/1.1 client over plain TCP.
//!
//! - Requests are serialized in full by `request::write_request` and written in one go.
//! - Responses are push-parsed from a `BytesMut` buffer (`h1`); framing is chosen from the head
//!   (chunked, Content-Length, buffered binary, or no body).
//! - `HttpClient` does single exchanges; `HttpSession` keeps one persistent connection per server.

pub mod client;
pub mod content;
pub mod decode;
pub mod h1;
pub mod headers;
pub mod request;
pub mod response;
pub mod session;

pub use client::{HttpClient, Target, Transport, DEFAULT_CONNECT_TIMEOUT};
pub use content::{Body, ContentType};
pub use headers::{
    ConnectionDirective, ContentEncoding, ContentLanguage, HeaderSet, TransferEncoding,
};
pub use request::{Method, RequestBody};
pub use response::{finish, HttpOutput, RawResponse, STATUS_OK};
pub use session::HttpSession;
