/*
 * lib.rs
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

//! Communicator core: a client-side HTTP/1.1 engine.
//!
//! `uri` splits URLs, `net` resolves and connects with a deadline, and `protocol::http` writes
//! requests, frames responses and manages persistent sessions. Every fallible call returns
//! `Result<_, HttpErr>`.

pub mod config;
pub mod error;
pub mod net;
pub mod protocol;
pub mod uri;

pub use config::SessionConfig;
pub use error::HttpErr;
pub use protocol::http::{
    Body, ConnectionDirective, ContentEncoding, ContentLanguage, ContentType, HeaderSet,
    HttpClient, HttpOutput, HttpSession, Method, RawResponse, RequestBody, Target,
    TransferEncoding, Transport,
};
pub use uri::{decompose_url, UrlDescriptor};
