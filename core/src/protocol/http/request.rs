/*
 * request.rs
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

//! Request writer: request line, header block and optional body, serialized to wire bytes.
//!
//! Header order: `Host`, merged caller headers, `Connection`, then `Content-Length` and
//! `Content-Type` only when a body is present.

use std::str::FromStr;

use crate::error::HttpErr;
use crate::protocol::http::content::ContentType;
use crate::protocol::http::headers::{ConnectionDirective, HeaderSet};
use crate::uri::UrlDescriptor;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }

    /// POST and PUT must carry a body.
    pub fn requires_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }
}

impl FromStr for Method {
    type Err = HttpErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "PATCH" => Ok(Method::Patch),
            _ => Err(HttpErr::InvalidMethod),
        }
    }
}

/// Outgoing body: text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Text(String),
    Bytes(Vec<u8>),
}

impl RequestBody {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RequestBody::Text(s) => s.as_bytes(),
            RequestBody::Bytes(b) => b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for RequestBody {
    fn from(s: &str) -> Self {
        RequestBody::Text(s.to_string())
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Text(s)
    }
}

impl From<&[u8]> for RequestBody {
    fn from(b: &[u8]) -> Self {
        RequestBody::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(b: Vec<u8>) -> Self {
        RequestBody::Bytes(b)
    }
}

/// Headers the writer emits itself; caller-supplied copies are dropped.
const MANDATED: [&str; 4] = ["Host", "Connection", "Content-Length", "Content-Type"];

fn is_mandated(name: &str) -> bool {
    MANDATED.iter().any(|m| m.eq_ignore_ascii_case(name))
}

/// A line break inside a field would start a new header line on the wire.
fn check_field(text: &str) -> Result<(), HttpErr> {
    if text.contains(['\r', '\n']) {
        log::warn!("rejecting request field containing a line break: {:?}", text);
        return Err(HttpErr::InvalidData);
    }
    Ok(())
}

/// `Host` value: the port is appended unless it is the default.
fn host_header(target: &UrlDescriptor) -> String {
    if target.port == "80" {
        target.host.clone()
    } else {
        format!("{}:{}", target.host, target.port)
    }
}

/// Serialize one request.
///
/// `headers` is the already merged caller header set (see `HeaderSet::merged`). An empty body
/// counts as no body; POST or PUT without one fails with `NoBodyForMethod`. A CR or LF in the
/// path, host, or any written header name or value fails with `InvalidData`.
pub fn write_request(
    method: Method,
    content: ContentType,
    connection: ConnectionDirective,
    target: &UrlDescriptor,
    body: Option<&RequestBody>,
    headers: &HeaderSet,
) -> Result<Vec<u8>, HttpErr> {
    let body = body.filter(|b| !b.is_empty());
    if body.is_none() && method.requires_body() {
        return Err(HttpErr::NoBodyForMethod);
    }

    check_field(&target.path)?;
    check_field(&target.host)?;
    let mut head = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\n",
        method.as_str(),
        target.path,
        host_header(target)
    );
    for (name, value) in headers.iter() {
        if is_mandated(name) {
            continue;
        }
        check_field(name)?;
        check_field(value)?;
        head.push_str(name);
        head.push_str(": ");
        head.push_str(value);
        head.push_str("\r\n");
    }
    if connection != ConnectionDirective::None {
        head.push_str("Connection: ");
        head.push_str(connection.as_str());
        head.push_str("\r\n");
    }
    if let Some(b) = body {
        head.push_str(&format!("Content-Length: {}\r\n", b.as_bytes().len()));
        head.push_str("Content-Type: ");
        head.push_str(content.as_str());
        head.push_str("\r\n");
    }
    head.push_str("\r\n");

    let mut out = head.into_bytes();
    if let Some(b) = body {
        out.extend_from_slice(b.as_bytes());
    }
    Ok(out)
}
