/*
 * uri.rs
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

//! URL decomposition for plain `http://` URLs: host, path and port as strings.
//! Path defaults to `/`, port to `80`. The scheme prefix is matched case-sensitively.

use crate::error::HttpErr;

const HTTP_SCHEME: &str = "http://";
const DEFAULT_PORT: &str = "80";

/// Host, path and port of an `http://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDescriptor {
    pub host: String,
    pub path: String,
    pub port: String,
}

impl UrlDescriptor {
    /// Build from already separated parts. An empty path becomes `/`, an empty port `80`.
    pub fn from_parts(host: &str, path: &str, port: &str) -> Result<Self, HttpErr> {
        if host.is_empty() {
            return Err(HttpErr::InvalidURL);
        }
        Ok(Self {
            host: host.to_string(),
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            port: if port.is_empty() { DEFAULT_PORT.to_string() } else { port.to_string() },
        })
    }

    /// `host:port` as passed to the resolver.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split `http://host[:port][/path]` into its parts.
///
/// Fails with `InvalidURL` when the `http://` prefix is missing or the host segment is empty.
/// A host segment containing `:` is split at the first colon.
pub fn decompose_url(url: &str) -> Result<UrlDescriptor, HttpErr> {
    let rest = url.strip_prefix(HTTP_SCHEME).ok_or(HttpErr::InvalidURL)?;
    let (authority, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };
    if authority.is_empty() {
        return Err(HttpErr::InvalidURL);
    }
    let (host, port) = match authority.find(':') {
        Some(colon) => (&authority[..colon], &authority[colon + 1..]),
        None => (authority, DEFAULT_PORT),
    };
    if host.is_empty() {
        return Err(HttpErr::InvalidURL);
    }
    Ok(UrlDescriptor {
        host: host.to_string(),
        path: path.to_string(),
        port: port.to_string(),
    })
}
