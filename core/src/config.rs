/*
 * config.rs
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

//! Session configuration: request timeout plus reserved redirect settings.
//! Loadable from JSON; missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HttpErr;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Configuration recognized by an `HttpSession`.
///
/// `max_redirects` and `follow_redirects` are placeholders; no redirect is ever followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Deadline for establishing a connection, in seconds.
    pub request_timeout_secs: u64,
    pub max_redirects: u32,
    pub follow_redirects: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            follow_redirects: true,
        }
    }
}

impl SessionConfig {
    /// Default configuration with the given connect deadline.
    pub fn with_timeout(request_timeout_secs: u64) -> Self {
        Self {
            request_timeout_secs,
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse from JSON, e.g. `{"request_timeout_secs": 10}`.
    pub fn from_json(text: &str) -> Result<Self, HttpErr> {
        serde_json::from_str(text).map_err(|e| {
            log::warn!("invalid session config: {}", e);
            HttpErr::InvalidData
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SessionConfig::default();
        assert_eq!(c.request_timeout(), Duration::from_secs(30));
        assert_eq!(c.max_redirects, 5);
        assert!(c.follow_redirects);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = SessionConfig::from_json(r#"{"request_timeout_secs": 3}"#).unwrap();
        assert_eq!(c.request_timeout_secs, 3);
        assert_eq!(c.max_redirects, 5);
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        assert_eq!(SessionConfig::from_json("{"), Err(HttpErr::InvalidData));
    }
}
