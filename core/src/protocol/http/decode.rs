/*
 * decode.rs
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

//! Content-encoding hook. Runs on the raw body bytes before they are classified as text or
//! binary. Identity passes through; compressed encodings have no codec wired in and fail with
//! `UnsupportedContentEncoding` instead of handing back still-compressed bytes.

use crate::error::HttpErr;
use crate::protocol::http::headers::ContentEncoding;

/// Decode `body` according to `encoding`, consuming it and producing the decoded bytes.
pub fn decode(body: Vec<u8>, encoding: ContentEncoding) -> Result<Vec<u8>, HttpErr> {
    match encoding {
        ContentEncoding::None | ContentEncoding::Identity => Ok(body),
        ContentEncoding::Gzip
        | ContentEncoding::Deflate
        | ContentEncoding::Zstd
        | ContentEncoding::Brotli => {
            log::warn!("no decoder for content encoding {:?}", encoding);
            Err(HttpErr::UnsupportedContentEncoding)
        }
    }
}
