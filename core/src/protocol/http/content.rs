/*
 * content.rs
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

//! Content classifier: maps a content type to textual or binary, and the response body it selects.

use crate::error::HttpErr;

/// Content type, as sent in requests and recognized in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// No (or an unrecognized) `Content-Type`.
    #[default]
    None,
    TextPlain,
    TextHtml,
    TextCss,
    TextJavaScript,
    ApplicationJson,
    ApplicationXml,
    ApplicationFormUrlEncoded,
    ApplicationJavaScript,
    ApplicationOctetStream,
    ImagePng,
    ImageJpeg,
    ImageGif,
}

impl ContentType {
    /// MIME string written in a request's `Content-Type`. `None` is sent as `text/plain`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::None | ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
            ContentType::TextCss => "text/css",
            ContentType::TextJavaScript => "text/javascript",
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationXml => "application/xml",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationJavaScript => "application/javascript",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::ImagePng => "image/png",
            ContentType::ImageJpeg => "image/jpeg",
            ContentType::ImageGif => "image/gif",
        }
    }

    /// Recognize a response `Content-Type` value; parameters such as `charset` are ignored.
    pub fn from_header(value: &str) -> Self {
        let mime = value
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "text/plain" => ContentType::TextPlain,
            "text/html" => ContentType::TextHtml,
            "text/css" => ContentType::TextCss,
            "text/javascript" => ContentType::TextJavaScript,
            "application/json" => ContentType::ApplicationJson,
            "application/xml" | "text/xml" => ContentType::ApplicationXml,
            "application/x-www-form-urlencoded" => ContentType::ApplicationFormUrlEncoded,
            "application/javascript" => ContentType::ApplicationJavaScript,
            "application/octet-stream" => ContentType::ApplicationOctetStream,
            "image/png" => ContentType::ImagePng,
            "image/jpeg" => ContentType::ImageJpeg,
            "image/gif" => ContentType::ImageGif,
            _ => ContentType::None,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ContentType::TextPlain
                | ContentType::TextHtml
                | ContentType::TextCss
                | ContentType::TextJavaScript
                | ContentType::ApplicationJson
                | ContentType::ApplicationXml
                | ContentType::ApplicationFormUrlEncoded
                | ContentType::ApplicationJavaScript
        )
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            ContentType::ImagePng
                | ContentType::ImageJpeg
                | ContentType::ImageGif
                | ContentType::ApplicationOctetStream
        )
    }
}

/// Response body: exactly one of text or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    /// Pick the variant for `content_type`: raw bytes for binary types, text otherwise.
    /// Textual bytes that are not UTF-8 are `InvalidData`.
    pub fn classify(content_type: ContentType, data: Vec<u8>) -> Result<Body, HttpErr> {
        if content_type.is_binary() {
            return Ok(Body::Bytes(data));
        }
        String::from_utf8(data)
            .map(Body::Text)
            .map_err(|_| HttpErr::InvalidData)
    }

    pub fn len(&self) -> usize {
        match self {
            Body::Text(s) => s.len(),
            Body::Bytes(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(s) => Some(s),
            Body::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Text(_) => None,
            Body::Bytes(b) => Some(b),
        }
    }

    /// Textual body, or `InvalidReadingData` when the body is raw bytes.
    pub fn into_text(self) -> Result<String, HttpErr> {
        match self {
            Body::Text(s) => Ok(s),
            Body::Bytes(_) => Err(HttpErr::InvalidReadingData),
        }
    }

    /// Raw body, or `InvalidContentType` when the body is textual.
    pub fn into_bytes(self) -> Result<Vec<u8>, HttpErr> {
        match self {
            Body::Text(_) => Err(HttpErr::InvalidContentType),
            Body::Bytes(b) => Ok(b),
        }
    }
}
