/*
 * headers.rs
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

//! Header set (ordered, unique names) and the typed values of the response headers we recognize.

/// Ordered header map with unique, case-sensitive names.
///
/// Insertion order is kept for wire output; inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Per-call headers first, then every session default whose name is not already present.
    /// A name present in both keeps the per-call value, exactly once.
    pub fn merged(defaults: &HeaderSet, extra: &HeaderSet) -> HeaderSet {
        let mut out = extra.clone();
        for (name, value) in defaults.iter() {
            if !out.contains(name) {
                out.entries.push((name.to_string(), value.to_string()));
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// `Connection` header directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionDirective {
    #[default]
    None,
    Persistent,
    Close,
    Upgrade,
}

impl ConnectionDirective {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionDirective::None => "",
            ConnectionDirective::Persistent => "keep-alive",
            ConnectionDirective::Close => "close",
            ConnectionDirective::Upgrade => "upgrade",
        }
    }

    /// Unrecognized values map to `None`.
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep-alive" => ConnectionDirective::Persistent,
            "close" => ConnectionDirective::Close,
            "upgrade" => ConnectionDirective::Upgrade,
            _ => ConnectionDirective::None,
        }
    }
}

/// `Transfer-Encoding` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferEncoding {
    #[default]
    None,
    Chunked,
    Identity,
}

impl TransferEncoding {
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "chunked" => TransferEncoding::Chunked,
            "identity" => TransferEncoding::Identity,
            _ => TransferEncoding::None,
        }
    }
}

/// `Content-Encoding` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    #[default]
    None,
    Identity,
    Gzip,
    Deflate,
    Zstd,
    Brotli,
}

impl ContentEncoding {
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "identity" => ContentEncoding::Identity,
            "gzip" | "x-gzip" => ContentEncoding::Gzip,
            "deflate" => ContentEncoding::Deflate,
            "zstd" => ContentEncoding::Zstd,
            "br" | "brotli" => ContentEncoding::Brotli,
            _ => ContentEncoding::None,
        }
    }

    /// True for `None` and `Identity`: the body needs no decoding.
    pub fn is_identity(&self) -> bool {
        matches!(self, ContentEncoding::None | ContentEncoding::Identity)
    }
}

/// `Content-Language` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentLanguage {
    #[default]
    None,
    EnglishUS,
    EnglishUK,
    English,
    French,
    German,
    Spanish,
    Russian,
    Japanese,
    Korean,
    Chinese,
    Italian,
    Dutch,
}

impl ContentLanguage {
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en-us" => ContentLanguage::EnglishUS,
            "en-gb" => ContentLanguage::EnglishUK,
            "en" => ContentLanguage::English,
            "fr" | "fr-fr" => ContentLanguage::French,
            "de" | "de-de" => ContentLanguage::German,
            "es" | "es-es" => ContentLanguage::Spanish,
            "ru" | "ru-ru" => ContentLanguage::Russian,
            "ja" | "ja-jp" => ContentLanguage::Japanese,
            "ko" | "ko-kr" => ContentLanguage::Korean,
            "zh" | "zh-cn" => ContentLanguage::Chinese,
            "it" | "it-it" => ContentLanguage::Italian,
            "nl" | "nl-nl" => ContentLanguage::Dutch,
            _ => ContentLanguage::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut h = HeaderSet::new();
        h.insert("Accept", "*/*").insert("User-Agent", "a").insert("Accept", "text/plain");
        let names: Vec<_> = h.iter().collect();
        assert_eq!(names, vec![("Accept", "text/plain"), ("User-Agent", "a")]);
    }

    #[test]
    fn names_are_case_sensitive() {
        let h: HeaderSet = [("X-Token", "1"), ("x-token", "2")].into_iter().collect();
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("x-token"), Some("2"));
    }

    #[test]
    fn merge_prefers_per_call_value_once() {
        let defaults: HeaderSet = [("Accept", "*/*"), ("User-Agent", "session")].into_iter().collect();
        let extra: HeaderSet = [("User-Agent", "call"), ("X-Trace", "7")].into_iter().collect();
        let merged = HeaderSet::merged(&defaults, &extra);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("User-Agent"), Some("call"));
        assert_eq!(merged.iter().filter(|(k, _)| *k == "User-Agent").count(), 1);
        assert_eq!(merged.get("Accept"), Some("*/*"));
    }

    #[test]
    fn merge_is_order_independent_in_result() {
        let a: HeaderSet = [("A", "1"), ("B", "2")].into_iter().collect();
        let b: HeaderSet = [("B", "3")].into_iter().collect();
        let m = HeaderSet::merged(&a, &b);
        assert_eq!(m.get("A"), Some("1"));
        assert_eq!(m.get("B"), Some("3"));
        assert!(HeaderSet::merged(&HeaderSet::new(), &HeaderSet::new()).is_empty());
    }

    #[test]
    fn header_value_lookup_defaults() {
        assert_eq!(ConnectionDirective::from_header("keep-alive"), ConnectionDirective::Persistent);
        assert_eq!(ConnectionDirective::from_header(" Close"), ConnectionDirective::Close);
        assert_eq!(ConnectionDirective::from_header("whatever"), ConnectionDirective::None);
        assert_eq!(TransferEncoding::from_header("chunked"), TransferEncoding::Chunked);
        assert_eq!(TransferEncoding::from_header("gzip, chunked"), TransferEncoding::None);
        assert_eq!(ContentEncoding::from_header("br"), ContentEncoding::Brotli);
        assert_eq!(ContentEncoding::from_header("compress"), ContentEncoding::None);
        assert_eq!(ContentLanguage::from_header("en-US"), ContentLanguage::EnglishUS);
        assert_eq!(ContentLanguage::from_header("tlh"), ContentLanguage::None);
    }
}
