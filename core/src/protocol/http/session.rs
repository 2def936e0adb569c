/*
 * session.rs
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

//! HTTP session: one persistent connection to one server, reused across calls.
//!
//! The session owns at most one open socket. Each call reconnects lazily when there is none,
//! sends with `Connection: keep-alive`, and drops the socket when the server answers
//! `Connection: close` or the exchange fails, so the next call starts on a fresh connection.
//! Calls take `&mut self`; one request is in flight at a time.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::SessionConfig;
use crate::error::HttpErr;
use crate::net;
use crate::protocol::http::client::{self, HttpClient, Transport};
use crate::protocol::http::content::ContentType;
use crate::protocol::http::headers::{ConnectionDirective, HeaderSet};
use crate::protocol::http::request::{write_request, Method, RequestBody};
use crate::protocol::http::response::{finish, HttpOutput, RawResponse};
use crate::uri::{decompose_url, UrlDescriptor};

/// Persistent-connection client bound to one `http://` URL.
#[derive(Debug)]
pub struct HttpSession {
    target: UrlDescriptor,
    headers: HeaderSet,
    config: SessionConfig,
    stream: Option<TcpStream>,
}

impl HttpSession {
    /// Open a session with default settings and a connect deadline of `timeout_secs`.
    pub async fn open(url: &str, headers: HeaderSet, timeout_secs: u64) -> Result<Self, HttpErr> {
        Self::open_with_config(url, headers, SessionConfig::with_timeout(timeout_secs)).await
    }

    /// Open a session and eagerly establish its persistent connection.
    pub async fn open_with_config(
        url: &str,
        headers: HeaderSet,
        config: SessionConfig,
    ) -> Result<Self, HttpErr> {
        let mut session = Self {
            target: decompose_url(url)?,
            headers,
            config,
            stream: None,
        };
        session.ensure_connected().await?;
        Ok(session)
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    pub fn target(&self) -> &UrlDescriptor {
        &self.target
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the session default headers.
    pub fn set_headers(&mut self, headers: HeaderSet) {
        self.headers = headers;
    }

    /// GET `path` and return the textual body (`InvalidReadingData` if it is binary).
    pub async fn get_string(&mut self, path: &str, headers: &HeaderSet) -> Result<String, HttpErr> {
        self.get_http_output(path, headers).await?.body.into_text()
    }

    /// GET `path` and return the raw body (`InvalidContentType` if it is textual).
    pub async fn get_bytes(&mut self, path: &str, headers: &HeaderSet) -> Result<Vec<u8>, HttpErr> {
        self.get_http_output(path, headers).await?.body.into_bytes()
    }

    pub async fn get_http_output(
        &mut self,
        path: &str,
        headers: &HeaderSet,
    ) -> Result<HttpOutput, HttpErr> {
        self.exchange(Method::Get, path, ContentType::None, None, headers)
            .await
    }

    /// POST `body` to `path` and return the textual response body.
    pub async fn post_string(
        &mut self,
        path: &str,
        content: ContentType,
        body: impl Into<RequestBody>,
        headers: &HeaderSet,
    ) -> Result<String, HttpErr> {
        self.post_http_output(path, content, body, headers)
            .await?
            .body
            .into_text()
    }

    /// POST `body` to `path` and return the raw response body.
    pub async fn post_bytes(
        &mut self,
        path: &str,
        content: ContentType,
        body: impl Into<RequestBody>,
        headers: &HeaderSet,
    ) -> Result<Vec<u8>, HttpErr> {
        self.post_http_output(path, content, body, headers)
            .await?
            .body
            .into_bytes()
    }

    pub async fn post_http_output(
        &mut self,
        path: &str,
        content: ContentType,
        body: impl Into<RequestBody>,
        headers: &HeaderSet,
    ) -> Result<HttpOutput, HttpErr> {
        let body = body.into();
        self.exchange(Method::Post, path, content, Some(&body), headers)
            .await
    }

    /// Send a closing request and shut the connection down. No-op without a connection.
    pub async fn close(&mut self) -> Result<(), HttpErr> {
        let mut stream = match self.stream.take() {
            Some(s) => s,
            None => return Ok(()),
        };
        let request = self.close_request()?;
        let sent = async {
            stream.write_all(&request).await?;
            stream.shutdown().await
        }
        .await;
        log::info!("closed persistent connection to {}", self.target.authority());
        sent.map_err(|e| {
            log::warn!("closing connection to {} failed: {}", self.target.authority(), e);
            HttpErr::FailedToCloseSocket
        })
    }

    /// Same host and port as the session URL; an empty `path` means the session path.
    fn target_for(&self, path: &str) -> UrlDescriptor {
        UrlDescriptor {
            host: self.target.host.clone(),
            port: self.target.port.clone(),
            path: if path.is_empty() {
                self.target.path.clone()
            } else {
                path.to_string()
            },
        }
    }

    fn close_request(&self) -> Result<Vec<u8>, HttpErr> {
        write_request(
            Method::Get,
            ContentType::None,
            ConnectionDirective::Close,
            &self.target,
            None,
            &self.headers,
        )
    }

    /// Connect and confirm the server answers a GET on the session path.
    ///
    /// If that answer carries `Connection: close` the server will not reuse the socket, so a
    /// fresh connection is opened and kept instead.
    async fn ensure_connected(&mut self) -> Result<(), HttpErr> {
        if self.stream.is_some() {
            return Ok(());
        }
        let deadline = self.config.request_timeout();
        let mut stream = net::connect(&self.target.host, &self.target.port, deadline).await?;
        let liveness = HttpClient::send(
            Method::Get,
            &self.target,
            ContentType::None,
            None,
            &self.headers,
            ConnectionDirective::Persistent,
            Transport::BorrowedPersistent(&mut stream),
        )
        .await
        .and_then(RawResponse::check_status);
        match liveness {
            Ok(raw) if raw.closes_connection() => {
                stream = net::connect(&self.target.host, &self.target.port, deadline).await?;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!(
                    "persistent connection to {} failed its first exchange: {}",
                    self.target.authority(),
                    e
                );
                return Err(HttpErr::FailedToMakePersistentConnection);
            }
        }
        log::info!(
            "persistent connection established to {} (path {})",
            self.target.authority(),
            self.target.path
        );
        self.stream = Some(stream);
        Ok(())
    }

    fn drop_connection(&mut self, reason: &str) {
        if self.stream.take().is_some() {
            log::info!("dropping connection to {}: {}", self.target.authority(), reason);
        }
    }

    async fn exchange(
        &mut self,
        method: Method,
        path: &str,
        content: ContentType,
        body: Option<&RequestBody>,
        extra: &HeaderSet,
    ) -> Result<HttpOutput, HttpErr> {
        // Serialized first: a rejected request leaves the connection untouched.
        let target = self.target_for(path);
        let headers = HeaderSet::merged(&self.headers, extra);
        let request = write_request(
            method,
            content,
            ConnectionDirective::Persistent,
            &target,
            body,
            &headers,
        )?;
        self.ensure_connected().await?;
        log::debug!("{} {} -> {}", method.as_str(), target.path, target.authority());
        let stream = self.stream.as_mut().ok_or(HttpErr::ConnectionFailed)?;
        let raw = match client::exchange(stream, &request, method).await {
            Ok(raw) => raw,
            Err(e) => {
                self.drop_connection("exchange failed");
                return Err(e);
            }
        };
        if raw.closes_connection() {
            self.drop_connection("server sent Connection: close");
        }
        finish(raw)
    }
}

impl Drop for HttpSession {
    fn drop(&mut self) {
        let stream = match self.stream.take() {
            Some(s) => s,
            None => return,
        };
        // Best effort: a non-blocking write of the closing request, then the socket closes.
        match self.close_request() {
            Ok(request) => {
                if let Err(e) = stream.try_write(&request) {
                    log::warn!(
                        "failed to send close request to {}: {}",
                        self.target.authority(),
                        e
                    );
                }
            }
            Err(e) => log::warn!("failed to build close request: {}", e),
        }
        log::info!("closing persistent connection to {}", self.target.authority());
    }
}
