/*
 * client.rs
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

//! HTTP client: one request/response exchange, either over a short-lived connection the call
//! opens itself or over a caller-held persistent connection.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::HttpErr;
use crate::net;
use crate::protocol::http::content::ContentType;
use crate::protocol::http::h1::reader::read_response;
use crate::protocol::http::headers::{ConnectionDirective, HeaderSet};
use crate::protocol::http::request::{write_request, Method, RequestBody};
use crate::protocol::http::response::{finish, HttpOutput, RawResponse};
use crate::uri::{decompose_url, UrlDescriptor};

/// Connect deadline for `Transport::transient()`.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a request goes: a full `http://` URL or already separated parts.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Url(&'a str),
    Parts {
        host: &'a str,
        path: &'a str,
        port: &'a str,
    },
}

impl Target<'_> {
    pub fn descriptor(&self) -> Result<UrlDescriptor, HttpErr> {
        match *self {
            Target::Url(url) => decompose_url(url),
            Target::Parts { host, path, port } => UrlDescriptor::from_parts(host, path, port),
        }
    }
}

/// Which connection carries the exchange.
#[derive(Debug)]
pub enum Transport<'a> {
    /// Open a connection for this call (with the given connect deadline) and drop it afterwards.
    OwnedTransient(Duration),
    /// Reuse a connection owned by the caller.
    BorrowedPersistent(&'a mut TcpStream),
}

impl Transport<'static> {
    pub fn transient() -> Self {
        Transport::OwnedTransient(DEFAULT_CONNECT_TIMEOUT)
    }
}

/// Stateless entry points for single exchanges.
pub struct HttpClient;

impl HttpClient {
    /// GET `target`. Any status other than 200 is `ResponseError`; the body is decoded and
    /// classified only after that.
    pub async fn get(
        target: Target<'_>,
        headers: &HeaderSet,
        connection: ConnectionDirective,
        transport: Transport<'_>,
    ) -> Result<HttpOutput, HttpErr> {
        let target = target.descriptor()?;
        let output = Self::send(
            Method::Get,
            &target,
            ContentType::None,
            None,
            headers,
            connection,
            transport,
        )
        .await?;
        finish(output)
    }

    /// POST `body` to `target` as `content`. Any status other than 200 is `ResponseError`.
    pub async fn post(
        target: Target<'_>,
        content: ContentType,
        body: &RequestBody,
        headers: &HeaderSet,
        connection: ConnectionDirective,
        transport: Transport<'_>,
    ) -> Result<HttpOutput, HttpErr> {
        let target = target.descriptor()?;
        let output = Self::send(
            Method::Post,
            &target,
            content,
            Some(body),
            headers,
            connection,
            transport,
        )
        .await?;
        finish(output)
    }

    /// Write one request and read its response, returning it raw whatever the status.
    ///
    /// The request is serialized before any connection is opened, so `NoBodyForMethod` and
    /// rejected header values never touch the network. Pass the result to `response::finish`
    /// for the checked, decoded `HttpOutput`.
    pub async fn send(
        method: Method,
        target: &UrlDescriptor,
        content: ContentType,
        body: Option<&RequestBody>,
        headers: &HeaderSet,
        connection: ConnectionDirective,
        transport: Transport<'_>,
    ) -> Result<RawResponse, HttpErr> {
        let request = write_request(method, content, connection, target, body, headers)?;
        log::debug!("{} {} -> {}", method.as_str(), target.path, target.authority());
        match transport {
            Transport::BorrowedPersistent(stream) => exchange(stream, &request, method).await,
            Transport::OwnedTransient(deadline) => {
                let mut stream = net::connect(&target.host, &target.port, deadline).await?;
                exchange(&mut stream, &request, method).await
            }
        }
    }
}

/// Write `request` on `stream` and read one response.
pub(crate) async fn exchange(
    stream: &mut TcpStream,
    request: &[u8],
    method: Method,
) -> Result<RawResponse, HttpErr> {
    stream.write_all(request).await?;
    stream.flush().await?;
    read_response(stream, method).await
}
