/*
 * net.rs
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

//! Connection manager: resolve `host:port` and open a TCP connection under a deadline.
//!
//! Resolution runs first; the connect attempts over all resolved addresses then share a single
//! `tokio::time::timeout` (`within_deadline`). Dropping the timed-out connect future closes the
//! half-open socket.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

use crate::error::HttpErr;

/// Resolve `host:port`. Resolver errors and empty results are `DNSResolutionFailed`.
pub async fn resolve(host: &str, port: &str) -> Result<Vec<SocketAddr>, HttpErr> {
    let addr = format!("{}:{}", host, port);
    let addrs: Vec<SocketAddr> = match lookup_host(&addr).await {
        Ok(it) => it.collect(),
        Err(e) => {
            log::warn!("DNS resolution failed for {}: {}", addr, e);
            return Err(HttpErr::DNSResolutionFailed);
        }
    };
    if addrs.is_empty() {
        log::warn!("DNS resolution returned no addresses for {}", addr);
        return Err(HttpErr::DNSResolutionFailed);
    }
    Ok(addrs)
}

/// Open a TCP connection to `host:port`, giving up after `deadline`.
///
/// The returned stream is exclusively owned by the caller.
pub async fn connect(host: &str, port: &str, deadline: Duration) -> Result<TcpStream, HttpErr> {
    let addrs = resolve(host, port).await?;
    within_deadline(host, port, deadline, connect_any(&addrs)).await
}

/// Race a connect attempt against `deadline`. Expiry and connect errors are both
/// `ConnectionFailed`.
async fn within_deadline<F>(
    host: &str,
    port: &str,
    deadline: Duration,
    attempt: F,
) -> Result<TcpStream, HttpErr>
where
    F: Future<Output = io::Result<TcpStream>>,
{
    match timeout(deadline, attempt).await {
        Ok(Ok(stream)) => {
            log::debug!("connected to {}:{}", host, port);
            Ok(stream)
        }
        Ok(Err(e)) => {
            log::warn!("connection to {}:{} failed: {}", host, port, e);
            Err(HttpErr::ConnectionFailed)
        }
        Err(_) => {
            log::warn!("connection to {}:{} timed out after {:?}", host, port, deadline);
            Err(HttpErr::ConnectionFailed)
        }
    }
}

/// Try each resolved address in order; the last error is reported when none connects.
async fn connect_any(addrs: &[SocketAddr]) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no address to connect to")
    }))
}
