//! Client address extraction from HTTP request headers.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Header set by reverse proxies with the original client chain.
const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single-address variant used by nginx.
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the client IP for a request.
///
/// Checks, in order:
/// 1. The first entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. The peer socket address
///
/// Header values that do not parse as an IP address are ignored.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, "127.0.0.1:1234".parse().unwrap());
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse_ip);

    let real_ip = || {
        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_ip)
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or_else(|| peer.ip())
        .to_string()
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    value.trim().parse().ok()
}
