//! Client identification utilities
//!
//! Request metadata recorded alongside access events.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Network metadata of the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client IP address, empty when unknown
    pub ip: String,
    /// Raw User-Agent, empty when absent
    pub user_agent: String,
}

/// Collect IP and User-Agent for a request.
///
/// Missing values become empty strings; they are never an error.
pub fn extract_client_info(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientInfo {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let ip = extract_client_ip(headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_default();

    ClientInfo { ip, user_agent }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // First entry is the originating client
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(first_ip) = xff.split(',').next()
        && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
    {
        return Some(ip);
    }
    direct_ip
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_info() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        let info = extract_client_info(&headers, Some(direct));
        assert_eq!(info.ip, "10.1.2.3");
        assert_eq!(info.user_agent, "Mozilla/5.0 Test Browser");
    }

    #[test]
    fn test_missing_metadata_is_empty() {
        let info = extract_client_info(&HeaderMap::new(), None);
        assert_eq!(info, ClientInfo::default());
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_bad_xff_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }
}
