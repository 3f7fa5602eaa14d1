//! Who called us, as seen through the platform's load balancer.

use axum::http::HeaderMap;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CallerHeaders {
    #[serde(rename = "x-forwarded-for")]
    pub x_forwarded_for: Option<String>,
    #[serde(rename = "x-real-ip")]
    pub x_real_ip: Option<String>,
    #[serde(rename = "do-connecting-ip")]
    pub do_connecting_ip: Option<String>,
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
    pub host: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CallerInfo {
    pub source_ip: String,
    pub headers: CallerHeaders,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

impl CallerInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let x_forwarded_for = header(headers, "x-forwarded-for");
        // first hop in the chain is the original client
        let source_ip = x_forwarded_for
            .as_deref()
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            source_ip,
            headers: CallerHeaders {
                x_forwarded_for,
                x_real_ip: header(headers, "x-real-ip"),
                do_connecting_ip: header(headers, "do-connecting-ip"),
                user_agent: header(headers, "user-agent"),
                host: header(headers, "host"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn no_headers_is_unknown() {
        let info = CallerInfo::from_headers(&HeaderMap::new());
        assert_eq!(info.source_ip, "unknown");
        assert!(info.headers.x_forwarded_for.is_none());
        assert!(info.headers.host.is_none());
    }

    #[test]
    fn source_ip_is_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.2"));
        headers.insert("user-agent", HeaderValue::from_static("curl/8.0"));
        let info = CallerInfo::from_headers(&headers);
        assert_eq!(info.source_ip, "203.0.113.7");
        assert_eq!(info.headers.x_forwarded_for.as_deref(), Some("203.0.113.7, 10.0.0.2"));
        assert_eq!(info.headers.user_agent.as_deref(), Some("curl/8.0"));
    }

    #[test]
    fn serializes_with_header_names() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));
        let json = serde_json::to_value(CallerInfo::from_headers(&headers)).unwrap();
        assert_eq!(json["headers"]["x-real-ip"], "198.51.100.1");
        assert!(json["headers"]["do-connecting-ip"].is_null());
    }
}
