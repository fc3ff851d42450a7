//! Original-client address resolution.

/// Network origin of an inbound request, as seen through the reverse-proxy
/// chain. The transport layer fills this in; the recorder only resolves it.
#[derive(Debug, Clone, Default)]
pub struct RequestOrigin {
    /// CDN-asserted client IP (`cf-connecting-ip`).
    pub cdn_client_ip: Option<String>,
    /// Raw `x-forwarded-for` header value.
    pub forwarded_for: Option<String>,
    /// Transport peer address.
    pub peer: Option<String>,
}

impl RequestOrigin {
    /// Resolve the original-client IP, trusting the proxy chain in priority
    /// order: CDN-asserted IP, then the first forwarded-for hop, then the
    /// raw transport peer.
    pub fn client_ip(&self) -> Option<String> {
        if let Some(ip) = &self.cdn_client_ip {
            let ip = ip.trim();
            if !ip.is_empty() {
                return Some(ip.to_string());
            }
        }

        if let Some(chain) = &self.forwarded_for {
            if let Some(first) = chain.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return Some(first.to_string());
                }
            }
        }

        self.peer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdn_header_wins() {
        let origin = RequestOrigin {
            cdn_client_ip: Some("203.0.113.7".into()),
            forwarded_for: Some("198.51.100.1, 10.0.0.1".into()),
            peer: Some("10.0.0.2:4123".into()),
        };
        assert_eq!(origin.client_ip().as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn forwarded_for_takes_the_first_hop() {
        let origin = RequestOrigin {
            cdn_client_ip: None,
            forwarded_for: Some("198.51.100.1, 10.0.0.1".into()),
            peer: Some("10.0.0.2:4123".into()),
        };
        assert_eq!(origin.client_ip().as_deref(), Some("198.51.100.1"));
    }

    #[test]
    fn falls_back_to_the_transport_peer() {
        let origin = RequestOrigin {
            cdn_client_ip: None,
            forwarded_for: None,
            peer: Some("10.0.0.2:4123".into()),
        };
        assert_eq!(origin.client_ip().as_deref(), Some("10.0.0.2:4123"));
    }

    #[test]
    fn empty_headers_are_skipped() {
        let origin = RequestOrigin {
            cdn_client_ip: Some("  ".into()),
            forwarded_for: Some(String::new()),
            peer: None,
        };
        assert_eq!(origin.client_ip(), None);
    }
}
