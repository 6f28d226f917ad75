use std::net::IpAddr;

use poem::Request;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries what coordinators need for logging: who asked, from where, and
/// under which request id.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for an HTTP request
    ///
    /// Should be called at the beginning of every endpoint.
    pub fn from_request(req: &Request) -> Self {
        let ip_address = Self::extract_ip_address(req);
        let actor_id = ip_address
            .map(|ip| format!("api:{}", ip))
            .unwrap_or_else(|| "api:unknown".to_string());

        let ctx = Self {
            ip_address,
            request_id: RequestId::generate(),
            source: RequestSource::API,
            actor_id,
        };

        tracing::trace!("Request context created: {:?}", ctx);

        ctx
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.trim().parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }
}
