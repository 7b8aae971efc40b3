//! Request paths and JSON payload shapes of the network defense backend.
//!
//! Both the TUI and any other client speak to the backend through the
//! routes below. The backend serves camelCase JSON; the types in
//! [`types`] carry the serde annotations so callers never deal with the
//! raw field names.

pub mod types;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// URL builder for the backend routes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn analytics(&self) -> String {
        format!("{}/analytics", self.base)
    }

    pub fn traffic(&self) -> String {
        format!("{}/traffic", self.base)
    }

    pub fn blocked_ips(&self) -> String {
        format!("{}/blocked-ips", self.base)
    }

    pub fn active_connections(&self) -> String {
        format!("{}/active-connections", self.base)
    }

    pub fn block_ip(&self) -> String {
        format!("{}/block-ip", self.base)
    }

    pub fn unblock_ip(&self, ip: &str) -> String {
        format!("{}/unblock-ip/{ip}", self.base)
    }

    pub fn settings(&self) -> String {
        format!("{}/settings", self.base)
    }

    pub fn network_nodes(&self) -> String {
        format!("{}/network/nodes", self.base)
    }

    pub fn network_stats(&self) -> String {
        format!("{}/network/stats", self.base)
    }

    pub fn health(&self) -> String {
        format!("{}/system/health", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let endpoints = Endpoints::new("http://localhost:5000/api/");
        assert_eq!(endpoints.base(), "http://localhost:5000/api");
        assert_eq!(endpoints.analytics(), "http://localhost:5000/api/analytics");
        assert_eq!(
            endpoints.unblock_ip("10.0.0.7"),
            "http://localhost:5000/api/unblock-ip/10.0.0.7"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.health(), "http://127.0.0.1:5000/api/system/health");
    }
}
