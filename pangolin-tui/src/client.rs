//! Blocking HTTP client for the backend API and the telemetry poller
//! that feeds the UI.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use kanal::Sender;
use log::{debug, error, info};
use serde::de::DeserializeOwned;

use pangolin_api::Endpoints;
use pangolin_api::types::{
    ActiveConnections, AnalyticsSummary, BlockRequest, BlockedIp, HealthStatus, NetworkStats,
    TrafficSample,
};

use crate::config::Config;
use crate::event::Event;
use crate::notification::{Notification, NotificationLevel};

/// One datum fetched from the backend.
#[derive(Debug, Clone)]
pub enum Telemetry {
    Analytics(AnalyticsSummary),
    Traffic(TrafficSample),
    Connections(ActiveConnections),
    BlockedIps(Vec<BlockedIp>),
    Stats(NetworkStats),
    Health(HealthStatus),
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    endpoints: Endpoints,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("building the http client")?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(&config.backend.url),
        })
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("GET {url}"))?;
        response.json().with_context(|| format!("decoding {url}"))
    }

    pub fn analytics(&self) -> Result<AnalyticsSummary> {
        self.get(&self.endpoints.analytics())
    }

    pub fn traffic(&self) -> Result<TrafficSample> {
        self.get(&self.endpoints.traffic())
    }

    pub fn active_connections(&self) -> Result<ActiveConnections> {
        self.get(&self.endpoints.active_connections())
    }

    pub fn blocked_ips(&self) -> Result<Vec<BlockedIp>> {
        self.get(&self.endpoints.blocked_ips())
    }

    pub fn network_stats(&self) -> Result<NetworkStats> {
        self.get(&self.endpoints.network_stats())
    }

    pub fn health(&self) -> Result<HealthStatus> {
        self.get(&self.endpoints.health())
    }

    pub fn block_ip(&self, ip: &str) -> Result<()> {
        let url = self.endpoints.block_ip();
        self.http
            .post(&url)
            .json(&BlockRequest { ip: ip.to_string() })
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("POST {url}"))?;
        Ok(())
    }

    pub fn unblock_ip(&self, ip: &str) -> Result<()> {
        let url = self.endpoints.unblock_ip(ip);
        self.http
            .delete(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("DELETE {url}"))?;
        Ok(())
    }
}

/// Spawns the background thread that polls the backend on a fixed period
/// and forwards every answer to the main loop.
///
/// A cycle where every request fails marks the backend as down. The user is
/// notified once per transition, not on every failed cycle.
pub fn spawn_poller(client: Client, refresh: Duration, sender: Sender<Event>) {
    thread::spawn(move || {
        info!(
            "telemetry poller started for {}, polling every {refresh:?}",
            client.endpoints.base()
        );
        let mut backend_down = false;

        loop {
            let mut reached = false;
            let mut failed = false;

            macro_rules! poll {
                ($call:expr, $wrap:expr) => {
                    match $call {
                        Ok(data) => {
                            reached = true;
                            if sender.send(Event::Telemetry($wrap(data))).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            failed = true;
                            debug!("poll failed: {e:#}");
                        }
                    }
                };
            }

            poll!(client.analytics(), Telemetry::Analytics);
            poll!(client.traffic(), Telemetry::Traffic);
            poll!(client.active_connections(), Telemetry::Connections);
            poll!(client.blocked_ips(), Telemetry::BlockedIps);
            poll!(client.network_stats(), Telemetry::Stats);
            poll!(client.health(), Telemetry::Health);

            if let Some((message, level)) =
                connection_transition(reached, failed, &mut backend_down)
            {
                let _ = Notification::send(message, level, sender.clone());
            }

            thread::sleep(refresh);
        }
    });
}

/// Turns the outcome of one poll cycle into the user-facing up/down message.
/// One reachable route keeps the backend up; only the transitions speak,
/// a steady state stays silent.
fn connection_transition(
    reached: bool,
    failed: bool,
    backend_down: &mut bool,
) -> Option<(String, NotificationLevel)> {
    if !reached && failed && !*backend_down {
        *backend_down = true;
        error!("backend unreachable");
        Some((
            "Backend unreachable. Retrying in the background.".to_string(),
            NotificationLevel::Error,
        ))
    } else if reached && *backend_down {
        *backend_down = false;
        info!("backend connection restored");
        Some((
            "Backend connection restored.".to_string(),
            NotificationLevel::Info,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn losing_the_backend_notifies_once() {
        let mut down = false;

        let first = connection_transition(false, true, &mut down);
        let second = connection_transition(false, true, &mut down);

        assert!(matches!(first, Some((_, NotificationLevel::Error))));
        assert!(second.is_none());
        assert!(down);
    }

    #[test]
    fn recovery_notifies_once() {
        let mut down = true;

        let first = connection_transition(true, false, &mut down);
        let second = connection_transition(true, false, &mut down);

        assert!(matches!(first, Some((_, NotificationLevel::Info))));
        assert!(second.is_none());
        assert!(!down);
    }

    #[test]
    fn a_healthy_backend_stays_silent() {
        let mut down = false;

        assert!(connection_transition(true, false, &mut down).is_none());
        assert!(!down);
    }

    #[test]
    fn one_reachable_route_counts_as_up() {
        let mut down = false;
        assert!(connection_transition(true, true, &mut down).is_none());
        assert!(!down);

        down = true;
        let note = connection_transition(true, true, &mut down);
        assert!(matches!(note, Some((_, NotificationLevel::Info))));
        assert!(!down);
    }
}
