use std::error;

use ratatui::Frame;

use pangolin_api::types::HealthStatus;

use crate::client::{Client, Telemetry};
use crate::config::Config;
use crate::help::Help;
use crate::notification::Notification;
use crate::section::Section;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Milliseconds between redraw ticks.
pub const TICK_RATE: u64 = 250;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub help: Help,
    pub show_help: bool,
    pub section: Section,
    pub health: Option<HealthStatus>,
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            running: true,
            help: Help::new(),
            show_help: false,
            section: Section::new(client, config),
            health: None,
            notifications: Vec::new(),
        }
    }

    pub fn handle_telemetry(&mut self, telemetry: Telemetry) {
        match telemetry {
            Telemetry::Analytics(summary) => self.section.traffic.set_analytics(summary),
            Telemetry::Traffic(sample) => self.section.traffic.push_sample(sample),
            Telemetry::Connections(connections) => self.section.connections.update(connections),
            Telemetry::BlockedIps(ips) => self.section.blocked.update(ips),
            Telemetry::Stats(stats) => self.section.connections.set_stats(stats),
            Telemetry::Health(health) => self.health = Some(health),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.section.render(frame, area, self.health.as_ref());
    }

    pub fn tick(&mut self) {
        self.notifications
            .iter_mut()
            .for_each(|notification| notification.ttl -= 1);
        self.notifications.retain(|notification| notification.ttl > 0);
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationLevel;
    use pangolin_api::types::{ResourceUsage, ServiceStates};

    fn app() -> App {
        let config = Config::default();
        App::new(Client::new(&config).unwrap(), &config)
    }

    #[test]
    fn expired_notifications_are_dropped_on_tick() {
        let mut app = app();
        app.notifications.push(Notification {
            message: "about to vanish".to_string(),
            level: NotificationLevel::Info,
            ttl: 1,
        });
        app.notifications.push(Notification {
            message: "still here".to_string(),
            level: NotificationLevel::Info,
            ttl: 2,
        });

        app.tick();

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].message, "still here");
    }

    #[test]
    fn health_telemetry_lands_in_the_app() {
        let mut app = app();

        app.handle_telemetry(Telemetry::Health(HealthStatus {
            status: "operational".to_string(),
            services: ServiceStates {
                network_scanner: "active".to_string(),
                monitoring: "active".to_string(),
                protection: "active".to_string(),
            },
            resources: ResourceUsage {
                cpu: 12.5,
                memory: 48.2,
                disk: 23.1,
            },
            last_update: 1_700_000_000,
        }));

        assert_eq!(app.health.as_ref().map(|h| h.status.as_str()), Some("operational"));
    }
}
