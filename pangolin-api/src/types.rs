use serde::{Deserialize, Serialize};

// /analytics

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub traffic: TrafficTotals,
    pub attacks: AttackTotals,
    pub top_attackers: Vec<Attacker>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub total: u64,
    pub blocked: u64,
    pub suspicious: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackTotals {
    pub total: u64,
    pub ddos: u64,
    pub bruteforce: u64,
    pub other: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attacker {
    pub ip: String,
    pub attempts: u64,
}

// /traffic

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrafficSample {
    pub inbound: u64,
    pub outbound: u64,
    pub total: u64,
}

// /blocked-ips, /block-ip, /unblock-ip/{ip}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedIp {
    pub ip: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub ip: String,
}

// /active-connections and /network/nodes

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveConnections {
    pub total: u64,
    pub connections: Vec<NetworkNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub status: NodeStatus,
    pub connections: u64,
    /// Not every scanner reports an address for every node.
    #[serde(default)]
    pub ip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[strum(to_string = "Cloud")]
    Cloud,
    #[strum(to_string = "Switch")]
    Switch,
    #[strum(to_string = "Server")]
    Server,
    #[strum(to_string = "PC")]
    Pc,
    #[strum(to_string = "Router")]
    Router,
    #[serde(other)]
    #[strum(to_string = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[strum(to_string = "Active")]
    Active,
    #[strum(to_string = "Warning")]
    Warning,
    #[strum(to_string = "Error")]
    Error,
    #[serde(other)]
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl NodeStatus {
    /// Anything other than a plain active node deserves the operator's eye.
    pub fn is_suspicious(&self) -> bool {
        !matches!(self, NodeStatus::Active)
    }
}

// /network/stats

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkStats {
    pub overview: NetworkOverview,
    pub traffic: TrafficSample,
    pub security: SecurityCounters,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    pub total_devices: u64,
    pub active_connections: u64,
    pub network_load: u64,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCounters {
    pub threats_blocked: u64,
    pub suspicious_activities: u64,
    pub last_attack_attempt: Option<i64>,
}

// /system/health

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub services: ServiceStates,
    pub resources: ResourceUsage,
    pub last_update: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStates {
    pub network_scanner: String,
    pub monitoring: String,
    pub protection: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

// /settings

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSection {
    pub title: String,
    pub description: String,
    pub fields: Vec<SettingField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub value: FieldValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Toggle(bool),
    Number(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsAck {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_payload_deserializes() {
        let payload = r#"{
            "traffic": { "total": 123456, "blocked": 50, "suspicious": 10 },
            "attacks": { "total": 60, "ddos": 20, "bruteforce": 30, "other": 10 },
            "topAttackers": [
                { "ip": "192.168.1.100", "attempts": 30 },
                { "ip": "192.168.1.101", "attempts": 20 }
            ]
        }"#;

        let summary: AnalyticsSummary = serde_json::from_str(payload).unwrap();
        assert_eq!(summary.traffic.blocked, 50);
        assert_eq!(summary.attacks.bruteforce, 30);
        assert_eq!(summary.top_attackers.len(), 2);
        assert_eq!(summary.top_attackers[0].ip, "192.168.1.100");
    }

    #[test]
    fn connections_payload_deserializes() {
        let payload = r#"{
            "total": 5,
            "connections": [
                { "id": "1", "name": "AWS Cloud", "type": "cloud", "status": "active", "connections": 3 },
                { "id": "4", "name": "DB Server", "type": "server", "status": "warning", "connections": 1, "ip": "10.0.0.4" }
            ]
        }"#;

        let active: ActiveConnections = serde_json::from_str(payload).unwrap();
        assert_eq!(active.total, 5);
        assert_eq!(active.connections[0].kind, NodeKind::Cloud);
        assert!(active.connections[0].ip.is_none());
        assert!(active.connections[1].status.is_suspicious());
        assert_eq!(active.connections[1].ip.as_deref(), Some("10.0.0.4"));
    }

    #[test]
    fn unknown_node_kind_does_not_fail_the_parse() {
        let payload = r#"{ "id": "9", "name": "Printer", "type": "iot", "status": "active", "connections": 1 }"#;
        let node: NetworkNode = serde_json::from_str(payload).unwrap();
        assert_eq!(node.kind, NodeKind::Unknown);
    }

    #[test]
    fn health_payload_deserializes() {
        let payload = r#"{
            "status": "operational",
            "services": { "networkScanner": "running", "monitoring": "active", "protection": "active" },
            "resources": { "cpu": 0, "memory": 0, "disk": 0 },
            "lastUpdate": 1724300000
        }"#;

        let health: HealthStatus = serde_json::from_str(payload).unwrap();
        assert_eq!(health.status, "operational");
        assert_eq!(health.services.network_scanner, "running");
        assert_eq!(health.last_update, 1724300000);
    }

    #[test]
    fn network_stats_payload_deserializes() {
        let payload = r#"{
            "overview": { "totalDevices": 7, "activeConnections": 12, "networkLoad": 2048, "status": "healthy" },
            "traffic": { "inbound": 1024, "outbound": 512, "total": 1536 },
            "security": { "threatsBlocked": 0, "suspiciousActivities": 0, "lastAttackAttempt": null }
        }"#;

        let stats: NetworkStats = serde_json::from_str(payload).unwrap();
        assert_eq!(stats.overview.total_devices, 7);
        assert!(stats.security.last_attack_attempt.is_none());
    }

    #[test]
    fn settings_payload_deserializes() {
        let payload = r#"[
            {
                "title": "Monitoring",
                "description": "Configure how the system monitors network traffic and threats",
                "fields": [
                    { "id": "monitoring-interval", "label": "Monitoring Interval (seconds)", "type": "number", "value": 30 },
                    { "id": "monitoring-enabled", "label": "Enable Monitoring", "type": "toggle", "value": true }
                ]
            }
        ]"#;

        let sections: Vec<SettingsSection> = serde_json::from_str(payload).unwrap();
        assert_eq!(sections[0].fields.len(), 2);
        assert_eq!(sections[0].fields[0].kind, FieldKind::Number);
        assert_eq!(sections[0].fields[1].value, FieldValue::Toggle(true));
    }

    #[test]
    fn settings_ack_deserializes() {
        let payload = r#"{ "message": "Settings saved successfully" }"#;

        let ack: SettingsAck = serde_json::from_str(payload).unwrap();
        assert_eq!(ack.message, "Settings saved successfully");
    }

    #[test]
    fn blocked_ip_accepts_bare_and_annotated_entries() {
        let payload = r#"[
            { "ip": "192.168.1.100" },
            { "ip": "192.168.1.101", "reason": "excessive request rate" }
        ]"#;

        let blocked: Vec<BlockedIp> = serde_json::from_str(payload).unwrap();
        assert!(blocked[0].reason.is_none());
        assert_eq!(blocked[1].reason.as_deref(), Some("excessive request rate"));
    }
}
