use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored credentials and address of a PostgreSQL data source.
///
/// Collections reference a connection by its `name`. The password travels in
/// plain text, exactly as the settings form submits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Assigned by the server when a new connection is submitted with a nil uuid.
    #[serde(default)]
    pub uuid: Uuid,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub role: String,
    pub password: String,
    pub database_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_uuid_defaults_to_nil() {
        let json = r#"{
            "name": "gis",
            "host": "db.internal",
            "port": 5432,
            "role": "reader",
            "password": "secret",
            "database_name": "features"
        }"#;

        let connection: Connection = serde_json::from_str(json).unwrap();
        assert!(connection.uuid.is_nil());
        assert_eq!(connection.port, 5432);
    }
}
