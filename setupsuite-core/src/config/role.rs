//! Server roles and the role-specific settings read from `configuration` options

use super::types::ConfigurationBlock;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server archetype selected by `configuration.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerRole {
    /// Nginx with optional Let's Encrypt certificate
    Web,
    /// MySQL, PostgreSQL or MongoDB
    Database,
    /// Docker host
    Docker,
    /// Nginx reverse proxy
    Proxy,
    /// Build/CI machine
    Build,
    #[default]
    Basic,
}

impl ServerRole {
    /// Every role, in documentation order
    pub const ALL: [ServerRole; 6] = [
        ServerRole::Web,
        ServerRole::Database,
        ServerRole::Docker,
        ServerRole::Proxy,
        ServerRole::Build,
        ServerRole::Basic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServerRole::Web => "web",
            ServerRole::Database => "database",
            ServerRole::Docker => "docker",
            ServerRole::Proxy => "proxy",
            ServerRole::Build => "build",
            ServerRole::Basic => "basic",
        }
    }

    /// One-line description used in help output
    pub fn description(&self) -> &'static str {
        match self {
            ServerRole::Web => "Web server with Nginx and SSL",
            ServerRole::Database => "Database server (MySQL/PostgreSQL)",
            ServerRole::Docker => "Docker host with optimized settings",
            ServerRole::Proxy => "Reverse proxy server",
            ServerRole::Build => "Build/CI server with dev tools",
            ServerRole::Basic => "Hardened base system only",
        }
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

impl ConfigurationBlock {
    /// The role named by `type`, if it is one of the known roles.
    pub fn role(&self) -> Option<ServerRole> {
        self.server_type.parse().ok()
    }

    /// Database settings (`db_engine`, `root_password`, `db_name`, `db_user`, `db_pass`).
    pub fn database(&self) -> DatabaseSettings {
        DatabaseSettings {
            engine: self
                .option("db_engine")
                .map(DatabaseEngine::from_option)
                .unwrap_or_default(),
            root_password: self
                .option("root_password")
                .or_else(|| self.option("root_pass"))
                .map(str::to_string),
            db_name: self.option("db_name").map(str::to_string),
            db_user: self.option("db_user").map(str::to_string),
            db_pass: self.option("db_pass").map(str::to_string),
        }
    }

    /// Docker daemon settings (`log_driver`, `log_max_size`, `log_max_file`, `compose`).
    pub fn docker(&self) -> DockerSettings {
        let defaults = DockerSettings::default();
        DockerSettings {
            log_driver: self
                .option("log_driver")
                .map_or(defaults.log_driver, str::to_string),
            log_max_size: self
                .option("log_max_size")
                .map_or(defaults.log_max_size, str::to_string),
            log_max_file: self
                .option("log_max_file")
                .map_or(defaults.log_max_file, str::to_string),
            compose: self.option("compose").is_some_and(is_truthy),
        }
    }

    /// Reverse proxy settings (`upstream`, `ssl`).
    pub fn proxy(&self) -> ProxySettings {
        ProxySettings {
            upstream: self
                .option("upstream")
                .map_or_else(|| ProxySettings::default().upstream, str::to_string),
            ssl: self.option("ssl").is_some_and(is_truthy),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Database engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseEngine {
    #[default]
    Mysql,
    Postgresql,
    Mongodb,
    /// Anything else; kept verbatim
    Other(String),
}

impl DatabaseEngine {
    /// Case-insensitive; `mariadb`, `postgres` and `mongo` are accepted as aliases.
    fn from_option(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => DatabaseEngine::Mysql,
            "postgresql" | "postgres" => DatabaseEngine::Postgresql,
            "mongodb" | "mongo" => DatabaseEngine::Mongodb,
            _ => DatabaseEngine::Other(value.to_string()),
        }
    }

    /// Name of the system service running this engine.
    pub fn service_name(&self) -> &str {
        match self {
            DatabaseEngine::Mysql => "mysql",
            DatabaseEngine::Postgresql => "postgresql",
            DatabaseEngine::Mongodb => "mongod",
            DatabaseEngine::Other(name) => name,
        }
    }
}

/// Settings for the `database` role
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseSettings {
    pub engine: DatabaseEngine,
    pub root_password: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
}

/// Settings for the `docker` role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerSettings {
    pub log_driver: String,
    pub log_max_size: String,
    pub log_max_file: String,
    pub compose: bool,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            log_driver: "local".to_string(),
            log_max_size: "20m".to_string(),
            log_max_file: "5".to_string(),
            compose: false,
        }
    }
}

/// Settings for the `proxy` role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Backend address the proxy forwards to
    pub upstream: String,
    pub ssl: bool,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            upstream: "127.0.0.1:3000".to_string(),
            ssl: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(pairs: &[(&str, &str)]) -> ConfigurationBlock {
        ConfigurationBlock {
            options: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in ServerRole::ALL {
            assert_eq!(role.as_str().parse::<ServerRole>().unwrap(), role);
        }
        assert!(matches!(
            "mainframe".parse::<ServerRole>(),
            Err(Error::UnknownRole(name)) if name == "mainframe"
        ));
    }

    #[test]
    fn test_role_is_case_sensitive() {
        assert!("Web".parse::<ServerRole>().is_err());
    }

    #[test]
    fn test_database_settings() {
        let cfg = configuration(&[("db_engine", "postgres"), ("root_pass", "s3cret")]);
        let db = cfg.database();
        assert_eq!(db.engine, DatabaseEngine::Postgresql);
        assert_eq!(db.engine.service_name(), "postgresql");
        assert_eq!(db.root_password.as_deref(), Some("s3cret"));
        assert!(db.db_name.is_none());

        assert_eq!(configuration(&[]).database().engine, DatabaseEngine::Mysql);
    }

    #[test]
    fn test_docker_settings_defaults() {
        let docker = configuration(&[("log_max_size", "50m"), ("compose", "yes")]).docker();
        assert_eq!(docker.log_driver, "local");
        assert_eq!(docker.log_max_size, "50m");
        assert_eq!(docker.log_max_file, "5");
        assert!(docker.compose);
    }

    #[test]
    fn test_proxy_settings() {
        assert_eq!(configuration(&[]).proxy(), ProxySettings::default());
        let proxy = configuration(&[("upstream", "10.0.0.2:8080"), ("ssl", "TRUE")]).proxy();
        assert_eq!(proxy.upstream, "10.0.0.2:8080");
        assert!(proxy.ssl);
    }
}
