use crate::scoring::ScoringConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scorer service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data = DataConfig {
            tracts_csv: path_var("EIH_TRACTS_CSV", DataConfig::DEFAULT_TRACTS_CSV),
            shelters_csv: path_var("EIH_SHELTERS_CSV", DataConfig::DEFAULT_SHELTERS_CSV),
            pit_csv: path_var("EIH_PIT_CSV", DataConfig::DEFAULT_PIT_CSV),
        };

        let mut scoring = ScoringConfig::default();
        if let Ok(raw) = env::var("EIH_SHELTER_RADIUS_KM") {
            scoring.shelter_radius_km = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|radius| radius.is_finite() && *radius > 0.0)
                .ok_or(ConfigError::InvalidShelterRadius { value: raw })?;
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            data,
            scoring,
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var_os(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Locations of the reference CSV tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub tracts_csv: PathBuf,
    pub shelters_csv: PathBuf,
    pub pit_csv: PathBuf,
}

impl DataConfig {
    pub const DEFAULT_TRACTS_CSV: &'static str = "data/mock_census_tracts_sanjose.csv";
    pub const DEFAULT_SHELTERS_CSV: &'static str = "data/mock_shelters_sanjose.csv";
    pub const DEFAULT_PIT_CSV: &'static str = "data/mock_pit_summary_sanjose.csv";
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidShelterRadius { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidShelterRadius { value } => write!(
                f,
                "EIH_SHELTER_RADIUS_KM must be a positive number of kilometres, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::InvalidShelterRadius { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "EIH_TRACTS_CSV",
            "EIH_SHELTERS_CSV",
            "EIH_PIT_CSV",
            "EIH_SHELTER_RADIUS_KM",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.data.tracts_csv,
            PathBuf::from("data/mock_census_tracts_sanjose.csv")
        );
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn data_paths_and_radius_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EIH_SHELTERS_CSV", "/data/shelters.csv");
        env::set_var("EIH_SHELTER_RADIUS_KM", "5.5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.data.shelters_csv, PathBuf::from("/data/shelters.csv"));
        assert_eq!(config.scoring.shelter_radius_km, 5.5);
        reset_env();
    }

    #[test]
    fn rejects_non_positive_radius() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EIH_SHELTER_RADIUS_KM", "-1");
        let error = AppConfig::load().expect_err("negative radius rejected");
        assert!(matches!(error, ConfigError::InvalidShelterRadius { .. }));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
