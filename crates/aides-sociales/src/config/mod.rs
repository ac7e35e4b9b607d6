use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of an embedding host.
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

const DEFAULT_MAX_DEPTH: usize = 64;

/// Top-level configuration for the rule catalog and its stub engine.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("AIDES_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("AIDES_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_depth = match env::var("AIDES_MAX_DEPTH") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|depth| *depth > 0)
                .ok_or(ConfigError::InvalidMaxDepth)?,
            Err(_) => DEFAULT_MAX_DEPTH,
        };

        let trace = match env::var("AIDES_TRACE") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "AIDES_TRACE",
            })?,
            Err(_) => false,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            simulation: SimulationConfig { max_depth, trace },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Limits and diagnostics of the stub engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub max_depth: usize,
    pub trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMaxDepth,
    InvalidFlag { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxDepth => {
                write!(f, "AIDES_MAX_DEPTH must be a positive integer")
            }
            ConfigError::InvalidFlag { name } => {
                write!(f, "{name} must be one of true/false, yes/no, on/off, 1/0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
