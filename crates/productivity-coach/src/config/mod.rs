use crate::analysis::DEFAULT_KEYWORD_LIMIT;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub sessions: SessionConfig,
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

        let stopwords_path = match env::var("APP_STOPWORDS_PATH") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyStopwordsPath),
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(_) => None,
        };

        let keyword_limit = parse_positive("APP_KEYWORD_LIMIT", DEFAULT_KEYWORD_LIMIT)
            .ok_or(ConfigError::InvalidKeywordLimit)?;
        let max_sessions = parse_positive("APP_SESSION_LIMIT", SessionConfig::DEFAULT_MAX_SESSIONS)
            .ok_or(ConfigError::InvalidSessionLimit)?;
        let idle_secs = parse_positive("APP_SESSION_IDLE_SECS", SessionConfig::DEFAULT_IDLE_SECS)
            .ok_or(ConfigError::InvalidSessionIdle)?;

        let output_path = env::var("APP_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(OutputConfig::DEFAULT_PATH));

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig {
                stopwords_path,
                keyword_limit,
            },
            output: OutputConfig { path: output_path },
            sessions: SessionConfig {
                max_sessions,
                idle_timeout: Duration::from_secs(idle_secs as u64),
            },
        })
    }
}

/// Unset means `default`; `None` when the value is not a positive integer.
fn parse_positive(key: &str, default: usize) -> Option<usize> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<usize>().ok().filter(|value| *value > 0),
        Err(_) => Some(default),
    }
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
}

/// Text analysis resources.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Newline-delimited stopword list replacing the built-in English one.
    pub stopwords_path: Option<PathBuf>,
    pub keyword_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
        }
    }
}

/// Bounds on the chat shell's in-memory sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_sessions: usize,
    /// Sessions untouched for longer than this are dropped.
    pub idle_timeout: Duration,
}

impl SessionConfig {
    pub const DEFAULT_MAX_SESSIONS: usize = 1000;
    pub const DEFAULT_IDLE_SECS: usize = 60 * 60;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: Self::DEFAULT_MAX_SESSIONS,
            idle_timeout: Duration::from_secs(Self::DEFAULT_IDLE_SECS as u64),
        }
    }
}

/// Where console runs persist their assessment record.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl OutputConfig {
    pub const DEFAULT_PATH: &'static str = "output_data.json";
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyStopwordsPath,
    InvalidKeywordLimit,
    InvalidSessionLimit,
    InvalidSessionIdle,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyStopwordsPath => write!(
                f,
                "APP_STOPWORDS_PATH is set but empty; unset it to use the built-in English list"
            ),
            ConfigError::InvalidKeywordLimit => {
                write!(f, "APP_KEYWORD_LIMIT must be a positive integer")
            }
            ConfigError::InvalidSessionLimit => {
                write!(f, "APP_SESSION_LIMIT must be a positive integer")
            }
            ConfigError::InvalidSessionIdle => {
                write!(f, "APP_SESSION_IDLE_SECS must be a positive number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::EmptyStopwordsPath
            | ConfigError::InvalidKeywordLimit
            | ConfigError::InvalidSessionLimit
            | ConfigError::InvalidSessionIdle => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
