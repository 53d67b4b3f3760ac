use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for a shortlisting run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub shortlist: ShortlistConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SHORTLIST_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let input_path = env::var("SHORTLIST_INPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT_FILE));
        let output_dir = env::var("SHORTLIST_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let entry_level_marker = env::var("SHORTLIST_ENTRY_LEVEL_MARKER")
            .unwrap_or_else(|_| DEFAULT_ENTRY_LEVEL_MARKER.to_string());
        if entry_level_marker.trim().is_empty() {
            return Err(ConfigError::EmptyEntryLevelMarker);
        }

        let log_level = env::var("SHORTLIST_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            shortlist: ShortlistConfig {
                input_path,
                output_dir,
                entry_level_marker,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

pub const DEFAULT_INPUT_FILE: &str = "candidates.csv";
pub const DEFAULT_ENTRY_LEVEL_MARKER: &str = "EntryLevel";
pub const ENTRY_LEVEL_OUTPUT_FILE: &str = "shortlisted_freshers.csv";
pub const SEASONED_OUTPUT_FILE: &str = "shortlisted_experienced.csv";

/// Where candidates come from and where the shortlists go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortlistConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Category literal that selects the entry-level variant. Any other value is seasoned.
    pub entry_level_marker: String,
}

impl ShortlistConfig {
    pub fn entry_level_output(&self) -> PathBuf {
        self.output_dir.join(ENTRY_LEVEL_OUTPUT_FILE)
    }

    pub fn seasoned_output(&self) -> PathBuf {
        self.output_dir.join(SEASONED_OUTPUT_FILE)
    }
}

impl Default for ShortlistConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_dir: PathBuf::from("."),
            entry_level_marker: DEFAULT_ENTRY_LEVEL_MARKER.to_string(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyEntryLevelMarker,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyEntryLevelMarker => {
                write!(f, "SHORTLIST_ENTRY_LEVEL_MARKER must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
