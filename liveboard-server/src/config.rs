//! Server configuration.
//!
//! Read from `LIVEBOARD_*` environment variables; anything unset keeps its
//! default.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::domain::{Language, Liveboard};
use crate::irail::{LiveboardParser, NumberPolicy, ParseError, ParserConfig};

/// Web font linked from the page head unless overridden.
pub const DEFAULT_FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Fira+Sans:wght@400;700;800&display=swap";

/// Errors while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Listen address could not be parsed
    #[error("invalid {var} {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },

    /// Boolean variable with an unrecognized value
    #[error("invalid {var} {value:?}: expected 1, 0, true or false")]
    InvalidFlag { var: &'static str, value: String },

    /// Startup snapshot file could not be read
    #[error("cannot read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Startup snapshot file is not a usable liveboard
    #[error("cannot parse snapshot {}: {source}", path.display())]
    SnapshotParse { path: PathBuf, source: ParseError },
}

/// Configuration for the liveboard server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Language used when a request does not ask for one.
    pub language: Language,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Web font stylesheet. `None` renders pages without it.
    pub font_url: Option<String>,

    /// Liveboard JSON loaded once at startup.
    pub snapshot_file: Option<PathBuf>,

    pub parser: ParserConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            language: Language::default(),
            static_dir: PathBuf::from("static"),
            font_url: Some(DEFAULT_FONT_URL.to_string()),
            snapshot_file: None,
            parser: ParserConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// | Variable                   | Default            |
    /// |----------------------------|--------------------|
    /// | `LIVEBOARD_ADDR`           | `127.0.0.1:3000`   |
    /// | `LIVEBOARD_LANG`           | `en`               |
    /// | `LIVEBOARD_STATIC_DIR`     | `static`           |
    /// | `LIVEBOARD_FONT_URL`       | Fira Sans; empty disables |
    /// | `LIVEBOARD_SNAPSHOT`       | unset              |
    /// | `LIVEBOARD_STRICT_NUMBERS` | `false`            |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("LIVEBOARD_ADDR") {
            config.addr = value.parse().map_err(|source| ConfigError::InvalidAddr {
                var: "LIVEBOARD_ADDR",
                value: value.clone(),
                source,
            })?;
        }

        if let Some(value) = lookup("LIVEBOARD_LANG") {
            config.language = Language::from_code_or_default(&value);
        }

        if let Some(value) = lookup("LIVEBOARD_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }

        if let Some(value) = lookup("LIVEBOARD_FONT_URL") {
            config.font_url = Some(value).filter(|v| !v.trim().is_empty());
        }

        if let Some(value) = lookup("LIVEBOARD_SNAPSHOT") {
            config.snapshot_file = Some(PathBuf::from(value));
        }

        if let Some(value) = lookup("LIVEBOARD_STRICT_NUMBERS") {
            let strict = parse_flag("LIVEBOARD_STRICT_NUMBERS", &value)?;
            config.parser.numbers = if strict {
                NumberPolicy::Strict
            } else {
                NumberPolicy::Lenient
            };
        }

        Ok(config)
    }

    pub fn parser(&self) -> LiveboardParser {
        LiveboardParser::new(self.parser)
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

/// Load and parse a liveboard JSON file.
pub fn load_snapshot(path: &Path, parser: &LiveboardParser) -> Result<Liveboard, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::SnapshotRead {
        path: path.to_path_buf(),
        source,
    })?;

    parser
        .parse_str(&json)
        .map_err(|source| ConfigError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })
}
