use clap::{Parser, ValueEnum};
use nimbus_openweather::DEFAULT_BASE_URL;
use nimbus_telemetry::{LogFormat, TelemetrySettings};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "NIMBUS_LISTEN_ADDR";
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "NIMBUS_OPENWEATHER_BASE_URL";
pub const CACHE_TTL_ENV: &str = "NIMBUS_CACHE_TTL_SECS";
pub const LOOKUP_LOG_PATH_ENV: &str = "NIMBUS_LOOKUP_LOG_PATH";
pub const MAX_CONCURRENCY_ENV: &str = "NIMBUS_MAX_CONCURRENCY";
pub const LOG_FORMAT_ENV: &str = "NIMBUS_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "NIMBUS_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_CACHE_TTL_SECS: &str = "300";
pub const DEFAULT_LOOKUP_LOG_PATH: &str = "data/weather_log.csv";
pub const DEFAULT_MAX_CONCURRENCY: &str = "6";

pub const SERVICE_NAME: &str = "nimbus-gateway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "nimbus-gateway", version)]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Without a key the weather routes answer 500.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub openweather_api_key: Option<String>,

    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub openweather_base_url: String,

    #[arg(long, env = CACHE_TTL_ENV, default_value = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl_secs: u64,

    #[arg(long, env = LOOKUP_LOG_PATH_ENV, default_value = DEFAULT_LOOKUP_LOG_PATH)]
    pub lookup_log_path: PathBuf,

    /// Upper bound on provider calls in flight for one bulk request.
    /// Values above 6 are clamped to 6.
    #[arg(long, env = MAX_CONCURRENCY_ENV, default_value = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}

impl CLI {
    pub fn telemetry_settings(&self) -> TelemetrySettings {
        let settings = TelemetrySettings::builder()
            .service_name(SERVICE_NAME)
            .format(self.log_format.into());
        match &self.otlp_endpoint {
            Some(endpoint) => settings.otlp_endpoint(endpoint.clone()).build(),
            None => settings.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cli = CLI::try_parse_from(["nimbus-gateway"]).unwrap();
        assert_eq!(cli.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(cli.openweather_base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.cache_ttl_secs, 300);
        assert_eq!(cli.lookup_log_path, PathBuf::from(DEFAULT_LOOKUP_LOG_PATH));
        assert_eq!(cli.max_concurrency, 6);
        assert_eq!(cli.log_format, LogFormatArg::Text);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = CLI::try_parse_from([
            "nimbus-gateway",
            "--openweather-api-key",
            "k",
            "--max-concurrency",
            "2",
            "--log-format",
            "json",
            "--otlp-endpoint",
            "http://localhost:4317",
        ])
        .unwrap();
        assert_eq!(cli.openweather_api_key.as_deref(), Some("k"));
        assert_eq!(cli.max_concurrency, 2);

        let telemetry = cli.telemetry_settings();
        assert_eq!(telemetry.format, LogFormat::Json);
        assert_eq!(
            telemetry.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }
}
