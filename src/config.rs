use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::widget::{FALLBACK_MESSAGE, MarkupMode};

/// Prefix for environment overrides, e.g. `CHAT_WIDGET_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "CHAT_WIDGET";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Chat endpoint used by the terminal widget
    #[arg(long, env = "CHAT_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    /// Upstream chat endpoint the server relays to
    #[arg(long, env = "CHAT_UPSTREAM_URL")]
    pub upstream: Option<String>,

    /// Escape user and server text before rendering
    #[arg(long, env = "ESCAPE_MARKUP")]
    pub escape_markup: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Serve the widget page and relay chat requests (default)
    #[default]
    Serve,
    /// Chat from the terminal
    Chat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub endpoint: EndpointConfig,
    pub widget: WidgetConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Absolute URL the terminal widget posts to.
    pub url: String,
    /// Route the served page posts to.
    pub path: String,
    /// Where the server relays chat requests. Unset means every relay fails.
    #[serde(default)]
    pub upstream_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub title: String,
    pub fallback_message: String,
    pub escape_markup: bool,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl WidgetConfig {
    pub fn markup_mode(&self) -> MarkupMode {
        MarkupMode::from_escape_flag(self.escape_markup)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<(Self, Command), config::ConfigError> {
        let cli = Cli::parse();
        let command = cli.command.unwrap_or_default();
        Ok((Self::from_cli(&cli)?, command))
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("endpoint.url", "http://127.0.0.1:3000/api/chat")?
            .set_default("endpoint.path", "/api/chat")?
            .set_default("widget.title", "Chat Assistant")?
            .set_default("widget.fallback_message", FALLBACK_MESSAGE)?
            .set_default("widget.escape_markup", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?;

        // 2. Config file: explicit path must exist, ./config.* is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment variables (prefixed with CHAT_WIDGET_)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (clap has already folded in their own env vars)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = &cli.endpoint {
            builder = builder.set_override("endpoint.url", url.as_str())?;
        }
        if let Some(url) = &cli.upstream {
            builder = builder.set_override("endpoint.upstream_url", url.as_str())?;
        }
        if let Some(escape) = cli.escape_markup {
            builder = builder.set_override("widget.escape_markup", escape)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the router cannot mount.
    fn validate(&self) -> Result<(), config::ConfigError> {
        let path = &self.endpoint.path;
        if !path.starts_with('/') || path == "/" {
            return Err(config::ConfigError::Message(format!(
                "endpoint.path must start with '/' and name a route other than the page: {path:?}"
            )));
        }
        Ok(())
    }

    /// Address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
