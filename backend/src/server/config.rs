//! Server settings loaded via OrthoConfig, and the resolved server config.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use phongtro::domain::{
    CodeGenerator, DEFAULT_CODE_SALT, DEFAULT_NEW_POST_LIMIT, DEFAULT_PAGE_SIZE,
    DEFAULT_POST_LIFETIME_DAYS, ListingPolicy, ParseSatelliteRetentionError, SatelliteRetention,
};
use phongtro::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// The retention setting was neither `retain` nor `cascade`.
    #[error(transparent)]
    Retention(#[from] ParseSatelliteRetentionError),
    /// A count that must be positive was zero.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

/// Values read from `PHONGTRO_*` environment variables, CLI flags or a
/// config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PHONGTRO")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps listings in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Page size used when a listing request omits `limitPost`.
    pub page_size: Option<u32>,
    /// Number of cards in the newest-posts widget.
    pub new_post_limit: Option<u32>,
    /// Days a post stays live before it expires.
    pub post_lifetime_days: Option<u32>,
    /// Salt mixed into generated lookup codes.
    pub code_salt: Option<String>,
    /// `retain` or `cascade`: what happens to satellite rows on delete.
    pub retention: Option<String>,
    /// Leave the schema alone at startup; migrations are applied elsewhere.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn positive(value: Option<u32>, default: u32, name: &'static str) -> Result<u32, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { name }),
        value => Ok(value),
    }
}

impl ServerSettings {
    /// The listen address, defaulting to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// The configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> Result<PoolConfig, SettingsError> {
        let size = positive(self.pool_size, DEFAULT_POOL_SIZE, "pool_size")?;
        Ok(PoolConfig::new(database_url).with_max_size(size))
    }

    /// Listing behaviour with defaults filled in.
    pub fn listing_policy(&self) -> Result<ListingPolicy, SettingsError> {
        let retention = match self.retention.as_deref() {
            Some(raw) => raw.parse::<SatelliteRetention>()?,
            None => SatelliteRetention::default(),
        };
        Ok(ListingPolicy {
            default_page_size: positive(self.page_size, DEFAULT_PAGE_SIZE, "page_size")?,
            new_post_limit: positive(self.new_post_limit, DEFAULT_NEW_POST_LIMIT, "new_post_limit")?,
            post_lifetime_days: positive(
                self.post_lifetime_days,
                DEFAULT_POST_LIFETIME_DAYS,
                "post_lifetime_days",
            )?,
            retention,
        })
    }

    /// Lookup code generator using the configured salt.
    pub fn code_generator(&self) -> CodeGenerator {
        CodeGenerator::new(self.code_salt.as_deref().unwrap_or(DEFAULT_CODE_SALT))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: ListingPolicy,
    pub(crate) codes: CodeGenerator,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, policy: ListingPolicy, codes: CodeGenerator) -> Self {
        Self {
            bind_addr,
            policy,
            codes,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one, listings are kept in an in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
