//! HTTP server configuration from the process environment.

use std::env;
use std::net::SocketAddr;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default database when `DATABASE_URL` is unset; matches the conventional
/// local `trivia` database.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/trivia";

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
}

impl ServerConfig {
    /// Read configuration from `BIND_ADDR` and `DATABASE_URL`, falling back
    /// to the defaults.
    ///
    /// # Errors
    /// Returns an error when `BIND_ADDR` is not a valid socket address.
    pub fn from_env() -> std::io::Result<Self> {
        let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = parse_bind_addr(&raw_addr)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());
        Ok(Self {
            bind_addr,
            database_url,
        })
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Connection URL for the PostgreSQL pool.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

fn parse_bind_addr(raw: &str) -> std::io::Result<SocketAddr> {
    raw.parse()
        .map_err(|err| std::io::Error::other(format!("invalid bind address {raw}: {err}")))
}
