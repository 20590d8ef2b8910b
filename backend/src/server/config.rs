//! Server settings and the assembled configuration handed to `create_server`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use credentials_backend::outbound::persistence::DbPool;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Listener and storage settings, read from CLI flags, `CREDENTIALS_*`
/// environment variables, or a config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CREDENTIALS")]
pub struct ServerSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without it the server keeps records in memory.
    pub database_url: Option<String>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// The database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Everything `create_server` needs to build the app.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Use PostgreSQL-backed stores instead of the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("credentials-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_all_interfaces_in_memory() {
        let _guard = lock_env([
            ("CREDENTIALS_HOST", None::<String>),
            ("CREDENTIALS_PORT", None::<String>),
            ("CREDENTIALS_DATABASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::new(DEFAULT_HOST, 8080));
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CREDENTIALS_HOST", Some("127.0.0.1".to_owned())),
            ("CREDENTIALS_PORT", Some("9090".to_owned())),
            (
                "CREDENTIALS_DATABASE_URL",
                Some("postgres://localhost/credentials".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/credentials")
        );
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("CREDENTIALS_HOST", None::<String>),
            ("CREDENTIALS_PORT", None::<String>),
            ("CREDENTIALS_DATABASE_URL", Some("   ".to_owned())),
        ]);

        assert!(load_from_empty_args().database_url().is_none());
    }
}
