use std::{env, net::SocketAddr, path::PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const STATIC_ROOT: &str = "public";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::with_port(env::var("PORT").ok().as_deref())
    }

    pub fn with_port(raw: Option<&str>) -> Self {
        let port = match raw.map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT {value:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        Self {
            port,
            static_dir: PathBuf::from(STATIC_ROOT),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_invalid() {
        assert_eq!(ServerConfig::with_port(None).port, DEFAULT_PORT);
        assert_eq!(ServerConfig::with_port(Some("")).port, DEFAULT_PORT);
        assert_eq!(ServerConfig::with_port(Some("http")).port, DEFAULT_PORT);
        assert_eq!(ServerConfig::with_port(Some("70000")).port, DEFAULT_PORT);
    }

    #[test]
    fn port_is_read_from_value() {
        let config = ServerConfig::with_port(Some(" 8081 "));
        assert_eq!(config.port, 8081);
        assert_eq!(config.addr().port(), 8081);
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }
}
