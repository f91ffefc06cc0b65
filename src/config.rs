use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Runtime configuration, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    /// `SECRET_KEY`; only ever logged in redacted form.
    pub secret_key: String,
    pub loglevel: String,
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:estore.db".to_string(),
            secret_key: "mysecretkey".to_string(),
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "DATABASE_URL",
            "SECRET_KEY",
            "LOGLEVEL",
            "LISTEN_ADDR",
        ]))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn redacted_secret(&self) -> &'static str {
        if self.secret_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| {
        eprintln!("invalid configuration, falling back to defaults: {e}");
        Config::default()
    })
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "sqlite::memory:");
            jail.set_env("LISTEN_ADDR", "127.0.0.1:9000");
            let cfg = Config::load()?;
            assert_eq!(cfg.database_url, "sqlite::memory:");
            assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
            assert_eq!(cfg.loglevel, "info");
            assert_eq!(cfg.secret_key, "mysecretkey");
            Ok(())
        });
    }
}
