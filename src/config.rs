use std::{env, net::SocketAddr, path::PathBuf};

use crate::store::DEFAULT_PLANS_DIR;

// Server settings, read from the environment
//
//     HOST          bind host (127.0.0.1)
//     PORT          bind port (3000)
//     PLANS_DIR     where rendered plans are written (generated_plans)
//     STATIC_DIR    front-end files (static)
//     CATALOG_FILE  optional JSON course catalog; sample course otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub plans_dir: PathBuf,
    pub static_dir: PathBuf,
    pub catalog_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            plans_dir: PathBuf::from(DEFAULT_PLANS_DIR),
            static_dir: PathBuf::from("static"),
            catalog_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Split out so tests don't have to touch process env
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            plans_dir: non_empty("PLANS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.plans_dir),
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            catalog_file: non_empty("CATALOG_FILE").map(PathBuf::from),
        }
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
