use crate::error::ApiError;
use crate::seed::Seed;
use std::path::PathBuf;

/// food-api-mock configuration, read from the environment
pub struct Config {
    /// Listen port
    pub port: u16,
    /// JSON seed file; the demo menu is used when unset
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("FOOD_API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3333),
            seed_path: std::env::var("FOOD_API_SEED").ok().map(PathBuf::from),
        }
    }

    pub fn load_seed(&self) -> Result<Seed, ApiError> {
        match &self.seed_path {
            Some(path) => Seed::from_file(path),
            None => Ok(Seed::demo()),
        }
    }
}
