use std::env;
use std::path::PathBuf;

/// Process-level configuration for the cart system.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the storefront API serving `/stock` and `/products`.
    pub api_base_url: String,
    /// Directory the persisted cart lives in.
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            storage_dir: PathBuf::from(".shopcart"),
        }
    }
}

impl CartConfig {
    /// Defaults overridden by `SHOPCART_API_URL` and `SHOPCART_STORAGE_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("SHOPCART_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(dir) = env::var("SHOPCART_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_storefront() {
        let config = CartConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert_eq!(config.storage_dir, PathBuf::from(".shopcart"));
    }
}
