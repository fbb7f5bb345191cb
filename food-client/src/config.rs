//! Client configuration

use crate::error::ClientError;
use shared::CurrencyFormat;

/// Client configuration for connecting to the food API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3333")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Load from `FOOD_API_URL`, `FOOD_API_TOKEN` and `FOOD_API_TIMEOUT_SECS`
    ///
    /// A `.env` file in the working directory is honored.
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var("FOOD_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        };

        if let Some(token) = std::env::var("FOOD_API_TOKEN").ok().filter(|s| !s.is_empty()) {
            config = config.with_token(token);
        }

        if let Ok(raw) = std::env::var("FOOD_API_TIMEOUT_SECS") {
            let seconds = raw.parse().map_err(|_| {
                ClientError::Config(format!("FOOD_API_TIMEOUT_SECS must be an integer, got {raw}"))
            })?;
            config = config.with_timeout(seconds);
        }

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> Result<crate::NetworkHttpClient, ClientError> {
        crate::NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3333")
    }
}

/// How the screen decides whether the current food is a favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteLookup {
    /// Fetch `/favorites` and scan for the id
    #[default]
    List,
    /// Ask `/favorites/{id}` directly, 404 meaning "not a favorite"
    Direct,
}

impl std::str::FromStr for FavoriteLookup {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "scan" => Ok(Self::List),
            "direct" => Ok(Self::Direct),
            other => Err(ClientError::Config(format!(
                "unknown favorite lookup '{other}', expected 'list' or 'direct'"
            ))),
        }
    }
}

/// Maximum quantity per line (base item or a single extra)
pub const DEFAULT_MAX_QUANTITY: u32 = 9999;

/// Behavior knobs for [`FoodDetailsScreen`](crate::FoodDetailsScreen)
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub favorite_lookup: FavoriteLookup,
    /// Increments stop at this value
    pub max_quantity: u32,
    /// Drop extras with quantity 0 from the submitted order
    pub omit_zero_quantity_extras: bool,
    pub currency: CurrencyFormat,
}

impl ScreenOptions {
    /// Load from `FOOD_FAVORITE_LOOKUP`, `FOOD_MAX_QUANTITY` and `FOOD_OMIT_ZERO_EXTRAS`
    pub fn from_env() -> Result<Self, ClientError> {
        let mut options = Self::default();

        if let Ok(raw) = std::env::var("FOOD_FAVORITE_LOOKUP") {
            options.favorite_lookup = raw.parse()?;
        }

        if let Ok(raw) = std::env::var("FOOD_MAX_QUANTITY") {
            let max: u32 = raw.parse().map_err(|_| {
                ClientError::Config(format!("FOOD_MAX_QUANTITY must be an integer, got {raw}"))
            })?;
            options = options.with_max_quantity(max);
        }

        if let Ok(raw) = std::env::var("FOOD_OMIT_ZERO_EXTRAS") {
            options.omit_zero_quantity_extras = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        Ok(options)
    }

    pub fn with_favorite_lookup(mut self, lookup: FavoriteLookup) -> Self {
        self.favorite_lookup = lookup;
        self
    }

    /// Set the per-line cap; the base quantity floor of 1 always wins
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = max.max(1);
        self
    }

    pub fn omit_zero_quantity_extras(mut self, omit: bool) -> Self {
        self.omit_zero_quantity_extras = omit;
        self
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            favorite_lookup: FavoriteLookup::List,
            max_quantity: DEFAULT_MAX_QUANTITY,
            omit_zero_quantity_extras: false,
            currency: CurrencyFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("http://api.local")
            .with_token("abc")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://api.local");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_favorite_lookup_parse() {
        assert_eq!("list".parse::<FavoriteLookup>().unwrap(), FavoriteLookup::List);
        assert_eq!(" Direct ".parse::<FavoriteLookup>().unwrap(), FavoriteLookup::Direct);
        assert!("index".parse::<FavoriteLookup>().is_err());
    }

    #[test]
    fn test_max_quantity_never_below_one() {
        let options = ScreenOptions::default().with_max_quantity(0);
        assert_eq!(options.max_quantity, 1);
        assert_eq!(ScreenOptions::default().max_quantity, DEFAULT_MAX_QUANTITY);
    }
}
