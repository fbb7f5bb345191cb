//! Food Client - headless Food Details screen over the food API
//!
//! Provides the HTTP transports, typed API calls and the
//! `FoodDetailsScreen` state machine a UI host renders.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod navigation;
pub mod screen;

pub use api::FoodApi;
pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::{ClientConfig, FavoriteLookup, ScreenOptions};
pub use error::{ClientError, ClientResult, FailureKind, ScreenError, ScreenResult};
pub use navigation::{Destination, FavoriteIcon, HeaderAction, LogNavigator, Navigator};
pub use screen::{
    FoodDetailsScreen, FoodDetailsView, LoadHandle, LoadStatus, Notice, Operation, ScreenEvent,
    ScreenPhase,
};

// Re-export shared types for convenience
pub use shared::{Decimal, Extra, FavoriteFood, Food, FoodId, OrderExtra, OrderPayload};
