//! Navigation seam between the screen and its host UI

use serde::{Deserialize, Serialize};

/// Accent color of the favorite icon in the header
pub const FAVORITE_ICON_COLOR: &str = "#FFB84D";

/// Named navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Dashboard,
}

impl Destination {
    /// Route name in the host navigator
    pub fn route(&self) -> &'static str {
        match self {
            Self::Dashboard => "DashboardStack",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FavoriteIcon {
    Filled,
    Outline,
}

impl FavoriteIcon {
    pub fn for_state(is_favorite: bool) -> Self {
        if is_favorite { Self::Filled } else { Self::Outline }
    }

    /// Material icon name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Filled => "favorite",
            Self::Outline => "favorite-border",
        }
    }
}

/// Action rendered in the header's right slot
///
/// The host wires a press on it to
/// [`FoodDetailsScreen::toggle_favorite`](crate::FoodDetailsScreen::toggle_favorite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderAction {
    pub icon: FavoriteIcon,
    pub color: String,
}

impl HeaderAction {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            icon: FavoriteIcon::for_state(is_favorite),
            color: FAVORITE_ICON_COLOR.to_string(),
        }
    }
}

/// Host navigation interface consumed by the screen
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);

    fn set_header_action(&self, action: HeaderAction);
}

/// Navigator that only logs, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::info!(route = destination.route(), "navigate");
    }

    fn set_header_action(&self, action: HeaderAction) {
        tracing::debug!(icon = action.icon.name(), "header action updated");
    }
}
