//! Food details screen: loader, editor and submitter over one view state.

mod events;
mod food_details;
mod state;

pub use events::ScreenEvent;
pub use food_details::{FoodDetailsScreen, LoadHandle};
pub use state::{
    FoodDetailsState, FoodDetailsView, LoadFailure, LoadStatus, Notice, Operation, OrderStatus,
    ScreenPhase,
};
