mod player;

pub mod api;

pub use player::{PlayerSummaryView, PlayerView};
pub use api::*;
