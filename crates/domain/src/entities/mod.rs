//! Domain entities - Core business objects with identity

mod car_build;
mod interaction;
mod player;

pub use car_build::CarBuild;
pub use interaction::Interaction;
pub use player::{Player, DEFAULT_PLAYER_ROLE};
