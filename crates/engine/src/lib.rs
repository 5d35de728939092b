//! Pitlane Engine library.
//!
//! Server side of the pit-lane NPC dialogue service.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration, including the dialogue core
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
