//! API layer - HTTP endpoints

pub mod health;
pub mod members;
pub mod router;
pub mod state;
pub mod teams;
pub mod types;

pub use router::create_router_with_state;
pub use state::AppState;
