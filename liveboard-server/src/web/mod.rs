//! Web layer for the liveboard.
//!
//! Accepts upstream payloads over HTTP and renders the latest board.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
