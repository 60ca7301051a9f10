//! headerkind server: router, traversal guard, shared state, CLI helpers.

pub mod cli;
pub mod guard;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
