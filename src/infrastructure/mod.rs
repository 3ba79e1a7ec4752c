//! Infrastructure layer - application state and runtime wiring

pub mod state;

pub use state::AppState;
