//! Domain layer - business-level types shared across services and handlers.

pub mod errors;

pub use errors::ContentError;
