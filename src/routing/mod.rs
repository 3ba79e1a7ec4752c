//! Locale-prefixed routing for the public site.

pub mod locale;
pub mod paths;

pub use locale::Locale;
pub use paths::{path_for, resolve, switch_locale, PageRoute, Resolution, Section};
