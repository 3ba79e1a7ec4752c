pub mod api;
pub mod api_docs;
pub mod cms;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod routing;
pub mod server;
pub mod services;
