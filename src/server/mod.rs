//! Server core functionality
//!
//! The HTTP side of the file manager: server lifecycle, routes, response
//! rendering and request logging.

pub mod core;
pub mod middleware;
pub mod responses;
pub mod routes;

pub use self::core::Server;
pub use routes::{AppState, router};
