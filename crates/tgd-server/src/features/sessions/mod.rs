//! Login sessions backed by the `sessions` table

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{LoginCommand, LogoutCommand};
pub use queries::{FindActiveSessionQuery, FindActiveSessionResponse};
pub use routes::sessions_routes;
