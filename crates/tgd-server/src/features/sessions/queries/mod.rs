pub mod find_active;

pub use find_active::{FindActiveSessionError, FindActiveSessionQuery, FindActiveSessionResponse};
