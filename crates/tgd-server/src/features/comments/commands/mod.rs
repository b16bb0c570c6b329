pub mod create;
pub mod delete;

pub use create::{CreateCommentCommand, CreateCommentError, CreateCommentResponse};
pub use delete::{DeleteCommentCommand, DeleteCommentError, DeleteCommentResponse};
