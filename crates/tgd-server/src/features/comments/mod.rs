//! Comments on datasets

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{CreateCommentCommand, DeleteCommentCommand};
pub use queries::{CountCommentsByUserQuery, GetCommentQuery, ListCommentsQuery};
pub use routes::{comments_routes, dataset_comments_routes};
pub use types::{CommentRecord, CommentView};
