pub mod count_by_user;
pub mod get;
pub mod list;

pub use count_by_user::{CountCommentsByUserError, CountCommentsByUserQuery};
pub use get::{GetCommentError, GetCommentQuery};
pub use list::{ListCommentsError, ListCommentsQuery};
