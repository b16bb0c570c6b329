pub mod add_lines;
pub mod add_tag;
pub mod create;
pub mod delete;
pub mod remove_tag;
pub mod update;

pub use add_lines::{AddLinesCommand, AddLinesError, AddLinesResponse};
pub use add_tag::{AddDatasetTagCommand, AddDatasetTagError, AddDatasetTagResponse};
pub use create::{CreateDatasetCommand, CreateDatasetError, CreateDatasetResponse};
pub use delete::{DeleteDatasetCommand, DeleteDatasetError, DeleteDatasetResponse};
pub use remove_tag::{RemoveDatasetTagCommand, RemoveDatasetTagError, RemoveDatasetTagResponse};
pub use update::{UpdateDatasetCommand, UpdateDatasetError, UpdateDatasetResponse};
