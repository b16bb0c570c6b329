//! Users: registration, profiles, images and activity statistics

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{RegisterUserCommand, UpdateImageCommand};
pub use queries::{
    CheckLoginQuery, GetImageQuery, GetUserQuery, UserDatasetsQuery, UserProfileQuery,
    UserStatisticsQuery,
};
pub use routes::users_routes;
pub use types::{UserDatasetItem, UserRecord, UserStatistics};
