pub mod check_login;
pub mod datasets;
pub mod get;
pub mod image;
pub mod profile;
pub mod statistics;

pub use check_login::{CheckLoginError, CheckLoginQuery};
pub use datasets::{UserDatasetsError, UserDatasetsQuery};
pub use get::{GetUserError, GetUserQuery};
pub use image::{GetImageError, GetImageQuery};
pub use profile::{UserProfileError, UserProfileQuery, UserProfileResponse};
pub use statistics::{UserStatisticsError, UserStatisticsQuery};
