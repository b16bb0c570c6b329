pub mod register;
pub mod update_image;

pub use register::{RegisterUserCommand, RegisterUserError, RegisterUserResponse};
pub use update_image::{UpdateImageCommand, UpdateImageError, UpdateImageResponse};
