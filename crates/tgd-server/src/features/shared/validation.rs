//! Shared validation utilities
//!
//! Lengths are counted in characters, not bytes.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tgd_server::features::shared::validation::{validate_title, validate_description};
//!
//! let title = validate_title("  Programming Terms ")?; // stored as given
//! validate_description(command.description.as_deref().unwrap_or(""))?;
//! ```

use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;
pub const COMMENT_MAX_CHARS: usize = 1000;
pub const USERNAME_MAX_CHARS: usize = 64;
pub const IMAGE_MAX_BYTES: usize = 100 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    #[error("Title is required and cannot be empty")]
    Required,

    #[error("Title must be at most {} characters", TITLE_MAX_CHARS)]
    TooLong,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptionValidationError {
    #[error("Description must be at most {} characters", DESCRIPTION_MAX_CHARS)]
    TooLong,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    #[error("Comment cannot be empty")]
    Required,

    #[error("Comment must be at most {} characters", COMMENT_MAX_CHARS)]
    TooLong,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    #[error("Username is required and cannot be empty")]
    UsernameRequired,

    #[error("Username must be at most {} characters", USERNAME_MAX_CHARS)]
    UsernameTooLong,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageValidationError {
    #[error("Image must be a .jpg file")]
    NotJpeg,

    #[error("Image is empty")]
    Empty,

    #[error("Image must be at most {} bytes", IMAGE_MAX_BYTES)]
    TooLarge,
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Validate a dataset title; the title is kept exactly as submitted
pub fn validate_title(title: &str) -> Result<String, TitleValidationError> {
    if title.trim().is_empty() {
        return Err(TitleValidationError::Required);
    }
    if char_len(title) > TITLE_MAX_CHARS {
        return Err(TitleValidationError::TooLong);
    }
    Ok(title.to_string())
}

/// Validate an optional description; absent becomes the empty string
pub fn validate_description(description: Option<&str>) -> Result<String, DescriptionValidationError> {
    let description = description.unwrap_or_default();
    if char_len(description) > DESCRIPTION_MAX_CHARS {
        return Err(DescriptionValidationError::TooLong);
    }
    Ok(description.to_string())
}

/// Validate comment content and return it trimmed
pub fn validate_comment(content: &str) -> Result<String, CommentValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(CommentValidationError::Required);
    }
    if char_len(content) > COMMENT_MAX_CHARS {
        return Err(CommentValidationError::TooLong);
    }
    Ok(content.to_string())
}

/// Validate registration input and return the trimmed username
pub fn validate_registration(
    username: &str,
    password: &str,
    password_confirmation: &str,
) -> Result<String, CredentialsValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CredentialsValidationError::UsernameRequired);
    }
    if char_len(username) > USERNAME_MAX_CHARS {
        return Err(CredentialsValidationError::UsernameTooLong);
    }
    if password.is_empty() {
        return Err(CredentialsValidationError::PasswordRequired);
    }
    if password != password_confirmation {
        return Err(CredentialsValidationError::PasswordMismatch);
    }
    Ok(username.to_string())
}

/// Validate an uploaded profile image
pub fn validate_image(filename: &str, bytes: &[u8]) -> Result<(), ImageValidationError> {
    if !filename.ends_with(".jpg") {
        return Err(ImageValidationError::NotJpeg);
    }
    if bytes.is_empty() {
        return Err(ImageValidationError::Empty);
    }
    if bytes.len() > IMAGE_MAX_BYTES {
        return Err(ImageValidationError::TooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Programming Terms ").unwrap(), "  Programming Terms ");
        assert_eq!(validate_title("   "), Err(TitleValidationError::Required));
        assert_eq!(validate_title(""), Err(TitleValidationError::Required));
        assert!(validate_title(&"a".repeat(100)).is_ok());
        assert_eq!(validate_title(&"a".repeat(101)), Err(TitleValidationError::TooLong));
    }

    #[test]
    fn test_validate_title_counts_characters() {
        // 100 two-byte characters
        assert!(validate_title(&"ä".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description(None).unwrap(), "");
        assert_eq!(validate_description(Some("words")).unwrap(), "words");
        assert!(validate_description(Some("d".repeat(5000).as_str())).is_ok());
        assert_eq!(
            validate_description(Some("d".repeat(5001).as_str())),
            Err(DescriptionValidationError::TooLong)
        );
    }

    #[test]
    fn test_validate_comment() {
        assert_eq!(validate_comment(" nice list ").unwrap(), "nice list");
        assert_eq!(validate_comment(" \n\t "), Err(CommentValidationError::Required));
        assert!(validate_comment(&"c".repeat(1000)).is_ok());
        assert_eq!(validate_comment(&"c".repeat(1001)), Err(CommentValidationError::TooLong));
    }

    #[test]
    fn test_validate_registration() {
        assert_eq!(validate_registration(" alice ", "pw", "pw").unwrap(), "alice");
        assert_eq!(
            validate_registration("  ", "pw", "pw"),
            Err(CredentialsValidationError::UsernameRequired)
        );
        assert_eq!(
            validate_registration(&"u".repeat(65), "pw", "pw"),
            Err(CredentialsValidationError::UsernameTooLong)
        );
        assert_eq!(
            validate_registration("alice", "", ""),
            Err(CredentialsValidationError::PasswordRequired)
        );
        assert_eq!(
            validate_registration("alice", "pw", "wp"),
            Err(CredentialsValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_validate_image() {
        assert!(validate_image("me.jpg", &[0xFF, 0xD8]).is_ok());
        assert_eq!(validate_image("ME.JPG", &[0xFF, 0xD8]), Err(ImageValidationError::NotJpeg));
        assert_eq!(validate_image("me.png", &[1]), Err(ImageValidationError::NotJpeg));
        assert_eq!(validate_image("me.jpeg", &[1]), Err(ImageValidationError::NotJpeg));
        assert_eq!(validate_image("me.jpg", &[]), Err(ImageValidationError::Empty));
        assert!(validate_image("me.jpg", &vec![0; IMAGE_MAX_BYTES]).is_ok());
        assert_eq!(
            validate_image("me.jpg", &vec![0; IMAGE_MAX_BYTES + 1]),
            Err(ImageValidationError::TooLarge)
        );
    }
}
