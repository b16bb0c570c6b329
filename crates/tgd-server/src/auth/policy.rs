//! Ownership policy
//!
//! [`authorize`] is the only place that decides whether an actor may modify
//! a dataset or a comment. Handlers load the relevant owner ids into
//! [`Owners`] and ask.

use super::AuthError;

/// Protected operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EditDataset,
    DeleteDataset,
    TagDataset,
    AppendLines,
    DeleteComment,
}

/// Owner ids relevant to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owners {
    pub dataset_owner: i64,
    pub comment_author: Option<i64>,
}

impl Owners {
    pub fn dataset(dataset_owner: i64) -> Self {
        Self {
            dataset_owner,
            comment_author: None,
        }
    }

    pub fn comment(dataset_owner: i64, comment_author: i64) -> Self {
        Self {
            dataset_owner,
            comment_author: Some(comment_author),
        }
    }
}

pub fn authorize(actor: i64, action: Action, owners: &Owners) -> Result<(), AuthError> {
    let allowed = match action {
        Action::EditDataset | Action::DeleteDataset | Action::TagDataset | Action::AppendLines => {
            actor == owners.dataset_owner
        },
        // Comment authors and the owner of the commented dataset
        Action::DeleteComment => {
            owners.comment_author == Some(actor) || actor == owners.dataset_owner
        },
    };

    if allowed {
        Ok(())
    } else {
        tracing::debug!(actor, ?action, ?owners, "Authorization denied");
        Err(AuthError::NotOwner)
    }
}
