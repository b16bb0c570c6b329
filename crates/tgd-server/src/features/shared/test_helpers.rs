//! Test helpers and fixtures for database tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use tgd_server::features::shared::test_helpers::*;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let alice = TestUser::new("alice").insert(&pool).await?;
//!     let dataset = TestDataset::new(&alice, "Programming Terms")
//!         .with_lines(&["npm", "Hello World!", "variable_name_1"])
//!         .insert(&pool)
//!         .await?;
//!     // ... test logic ...
//!     Ok(())
//! }
//! ```

use sqlx::PgPool;

use crate::auth::password::hash_password;

/// Password given to every [`TestUser`] unless overridden
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Builder for creating test users
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub image: Option<Vec<u8>>,
}

impl TestUser {
    pub fn new(username: &str) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
            image: None,
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn with_image(mut self, image: &[u8]) -> Self {
        self.image = Some(image.to_vec());
        self
    }

    pub async fn insert(mut self, pool: &PgPool) -> sqlx::Result<Self> {
        let hash = hash_password(&self.password)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        self.id = sqlx::query_scalar(
            "INSERT INTO users (username, password_hash, image) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&self.username)
        .bind(hash)
        .bind(&self.image)
        .fetch_one(pool)
        .await?;

        Ok(self)
    }
}

/// Builder for creating test datasets, optionally with lines and tags
#[derive(Debug, Clone)]
pub struct TestDataset {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub lines: Vec<String>,
    pub tag_ids: Vec<i64>,
}

impl TestDataset {
    pub fn new(owner: &TestUser, title: &str) -> Self {
        Self {
            id: 0,
            user_id: owner.id,
            title: title.to_string(),
            description: String::new(),
            lines: Vec::new(),
            tag_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_lines(mut self, lines: &[&str]) -> Self {
        self.lines = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tag_ids: &[i64]) -> Self {
        self.tag_ids = tag_ids.to_vec();
        self
    }

    pub async fn insert(mut self, pool: &PgPool) -> sqlx::Result<Self> {
        self.id = sqlx::query_scalar(
            "INSERT INTO datasets (title, description, user_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.user_id)
        .fetch_one(pool)
        .await?;

        for line in &self.lines {
            sqlx::query("INSERT INTO dataset_lines (content, user_id, dataset_id) VALUES ($1, $2, $3)")
                .bind(line)
                .bind(self.user_id)
                .bind(self.id)
                .execute(pool)
                .await?;
        }

        for tag_id in &self.tag_ids {
            sqlx::query("INSERT INTO dataset_tags (dataset_id, tag_id) VALUES ($1, $2)")
                .bind(self.id)
                .bind(tag_id)
                .execute(pool)
                .await?;
        }

        Ok(self)
    }
}

/// Insert a comment and return its id
pub async fn insert_comment(
    pool: &PgPool,
    author: &TestUser,
    dataset: &TestDataset,
    content: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO comments (content, user_id, dataset_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(content)
    .bind(author.id)
    .bind(dataset.id)
    .fetch_one(pool)
    .await
}

/// Id of a seeded tag
pub async fn tag_id(pool: &PgPool, name: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT id FROM tags WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_builder() {
        let user = TestUser::new("alice").with_password("pw").with_image(&[1, 2]);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "pw");
        assert_eq!(user.image, Some(vec![1, 2]));
    }

    #[test]
    fn test_dataset_builder() {
        let owner = TestUser {
            id: 9,
            ..TestUser::new("owner")
        };
        let dataset = TestDataset::new(&owner, "Words")
            .with_description("Common words")
            .with_lines(&["a", "b"])
            .with_tags(&[1]);
        assert_eq!(dataset.user_id, 9);
        assert_eq!(dataset.lines, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(dataset.tag_ids, vec![1]);
    }
}
