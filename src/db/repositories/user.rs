use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::users;
use crate::models::User;

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            username: model.username,
            is_admin: model.is_admin,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a non-admin user. Fails if the username is taken.
    pub async fn create(&self, username: &str, password_digest: &str) -> Result<()> {
        users::Entity::insert(users::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password_digest.to_string()),
            is_admin: Set(false),
        })
        .exec_without_returning(&self.conn)
        .await
        .with_context(|| format!("Failed to create user '{username}'"))?;

        Ok(())
    }

    /// Looks up a user whose stored digest equals `password_digest`.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .filter(users::Column::Password.eq(password_digest))
            .one(&self.conn)
            .await
            .context("Failed to query user by credentials")?;

        Ok(user.map(User::from))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(username.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Returns `false` when no such user exists.
    pub async fn set_admin(&self, username: &str, is_admin: bool) -> Result<bool> {
        let result = users::Entity::update_many()
            .set(users::ActiveModel {
                is_admin: Set(is_admin),
                ..Default::default()
            })
            .filter(users::Column::Username.eq(username))
            .exec(&self.conn)
            .await
            .context("Failed to update admin flag")?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;

    async fn store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    #[tokio::test]
    async fn test_create_and_find_by_credentials() {
        let store = store().await;
        store.create_user("alice", "digest-1").await.unwrap();

        let user = store
            .find_user_by_credentials("alice", "digest-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);

        assert!(
            store
                .find_user_by_credentials("alice", "wrong")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_fails() {
        let store = store().await;
        store.create_user("alice", "digest-1").await.unwrap();
        assert!(store.create_user("alice", "digest-2").await.is_err());
    }

    #[tokio::test]
    async fn test_set_admin() {
        let store = store().await;
        store.create_user("alice", "digest").await.unwrap();

        assert!(store.set_user_admin("alice", true).await.unwrap());
        let user = store.get_user("alice").await.unwrap().unwrap();
        assert!(user.is_admin);

        assert!(!store.set_user_admin("bob", true).await.unwrap());
    }
}
