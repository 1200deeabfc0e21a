use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set,
};

use crate::entities::{actors, movie_actors, movies, prelude::*};
use crate::models::{Actor, ActorWithMovie, NewActor};

pub struct ActorRepository {
    conn: DatabaseConnection,
}

impl ActorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, actor: &NewActor) -> Result<i32> {
        let inserted = Actors::insert(actors::ActiveModel {
            name: Set(actor.name.clone()),
            gender: Set(actor.gender.clone()),
            date_of_birth: Set(actor.date_of_birth),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert actor")?;

        Ok(inserted.last_insert_id)
    }

    /// Overwrites every field of the actor. Returns `false` if the id is unknown.
    pub async fn update(&self, actor: &Actor) -> Result<bool> {
        let result = Actors::update_many()
            .set(actors::ActiveModel {
                name: Set(actor.name.clone()),
                gender: Set(actor.gender.clone()),
                date_of_birth: Set(actor.date_of_birth),
                ..Default::default()
            })
            .filter(actors::Column::Id.eq(actor.id))
            .exec(&self.conn)
            .await
            .context("Failed to update actor")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Actors::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete actor")?;

        Ok(result.rows_affected > 0)
    }

    /// One row per (actor, movie) pairing. Actors without movies are absent.
    pub async fn list_with_movies(&self) -> Result<Vec<ActorWithMovie>> {
        Actors::find()
            .select_only()
            .column_as(actors::Column::Name, "actor_name")
            .column_as(actors::Column::Gender, "gender")
            .column_as(actors::Column::DateOfBirth, "date_of_birth")
            .column_as(movies::Column::Title, "movie_title")
            .join(JoinType::InnerJoin, actors::Relation::MovieActors.def())
            .join(JoinType::InnerJoin, movie_actors::Relation::Movie.def())
            .order_by_asc(actors::Column::Id)
            .order_by_asc(movies::Column::Id)
            .into_model::<ActorWithMovie>()
            .all(&self.conn)
            .await
            .context("Failed to list actors with movies")
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Store;
    use crate::models::{Actor, NewActor, NewMovie};
    use chrono::NaiveDate;

    async fn store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    fn actor(name: &str) -> NewActor {
        NewActor {
            name: name.to_string(),
            gender: "male".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1976, 8, 2).unwrap(),
        }
    }

    async fn link(store: &Store, title: &str, actors: Vec<i32>) {
        store
            .create_movie(&NewMovie {
                title: title.to_string(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(2009, 12, 18).unwrap(),
                rating: 8,
                actors,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_returns_increasing_ids() {
        let store = store().await;
        let first = store.create_actor(&actor("Sam Worthington")).await.unwrap();
        let second = store.create_actor(&actor("Stephen Lang")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_list_skips_actors_without_movies() {
        let store = store().await;
        let cast = store.create_actor(&actor("Sam Worthington")).await.unwrap();
        store.create_actor(&actor("Nobody")).await.unwrap();
        link(&store, "Avatar", vec![cast]).await;
        link(&store, "Terminator Salvation", vec![cast]).await;

        let rows = store.list_actors_with_movies().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.actor_name == "Sam Worthington"));
        assert_eq!(rows[0].movie_title, "Avatar");
        assert_eq!(rows[1].movie_title, "Terminator Salvation");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = store().await;
        let id = store.create_actor(&actor("Sam Worthington")).await.unwrap();

        let updated = store
            .update_actor(&Actor {
                id,
                name: "Samuel Worthington".to_string(),
                gender: "male".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1976, 8, 2).unwrap(),
            })
            .await
            .unwrap();
        assert!(updated);

        link(&store, "Avatar", vec![id]).await;
        let rows = store.list_actors_with_movies().await.unwrap();
        assert_eq!(rows[0].actor_name, "Samuel Worthington");

        assert!(store.delete_actor(id).await.unwrap());
        assert!(store.list_actors_with_movies().await.unwrap().is_empty());
        assert!(!store.delete_actor(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_actor() {
        let store = store().await;
        let updated = store
            .update_actor(&Actor {
                id: 7,
                name: "Ghost".to_string(),
                gender: "female".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        assert!(!updated);
    }
}
