use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::entities::{actors, movie_actors, movies, prelude::*};
use crate::models::{Movie, MovieOrder, MovieSearch, MovieSummary, NewMovie};

impl TryFrom<movies::Model> for MovieSummary {
    type Error = anyhow::Error;

    fn try_from(model: movies::Model) -> Result<Self> {
        Ok(Self {
            rating: stored_rating(model.id, model.rating)?,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
        })
    }
}

fn stored_rating(movie_id: i32, rating: i16) -> Result<u8> {
    u8::try_from(rating).with_context(|| format!("Movie {movie_id} has invalid rating {rating}"))
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the movie and its actor links in one transaction, returning the new id.
    pub async fn create(&self, movie: &NewMovie) -> Result<i32> {
        let txn = self.conn.begin().await.context("Failed to begin transaction")?;

        let inserted = Movies::insert(movies::ActiveModel {
            title: Set(movie.title.clone()),
            description: Set(movie.description.clone()),
            release_date: Set(movie.release_date),
            rating: Set(i16::from(movie.rating)),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .context("Failed to insert movie")?;

        let movie_id = inserted.last_insert_id;
        link_actors(&txn, movie_id, &movie.actors).await?;

        txn.commit().await.context("Failed to commit movie")?;
        Ok(movie_id)
    }

    /// Rewrites the movie row and replaces its actor links wholesale.
    ///
    /// Returns `false` (and writes nothing) when no movie has the given id.
    pub async fn update(&self, movie: &Movie) -> Result<bool> {
        let txn = self.conn.begin().await.context("Failed to begin transaction")?;

        let updated = Movies::update_many()
            .set(movies::ActiveModel {
                title: Set(movie.title.clone()),
                description: Set(movie.description.clone()),
                release_date: Set(movie.release_date),
                rating: Set(i16::from(movie.rating)),
                ..Default::default()
            })
            .filter(movies::Column::Id.eq(movie.id))
            .exec(&txn)
            .await
            .context("Failed to update movie")?;

        if updated.rows_affected == 0 {
            return Ok(false);
        }

        MovieActors::delete_many()
            .filter(movie_actors::Column::MovieId.eq(movie.id))
            .exec(&txn)
            .await
            .context("Failed to unlink movie actors")?;

        link_actors(&txn, movie.id, &movie.actors).await?;

        txn.commit().await.context("Failed to commit movie update")?;
        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        Ok(result.rows_affected > 0)
    }

    /// Case-insensitive substring search; returns the first match.
    ///
    /// `%` and `_` in the term match themselves, not arbitrary text.
    pub async fn find(&self, search: &MovieSearch) -> Result<Option<MovieSummary>> {
        let query = match search {
            MovieSearch::Title(title) => Movies::find().filter(
                Expr::expr(Func::lower(Expr::col((Movies, movies::Column::Title))))
                    .like(contains_pattern(title)),
            ),
            MovieSearch::ActorName(name) => Movies::find()
                .join(JoinType::InnerJoin, movies::Relation::MovieActors.def())
                .join(JoinType::InnerJoin, movie_actors::Relation::Actor.def())
                .filter(
                    Expr::expr(Func::lower(Expr::col((Actors, actors::Column::Name))))
                        .like(contains_pattern(name)),
                ),
        };

        let movie = query.one(&self.conn).await.context("Failed to search movies")?;

        movie.map(MovieSummary::try_from).transpose()
    }

    pub async fn list_ordered(&self, order: MovieOrder) -> Result<Vec<MovieSummary>> {
        let column = match order {
            MovieOrder::Title => movies::Column::Title,
            MovieOrder::ReleaseDate => movies::Column::ReleaseDate,
            MovieOrder::Rating => movies::Column::Rating,
        };

        let movies = Movies::find()
            .order_by_desc(column)
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        movies.into_iter().map(MovieSummary::try_from).collect()
    }

    /// Loads a movie with its linked actor ids, sorted ascending.
    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let Some(model) = Movies::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?
        else {
            return Ok(None);
        };

        let actors = MovieActors::find()
            .filter(movie_actors::Column::MovieId.eq(id))
            .order_by_asc(movie_actors::Column::ActorId)
            .all(&self.conn)
            .await
            .context("Failed to query movie actors")?
            .into_iter()
            .map(|link| link.actor_id)
            .collect();

        Ok(Some(Movie {
            id: model.id,
            title: model.title,
            description: model.description,
            release_date: model.release_date,
            rating: stored_rating(model.id, model.rating)?,
            actors,
        }))
    }
}

/// Inserts one association row per distinct actor id in a single statement.
async fn link_actors<C: ConnectionTrait>(conn: &C, movie_id: i32, actor_ids: &[i32]) -> Result<()> {
    let mut seen = Vec::with_capacity(actor_ids.len());
    for id in actor_ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }

    if seen.is_empty() {
        return Ok(());
    }

    let links = seen.into_iter().map(|actor_id| movie_actors::ActiveModel {
        movie_id: Set(movie_id),
        actor_id: Set(actor_id),
    });

    MovieActors::insert_many(links)
        .exec_without_returning(conn)
        .await
        .with_context(|| format!("Failed to link actors to movie {movie_id}"))?;

    Ok(())
}

fn contains_pattern(term: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    LikeExpr::new(pattern).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::NewActor;
    use chrono::NaiveDate;

    async fn store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed_actor(store: &Store, name: &str) -> i32 {
        store
            .create_actor(&NewActor {
                name: name.to_string(),
                gender: "female".to_string(),
                date_of_birth: date(1978, 6, 19),
            })
            .await
            .unwrap()
    }

    fn avatar(actors: Vec<i32>) -> NewMovie {
        NewMovie {
            title: "Avatar".to_string(),
            description: "good film!".to_string(),
            release_date: date(2007, 2, 2),
            rating: 9,
            actors,
        }
    }

    #[tokio::test]
    async fn test_create_links_every_actor() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;
        let b = seed_actor(&store, "Sam Worthington").await;

        let id = store.create_movie(&avatar(vec![a, b])).await.unwrap();
        let movie = store.get_movie(id).await.unwrap().unwrap();

        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.rating, 9);
        assert_eq!(movie.actors, vec![a, b]);
    }

    #[tokio::test]
    async fn test_create_without_actors() {
        let store = store().await;
        let id = store.create_movie(&avatar(vec![])).await.unwrap();
        assert!(store.get_movie(id).await.unwrap().unwrap().actors.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_actor_ids_are_linked_once() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;

        let id = store.create_movie(&avatar(vec![a, a])).await.unwrap();
        assert_eq!(store.get_movie(id).await.unwrap().unwrap().actors, vec![a]);
    }

    #[tokio::test]
    async fn test_failed_link_rolls_back_create() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;

        // actor 999 does not exist, so the association insert violates the foreign key
        let result = store.create_movie(&avatar(vec![a, 999])).await;
        assert!(result.is_err());

        let all = store.list_movies(MovieOrder::Rating).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_links() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;
        let b = seed_actor(&store, "Sam Worthington").await;
        let c = seed_actor(&store, "Sigourney Weaver").await;

        let id = store.create_movie(&avatar(vec![a, b])).await.unwrap();

        let updated = store
            .update_movie(&Movie {
                id,
                title: "Avatar 2".to_string(),
                description: "the way of water".to_string(),
                release_date: date(2022, 12, 16),
                rating: 8,
                actors: vec![c],
            })
            .await
            .unwrap();
        assert!(updated);

        let movie = store.get_movie(id).await.unwrap().unwrap();
        assert_eq!(movie.title, "Avatar 2");
        assert_eq!(movie.rating, 8);
        assert_eq!(movie.actors, vec![c]);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_movie_untouched() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;
        let id = store.create_movie(&avatar(vec![a])).await.unwrap();

        let result = store
            .update_movie(&Movie {
                id,
                title: "Broken".to_string(),
                description: String::new(),
                release_date: date(2000, 1, 1),
                rating: 1,
                actors: vec![999],
            })
            .await;
        assert!(result.is_err());

        let movie = store.get_movie(id).await.unwrap().unwrap();
        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.rating, 9);
        assert_eq!(movie.actors, vec![a]);
    }

    #[tokio::test]
    async fn test_update_unknown_movie() {
        let store = store().await;
        let updated = store
            .update_movie(&Movie {
                id: 42,
                title: "Ghost".to_string(),
                description: String::new(),
                release_date: date(2000, 1, 1),
                rating: 1,
                actors: vec![],
            })
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_find_is_case_insensitive_substring() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;
        store.create_movie(&avatar(vec![a])).await.unwrap();

        let by_title = store
            .find_movie(&MovieSearch::Title("VAT".to_string()))
            .await
            .unwrap();
        assert_eq!(by_title.map(|m| m.title), Some("Avatar".to_string()));

        let by_actor = store
            .find_movie(&MovieSearch::ActorName("saldan".to_string()))
            .await
            .unwrap();
        assert_eq!(by_actor.map(|m| m.title), Some("Avatar".to_string()));

        let missing = store
            .find_movie(&MovieSearch::Title("titanic".to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_treats_wildcards_literally() {
        let store = store().await;
        store.create_movie(&avatar(vec![])).await.unwrap();
        store
            .create_movie(&NewMovie {
                title: "100% Love".to_string(),
                ..avatar(vec![])
            })
            .await
            .unwrap();

        let percent = store
            .find_movie(&MovieSearch::Title("%".to_string()))
            .await
            .unwrap();
        assert_eq!(percent.map(|m| m.title), Some("100% Love".to_string()));

        let underscore = store
            .find_movie(&MovieSearch::Title("_".to_string()))
            .await
            .unwrap();
        assert!(underscore.is_none());
    }

    #[tokio::test]
    async fn test_invalid_stored_rating_is_an_error() {
        use sea_orm::ActiveModelTrait;

        let store = store().await;
        let broken = movies::ActiveModel {
            title: Set("Broken".to_string()),
            description: Set(String::new()),
            release_date: Set(date(2000, 1, 1)),
            rating: Set(-1),
            ..Default::default()
        }
        .insert(&store.conn)
        .await
        .unwrap();

        assert!(store.list_movies(MovieOrder::Rating).await.is_err());
        assert!(store.get_movie(broken.id).await.is_err());
    }

    #[tokio::test]
    async fn test_list_ordered_descending() {
        let store = store().await;
        for (title, rating, year) in [("B", 5, 2001), ("A", 9, 1999), ("C", 7, 2010)] {
            store
                .create_movie(&NewMovie {
                    title: title.to_string(),
                    description: String::new(),
                    release_date: date(year, 1, 1),
                    rating,
                    actors: vec![],
                })
                .await
                .unwrap();
        }

        let titles = |movies: Vec<MovieSummary>| -> Vec<String> {
            movies.into_iter().map(|m| m.title).collect()
        };

        assert_eq!(
            titles(store.list_movies(MovieOrder::Rating).await.unwrap()),
            vec!["A", "C", "B"]
        );
        assert_eq!(
            titles(store.list_movies(MovieOrder::ReleaseDate).await.unwrap()),
            vec!["C", "B", "A"]
        );
        assert_eq!(
            titles(store.list_movies(MovieOrder::Title).await.unwrap()),
            vec!["C", "B", "A"]
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_links() {
        let store = store().await;
        let a = seed_actor(&store, "Zoe Saldana").await;
        let id = store.create_movie(&avatar(vec![a])).await.unwrap();

        assert!(store.delete_movie(id).await.unwrap());
        assert!(store.get_movie(id).await.unwrap().is_none());
        assert!(store.list_actors_with_movies().await.unwrap().is_empty());
        assert!(!store.delete_movie(id).await.unwrap());
    }
}
