use chrono::NaiveDate;
use sea_orm::FromQueryResult;

#[derive(Debug, Clone)]
pub struct NewActor {
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

/// One row per (actor, movie) pairing; actors without movies are not listed.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct ActorWithMovie {
    pub actor_name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub movie_title: String,
}
