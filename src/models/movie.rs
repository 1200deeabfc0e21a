use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: u8,
    pub actors: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: u8,
    pub actors: Vec<i32>,
}

/// Movie fields as returned by searches and listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSummary {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: u8,
}

/// What `GET /movie` searches by. A title search wins when both terms are supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieSearch {
    Title(String),
    ActorName(String),
}

impl MovieSearch {
    /// Builds a search from optional query terms, ignoring blank ones.
    #[must_use]
    pub fn from_terms(title: Option<&str>, actor: Option<&str>) -> Option<Self> {
        let title = title.filter(|t| !t.is_empty());
        let actor = actor.filter(|a| !a.is_empty());

        match (title, actor) {
            (Some(title), _) => Some(Self::Title(title.to_string())),
            (None, Some(actor)) => Some(Self::ActorName(actor.to_string())),
            (None, None) => None,
        }
    }
}

impl fmt::Display for MovieSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => write!(f, "title '{title}'"),
            Self::ActorName(name) => write!(f, "actor '{name}'"),
        }
    }
}

/// Columns a movie listing may be ordered by. Listings are always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieOrder {
    Title,
    ReleaseDate,
    #[default]
    Rating,
}

impl MovieOrder {
    pub const ALLOWED: [&'static str; 3] = ["movie_title", "release_date", "rating"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "movie_title",
            Self::ReleaseDate => "release_date",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for MovieOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrder(pub String);

impl fmt::Display for UnknownOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot order movies by '{}', expected one of: {}",
            self.0,
            MovieOrder::ALLOWED.join(", ")
        )
    }
}

impl FromStr for MovieOrder {
    type Err = UnknownOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie_title" => Ok(Self::Title),
            "release_date" => Ok(Self::ReleaseDate),
            "rating" => Ok(Self::Rating),
            other => Err(UnknownOrder(other.to_string())),
        }
    }
}
