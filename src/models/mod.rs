pub mod actor;
pub mod movie;
pub mod user;

pub use actor::{Actor, ActorWithMovie, NewActor};
pub use movie::{Movie, MovieOrder, MovieSearch, MovieSummary, NewMovie, UnknownOrder};
pub use user::{Credentials, Identity, Session, User};
