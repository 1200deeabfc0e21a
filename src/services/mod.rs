pub mod actor_service;
pub mod actor_service_impl;
pub use actor_service::{ActorError, ActorService};
pub use actor_service_impl::SeaOrmActorService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieService};
pub use movie_service_impl::SeaOrmMovieService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;
