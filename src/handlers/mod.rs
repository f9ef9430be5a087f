// Resource handlers for the movies and comments collections.
//
// Every route shares one CRUD contract implemented generically in `resource`;
// `movies` and `comments` only supply the collection, messages and payloads.
// Verbs a route does not list fall through to the fixed 405 response. HEAD is
// registered explicitly; axum otherwise routes it to the GET handler.

pub mod comments;
pub mod health;
pub mod movies;
pub mod resource;

use axum::{
    routing::{get, MethodRouter},
    Router,
};

use crate::state::AppState;

pub use comments::Comments;
pub use health::health;
pub use movies::Movies;
pub use resource::{method_not_allowed, Resource};

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Movies collection
        .route(
            "/movies",
            get(resource::list::<Movies>)
                .head(method_not_allowed)
                .post(resource::create::<Movies>)
                .fallback(method_not_allowed),
        )
        // Comments of one movie
        .route(
            "/movie/comments",
            get(comments::list_for_movie)
                .head(method_not_allowed)
                .post(resource::create::<Comments>)
                .fallback(method_not_allowed),
        )
        // Single documents; the bare trailing-slash form has no id and answers 400
        .route("/movie/", by_id::<Movies>())
        .route("/movie/:id", by_id::<Movies>())
        .route("/movie/comment/", by_id::<Comments>())
        .route("/movie/comment/:id", by_id::<Comments>())
}

fn by_id<R: Resource>() -> MethodRouter<AppState> {
    get(resource::show::<R>)
        .head(method_not_allowed)
        .put(resource::update::<R>)
        .delete(resource::remove::<R>)
        .fallback(method_not_allowed)
}
