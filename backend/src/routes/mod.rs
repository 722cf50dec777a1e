//! Route definitions for the Mycoforage platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    handlers,
    middleware::{auth_middleware, require_admin},
    AppState,
};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/foraging", foraging_routes(state.clone()))
        // Protected routes - journal
        .nest("/journal", journal_routes(state.clone()))
        // Protected routes - forum
        .nest("/forum", forum_routes(state.clone()))
        // Admin routes
        .nest("/admin", admin_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(handlers::auth::me))
        .route("/logout", post(handlers::auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .merge(protected)
}

/// Foraging routes; species and evaluate are public
fn foraging_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/conditions", get(handlers::foraging::check_conditions))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/species", get(handlers::foraging::list_species))
        .route("/evaluate", post(handlers::foraging::evaluate))
        .merge(protected)
}

/// Journal routes (protected)
fn journal_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/:entry_id",
            get(handlers::journal::get_entry)
                .put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Forum routes (protected)
fn forum_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::forum::list_posts).post(handlers::forum::create_post),
        )
        .route(
            "/posts/:post_id",
            get(handlers::forum::get_post).delete(handlers::forum::delete_post),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Admin routes (protected, admin only)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::admin::dashboard))
        .route("/users", get(handlers::admin::list_users))
        .route("/users/:user_id", delete(handlers::admin::delete_user))
        .route("/users/:user_id/role", put(handlers::admin::set_user_role))
        .route("/journal", get(handlers::admin::list_journal))
        .route("/journal/export", get(handlers::admin::export_journal))
        // Layers run bottom-up: authenticate first, then check the admin flag
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
