//! API routes for saffron-cloud

pub mod admin;
pub mod auth;
pub mod health;
pub mod menu;
pub mod public;
pub mod subscription;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::auth::session::{admin_middleware, auth_middleware};
use crate::auth::subscription_gate::subscription_gate;
use crate::error::ServiceError;
use crate::state::AppState;

/// Handler result: JSON body or a service error translated at the boundary
pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public: no auth
    let open = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/public/menu/{slug}", get(public::get_public_menu))
        .route("/api/subscription/plans", get(subscription::list_plans))
        .route("/api/admin/create-admin", post(admin::create_admin));

    let register = Router::new()
        .route("/api/auth/register", post(auth::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Tenant session: JWT required
    let tenant = Router::new()
        .route("/api/auth/profile", get(auth::get_profile))
        .route("/api/menu", get(menu::get_menu))
        .route("/api/subscription", get(subscription::get_subscription))
        .route(
            "/api/subscription/create-order",
            post(subscription::create_order),
        )
        .route(
            "/api/subscription/verify-payment",
            post(subscription::verify_payment),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Menu mutations: JWT + active subscription
    let gated = Router::new()
        .route("/api/menu/categories", post(menu::create_category))
        .route(
            "/api/menu/categories/{id}",
            put(menu::update_category).delete(menu::delete_category),
        )
        .route("/api/menu/items", post(menu::create_item))
        .route(
            "/api/menu/items/{id}",
            put(menu::update_item).delete(menu::delete_item),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            subscription_gate,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin console: JWT + admin role
    let admin = Router::new()
        .route("/api/admin/restaurants", get(admin::list_restaurants))
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/subscriptions", get(admin::list_subscriptions))
        .route(
            "/api/admin/restaurants/{id}/extend-subscription",
            post(admin::extend_subscription),
        )
        .route(
            "/api/admin/restaurants/{id}/grant-free-month",
            post(admin::grant_free_month),
        )
        .route("/api/admin/subscription-plans", get(admin::list_plans))
        .route("/api/admin/subscription-plans/{id}", put(admin::update_plan))
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(open)
        .merge(register)
        .merge(login)
        .merge(tenant)
        .merge(gated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
