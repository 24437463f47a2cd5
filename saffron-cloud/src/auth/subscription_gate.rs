//! Subscription access gate for menu mutations
//!
//! Decides per request whether the calling tenant currently holds a usable
//! subscription. Read-only: a stale `active` row whose end date has passed is
//! treated as unusable here and left for the sweeper to flip.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::auth::session::UserIdentity;
use crate::db;
use crate::db::restaurants::Restaurant;
use crate::db::subscriptions::{Subscription, pick_usable};
use crate::state::AppState;

/// Resolved tenant attached to the request once the gate passes
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub restaurant: Restaurant,
    pub subscription: Subscription,
}

/// Middleware guarding subscription-gated operations.
///
/// Must run AFTER `auth_middleware` (requires UserIdentity in extensions).
/// Rejects with `SubscriptionRequired` (403 + `subscription_expired` detail)
/// when no usable row exists; storage failures surface as a generic 500,
/// distinct from the business rejection.
pub async fn subscription_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = request
        .extensions()
        .get::<UserIdentity>()
        .cloned()
        .ok_or_else(|| AppError::new(ErrorCode::InternalError).into_response())?;

    let restaurant = db::restaurants::find_by_user(&state.pool, identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Subscription gate restaurant lookup failed");
            AppError::new(ErrorCode::InternalError).into_response()
        })?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound).into_response())?;

    let rows = db::subscriptions::list_for_restaurant(&state.pool, restaurant.id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Subscription gate ledger lookup failed");
            AppError::new(ErrorCode::InternalError).into_response()
        })?;

    let now = now_millis();
    let Some(subscription) = pick_usable(&rows, now).cloned() else {
        tracing::debug!(
            restaurant_id = restaurant.id,
            "Menu mutation rejected: no usable subscription"
        );
        return Err(AppError::subscription_required().into_response());
    };

    request.extensions_mut().insert(TenantContext {
        restaurant,
        subscription,
    });

    Ok(next.run(request).await)
}
