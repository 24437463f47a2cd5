//! Subscription endpoints: plans, current state, purchase flow
//!
//! Purchase is two-step: create-order hands the client a provider order,
//! verify-payment checks the callback signature and only then mutates the
//! ledger. A failed verification aborts before any write.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::auth::session::UserIdentity;
use crate::db;
use crate::db::plans::SubscriptionPlan;
use crate::db::restaurants::Restaurant;
use crate::db::subscriptions::{NewPeriod, Subscription, pick_usable};
use crate::state::AppState;

use super::ApiResult;

async fn require_restaurant(
    state: &AppState,
    identity: &UserIdentity,
) -> Result<Restaurant, AppError> {
    db::restaurants::find_by_user(&state.pool, identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Restaurant lookup failed");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
}

// ── GET /api/subscription/plans ──

pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Vec<SubscriptionPlan>> {
    let plans = db::plans::list_active(&state.pool).await?;
    Ok(Json(plans))
}

// ── GET /api/subscription ──

#[derive(serde::Serialize)]
pub struct SubscriptionOverview {
    pub active_subscription: Option<Subscription>,
    pub subscription_history: Vec<Subscription>,
}

pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<SubscriptionOverview> {
    let restaurant = require_restaurant(&state, &identity).await?;
    let history = db::subscriptions::list_for_restaurant(&state.pool, restaurant.id).await?;

    let now = now_millis();
    let active = pick_usable(&history, now).cloned();

    Ok(Json(SubscriptionOverview {
        active_subscription: active,
        subscription_history: history,
    }))
}

// ── POST /api/subscription/create-order ──

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub plan_id: i64,
}

pub async fn create_order(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<serde_json::Value> {
    if !state.razorpay.is_enabled() {
        return Err(AppError::new(ErrorCode::PaymentUnavailable).into());
    }

    let restaurant = require_restaurant(&state, &identity).await?;

    let plan = db::plans::find_active_by_id(&state.pool, req.plan_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let receipt = format!("sub_{}_{}", restaurant.id, now_millis());
    let order = state
        .razorpay
        .create_order(plan.price, "INR", &receipt)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Razorpay order creation failed");
            AppError::new(ErrorCode::PaymentOrderFailed)
        })?;

    Ok(Json(serde_json::json!({
        "order_id": order.order_id,
        "amount": order.amount,
        "currency": order.currency,
        "key_id": state.razorpay.key_id(),
        "plan": plan,
    })))
}

// ── POST /api/subscription/verify-payment ──

#[derive(Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub plan_id: i64,
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Json(req): Json<VerifyPaymentRequest>,
) -> ApiResult<serde_json::Value> {
    if !state.razorpay.is_enabled() {
        return Err(AppError::new(ErrorCode::PaymentUnavailable).into());
    }

    // Signature check comes first; nothing is written on a mismatch
    if !state.razorpay.verify_payment_signature(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    ) {
        tracing::warn!(
            order_id = %req.razorpay_order_id,
            "Payment signature verification failed"
        );
        return Err(AppError::new(ErrorCode::PaymentVerificationFailed).into());
    }

    let restaurant = require_restaurant(&state, &identity).await?;

    let plan = db::plans::find_active_by_id(&state.pool, req.plan_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PlanNotFound))?;

    let now = now_millis();
    let subscription = db::subscriptions::activate_period(
        &state.pool,
        &NewPeriod {
            restaurant_id: restaurant.id,
            plan_name: &plan.name,
            price: plan.price,
            duration_days: plan.duration_days,
            payment_method: "razorpay",
            transaction_id: Some(&req.razorpay_payment_id),
            now,
        },
    )
    .await?;

    tracing::info!(
        restaurant_id = restaurant.id,
        plan = %plan.name,
        transaction_id = %req.razorpay_payment_id,
        "Subscription activated via payment"
    );

    Ok(Json(serde_json::json!({
        "message": "Payment verified and subscription activated",
        "subscription": subscription,
    })))
}
