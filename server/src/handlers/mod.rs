use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::OfferingKind;
use crate::pricing::{
    build_offering_details, quote_tier_purchase, summarize_class, ClassSummary, OfferingContext,
};
use crate::state::AppState;
use crate::storage::OfferingSnapshot;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "marketplace-api",
    };

    success(payload, "Health check successful")
}

async fn published_event(state: &AppState, event_id: Uuid) -> Result<OfferingSnapshot, AppError> {
    state
        .store
        .offering_snapshot(event_id)
        .await?
        .filter(|snapshot| snapshot.offering.is_public(OfferingKind::Event))
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{}' was not found", event_id)))
}

pub async fn get_public_event_details(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let snapshot = published_event(&state, event_id).await?;
    let now = state.clock.now();

    let details =
        build_offering_details(&snapshot.offering, &snapshot.tiers, &snapshot.bundles, now);

    Ok(success(details, "Event details retrieved"))
}

pub async fn get_published_classes(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshots = state.store.published_class_snapshots().await?;
    let now = state.clock.now();

    let classes: Vec<ClassSummary> = snapshots
        .iter()
        .map(|snapshot| summarize_class(&snapshot.offering, &snapshot.tiers, now))
        .collect();

    tracing::debug!(count = classes.len(), "Listed published classes");
    Ok(success(classes, "Published classes retrieved"))
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub tier_id: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub invite_code: Option<String>,
}

pub async fn quote_ticket_purchase(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
    let snapshot = published_event(&state, event_id).await?;
    let tier = snapshot.tier(request.tier_id).ok_or_else(|| {
        AppError::NotFound(format!("Ticket tier '{}' was not found", request.tier_id))
    })?;

    let chain = match request.invite_code.as_deref().map(str::trim) {
        None => Vec::new(),
        Some("") => {
            return Err(AppError::ValidationError(
                "Invite code must not be blank".to_string(),
            ))
        }
        Some(code) => state
            .store
            .commission_chain(event_id, code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invite code '{}' was not found", code)))?,
    };

    let ctx = OfferingContext::for_offering(&snapshot.offering, state.clock.now());
    let quote = quote_tier_purchase(&ctx, tier, request.quantity, &chain, state.platform_fee_bps)?;

    Ok(success(quote, "Quote calculated"))
}
