use gloo_net::http::Request;
use log::error;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::account::{AccountRecord, SiteInfoResponse};
use crate::config;
use crate::plan::{PlanPeriod, PlanType};

/// Failures of the site-info fetch. Any of these aborts reconciliation and
/// leaves the page in its pre-fetch hidden state.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response payload: {0}")]
    Payload(String),
}

/// A started payment flow and its redirect target. Lives only long enough to
/// populate the checkout modal.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub plan_type: PlanType,
    pub plan_period: PlanPeriod,
    pub redirect_url: String,
}

#[derive(Deserialize)]
struct CheckoutResponse {
    data: CheckoutData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutData {
    redirect_url: String,
}

/// Fetches the current site's account record. Single-shot: no retry, no
/// timeout beyond the transport default.
pub async fn fetch_account_info(token: &str) -> Result<AccountRecord, ApiError> {
    let response = Request::get(&config::site_info_url())
        .header("Authorization", &format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let payload: SiteInfoResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Payload(e.to_string()))?;
    Ok(payload.into())
}

/// Starts a checkout for the selected plan. Any failure (non-2xx, transport,
/// bad payload) is logged and reported as "no session"; the caller treats
/// that as a no-op.
pub async fn initiate_checkout(
    plan_type: PlanType,
    plan_period: &PlanPeriod,
    token: &str,
) -> Option<CheckoutSession> {
    let body = json!({ "plan": plan_type.as_str(), "period": plan_period.as_str() });

    let request = Request::post(&config::checkout_url())
        .header("Authorization", &format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .json(&body)
        .map_err(|e| error!("Error building checkout request: {}", e))
        .ok()?;

    let response = request
        .send()
        .await
        .map_err(|e| error!("Error initiating checkout: {}", e))
        .ok()?;

    if !response.ok() {
        error!("Error initiating checkout: status {}", response.status());
        return None;
    }

    let payload: CheckoutResponse = response
        .json()
        .await
        .map_err(|e| error!("Error parsing checkout response: {}", e))
        .ok()?;

    Some(CheckoutSession {
        plan_type,
        plan_period: plan_period.clone(),
        redirect_url: payload.data.redirect_url,
    })
}
