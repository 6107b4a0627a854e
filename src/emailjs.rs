//! Outbound delivery through the EmailJS REST API.
//!
//! The service is an opaque capability: one POST, one resolution. The
//! original page never bounded the wait; here the request is raced against
//! a 15 second timeout so an unresponsive service cannot leave the form
//! stuck in the submitting state.

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use thiserror::Error;

use crate::form::TemplateParams;

const ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
const SERVICE_ID: &str = "service_9nsxp5c";
const TEMPLATE_ID: &str = "template_7nmscfu";
const PUBLIC_KEY: &str = "Dsc380ZTi-XwJa8kT";
const TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("building delivery request failed: {0}")]
    Request(String),
    #[error("delivery request failed: {0}")]
    Network(String),
    #[error("delivery request timed out after {TIMEOUT_MS} ms")]
    TimedOut,
    #[error("delivery service rejected the message: {status} {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Sends the contact message. Resolves exactly once; there is no retry and
/// no cancellation once the request is on the wire.
pub async fn send(params: TemplateParams) -> Result<(), DeliveryError> {
    let body = EmailJsRequest {
        service_id: SERVICE_ID,
        template_id: TEMPLATE_ID,
        user_id: PUBLIC_KEY,
        template_params: &params,
    };
    let request = Request::post(ENDPOINT)
        .json(&body)
        .map_err(|e| DeliveryError::Request(e.to_string()))?;

    let send = Box::pin(request.send());
    let timeout = Box::pin(TimeoutFuture::new(TIMEOUT_MS));
    let response = match select(send, timeout).await {
        Either::Left((result, _)) => {
            result.map_err(|e| DeliveryError::Network(e.to_string()))?
        }
        Either::Right(_) => return Err(DeliveryError::TimedOut),
    };

    if response.ok() {
        log::info!("delivery accepted with status {}", response.status());
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected { status, body })
    }
}
