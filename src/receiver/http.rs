//! Ready-made axum endpoints for the ViaNett webhooks.
//!
//! Mount the [`router`] under your provider-specific prefix. Any decode or
//! handler failure answers HTTP 500 on purpose: ViaNett treats the callback
//! as undelivered and retries it later.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;

use crate::domain::{IncomingMessage, StatusReport};
use crate::receiver::{STATUS_ACK, decode_incoming_message, decode_status_report, incoming_ack};

/// Error type handlers may fail with; the response is HTTP 500 either way.
pub type HandlerError = Box<dyn StdError + Send + Sync>;

#[async_trait]
/// Ingestion hooks the gateway provides for decoded webhooks.
pub trait InboundHandler: Send + Sync {
    async fn receive_message(&self, message: IncomingMessage) -> Result<(), HandlerError>;
    async fn receive_status(&self, report: StatusReport) -> Result<(), HandlerError>;
}

#[derive(Clone)]
/// Per-router configuration: the prefix policy and the ingestion hooks.
pub struct ReceiverState {
    use_prefix: bool,
    handler: Arc<dyn InboundHandler>,
}

impl ReceiverState {
    pub fn new(use_prefix: bool, handler: Arc<dyn InboundHandler>) -> Self {
        Self {
            use_prefix,
            handler,
        }
    }
}

/// Build the webhook router with `GET /im` and `GET /status`.
pub fn router(state: ReceiverState) -> Router {
    Router::new()
        .route("/im", get(im))
        .route("/status", get(status))
        .with_state(state)
}

async fn im(
    State(state): State<ReceiverState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<String, StatusCode> {
    let message = decode_incoming_message(&params, state.use_prefix).map_err(|err| {
        tracing::warn!(error = %err, "rejected incoming message webhook");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let msgid = message.msgid.clone();

    state.handler.receive_message(message).await.map_err(|err| {
        tracing::error!(error = %err, msgid = %msgid, "incoming message handler failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(incoming_ack(&msgid))
}

async fn status(
    State(state): State<ReceiverState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<&'static str, StatusCode> {
    let report = decode_status_report(&params).map_err(|err| {
        tracing::warn!(error = %err, "rejected status webhook");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let msgid = report.msgid.clone();

    state.handler.receive_status(report).await.map_err(|err| {
        tracing::error!(error = %err, msgid = %msgid, "status handler failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(STATUS_ACK)
}
