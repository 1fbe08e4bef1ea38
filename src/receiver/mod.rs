//! Receiver layer: decodes ViaNett webhook callbacks into the generic
//! inbound models and produces the ack bodies the vendor expects.
//!
//! The decoders are pure functions over the webhook query map; mount them
//! behind whatever HTTP layer you use, or enable the `receiver` feature for
//! a ready-made axum router. A decode failure must surface as HTTP 500 so
//! that ViaNett redelivers the callback later.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::domain::{
    DeliveryState, IncomingMessage, IncomingMeta, StatusReport, ValidationError,
};

#[cfg(feature = "receiver")]
pub mod http;
#[cfg(feature = "receiver")]
pub use http::{HandlerError, InboundHandler, ReceiverState, router};

/// Fields every incoming-message webhook must carry.
const INCOMING_REQUIRED: [&str; 8] = [
    "sourceaddr",
    "message",
    "refno",
    "destinationaddr",
    "prefix",
    "retrycount",
    "operator",
    "replypathid",
];

fn required<'a>(
    params: &'a BTreeMap<String, String>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    params
        .get(field)
        .map(String::as_str)
        .ok_or(ValidationError::MissingField { field })
}

/// Decode an incoming (MO) message webhook query.
///
/// ViaNett always splits the first whitespace-delimited word of the message
/// into a separate `prefix` field, whether or not the integration uses
/// prefixes. With `use_prefix == false` the split is undone: the body
/// becomes `prefix + " " + message` (an empty side contributes nothing) and
/// the reported prefix is emptied. With `use_prefix == true` both fields are
/// passed through untouched.
///
/// `received_at` is the time of decoding.
pub fn decode_incoming_message(
    params: &BTreeMap<String, String>,
    use_prefix: bool,
) -> Result<IncomingMessage, ValidationError> {
    for field in INCOMING_REQUIRED {
        required(params, field)?;
    }

    let mut prefix = params["prefix"].clone();
    let mut body = params["message"].clone();
    if !use_prefix {
        body = [prefix.as_str(), body.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        prefix = String::new();
    }

    Ok(IncomingMessage {
        src: params["sourceaddr"].clone(),
        dst: params["destinationaddr"].clone(),
        body,
        msgid: params["refno"].clone(),
        received_at: Utc::now(),
        meta: IncomingMeta {
            prefix,
            retrycount: params["retrycount"].clone(),
            operator: params["operator"].clone(),
            replypathid: params["replypathid"].clone(),
        },
    })
}

/// Decode a delivery/status report webhook query.
///
/// Three report shapes exist, discriminated by `requesttype`:
///
/// - `notificationstatus`: `Status` is `DELIVRD` (delivered) or
///   `ACCEPTD`/`BUFFERD` (queued); anything else is a validation failure.
/// - `mtstatus` with an `ErrorCode` field (advanced operator report):
///   `ErrorCode == "200"` means delivered, anything else is an error.
/// - `mtstatus` without `ErrorCode` (simple operator report):
///   `errorcode == "0"` means delivered, anything else is an error.
///
/// Any other `requesttype` is a validation failure; there is no fallback.
/// The complete raw query is preserved in the report's `meta`, and
/// `received_at` is the time of decoding (the webhook's `now` field is
/// deliberately never parsed).
pub fn decode_status_report(
    params: &BTreeMap<String, String>,
) -> Result<StatusReport, ValidationError> {
    let requesttype = required(params, "requesttype")?;

    let (state, status_code, status_text) = match requesttype {
        "notificationstatus" => {
            let status = required(params, "Status")?;
            let description = required(params, "StatusDescription")?;
            let code = required(params, "StatusCode")?;

            let state = match status {
                "DELIVRD" => DeliveryState::Delivered,
                "ACCEPTD" | "BUFFERD" => DeliveryState::Accepted,
                other => {
                    return Err(ValidationError::UnknownDeliveryStatus {
                        value: other.to_owned(),
                    });
                }
            };
            (state, code.to_owned(), format!("{status}: {description}"))
        }
        "mtstatus" if params.contains_key("ErrorCode") => {
            let code = required(params, "ErrorCode")?;
            let description = required(params, "ErrorDescription")?;
            let status = required(params, "Status")?;
            let msg = required(params, "Msg")?;

            let state = if code == "200" {
                DeliveryState::Delivered
            } else {
                DeliveryState::Error
            };
            (
                state,
                code.to_owned(),
                format!("{description}: {status}: {msg}"),
            )
        }
        "mtstatus" => {
            let code = required(params, "errorcode")?;
            let msgok = params.get("msgok").map(String::as_str).unwrap_or("?");

            let state = if code == "0" {
                DeliveryState::Delivered
            } else {
                DeliveryState::Error
            };
            (state, code.to_owned(), format!("{code} and {msgok}"))
        }
        other => {
            return Err(ValidationError::UnknownRequestType {
                value: other.to_owned(),
            });
        }
    };

    Ok(StatusReport {
        msgid: required(params, "refno")?.to_owned(),
        received_at: Utc::now(),
        state,
        status_code,
        status_text,
        meta: params.clone(),
    })
}

/// Ack body for a handled incoming message.
pub fn incoming_ack(msgid: &str) -> String {
    format!(r#"<ack refno="{msgid}" errorcode="0" />"#)
}

/// Fixed ack body for a handled status report. The literal `refno` is not
/// echoed from the request; ViaNett tolerates this.
pub const STATUS_ACK: &str = r#"<?xml version="1.0"?><ack refno="1234" errorcode="0" />"#;
