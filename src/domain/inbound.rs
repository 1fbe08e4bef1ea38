use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Metadata fields ViaNett attaches to every incoming MO message.
pub struct IncomingMeta {
    /// The first word of the message as split off by ViaNett. Empty when the
    /// integration does not use prefixes and the split has been undone.
    pub prefix: String,
    /// How many times ViaNett has tried to deliver this callback.
    pub retrycount: String,
    /// Operator id (1 is Telenor Mobile, 2 is NetCom, and so on).
    pub operator: String,
    /// Reply path id, only meaningful for two-way dialogue.
    pub replypathid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An incoming (MO) message decoded from the `/im` webhook.
pub struct IncomingMessage {
    /// Originator number (`sourceaddr`).
    pub src: String,
    /// Destination number (`destinationaddr`).
    pub dst: String,
    /// Message body (`message`, recombined with the prefix when prefixes are
    /// not in use).
    pub body: String,
    /// ViaNett message reference number (`refno`).
    pub msgid: String,
    /// When the webhook was decoded.
    pub received_at: DateTime<Utc>,
    pub meta: IncomingMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Terminal classification of a delivery report.
///
/// Exactly one state is assigned per report. `Expired` is part of the
/// taxonomy for completeness; no known ViaNett payload produces it.
pub enum DeliveryState {
    /// Queued by the operator (`ACCEPTD` / `BUFFERD`).
    Accepted,
    /// Delivered to the terminal.
    Delivered,
    /// Expired before delivery.
    Expired,
    /// Delivery failed.
    Error,
}

impl DeliveryState {
    /// Whether the message has at least been accepted by the operator.
    ///
    /// This is a superset flag: delivered messages are accepted too.
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted | Self::Delivered)
    }

    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }

    pub fn is_expired(self) -> bool {
        matches!(self, Self::Expired)
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A delivery/status report decoded from the `/status` webhook.
pub struct StatusReport {
    /// ViaNett message reference number (`refno`).
    pub msgid: String,
    /// When the webhook was decoded. The webhook's own `now` field is kept in
    /// `meta` but never parsed into this timestamp.
    pub received_at: DateTime<Utc>,
    pub state: DeliveryState,
    /// Vendor status code; its namespace depends on the report shape.
    pub status_code: String,
    /// Human-readable status line; its format depends on the report shape.
    pub status_text: String,
    /// The complete raw webhook query, unmodified.
    pub meta: BTreeMap<String, String>,
}
