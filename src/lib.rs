//! Typed Rust client and webhook decoders for the ViaNett SMS HTTP API.
//!
//! ViaNett speaks URL-encoded form requests and answers with a tiny XML
//! `<ack>` envelope. This crate keeps that protocol knowledge in three
//! layers: a domain layer of strong types, a transport layer for the
//! wire-format quirks, and a client layer orchestrating requests. On top of
//! those, [`provider`] adapts the client to a generic gateway error taxonomy
//! and [`receiver`] decodes the two inbound webhook callback shapes
//! (incoming messages and delivery reports).
//!
//! ```rust,no_run
//! use vianett::{Credentials, Destination, MessageText, SendMessage, SendOptions, VianettClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vianett::VianettError> {
//!     let client = VianettClient::new(Credentials::new("user", "secret")?);
//!     let request = SendMessage::new(
//!         Destination::new("+4790000000")?,
//!         MessageText::new("hello")?,
//!         SendOptions::default(),
//!     );
//!     let msgid = client.send_message(request).await?;
//!     println!("sent: {}", msgid.as_str());
//!     Ok(())
//! }
//! ```
//!
//! Enable the `receiver` feature for an axum router serving the `/im` and
//! `/status` webhook endpoints.
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod provider;
pub mod receiver;
mod transport;

pub use client::{ApiMethod, Credentials, VianettClient, VianettClientBuilder, VianettError};
pub use domain::{
    AckEnvelope, DeliveryState, Destination, IncomingMessage, IncomingMeta, MessageId, MessageText,
    Password, PhoneNumber, Priority, ReplyWindowMinutes, SendMessage, SendOptions, SenderAddress,
    SenderAddressType, StatusReport, Username, ValidationError,
};
pub use provider::{OutgoingMessage, ProviderError, ProviderOptions, VianettProvider};
pub use receiver::{STATUS_ACK, decode_incoming_message, decode_status_report, incoming_ack};
