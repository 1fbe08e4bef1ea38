//! Transport layer: wire-format details (form encoding, XML ack parsing).

mod ack;
mod mt;

pub use ack::{TransportError, parse_ack};
pub use mt::encode_mt_form;
