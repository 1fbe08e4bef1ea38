//! Domain layer: strong types with validation and invariants (no I/O).

mod inbound;
mod request;
mod response;
mod validation;
mod value;

pub use inbound::{DeliveryState, IncomingMessage, IncomingMeta, StatusReport};
pub use request::{SendMessage, SendOptions};
pub use response::AckEnvelope;
pub use validation::ValidationError;
pub use value::{
    Destination, MessageId, MessageText, Password, PhoneNumber, Priority, ReplyWindowMinutes,
    SenderAddress, SenderAddressType, Username,
};
