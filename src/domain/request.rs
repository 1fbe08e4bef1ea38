use crate::domain::value::{
    Destination, MessageId, MessageText, Priority, ReplyWindowMinutes, SenderAddress,
    SenderAddressType,
};

#[derive(Debug, Clone, Default)]
/// Optional parameters for an outbound MT send.
///
/// Typed fields are applied to the form first; `extra` carries raw
/// vendor parameters which are layered on top and may override them.
/// `tel` and `msg` always come from the [`SendMessage`] itself and cannot be
/// overridden.
pub struct SendOptions {
    pub msgid: Option<MessageId>,
    pub sender_address: Option<SenderAddress>,
    pub sender_address_type: Option<SenderAddressType>,
    pub priority: Option<Priority>,
    pub reply_window: Option<ReplyWindowMinutes>,
    /// Raw vendor parameters, see the ViaNett CPA documentation.
    pub extra: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
/// An outbound MT ("mobile-terminated") send request.
pub struct SendMessage {
    destination: Destination,
    text: MessageText,
    options: SendOptions,
}

impl SendMessage {
    /// Build a send request for one destination.
    pub fn new(destination: Destination, text: MessageText, options: SendOptions) -> Self {
        Self {
            destination,
            text,
            options,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
