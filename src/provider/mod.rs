//! Provider layer: adapts [`VianettClient`] to a generic gateway's message
//! model and error taxonomy.

use crate::client::{ApiMethod, VianettClient, VianettError};
use crate::domain::{
    AckEnvelope, Destination, MessageId, MessageText, Priority, ReplyWindowMinutes, SendMessage,
    SendOptions, SenderAddress,
};

#[derive(Debug, Clone, Default)]
/// Gateway-level options understood by this provider.
pub struct ProviderOptions {
    /// Sender id override; wins over the message source address.
    pub sender_id: Option<String>,
    /// Send with high priority.
    pub escalate: bool,
    /// Keep the reply path open so the recipient can answer.
    pub allow_reply: bool,
}

#[derive(Debug, Clone)]
/// A generic outbound message as the gateway hands it to providers.
pub struct OutgoingMessage {
    /// Source address, used as the sender address when set.
    pub src: Option<String>,
    /// Destination number.
    pub dst: String,
    /// Message text.
    pub body: String,
    /// Provider-assigned message id, filled in by [`VianettProvider::send`].
    pub msgid: Option<MessageId>,
    pub provider_options: ProviderOptions,
    /// Raw ViaNett parameters forwarded as-is; these override the computed
    /// provider options but never `tel`/`msg`.
    pub provider_params: Vec<(String, String)>,
}

impl OutgoingMessage {
    pub fn new(dst: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            src: None,
            dst: dst.into(),
            body: body.into(),
            msgid: None,
            provider_options: ProviderOptions::default(),
            provider_params: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Generic provider error taxonomy.
///
/// Every failure a send or raw request can produce maps into exactly one of
/// these kinds. Unexpected runtime faults (panics) are not reclassified.
pub enum ProviderError {
    /// Malformed or unparseable vendor response, or an invalid request value.
    #[error("request error: {0}")]
    Request(String),

    /// The connection to the vendor failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// The vendor answered with an HTTP-level failure.
    #[error("message send error: {0}")]
    Send(String),

    /// ViaNett reported a business error in the ack envelope.
    #[error("vianett error #{code}: {message}")]
    Vianett { code: String, message: String },
}

#[derive(Clone)]
/// ViaNett provider: the generic-gateway-facing façade.
pub struct VianettProvider {
    client: VianettClient,
    use_prefix: bool,
}

impl VianettProvider {
    /// Create a provider around an existing client.
    ///
    /// `use_prefix`: whether incoming messages use the ViaNett prefix
    /// feature. ViaNett splits every incoming message on the first space and
    /// puts the first word into a separate `prefix` field; when the
    /// integration does not use prefixes, pass `false` so the split is
    /// undone during decoding.
    pub fn new(client: VianettClient, use_prefix: bool) -> Self {
        Self { client, use_prefix }
    }

    /// Whether incoming-message decoding should keep the vendor's prefix
    /// split. Hand this to [`crate::receiver::decode_incoming_message`].
    pub fn use_prefix(&self) -> bool {
        self.use_prefix
    }

    /// Send a message and store the ViaNett-assigned id back on it.
    pub async fn send(&self, message: &mut OutgoingMessage) -> Result<MessageId, ProviderError> {
        let mut options = SendOptions::default();
        if let Some(src) = message.src.as_deref() {
            options.sender_address = Some(SenderAddress::new(src).map_err(map_validation)?);
        }
        if let Some(sender_id) = message.provider_options.sender_id.as_deref() {
            options.sender_address = Some(SenderAddress::new(sender_id).map_err(map_validation)?);
        }
        if message.provider_options.escalate {
            options.priority = Some(Priority::HIGH);
        }
        if message.provider_options.allow_reply {
            options.reply_window = Some(ReplyWindowMinutes::ONE_DAY);
        }
        options.extra = message.provider_params.clone();

        let request = SendMessage::new(
            Destination::new(&message.dst).map_err(map_validation)?,
            MessageText::new(&message.body).map_err(map_validation)?,
            options,
        );

        let msgid = self
            .client
            .send_message(request)
            .await
            .map_err(map_client_error)?;
        message.msgid = Some(msgid.clone());
        Ok(msgid)
    }

    /// Raw request to the ViaNett API, with the same error mapping as
    /// [`VianettProvider::send`].
    pub async fn raw_request(
        &self,
        method: ApiMethod,
        params: Vec<(String, String)>,
    ) -> Result<AckEnvelope, ProviderError> {
        self.client
            .api_request(method, params)
            .await
            .map_err(map_client_error)
    }
}

fn map_validation(err: crate::domain::ValidationError) -> ProviderError {
    ProviderError::Request(err.to_string())
}

fn map_client_error(err: VianettError) -> ProviderError {
    match err {
        VianettError::Transport(source) => ProviderError::Connection(source.to_string()),
        VianettError::HttpStatus { status, .. } => {
            ProviderError::Send(format!("HTTP status {status}"))
        }
        VianettError::Parse(source) => ProviderError::Request(source.to_string()),
        VianettError::Validation(source) => ProviderError::Request(source.to_string()),
        VianettError::Api { code, message } => ProviderError::Vianett { code, message },
    }
}

#[cfg(test)]
mod tests {
    use crate::client::Credentials;
    use crate::client::testing::{FakeTransport, make_client};

    use super::*;

    fn provider(transport: FakeTransport) -> VianettProvider {
        let client = make_client(Credentials::new("kolypto", "1234").unwrap(), transport);
        VianettProvider::new(client, true)
    }

    fn ack(refno: &str, errorcode: &str, text: &str) -> String {
        format!(r#"<?xml version="1.0"?><ack refno="{refno}" errorcode="{errorcode}">{text}</ack>"#)
    }

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn send_stores_the_assigned_msgid_on_the_message() {
        let transport = FakeTransport::new(200, ack("11111111", "200", "OK"));
        let provider = provider(transport.clone());

        let mut message = OutgoingMessage::new("+123456", "hey");
        let msgid = provider.send(&mut message).await.unwrap();

        assert_eq!(msgid.as_str(), "11111111");
        assert_eq!(message.msgid.as_ref().unwrap().as_str(), "11111111");

        let (_, params) = transport.last_request();
        assert_eq!(value_of(&params, "tel"), Some("+123456"));
        assert_eq!(value_of(&params, "msg"), Some("hey"));
        assert_eq!(value_of(&params, "SenderAddress"), None);
    }

    #[tokio::test]
    async fn send_uses_src_as_sender_address() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport.clone());

        let mut message = OutgoingMessage::new("+123456", "hey");
        message.src = Some("+4790000000".to_owned());
        provider.send(&mut message).await.unwrap();

        let (_, params) = transport.last_request();
        assert_eq!(value_of(&params, "SenderAddress"), Some("+4790000000"));
        assert_eq!(value_of(&params, "SenderAddressType"), None);
    }

    #[tokio::test]
    async fn sender_id_option_wins_over_src_and_forces_alphanumeric() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport.clone());

        let mut message = OutgoingMessage::new("+123456", "hey");
        message.src = Some("+4790000000".to_owned());
        message.provider_options.sender_id = Some("MyShop".to_owned());
        provider.send(&mut message).await.unwrap();

        let (_, params) = transport.last_request();
        assert_eq!(value_of(&params, "SenderAddress"), Some("MyShop"));
        assert_eq!(value_of(&params, "SenderAddressType"), Some("5"));
    }

    #[tokio::test]
    async fn escalate_and_allow_reply_map_to_vendor_params() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport.clone());

        let mut message = OutgoingMessage::new("+123456", "hey");
        message.provider_options.escalate = true;
        message.provider_options.allow_reply = true;
        provider.send(&mut message).await.unwrap();

        let (_, params) = transport.last_request();
        assert_eq!(value_of(&params, "Priority"), Some("1"));
        assert_eq!(value_of(&params, "ReplyPathValue"), Some("1440"));
    }

    #[tokio::test]
    async fn provider_params_override_computed_options() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport.clone());

        let mut message = OutgoingMessage::new("+123456", "hey");
        message.provider_options.escalate = true;
        message.provider_params = vec![("Priority".to_owned(), "0".to_owned())];
        provider.send(&mut message).await.unwrap();

        let (_, params) = transport.last_request();
        assert_eq!(value_of(&params, "Priority"), Some("0"));
    }

    #[tokio::test]
    async fn vendor_error_maps_to_vianett_provider_error() {
        let transport = FakeTransport::new(200, ack("22222222", "400", "FAIL"));
        let provider = provider(transport);

        let mut message = OutgoingMessage::new("+123456", "hey");
        let err = provider.send(&mut message).await.unwrap_err();
        match err {
            ProviderError::Vianett { code, message } => {
                assert_eq!(code, "400");
                assert_eq!(message, "FAIL");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(message.msgid.is_none());
    }

    #[tokio::test]
    async fn http_failure_maps_to_send_error() {
        let transport = FakeTransport::new(502, "bad gateway");
        let provider = provider(transport);

        let mut message = OutgoingMessage::new("+123456", "hey");
        let err = provider.send(&mut message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Send(_)));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_connection_error() {
        let transport = FakeTransport::failing("connection refused");
        let provider = provider(transport);

        let mut message = OutgoingMessage::new("+123456", "hey");
        let err = provider.send(&mut message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Connection(_)));
    }

    #[tokio::test]
    async fn malformed_response_maps_to_request_error() {
        let transport = FakeTransport::new(200, "garbage");
        let provider = provider(transport);

        let err = provider
            .raw_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }

    #[tokio::test]
    async fn invalid_message_maps_to_request_error() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport);

        let mut message = OutgoingMessage::new("  ", "hey");
        let err = provider.send(&mut message).await.unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }

    #[tokio::test]
    async fn raw_request_returns_the_envelope_fields() {
        let transport = FakeTransport::new(200, ack("1", "200", "OK"));
        let provider = provider(transport);

        let envelope = provider
            .raw_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap();
        assert_eq!(envelope.get("refno"), Some("1"));
        assert_eq!(envelope.get("errorcode"), Some("200"));
        assert_eq!(envelope.get("text"), Some("OK"));
    }
}
