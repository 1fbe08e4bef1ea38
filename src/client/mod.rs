//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    AckEnvelope, MessageId, Password, SendMessage, Username, ValidationError,
};

const DEFAULT_HOST: &str = "smsc.vianett.no";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// ViaNett API methods supported by this client.
///
/// Kept as a closed enum so endpoint selection is an explicit match with no
/// silent fallback.
pub enum ApiMethod {
    /// MT: mobile-terminated send (application to handset).
    Mt,
}

impl ApiMethod {
    /// Endpoint path on the ViaNett host.
    pub fn path(self) -> &'static str {
        match self {
            Self::Mt => "/V3/CPA/MT/MT.ashx",
        }
    }

    /// ViaNett's name for the method.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mt => "MT",
        }
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials sent with every ViaNett API call.
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Create validated credentials (both parts must be non-empty).
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((Username::FIELD.to_owned(), self.username.as_str().to_owned()));
        params.push((Password::FIELD.to_owned(), self.password.as_str().to_owned()));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VianettClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (envelope `errorcode != "200"`),
/// - validation/parse failures.
pub enum VianettError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// ViaNett reported an error in the ack envelope.
    #[error("vianett error #{code}: {message}")]
    Api { code: String, message: String },

    /// Response body was not a well-formed `<ack>` envelope.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`VianettClient`].
///
/// Use this when you need HTTPS, a host override, a timeout, or a custom
/// user-agent.
pub struct VianettClientBuilder {
    credentials: Credentials,
    https: bool,
    host: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VianettClientBuilder {
    /// Create a builder with the default host, plain HTTP, and no
    /// timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            https: false,
            host: DEFAULT_HOST.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Use HTTPS for outgoing requests.
    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Override the ViaNett hostname.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Without this, requests block for as long as the underlying transport
    /// allows; timeout policy is the caller's concern.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`VianettClient`].
    pub fn build(self) -> Result<VianettClient, VianettError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| VianettError::Transport(Box::new(err)))?;

        Ok(VianettClient {
            credentials: self.credentials,
            base_url: base_url(self.https, &self.host),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn base_url(https: bool, host: &str) -> String {
    let scheme = if https { "https" } else { "http" };
    format!("{scheme}://{host}")
}

#[derive(Clone)]
/// High-level ViaNett client.
///
/// This type orchestrates form encoding, the HTTP round trip, and ack
/// envelope parsing. By default it talks plain HTTP to `smsc.vianett.no`,
/// matching the vendor's documented endpoint; use
/// [`VianettClientBuilder::https`] to switch schemes.
///
/// The client holds no mutable per-call state, so one instance can be shared
/// freely across concurrent callers.
pub struct VianettClient {
    credentials: Credentials,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl VianettClient {
    /// Create a client using the default host and plain HTTP.
    ///
    /// For more customization, use [`VianettClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: base_url(false, DEFAULT_HOST),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> VianettClientBuilder {
        VianettClientBuilder::new(credentials)
    }

    /// Make a raw API call and return the parsed ack envelope.
    ///
    /// The credentials are merged into `params` automatically.
    ///
    /// Errors:
    /// - [`VianettError::Transport`] when the HTTP call itself fails,
    /// - [`VianettError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`VianettError::Parse`] when the body is not a well-formed `<ack>`,
    /// - [`VianettError::Api`] when the envelope reports `errorcode != "200"`.
    pub async fn api_request(
        &self,
        method: ApiMethod,
        params: Vec<(String, String)>,
    ) -> Result<AckEnvelope, VianettError> {
        let mut form = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut form);
        form.extend(params);

        let url = format!("{}{}", self.base_url, method.path());
        let response = self
            .http
            .post_form(&url, form)
            .await
            .map_err(VianettError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(VianettError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let envelope = crate::transport::parse_ack(&response.body)
            .map_err(|err| VianettError::Parse(Box::new(err)))?;

        if envelope.error_code() != "200" {
            return Err(VianettError::Api {
                code: envelope.error_code().to_owned(),
                message: envelope.text().unwrap_or_default().to_owned(),
            });
        }

        Ok(envelope)
    }

    /// Send an SMS message through ViaNett and return its message id.
    ///
    /// When the request supplies no `msgid` (typed or via extras), one is
    /// derived from the current local time as `YYYYMMDDHHMMSS`. The returned
    /// id is the `refno` assigned by ViaNett.
    ///
    /// See [`VianettClient::api_request`] for the error contract; a missing
    /// `refno` in a successful envelope surfaces as [`VianettError::Parse`].
    pub async fn send_message(&self, request: SendMessage) -> Result<MessageId, VianettError> {
        let default_msgid = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
        let params = crate::transport::encode_mt_form(&request, &default_msgid);

        let envelope = self.api_request(ApiMethod::Mt, params).await?;
        let refno = envelope.refno().ok_or_else(|| {
            VianettError::Parse(Box::new(crate::transport::TransportError::MissingAttribute {
                name: AckEnvelope::REFNO_KEY,
            }))
        })?;
        Ok(MessageId::new(refno)?)
    }
}


#[cfg(test)]
mod tests {
    use crate::domain::{Destination, MessageText, SendOptions};

    use super::testing::{FakeTransport, make_client};
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("kolypto", "1234").unwrap()
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn send_request() -> SendMessage {
        SendMessage::new(
            Destination::new("+123456").unwrap(),
            MessageText::new("hey").unwrap(),
            SendOptions::default(),
        )
    }

    #[tokio::test]
    async fn api_request_includes_credentials_and_parses_ack() {
        let transport = FakeTransport::new(
            200,
            r#"<?xml version="1.0"?><ack refno="1" errorcode="200">OK</ack>"#,
        );
        let client = make_client(credentials(), transport.clone());

        let envelope = client.api_request(ApiMethod::Mt, Vec::new()).await.unwrap();
        assert_eq!(envelope.refno(), Some("1"));
        assert_eq!(envelope.error_code(), "200");
        assert_eq!(envelope.text(), Some("OK"));

        let (url, params) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("http://example.invalid/V3/CPA/MT/MT.ashx")
        );
        assert_param(&params, "username", "kolypto");
        assert_param(&params, "password", "1234");
    }

    #[tokio::test]
    async fn api_request_maps_vendor_errorcode_to_api_error() {
        let transport = FakeTransport::new(
            200,
            r#"<?xml version="1.0"?><ack refno="2" errorcode="400">Fail</ack>"#,
        );
        let client = make_client(credentials(), transport);

        let err = client
            .api_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        match err {
            VianettError::Api { code, message } => {
                assert_eq!(code, "400");
                assert_eq!(message, "Fail");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_request_maps_non_success_http_status() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(credentials(), transport);

        let err = client
            .api_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VianettError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn api_request_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(credentials(), transport);

        let err = client
            .api_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VianettError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn api_request_maps_invalid_xml_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not xml }");
        let client = make_client(credentials(), transport);

        let err = client
            .api_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VianettError::Parse(_)));
    }

    #[tokio::test]
    async fn api_request_maps_transport_failure() {
        let transport = FakeTransport::failing("connection refused");
        let client = make_client(credentials(), transport);

        let err = client
            .api_request(ApiMethod::Mt, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VianettError::Transport(_)));
    }

    #[tokio::test]
    async fn send_message_returns_refno_and_fills_the_form() {
        let transport = FakeTransport::new(
            200,
            r#"<?xml version="1.0"?><ack refno="11111111" errorcode="200">OK</ack>"#,
        );
        let client = make_client(credentials(), transport.clone());

        let msgid = client.send_message(send_request()).await.unwrap();
        assert_eq!(msgid.as_str(), "11111111");

        let (_, params) = transport.last_request();
        assert_param(&params, "tel", "+123456");
        assert_param(&params, "msg", "hey");

        let generated = params
            .iter()
            .find(|(k, _)| k == "msgid")
            .map(|(_, v)| v.as_str())
            .unwrap();
        assert_eq!(generated.len(), 14);
        assert!(generated.bytes().all(|b| b.is_ascii_digit()));
    }

    #[tokio::test]
    async fn send_message_propagates_vendor_error() {
        let transport = FakeTransport::new(
            200,
            r#"<?xml version="1.0"?><ack refno="22222222" errorcode="400">FAIL</ack>"#,
        );
        let client = make_client(credentials(), transport);

        let err = client.send_message(send_request()).await.unwrap_err();
        assert!(matches!(err, VianettError::Api { code, .. } if code == "400"));
    }

    #[tokio::test]
    async fn send_message_requires_refno_in_the_envelope() {
        let transport = FakeTransport::new(200, r#"<ack errorcode="200">OK</ack>"#);
        let client = make_client(credentials(), transport);

        let err = client.send_message(send_request()).await.unwrap_err();
        assert!(matches!(err, VianettError::Parse(_)));
    }

    #[test]
    fn credentials_constructor_validates_inputs() {
        assert!(Credentials::new("   ", "pass").is_err());
        assert!(Credentials::new("user", "").is_err());
    }

    #[test]
    fn builder_scheme_and_host_overrides_are_applied() {
        let client = VianettClient::builder(credentials())
            .https(true)
            .build()
            .unwrap();
        assert_eq!(client.base_url, "https://smsc.vianett.no");

        let client = VianettClient::builder(credentials())
            .host("example.invalid")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://example.invalid");
    }

    #[test]
    fn api_method_resolves_to_a_fixed_path() {
        assert_eq!(ApiMethod::Mt.path(), "/V3/CPA/MT/MT.ashx");
        assert_eq!(ApiMethod::Mt.name(), "MT");
    }
}
