use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The XML `<ack>` envelope returned by every ViaNett API call.
///
/// All root attributes are preserved in a flat field map; the element text,
/// when present, lands under the `text` key. `errorcode` is guaranteed to be
/// present (the transport layer rejects envelopes without it).
pub struct AckEnvelope {
    error_code: String,
    fields: BTreeMap<String, String>,
}

impl AckEnvelope {
    /// Key under which the root element text is stored.
    pub const TEXT_KEY: &'static str = "text";
    /// Attribute carrying the ViaNett result code.
    pub const ERROR_CODE_KEY: &'static str = "errorcode";
    /// Attribute carrying the ViaNett-assigned message reference number.
    pub const REFNO_KEY: &'static str = "refno";

    pub(crate) fn new(error_code: String, fields: BTreeMap<String, String>) -> Self {
        Self { error_code, fields }
    }

    /// The `errorcode` attribute. `"200"` means success for MT calls.
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// The `refno` attribute, if the envelope carries one.
    pub fn refno(&self) -> Option<&str> {
        self.get(Self::REFNO_KEY)
    }

    /// The root element text, if any.
    pub fn text(&self) -> Option<&str> {
        self.get(Self::TEXT_KEY)
    }

    /// Look up any envelope field by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The complete flat field map (attributes plus `text`).
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}
