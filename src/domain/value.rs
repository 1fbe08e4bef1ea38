use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// ViaNett account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by ViaNett (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// ViaNett account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by ViaNett (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination number as sent to ViaNett (`tel`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 normalization, parse into [`PhoneNumber`] and convert it into
/// [`Destination`].
pub struct Destination(String);

impl Destination {
    /// Form field name used by ViaNett (`tel`).
    pub const FIELD: &'static str = "tel";

    /// Create a validated (non-empty) destination number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to ViaNett.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Destination {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Form field name used by ViaNett (`tel`).
    pub const FIELD: &'static str = "tel";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`msg`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by ViaNett (`msg`).
    pub const FIELD: &'static str = "msg";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message reference id (`msgid`).
///
/// Outbound requests may supply one; when they do not, the client derives one
/// from the current time (`YYYYMMDDHHMMSS`). Successful sends return the
/// ViaNett-assigned `refno` wrapped in this type.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Form field name used by ViaNett (`msgid`).
    pub const FIELD: &'static str = "msgid";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address (`SenderAddress`): a sender id or a phone number.
///
/// Invariant: non-empty after trimming.
pub struct SenderAddress(String);

impl SenderAddress {
    /// Form field name used by ViaNett (`SenderAddress`).
    pub const FIELD: &'static str = "SenderAddress";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this address is purely numeric (ignoring one leading `+`).
    ///
    /// Non-numeric addresses must be sent with
    /// [`SenderAddressType::Alphanumeric`].
    pub fn is_numeric(&self) -> bool {
        Self::value_is_numeric(&self.0)
    }

    /// Numeric check for a raw form value, see [`SenderAddress::is_numeric`].
    pub fn value_is_numeric(value: &str) -> bool {
        let digits = value.strip_prefix('+').unwrap_or(value);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Sender address type (`SenderAddressType`).
pub enum SenderAddressType {
    /// A regular phone number (wire code `1`).
    Msisdn,
    /// A short code (wire code `2`).
    ShortCode,
    /// An alphanumeric sender id (wire code `5`).
    Alphanumeric,
}

impl SenderAddressType {
    /// Form field name used by ViaNett (`SenderAddressType`).
    pub const FIELD: &'static str = "SenderAddressType";

    /// Wire code as sent to ViaNett.
    pub fn code(self) -> &'static str {
        match self {
            Self::Msisdn => "1",
            Self::ShortCode => "2",
            Self::Alphanumeric => "5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message priority (`Priority`): `0` is low, anything above is high.
pub struct Priority(u8);

impl Priority {
    /// Form field name used by ViaNett (`Priority`).
    pub const FIELD: &'static str = "Priority";

    /// Low priority.
    pub const LOW: Self = Self(0);
    /// High priority, used for escalated messages.
    pub const HIGH: Self = Self(1);

    /// Create a priority value (no range validation is performed).
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the underlying priority value.
    pub fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Reply window in minutes (`ReplyPathValue`).
///
/// How long ViaNett keeps the reply path open for two-way dialogue.
pub struct ReplyWindowMinutes(u32);

impl ReplyWindowMinutes {
    /// Form field name used by ViaNett (`ReplyPathValue`).
    pub const FIELD: &'static str = "ReplyPathValue";

    /// One day, the window used for reply-enabled messages.
    pub const ONE_DAY: Self = Self(24 * 60);

    /// Create a reply window value (no range validation is performed).
    pub fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Get the underlying window in minutes.
    pub fn value(self) -> u32 {
        self.0
    }
}
