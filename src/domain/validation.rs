use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    MissingField { field: &'static str },
    UnknownRequestType { value: String },
    UnknownDeliveryStatus { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::MissingField { field } => {
                write!(f, "webhook query is missing the \"{field}\" field")
            }
            Self::UnknownRequestType { value } => {
                write!(f, "unsupported requesttype: {value}")
            }
            Self::UnknownDeliveryStatus { value } => {
                write!(f, "unsupported notification status: {value}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
