use std::collections::BTreeMap;

use crate::domain::AckEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unexpected root element: <{tag}>, expected <ack>")]
    UnexpectedRoot { tag: String },

    #[error("ack envelope is missing the \"{name}\" attribute")]
    MissingAttribute { name: &'static str },
}

/// Parse a ViaNett `<ack>` envelope.
///
/// All root attributes are copied into the envelope's flat field map; the
/// root element text, when present, is stored under
/// [`AckEnvelope::TEXT_KEY`]. The `errorcode` attribute is mandatory.
pub fn parse_ack(body: &str) -> Result<AckEnvelope, TransportError> {
    let doc = roxmltree::Document::parse(body)?;
    let root = doc.root_element();
    if root.tag_name().name() != "ack" {
        return Err(TransportError::UnexpectedRoot {
            tag: root.tag_name().name().to_owned(),
        });
    }

    let mut fields = BTreeMap::<String, String>::new();
    for attr in root.attributes() {
        fields.insert(attr.name().to_owned(), attr.value().to_owned());
    }
    if let Some(text) = root.text() {
        fields.insert(AckEnvelope::TEXT_KEY.to_owned(), text.to_owned());
    }

    let error_code = fields
        .get(AckEnvelope::ERROR_CODE_KEY)
        .cloned()
        .ok_or(TransportError::MissingAttribute {
            name: AckEnvelope::ERROR_CODE_KEY,
        })?;

    Ok(AckEnvelope::new(error_code, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ack_reads_attributes_and_text() {
        let envelope =
            parse_ack(r#"<?xml version="1.0"?><ack refno="1" errorcode="200">OK</ack>"#).unwrap();

        assert_eq!(envelope.error_code(), "200");
        assert_eq!(envelope.refno(), Some("1"));
        assert_eq!(envelope.text(), Some("OK"));

        let mut expected = BTreeMap::new();
        expected.insert("refno".to_owned(), "1".to_owned());
        expected.insert("errorcode".to_owned(), "200".to_owned());
        expected.insert("text".to_owned(), "OK".to_owned());
        assert_eq!(envelope.fields(), &expected);
    }

    #[test]
    fn parse_ack_keeps_unknown_attributes() {
        let envelope =
            parse_ack(r#"<ack refno="2" errorcode="200" operator="1">OK</ack>"#).unwrap();
        assert_eq!(envelope.get("operator"), Some("1"));
    }

    #[test]
    fn parse_ack_without_text_omits_the_text_field() {
        let envelope = parse_ack(r#"<ack refno="3" errorcode="200" />"#).unwrap();
        assert_eq!(envelope.text(), None);
        assert!(!envelope.fields().contains_key("text"));
    }

    #[test]
    fn parse_ack_rejects_wrong_root_tag() {
        let err = parse_ack(r#"<nack errorcode="200" />"#).unwrap_err();
        assert!(matches!(err, TransportError::UnexpectedRoot { tag } if tag == "nack"));
    }

    #[test]
    fn parse_ack_rejects_malformed_xml() {
        let err = parse_ack("not xml at all").unwrap_err();
        assert!(matches!(err, TransportError::Xml(_)));
    }

    #[test]
    fn parse_ack_requires_errorcode() {
        let err = parse_ack(r#"<ack refno="4" />"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingAttribute { name: "errorcode" }
        ));
    }
}
