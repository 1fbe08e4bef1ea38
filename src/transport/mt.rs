use crate::domain::{
    Destination, MessageId, MessageText, Priority, ReplyWindowMinutes, SendMessage, SenderAddress,
    SenderAddressType,
};

/// Encode an MT send request into URL-encoded form parameters.
///
/// Merge order: typed options first, raw extras layered on top (extras may
/// override the typed values), then `tel`/`msg` which always come from the
/// request itself. `default_msgid` is used only when neither the typed
/// `msgid` nor the extras supplied one.
///
/// After merging, a non-numeric `SenderAddress` (ignoring one leading `+`)
/// forces `SenderAddressType` to the alphanumeric code, whatever the caller
/// asked for.
pub fn encode_mt_form(request: &SendMessage, default_msgid: &str) -> Vec<(String, String)> {
    let options = request.options();
    let mut params = Vec::<(String, String)>::new();

    if let Some(msgid) = options.msgid.as_ref() {
        set_param(&mut params, MessageId::FIELD, msgid.as_str().to_owned());
    }
    if let Some(sender) = options.sender_address.as_ref() {
        set_param(
            &mut params,
            SenderAddress::FIELD,
            sender.as_str().to_owned(),
        );
    }
    if let Some(sender_type) = options.sender_address_type {
        set_param(
            &mut params,
            SenderAddressType::FIELD,
            sender_type.code().to_owned(),
        );
    }
    if let Some(priority) = options.priority {
        set_param(&mut params, Priority::FIELD, priority.value().to_string());
    }
    if let Some(window) = options.reply_window {
        set_param(
            &mut params,
            ReplyWindowMinutes::FIELD,
            window.value().to_string(),
        );
    }

    for (key, value) in &options.extra {
        set_param(&mut params, key, value.clone());
    }

    set_param(
        &mut params,
        Destination::FIELD,
        request.destination().raw().to_owned(),
    );
    set_param(
        &mut params,
        MessageText::FIELD,
        request.text().as_str().to_owned(),
    );

    if !params.iter().any(|(key, _)| key == MessageId::FIELD) {
        set_param(&mut params, MessageId::FIELD, default_msgid.to_owned());
    }

    let needs_alphanumeric = params
        .iter()
        .find(|(key, _)| key == SenderAddress::FIELD)
        .is_some_and(|(_, value)| !SenderAddress::value_is_numeric(value));
    if needs_alphanumeric {
        set_param(
            &mut params,
            SenderAddressType::FIELD,
            SenderAddressType::Alphanumeric.code().to_owned(),
        );
    }

    params
}

/// Set a form parameter, replacing an existing value in place.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, existing)) => *existing = value,
        None => params.push((key.to_owned(), value)),
    }
}
