//! HTTP helpers for the Twilio webhook Lambda.

use lambda_http::{Body, Response};
use std::collections::HashMap;

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Later occurrences of a field replace earlier ones. Invalid UTF-8 in a
/// percent-encoded value is replaced rather than rejected.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

/// Render a TwiML document replying with a single message.
pub fn twiml_message(text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>{}</Message></Response>"#,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Create a `200 text/xml` TwiML response carrying `text`.
pub fn twiml_response(text: &str) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(200)
        .header("content-type", "text/xml")
        .body(Body::from(twiml_message(text)))
        .map_err(Box::new)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_twilio_body() {
        let form = parse_form(
            "ToCountry=GB&Body=25-12-2099+Christmas+party&From=%2B447700900123&NumMedia=0",
        );
        assert_eq!(form.get("Body").map(String::as_str), Some("25-12-2099 Christmas party"));
        assert_eq!(form.get("From").map(String::as_str), Some("+447700900123"));
        assert_eq!(form.len(), 4);
    }

    #[test]
    fn test_parse_form_last_occurrence_wins() {
        let form = parse_form("Body=first&Body=second");
        assert_eq!(form.get("Body").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_parse_form_edge_cases() {
        assert!(parse_form("").is_empty());

        let form = parse_form("&Flag&Body=caf%C3%A9+%26+bar&");
        assert_eq!(form.get("Flag").map(String::as_str), Some(""));
        assert_eq!(form.get("Body").map(String::as_str), Some("café & bar"));
    }

    #[test]
    fn test_parse_form_invalid_utf8_is_lossy() {
        let form = parse_form("Body=%FFok");
        assert_eq!(form.get("Body").map(String::as_str), Some("\u{FFFD}ok"));
    }

    #[test]
    fn test_twiml_message_escapes() {
        assert_eq!(
            twiml_message("Event 'Tom & Jerry <3' added."),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>Event &apos;Tom &amp; Jerry &lt;3&apos; added.</Message></Response>"#
        );
    }

    #[test]
    fn test_twiml_response_headers() {
        let response = twiml_response("hello").unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/xml");

        let body = std::str::from_utf8(response.body().as_ref()).unwrap().to_string();
        assert!(body.ends_with("<Response><Message>hello</Message></Response>"));
    }
}
