use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Decode a request body according to its Content-Type.
/// An empty body decodes to an empty object so that intake reports the missing fields.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let ct = content_type.unwrap_or("application/json");

    if ct.contains("application/json") {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)
    } else {
        serde_json::from_slice(body)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}"))
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let map: Map<String, Value> = form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect();

    Ok(Value::Object(map))
}

pub fn is_multipart(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("multipart/form-data"))
}

/// Decode multipart form data. Only text fields are kept.
pub async fn parse_multipart(headers: &HeaderMap, body: bytes::Bytes) -> Result<Value, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut map = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        map.insert(name, Value::String(value));
    }

    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn json_booleans_survive() {
        let value = parse_body(
            Some("application/json; charset=utf-8"),
            br#"{"agree": false, "firstname": "Ada"}"#,
        )
        .unwrap();
        assert_eq!(value, json!({ "agree": false, "firstname": "Ada" }));
    }

    #[test]
    fn urlencoded_values_are_strings() {
        let value = parse_body(
            Some("application/x-www-form-urlencoded"),
            b"newsletter_email=a%40b.com&agree=on",
        )
        .unwrap();
        assert_eq!(value, json!({ "newsletter_email": "a@b.com", "agree": "on" }));
    }

    #[test]
    fn missing_content_type_means_json() {
        let value = parse_body(None, br#"{"name": "Bob"}"#).unwrap();
        assert_eq!(value["name"], "Bob");
        assert!(parse_body(None, b"{not json").is_err());
    }

    #[test]
    fn empty_body_is_an_empty_object() {
        assert_eq!(parse_body(Some("application/json"), b"").unwrap(), json!({}));
    }

    #[test]
    fn unknown_content_type_falls_back_to_urlencoded() {
        let value = parse_body(Some("text/plain"), b"name=Bob").unwrap();
        assert_eq!(value, json!({ "name": "Bob" }));
    }

    #[tokio::test]
    async fn multipart_text_fields() {
        let boundary = "X-BOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"newsletter_email\"\r\n\r\na@b.com\r\n--{boundary}--\r\n"
        );
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}")).unwrap(),
        );

        let value = parse_multipart(&headers, bytes::Bytes::from(body)).await.unwrap();
        assert_eq!(value, json!({ "newsletter_email": "a@b.com" }));
    }
}
