use crate::RenderableHeader;
use serde_json::{Value, json};

/// Render headers as HTTP header lines.
///
/// Format:
/// `{header-name}: {value}`
pub fn render_header_lines(headers: &[RenderableHeader]) -> Vec<String> {
    headers
        .iter()
        .map(|h| format!("{}: {}", h.kind.header_name(), h.value))
        .collect()
}

/// Render headers (and the nonce they share, if any) as a JSON object.
pub fn render_json(headers: &[RenderableHeader], nonce: Option<&str>) -> Value {
    let headers: Vec<Value> = headers
        .iter()
        .map(|h| {
            json!({
                "name": h.kind.header_name(),
                "kind": h.kind.as_str(),
                "value": h.value,
            })
        })
        .collect();

    json!({
        "headers": headers,
        "nonce": nonce,
    })
}
