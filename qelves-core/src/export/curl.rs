//! cURL command rendering

use crate::events::{HeaderMap, NetworkEvent};

/// Headers curl computes or negotiates itself
const SKIPPED_HEADERS: [&str; 2] = ["content-length", "accept-encoding"];

/// Render an event's request as a copy-pasteable cURL command
///
/// Header values are emitted as captured. Use [`to_curl_with_headers`] when
/// the command leaves the machine.
pub fn to_curl(event: &NetworkEvent) -> String {
    to_curl_with_headers(event, &event.request_headers)
}

/// Render the request with `headers` in place of the captured ones
pub fn to_curl_with_headers(event: &NetworkEvent, headers: &HeaderMap) -> String {
    let mut command = format!("curl '{}'", event.url);
    command.push_str(&format!(" \\\n  -X {}", event.method));

    for (name, value) in headers {
        if SKIPPED_HEADERS
            .iter()
            .any(|skipped| name.eq_ignore_ascii_case(skipped))
        {
            continue;
        }
        command.push_str(&format!(" \\\n  -H '{}: {}'", name, value));
    }

    if let Some(body) = event.request_body_raw.as_deref().filter(|b| !b.is_empty()) {
        command.push_str(&format!(" \\\n  --data-raw '{}'", shell_quote_body(body)));
    }

    command.push_str(" \\\n  --compressed");
    command
}

/// Close the quote, emit an escaped quote, reopen: `'` becomes `'\''`
fn shell_quote_body(body: &str) -> String {
    body.replace('\'', r"'\''")
}
