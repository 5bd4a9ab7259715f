//! Query-string decoding.
//!
//! A request-target such as `/echo?message=Hi&lang=en` is split into the
//! clean path (`/echo`) and a key/value map. Values are kept exactly as they
//! arrived on the wire: no percent-decoding, no `+` to space translation.

use std::collections::HashMap;

/// Splits a raw request-target into its path and query parameters.
///
/// - Only the first `?` separates path from query.
/// - Pairs are separated by `&`; each pair splits on its first `=`.
/// - Pairs without an `=` are dropped.
/// - A repeated key keeps its last value.
///
/// Never fails. An empty target yields an empty path and no parameters.
///
/// ```
/// let (path, params) = barehttp::query::decode("/echo?message=Hi&flag");
/// assert_eq!(path, "/echo");
/// assert_eq!(params.get("message").map(String::as_str), Some("Hi"));
/// assert!(!params.contains_key("flag"));
/// ```
pub fn decode(target: &str) -> (String, HashMap<String, String>) {
    let mut params = HashMap::new();

    let Some((path, query)) = target.split_once('?') else {
        return (target.to_owned(), params);
    };

    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(key.to_owned(), value.to_owned());
        }
    }

    (path.to_owned(), params)
}
