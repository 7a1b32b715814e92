use axum::{debug_handler, http::header, response::{Html, IntoResponse}};

use crate::db::User;

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

#[debug_handler]
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_res!(str, "/static/app.js"),
    )
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // writing into a String cannot fail
    let _ = pulldown_cmark_escape::escape_html(&mut out, s);
    out
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder stays literal. Unknown placeholders are left as they are.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Wraps `content` in the site layout. `content` must already be escaped.
pub fn page(
    title: &str,
    current_user: Option<&User>,
    flashes: &[String],
    content: &str,
) -> Html<String> {
    let nav = match current_user {
        Some(user) => fill(
            include_res!(str, "/pages/nav_user.html"),
            &[("username", escape(&user.username).as_str())],
        ),
        None => include_res!(str, "/pages/nav_guest.html").to_owned(),
    };

    let flashes: String = flashes
        .iter()
        .map(|msg| format!("<li class=\"flash\">{}</li>", escape(msg)))
        .collect();

    Html(fill(
        include_res!(str, "/pages/layout.html"),
        &[
            ("title", escape(title).as_str()),
            ("nav", nav.as_str()),
            ("flashes", flashes.as_str()),
            ("content", content),
        ],
    ))
}
