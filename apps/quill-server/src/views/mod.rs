//! Server-rendered HTML pages.

pub mod accounts;
pub mod admin;
pub mod posts;

use std::collections::HashMap;
use std::fmt::Write;

use quill_core::Action;
use quill_core::domain::Locale;

use crate::middleware::session::Viewer;

/// Author names keyed by user id.
pub type AuthorNames = HashMap<i64, String>;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text and keep its line breaks visible.
pub fn linebreaks(text: &str) -> String {
    escape(text).replace("\r\n", "\n").replace('\n', "<br>")
}

pub(crate) fn author_name(authors: &AuthorNames, id: i64) -> &str {
    authors.get(&id).map_or("(unknown)", String::as_str)
}

/// Wrap page content in the site chrome.
pub fn layout(title: &str, viewer: &Viewer, locale: Locale, content: &str) -> String {
    let lang = match locale {
        Locale::Ja => "ja",
        Locale::En => "en",
    };

    let mut nav = String::new();
    match viewer.identity() {
        Some(identity) => {
            if viewer.can(Action::NewPost) {
                nav.push_str(r#"<a href="/post/new/" class="top-menu">New post</a> "#);
            }
            if viewer.can(Action::BackOfficeIndex) {
                nav.push_str(r#"<a href="/admin/" class="top-menu">Admin</a> "#);
            }
            let _ = write!(
                nav,
                r#"<span class="user">{}</span> <form method="post" action="/accounts/logout/" class="logout"><button type="submit">Log out</button></form>"#,
                escape(&identity.username)
            );
        }
        None => nav.push_str(r#"<a href="/accounts/login/" class="top-menu">Log in</a>"#),
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title} | Quill</title>
</head>
<body>
<header class="page-header">
<nav>{nav}</nav>
<h1><a href="/">Quill</a></h1>
</header>
<main class="content">
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}
