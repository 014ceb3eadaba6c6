//! Login page.

use quill_core::domain::Locale;

use super::{escape, layout};
use crate::middleware::session::Viewer;

pub fn invalid_login_message(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "正しいユーザー名とパスワードを入力してください。",
        Locale::En => "Please enter a correct username and password.",
    }
}

pub fn login(
    viewer: &Viewer,
    locale: Locale,
    username: &str,
    next: &str,
    error: Option<&str>,
) -> String {
    let error = error
        .map(|message| format!(r#"<p class="errornote">{}</p>"#, escape(message)))
        .unwrap_or_default();

    let content = format!(
        r#"<h2>Log in</h2>
{error}
<form method="post" action="/accounts/login/" class="login-form">
<p><label for="id_username">Username:</label>
<input type="text" name="username" autofocus required id="id_username" value="{username}"></p>
<p><label for="id_password">Password:</label>
<input type="password" name="password" required id="id_password"></p>
<input type="hidden" name="next" value="{next}">
<button type="submit">Log in</button>
</form>"#,
        username = escape(username),
        next = escape(next),
    );

    layout("Log in", viewer, locale, &content)
}
