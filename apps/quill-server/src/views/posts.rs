//! Post list, detail and form pages.

use std::fmt::Write;

use quill_core::Action;
use quill_core::domain::{FormErrors, Locale, Post, PostForm, TITLE_MAX_CHARS};

use super::{AuthorNames, author_name, escape, layout, linebreaks};
use crate::middleware::session::Viewer;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn list(viewer: &Viewer, locale: Locale, posts: &[Post], authors: &AuthorNames) -> String {
    let mut content = String::new();

    if posts.is_empty() {
        content.push_str(r#"<p class="empty">No posts yet.</p>"#);
    }

    for post in posts {
        let _ = write!(
            content,
            r#"<article class="post">
<time class="date">published: {published}</time>
<h2><a href="/post/{id}/">{title}</a></h2>
<p>{text}</p>
<p class="author">{author}</p>
</article>
"#,
            published = post.published_at.format(DATE_FORMAT),
            id = post.id,
            title = escape(&post.title),
            text = linebreaks(&post.text),
            author = escape(author_name(authors, post.author_id)),
        );
    }

    layout("Posts", viewer, locale, &content)
}

pub fn detail(viewer: &Viewer, locale: Locale, post: &Post, author: &str) -> String {
    let actions = if viewer.can(Action::EditPost) {
        format!(
            r#"<aside class="actions"><a class="btn" href="/post/{}/edit/">edit</a></aside>"#,
            post.id
        )
    } else {
        String::new()
    };

    let content = format!(
        r#"<article class="post">
{actions}
<time class="date">published: {published}</time>
<h2>{title}</h2>
<p>{text}</p>
<p class="author">{author}</p>
</article>"#,
        published = post.published_at.format(DATE_FORMAT),
        title = escape(&post.title),
        text = linebreaks(&post.text),
        author = escape(author),
    );

    layout(&post.title, viewer, locale, &content)
}

/// Create or edit form, with field errors from a rejected submission.
pub fn form(
    viewer: &Viewer,
    locale: Locale,
    heading: &str,
    form: &PostForm,
    errors: &FormErrors,
) -> String {
    let content = format!(
        r#"<h2>{heading}</h2>
<form method="post" class="post-form">
<p><label for="id_title">Title:</label>
{title_errors}<input type="text" name="title" maxlength="{max}" required id="id_title" value="{title}"></p>
<p><label for="id_text">Text:</label>
{text_errors}<textarea name="text" cols="40" rows="10" required id="id_text">{text}</textarea></p>
<button type="submit" class="save btn btn-default">Save</button>
</form>"#,
        heading = escape(heading),
        title_errors = error_list(errors, "title", locale),
        max = TITLE_MAX_CHARS,
        title = escape(&form.title),
        text_errors = error_list(errors, "text", locale),
        text = escape(&form.text),
    );

    layout(heading, viewer, locale, &content)
}

fn error_list(errors: &FormErrors, field: &str, locale: Locale) -> String {
    let field_errors = errors.get(field);
    if field_errors.is_empty() {
        return String::new();
    }

    let mut html = format!(r#"<ul class="errorlist" id="error_id_{field}">"#);
    for error in field_errors {
        let _ = write!(html, "<li>{}</li>", escape(&error.message(locale)));
    }
    html.push_str("</ul>\n");
    html
}
