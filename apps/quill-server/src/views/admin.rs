//! Back-office pages.

use std::fmt::Write;

use quill_core::Action;
use quill_core::domain::{Locale, Post};

use super::{AuthorNames, author_name, escape, layout};
use crate::middleware::session::Viewer;

pub fn index(viewer: &Viewer, locale: Locale) -> String {
    let content = if viewer.can(Action::BackOfficePosts) {
        r#"<h2>Site administration</h2>
<table class="app-blog module">
<caption>Blog</caption>
<tr class="model-post"><th scope="row"><a href="/admin/blog/post/">Posts</a></th></tr>
</table>"#
    } else {
        r#"<h2>Site administration</h2>
<p>You don't have permission to view or edit anything.</p>"#
    };

    layout("Site administration", viewer, locale, content)
}

pub fn post_changelist(
    viewer: &Viewer,
    locale: Locale,
    posts: &[Post],
    authors: &AuthorNames,
) -> String {
    let mut rows = String::new();
    for post in posts {
        let _ = writeln!(
            rows,
            r#"<tr><td class="field-id">{id}</td><td class="field-title"><a href="/post/{id}/">{title}</a></td><td class="field-author">{author}</td><td class="field-published">{published}</td></tr>"#,
            id = post.id,
            title = escape(&post.title),
            author = escape(author_name(authors, post.author_id)),
            published = post.published_at.to_rfc3339(),
        );
    }

    let content = format!(
        r#"<h2>Select post to change</h2>
<p class="paginator">{count} posts</p>
<table id="result_list">
<thead><tr><th>ID</th><th>Title</th><th>Author</th><th>Published</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        count = posts.len(),
    );

    layout("Posts | Site administration", viewer, locale, &content)
}
