use std::fmt::Write;

use ammonia::clean_text;

use crate::page::view::{CommentBody, CommentView, PageView};

/// Renders the page snapshot as an HTML fragment.
///
/// Every piece of text that came from the post or from a commenter goes
/// through `ammonia::clean_text`, which escapes all markup rather than
/// whitelisting some of it. Comments are shown verbatim, never interpreted.
pub fn render_page(view: &PageView) -> String {
    let PageView::Ready {
        post,
        action_bar,
        composer,
        comments,
    } = view
    else {
        return "<div>Loading...</div>".to_string();
    };

    let mut html = String::new();
    let button = action_bar.register_button;

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        concat!(
            "<main class=\"post-page\">",
            "<article class=\"post\">",
            "<span class=\"tag\">{tag}</span>",
            "<h1>{title}</h1>",
            "<p class=\"posted\">Posted on {created_at}</p>",
            "<p class=\"content\">{content}</p>",
            "<div class=\"actions\">",
            "<button class=\"upvote\" data-action=\"upvote\">Upvote {upvotes}</button>",
            "<button class=\"share\" data-action=\"share\">Share</button>",
            "<button class=\"register {color}\" data-action=\"toggle_registration\">",
            "<i class=\"icon-{icon}\"></i> <span>{label}</span></button>",
            "</div>",
            "</article>",
            "<section class=\"comments\">",
            "<h2>Comments</h2>",
            "<form class=\"composer\" data-action=\"submit_comment\">",
            "<label>{composer_label}</label>",
            "<input type=\"text\" name=\"content\" value=\"{draft}\">",
            "</form>"
        ),
        tag = clean_text(&post.tag),
        title = clean_text(&post.title),
        created_at = post.created_at.format("%Y-%m-%d"),
        content = clean_text(&post.content),
        upvotes = action_bar.upvotes,
        color = button.color,
        icon = button.icon,
        label = button.label,
        composer_label = composer.label,
        draft = clean_text(&composer.draft),
    );

    for comment in comments {
        render_comment(&mut html, comment);
    }

    html.push_str("</section></main>");
    html
}

fn render_comment(html: &mut String, comment: &CommentView) {
    let _ = write!(
        html,
        "<div class=\"comment\" data-id=\"{}\"><h3>{}</h3><p class=\"posted\">{}</p>",
        comment.id,
        clean_text(&comment.author),
        comment.created_at.format("%Y-%m-%d"),
    );

    match &comment.body {
        CommentBody::Reading { content } => {
            let _ = write!(
                html,
                "<p class=\"body\">{}</p><button data-action=\"edit_comment\">Edit</button>",
                clean_text(content),
            );
        }
        CommentBody::Editing { buffer } => {
            let _ = write!(
                html,
                concat!(
                    "<input type=\"text\" name=\"buffer\" value=\"{}\">",
                    "<button data-action=\"save_edit\">Save</button>",
                    "<button data-action=\"cancel_edit\">Cancel</button>"
                ),
                clean_text(buffer),
            );
        }
    }

    html.push_str("<button data-action=\"delete_comment\">Delete</button></div>");
}
