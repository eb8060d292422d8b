//! Server-rendered HTML pages with snippet injection.
//!
//! Post bodies and snippet code are trusted admin input and are emitted
//! verbatim. Everything else goes through [`escape_html`].

use chrono::{DateTime, Utc};

use verse_core::domain::snippet::{joined, select};
use verse_core::domain::{CodeSnippet, Page, Post, SnippetLocation};

const SITE_NAME: &str = "BloggerVerse";

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn display_date(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// Head snippets, one node each. `postHeader` only appears on post pages.
fn head_snippets(snippets: &[CodeSnippet], on_post: bool) -> String {
    let mut out = String::new();
    let locations = SnippetLocation::ALL
        .into_iter()
        .filter(|l| l.is_head())
        .filter(|l| on_post || *l != SnippetLocation::PostHeader);
    for location in locations {
        for code in select(snippets, location) {
            out.push_str(code);
            out.push('\n');
        }
    }
    out
}

/// Body snippets as one block wrapped in a marker element.
fn body_block(snippets: &[CodeSnippet], location: SnippetLocation) -> String {
    match joined(snippets, location) {
        Some(code) => format!(
            "<div data-snippet-location=\"{}\">{}</div>\n",
            location.as_str(),
            code
        ),
        None => String::new(),
    }
}

fn layout(title: &str, head: &str, main: &str, snippets: &[CodeSnippet]) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         {head}\
         </head>\n\
         <body>\n\
         <header><a href=\"/\">{SITE_NAME}</a></header>\n\
         <main>\n{main}</main>\n\
         <footer><p>&copy; {year} {SITE_NAME}</p></footer>\n\
         {footer}\
         </body>\n\
         </html>\n",
        title = escape_html(title),
        year = Utc::now().format("%Y"),
        footer = body_block(snippets, SnippetLocation::GlobalFooter),
    )
}

fn post_card(post: &Post) -> String {
    let mut meta = format!(
        "By {} on {}",
        escape_html(&post.author.name),
        display_date(&post.created_at)
    );
    if let Some(category) = &post.category {
        meta.push_str(&format!(" in {}", escape_html(category)));
    }

    let image = match &post.featured_image {
        Some(src) => format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape_html(src),
            escape_html(&post.title)
        ),
        None => String::new(),
    };

    format!(
        "<article class=\"post-card\">\n\
         {image}\
         <h2><a href=\"/posts/{slug}\">{title}</a></h2>\n\
         <p class=\"meta\">{meta}</p>\n\
         <p>{excerpt}</p>\n\
         </article>\n",
        slug = escape_html(&post.slug),
        title = escape_html(&post.title),
        excerpt = escape_html(&post.excerpt),
    )
}

fn pagination(page: &Page<Post>) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }

    let mut out = String::from("<nav class=\"pagination\">\n");
    if page.current_page > 1 {
        out.push_str(&format!(
            "<a href=\"/?page={}\">Previous</a>\n",
            page.current_page - 1
        ));
    }
    out.push_str(&format!(
        "<span>Page {} of {}</span>\n",
        page.current_page, page.total_pages
    ));
    if page.current_page < page.total_pages {
        out.push_str(&format!(
            "<a href=\"/?page={}\">Next</a>\n",
            page.current_page + 1
        ));
    }
    out.push_str("</nav>\n");
    out
}

/// The paginated home listing.
pub fn home_page(page: &Page<Post>, snippets: &[CodeSnippet]) -> String {
    let mut main = String::from("<h1>Latest Posts</h1>\n");

    if page.items.is_empty() {
        main.push_str("<p>No posts found. Check back later!</p>\n");
    } else {
        main.push_str("<section class=\"posts\">\n");
        for post in &page.items {
            main.push_str(&post_card(post));
        }
        main.push_str("</section>\n");
    }
    main.push_str(&pagination(page));

    let head = head_snippets(snippets, false);
    layout(SITE_NAME, &head, &main, snippets)
}

/// A single post with every post-level snippet location filled.
pub fn post_page(post: &Post, snippets: &[CodeSnippet]) -> String {
    let mut main = String::from("<article class=\"post\">\n");
    main.push_str(&format!("<h1>{}</h1>\n", escape_html(&post.title)));
    main.push_str(&format!(
        "<p class=\"meta\">By {} on {}</p>\n",
        escape_html(&post.author.name),
        display_date(&post.created_at)
    ));
    if let Some(src) = &post.featured_image {
        main.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape_html(src),
            escape_html(&post.title)
        ));
    }

    main.push_str(&body_block(snippets, SnippetLocation::BeforePostContent));
    main.push_str(&format!(
        "<div class=\"post-content\">\n{}\n</div>\n",
        post.content
    ));
    main.push_str(&body_block(snippets, SnippetLocation::AfterPostContent));

    if !post.tags.is_empty() {
        main.push_str("<ul class=\"tags\">\n");
        for tag in &post.tags {
            main.push_str(&format!("<li>{}</li>\n", escape_html(tag)));
        }
        main.push_str("</ul>\n");
    }
    main.push_str("</article>\n");
    main.push_str(&body_block(snippets, SnippetLocation::PostFooter));

    let head = head_snippets(snippets, true);
    let title = format!("{} | {}", post.title, SITE_NAME);
    layout(&title, &head, &main, snippets)
}

/// Shown for unknown slugs.
pub fn not_found_page(snippets: &[CodeSnippet]) -> String {
    let main = "<h1>Post not found</h1>\n\
                <p>The post you are looking for does not exist.</p>\n\
                <p><a href=\"/\">Back to all posts</a></p>\n";
    let head = head_snippets(snippets, false);
    layout("Not Found", &head, main, snippets)
}
