//! Starting data for a fresh site.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Post, SiteSettings, User, UserDirectory};

/// Id of the designated admin in the seed directory.
pub const ADMIN_USER_ID: &str = "1";

pub fn users() -> UserDirectory {
    UserDirectory::new(
        vec![
            User::new(ADMIN_USER_ID, "xay", "vanchhaydok@gmail.com"),
            User::new("2", "Bob The Builder", "bob@example.com"),
            User::new("3", "Charlie Chaplin", "charlie@example.com"),
        ],
        ADMIN_USER_ID,
    )
}

pub fn settings() -> SiteSettings {
    SiteSettings {
        ads_txt_content: "google.com, pub-YOUR_ADSENSE_PUBLISHER_ID, DIRECT, f08c47fec0942fa0\n\
                          # Add other ad network entries here"
            .to_string(),
        snippets: Vec::new(),
    }
}

/// The two launch posts. Authors that are missing from `users` are skipped
/// along with their posts.
pub fn posts(users: &UserDirectory) -> Vec<Post> {
    let mut posts = Vec::new();

    if let Some(author) = users.find(ADMIN_USER_ID) {
        posts.push(Post {
            id: 1,
            slug: "first-amazing-post".to_string(),
            title: "My First Amazing Post on BloggerVerse".to_string(),
            content: "<p>This is the <strong>full content</strong> of my first amazing post. \
                      It's a great day to start blogging on BloggerVerse!</p>\n\
                      <h2>Getting Started</h2>\n\
                      <p>Think about what topics you're knowledgeable or enthusiastic about, \
                      and what insights others might find valuable.</p>\n\
                      <h2>Engaging Your Audience</h2>\n\
                      <p>Respond to comments, ask questions, and build a community around \
                      your blog.</p>\n<p>Happy blogging!</p>"
                .to_string(),
            author: author.clone(),
            created_at: at(2024, 1, 15, 10, 0),
            updated_at: at(2024, 1, 16, 12, 30),
            featured_image: Some("https://placehold.co/600x400.png".to_string()),
            excerpt: "Join me as I embark on my blogging journey with BloggerVerse. \
                      Discover tips and tricks for new bloggers."
                .to_string(),
            category: Some("Technology".to_string()),
            tags: vec!["blogging".into(), "tech".into(), "writing".into()],
        });
    }

    if let Some(author) = users.find("2") {
        posts.push(Post {
            id: 2,
            slug: "exploring-the-mountains".to_string(),
            title: "Exploring the Serene Beauty of the Mountains".to_string(),
            content: "<p>There's something truly magical about the mountains. The crisp air \
                      and the breathtaking views are unparalleled.</p>\n\
                      <h2>Preparing for a Mountain Trip</h2>\n<ul>\n\
                      <li>Pack layers: mountain weather can change rapidly.</li>\n\
                      <li>Stay hydrated: altitude can dehydrate you quickly.</li>\n\
                      <li>Wear sturdy hiking boots.</li>\n\
                      <li>Inform someone of your plans.</li>\n</ul>"
                .to_string(),
            author: author.clone(),
            created_at: at(2024, 2, 10, 14, 30),
            updated_at: at(2024, 2, 11, 9, 0),
            featured_image: Some("https://placehold.co/600x400.png".to_string()),
            excerpt: "A journey into the heart of the mountains, filled with adventure and \
                      stunning landscapes."
                .to_string(),
            category: Some("Travel".to_string()),
            tags: vec![
                "mountains".into(),
                "hiking".into(),
                "nature".into(),
                "adventure".into(),
            ],
        });
    }

    posts
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
