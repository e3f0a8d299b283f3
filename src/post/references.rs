//! Finding which uploaded images are still in use.
//!
//! Markdown image syntax and raw `<img src>` tags are matched independently;
//! both feed the same set together with cover basenames.

use crate::post::post_model::PostRecord;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// `![alt](/uploads/images/<name>)`, optionally with an origin or a title.
// Alt text is uploaded filenames, so it may itself contain brackets.
static MARKDOWN_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!\[.*?\]\(\s*<?(?:https?://[^/\s)>]+)?/?uploads/images/([^)\s"'?#>]+)"#)
        .expect("markdown image pattern")
});

// `src="/uploads/images/<name>"`, single-quoted or unquoted
static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bsrc\s*=\s*["']?(?:https?://[^/\s"'>]+)?/?uploads/images/([^"'?#\s>]+)"#)
        .expect("img src pattern")
});

fn capture_names<'a>(pattern: &Regex, body: &'a str) -> impl Iterator<Item = &'a str> {
    pattern
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// Asset names referenced through Markdown image syntax
pub fn markdown_image_refs(body: &str) -> Vec<String> {
    capture_names(&MARKDOWN_IMAGE, body)
        .map(str::to_string)
        .collect()
}

/// Asset names referenced through embedded `<img src>` attributes
pub fn img_src_refs(body: &str) -> Vec<String> {
    capture_names(&IMG_SRC, body).map(str::to_string).collect()
}

/// Last path segment of a cover URL, without query or fragment
pub fn cover_basename(cover: &str) -> Option<String> {
    let path = cover.split(['?', '#']).next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or("").trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Every asset name referenced by a cover or by any of the given bodies
pub fn referenced_assets<'a>(
    posts: &[PostRecord],
    bodies: impl IntoIterator<Item = &'a str>,
) -> HashSet<String> {
    let mut referenced: HashSet<String> = posts
        .iter()
        .filter_map(|p| p.cover.as_deref())
        .filter_map(cover_basename)
        .collect();

    for body in bodies {
        referenced.extend(markdown_image_refs(body));
        referenced.extend(img_src_refs(body));
    }

    referenced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, cover: Option<&str>) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: "t".to_string(),
            date: String::new(),
            tags: Vec::new(),
            summary: String::new(),
            cover: cover.map(|c| c.to_string()),
        }
    }

    #[test]
    fn markdown_matcher() {
        let body = "intro\n![shot](/uploads/images/1700000000000-42.png)\n\
                    ![titled](/uploads/images/b.jpg \"A title\")\n\
                    ![rel](uploads/images/c.gif)\n\
                    ![abs](http://localhost:3000/uploads/images/d.webp)\n\
                    ![elsewhere](/static/e.png)\n\
                    [link](/uploads/images/not-an-image.png)";
        assert_eq!(
            markdown_image_refs(body),
            vec!["1700000000000-42.png", "b.jpg", "c.gif", "d.webp"]
        );
    }

    #[test]
    fn markdown_matcher_allows_brackets_in_alt() {
        let body = "![Screenshot [2].png](/uploads/images/1700000000000-1.png)\n\
                    ![a]b.png](/uploads/images/2.png)\n\
                    ![angle](</uploads/images/3.gif>)";
        assert_eq!(
            markdown_image_refs(body),
            vec!["1700000000000-1.png", "2.png", "3.gif"]
        );
    }

    #[test]
    fn img_src_matcher() {
        let body = r#"<img src="/uploads/images/a.png" alt="a">
<IMG SRC='/uploads/images/b.gif'>
<img data-x="1" src = "/uploads/images/c.jpg?v=2">
<img src="/other/d.png">"#;
        assert_eq!(img_src_refs(body), vec!["a.png", "b.gif", "c.jpg"]);
    }

    #[test]
    fn img_src_matcher_accepts_unquoted_values() {
        let body = "<img src=/uploads/images/a.png>\n<img alt=x SRC=/uploads/images/b.webp width=10>";
        assert_eq!(img_src_refs(body), vec!["a.png", "b.webp"]);
    }

    #[test]
    fn cover_basenames() {
        assert_eq!(
            cover_basename("/uploads/images/x.png").as_deref(),
            Some("x.png")
        );
        assert_eq!(
            cover_basename("http://host/uploads/images/y.jpg?cache=1").as_deref(),
            Some("y.jpg")
        );
        assert_eq!(cover_basename("plain.gif").as_deref(), Some("plain.gif"));
        assert_eq!(cover_basename("/uploads/images/"), None);
    }

    #[test]
    fn aggregates_all_sources() {
        let posts = vec![post("p1", Some("/uploads/images/cover.png")), post("p2", None)];
        let bodies = [
            "![a](/uploads/images/inline.png)",
            r#"<img src="/uploads/images/tag.gif">"#,
        ];

        let referenced = referenced_assets(&posts, bodies);
        let mut names: Vec<&str> = referenced.iter().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, vec!["cover.png", "inline.png", "tag.gif"]);
    }
}
