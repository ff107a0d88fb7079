//! Discovery of like controls in server-rendered markup.
//!
//! The page template renders one hidden `csrfmiddlewaretoken` input, and for
//! each post a counter (`id="tweet-like-counter"`) and a toggle button
//! (`id="tweet-toggle-like-btn"`), both tagged with `data-tweet-pk`. An
//! element's text is everything up to its closing tag with child markup
//! removed, so a button holding an icon still yields its label.

use crate::errors::PageError;
use crate::models::{CounterDisplay, CsrfToken, Page, PostId, ToggleControl};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
pub const COUNTER_ID: &str = "tweet-like-counter";
pub const TOGGLE_ID: &str = "tweet-toggle-like-btn";
pub const POST_ID_ATTR: &str = "data-tweet-pk";
pub const IS_LIKED_ATTR: &str = "data-is-like-tweet";

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)([^>]*)>([^<]*)").expect("valid tag pattern")
});

static CHILD_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid child tag pattern"));

static ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][A-Za-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid attribute pattern")
});

pub fn parse_page(html: &str) -> Result<Page, PageError> {
    let mut csrf_token = None;
    let mut controls = Vec::new();
    let mut counters = Vec::new();

    for tag in TAG.captures_iter(html) {
        let attrs = attributes(tag.get(2).map_or("", |m| m.as_str()));

        if csrf_token.is_none() && attrs.get("name").map(String::as_str) == Some(CSRF_FIELD_NAME) {
            csrf_token = attrs.get("value").map(|value| CsrfToken::new(value.as_str()));
            continue;
        }

        match attrs.get("id").map(String::as_str) {
            Some(COUNTER_ID) => {
                let Some(post_id) = attrs.get(POST_ID_ATTR) else {
                    warn!("like counter without {POST_ID_ATTR}, skipping");
                    continue;
                };
                counters.push(CounterDisplay {
                    post_id: PostId::new(post_id.as_str()),
                    text: element_text(html, &tag),
                });
            }
            Some(TOGGLE_ID) => {
                let Some(post_id) = attrs.get(POST_ID_ATTR) else {
                    warn!("like button without {POST_ID_ATTR}, skipping");
                    continue;
                };
                let Some(flag) = attrs.get(IS_LIKED_ATTR) else {
                    warn!(post_id = %post_id, "like button without {IS_LIKED_ATTR}, skipping");
                    continue;
                };
                controls.push(ToggleControl {
                    post_id: PostId::new(post_id.as_str()),
                    is_liked: parse_is_liked(flag),
                    label: element_text(html, &tag),
                });
            }
            _ => {}
        }
    }

    let csrf_token = csrf_token.ok_or(PageError::MissingCsrfToken)?;
    debug!(
        controls = controls.len(),
        counters = counters.len(),
        "discovered like controls"
    );

    Ok(Page {
        csrf_token,
        controls,
        counters,
    })
}

/// Only an explicit `false` reads as "not liked".
pub fn parse_is_liked(flag: &str) -> bool {
    flag.trim() != "false"
}

fn element_text(html: &str, tag: &Captures<'_>) -> String {
    let Some(inner) = tag.get(3) else {
        return String::new();
    };
    let rest = &html[inner.start()..];
    let closing = format!("</{}", tag[1].to_ascii_lowercase());
    match rest.to_ascii_lowercase().find(&closing) {
        Some(end) => CHILD_TAG.replace_all(&rest[..end], "").trim().to_string(),
        None => inner.as_str().trim().to_string(),
    }
}

fn attributes(source: &str) -> HashMap<String, String> {
    ATTR.captures_iter(source)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (name, value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME_PAGE: &str = r#"
<form><input type="hidden" name="csrfmiddlewaretoken" value="tok123"></form>
<article>
  <p>first post</p>
  <span id="tweet-like-counter" data-tweet-pk="7">3</span>
  <button id="tweet-toggle-like-btn" data-tweet-pk="7" data-is-like-tweet="false">
    いいねする
  </button>
</article>
<article>
  <span data-tweet-pk='9' id='tweet-like-counter'> 5 </span>
  <button data-is-like-tweet=" true " id="tweet-toggle-like-btn" data-tweet-pk="9">いいねを取り消す</button>
</article>
"#;

    #[test]
    fn finds_token_counters_and_controls() {
        let page = parse_page(HOME_PAGE).expect("page parses");
        assert_eq!(page.csrf_token.as_str(), "tok123");

        assert_eq!(
            page.counters,
            vec![
                CounterDisplay { post_id: "7".into(), text: "3".into() },
                CounterDisplay { post_id: "9".into(), text: "5".into() },
            ]
        );
        assert_eq!(
            page.controls,
            vec![
                ToggleControl {
                    post_id: "7".into(),
                    is_liked: false,
                    label: "いいねする".into(),
                },
                ToggleControl {
                    post_id: "9".into(),
                    is_liked: true,
                    label: "いいねを取り消す".into(),
                },
            ]
        );
    }

    #[test]
    fn missing_token_is_an_error() {
        let html = r#"<span id="tweet-like-counter" data-tweet-pk="1">0</span>"#;
        assert!(matches!(parse_page(html), Err(PageError::MissingCsrfToken)));
    }

    #[test]
    fn elements_without_post_id_are_skipped() {
        let html = r#"
<input name="csrfmiddlewaretoken" value="t">
<span id="tweet-like-counter">1</span>
<button id="tweet-toggle-like-btn" data-is-like-tweet="false">like</button>
<button id="tweet-toggle-like-btn" data-tweet-pk="2">no flag</button>
"#;
        let page = parse_page(html).expect("page parses");
        assert!(page.counters.is_empty());
        assert!(page.controls.is_empty());
    }

    #[test]
    fn label_includes_text_after_child_elements() {
        let html = r#"
<input name="csrfmiddlewaretoken" value="t">
<span id="tweet-like-counter" data-tweet-pk="3"><b>12</b></span>
<BUTTON id="tweet-toggle-like-btn" data-tweet-pk="3" data-is-like-tweet="false"><i class="icon"></i> いいねする</BUTTON>
"#;
        let page = parse_page(html).expect("page parses");
        assert_eq!(page.counters[0].text, "12");
        assert_eq!(page.controls[0].label, "いいねする");
    }

    #[test]
    fn only_explicit_false_means_not_liked() {
        assert!(!parse_is_liked("false"));
        assert!(!parse_is_liked("  false\n"));
        assert!(parse_is_liked("true"));
        assert!(parse_is_liked("False"));
        assert!(parse_is_liked(""));
    }
}
