//! Blog post model.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::UserId;
use super::validation::FieldErrors;

/// Store-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw post form values.
#[derive(Debug, Clone, Copy)]
pub struct PostInput<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub author: &'a str,
    pub img_url: &'a str,
    pub body: &'a str,
}

/// Validated, editable post content.
///
/// ## Invariants
/// - Every text field is trimmed and non-empty.
/// - `img_url` parses as an absolute `http` or `https` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

impl PostDraft {
    /// Validate every post field, collecting all failures.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::{PostDraft, PostInput};
    ///
    /// let draft = PostDraft::try_from_input(PostInput {
    ///     title: "Hello",
    ///     subtitle: "First words",
    ///     author: "Alice",
    ///     img_url: "https://images.example.com/a.png",
    ///     body: "<p>Hi</p>",
    /// })
    /// .unwrap();
    /// assert_eq!(draft.title, "Hello");
    /// ```
    pub fn try_from_input(input: PostInput<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.require("title", input.title);
        let subtitle = errors.require("subtitle", input.subtitle);
        let author = errors.require("author", input.author);
        let img_url = errors.require("img_url", input.img_url);
        let body = errors.require("body", input.body);

        if let Some(raw) = img_url {
            if !is_web_url(raw) {
                errors.push("img_url", "Invalid URL.");
            }
        }

        match (title, subtitle, author, img_url, body) {
            (Some(title), Some(subtitle), Some(author), Some(img_url), Some(body))
                if errors.is_empty() =>
            {
                Ok(Self {
                    title: title.to_owned(),
                    subtitle: subtitle.to_owned(),
                    author: author.to_owned(),
                    img_url: img_url.to_owned(),
                    body: body.to_owned(),
                })
            }
            _ => Err(errors),
        }
    }
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

/// Published post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: PostDraft,
    /// Creation date pre-formatted as `"%B %d, %Y"`.
    pub date: String,
    pub owner: UserId,
}

/// Fields of a post the store has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub content: PostDraft,
    pub date: String,
    pub owner: UserId,
}

/// Format the creation date shown on posts.
#[must_use]
pub fn format_post_date(date: chrono::NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::REQUIRED_MESSAGE;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn input(img_url: &str) -> PostInput<'_> {
        PostInput {
            title: "Title",
            subtitle: "Subtitle",
            author: "Alice",
            img_url,
            body: "Body",
        }
    }

    #[rstest]
    #[case("https://example.com/a.png")]
    #[case("http://example.com")]
    fn accepts_web_urls(#[case] url: &str) {
        let draft = PostDraft::try_from_input(input(url)).expect("valid draft");
        assert_eq!(draft.img_url, url);
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://example.com/a.png")]
    #[case("/relative/path.png")]
    fn rejects_non_web_urls(#[case] url: &str) {
        let errors = PostDraft::try_from_input(input(url)).expect_err("invalid url");
        assert_eq!(errors.messages("img_url"), ["Invalid URL.".to_owned()]);
    }

    #[rstest]
    fn reports_every_blank_field() {
        let errors = PostDraft::try_from_input(PostInput {
            title: "",
            subtitle: " ",
            author: "",
            img_url: "",
            body: "",
        })
        .expect_err("blank draft");
        for field in ["title", "subtitle", "author", "img_url", "body"] {
            assert_eq!(errors.messages(field), [REQUIRED_MESSAGE.to_owned()]);
        }
    }

    #[rstest]
    fn formats_dates_with_full_month_names() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).expect("valid date");
        assert_eq!(format_post_date(date), "October 06, 2026");
    }
}
