//! Comments attached to posts, and the read models that join them to their
//! authors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::FieldErrors;
use super::{Post, PostId, UserId};

/// Store-assigned comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i32);

impl CommentId {
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

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Validate the `comment_text` form field.
    pub fn try_from_input(raw: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        match errors.require("comment_text", raw) {
            Some(text) => Ok(Self(text.to_owned())),
            None => Err(errors),
        }
    }
}

impl AsRef<str> for CommentText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: UserId,
    pub post: PostId,
}

/// Fields of a comment the store has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: CommentText,
    pub author: UserId,
    pub post: PostId,
}

/// Comment joined with the public profile of its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDetail {
    pub comment: Comment,
    pub author_name: String,
    pub author_avatar: String,
}

/// Post together with its comments in id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<CommentDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::REQUIRED_MESSAGE;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" \n\t")]
    fn blank_comment_text_is_required(#[case] raw: &str) {
        let errors = CommentText::try_from_input(raw).expect_err("blank text");
        assert_eq!(errors.messages("comment_text"), [REQUIRED_MESSAGE.to_owned()]);
    }

    #[rstest]
    fn comment_text_is_trimmed() {
        let text = CommentText::try_from_input("  nice post  ").expect("valid text");
        assert_eq!(text.as_ref(), "nice post");
    }
}
