//! Authorization policy for posts and comments.
//!
//! `authorize` is a pure function of the requesting identity and the action.
//! Handlers call it before validating input and domain services call it again
//! before touching the store, so an adapter cannot skip the check.
//!
//! A denied action surfaces as `NotFound`, indistinguishable from a missing
//! entity.

use super::{Comment, Error, Identity};

/// Operation a caller wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Read the post listing.
    ViewPosts,
    /// Read a single post and its comments.
    ViewPost,
    /// Open the editor for a new post or submit one.
    CreatePost,
    /// Change an existing post.
    EditPost,
    /// Remove a post with its comments.
    DeletePost,
    /// Reply to a post.
    CreateComment,
    /// Change the given comment.
    EditComment(&'a Comment),
    /// Remove the given comment.
    DeleteComment(&'a Comment),
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The viewer may go ahead.
    Allow,
    /// The viewer sees a 404.
    Deny,
}

impl Decision {
    /// Whether the action is permitted.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert a denial into the not-found error.
    ///
    /// # Examples
    /// ```
    /// use blog::domain::{ErrorCode, policy::{Action, authorize}};
    ///
    /// let err = authorize(None, Action::CreatePost).require().unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// ```
    pub fn require(self) -> Result<(), Error> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny => Err(Error::not_found_or_denied()),
        }
    }
}

/// Decide whether `identity` may perform `action`.
#[must_use]
pub fn authorize(identity: Option<&Identity>, action: Action<'_>) -> Decision {
    let allowed = match (action, identity) {
        (Action::ViewPosts | Action::ViewPost, _) => true,
        (Action::CreatePost | Action::EditPost | Action::DeletePost, Some(who)) => who.is_admin(),
        (Action::CreateComment, Some(_)) => true,
        (Action::EditComment(comment) | Action::DeleteComment(comment), Some(who)) => {
            who.is_admin() || who.id == comment.author
        }
        (_, None) => false,
    };
    if allowed {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommentId, ErrorCode, PostId, Role, UserId};
    use rstest::{fixture, rstest};

    const ADMIN: Identity = Identity {
        id: UserId::new(1),
        role: Role::Admin,
    };
    const OWNER: Identity = Identity {
        id: UserId::new(2),
        role: Role::Member,
    };
    const STRANGER: Identity = Identity {
        id: UserId::new(3),
        role: Role::Member,
    };

    #[fixture]
    fn comment() -> Comment {
        Comment {
            id: CommentId::new(10),
            text: "hello".to_owned(),
            author: OWNER.id,
            post: PostId::new(5),
        }
    }

    #[rstest]
    #[case(None, Action::ViewPosts, Decision::Allow)]
    #[case(None, Action::ViewPost, Decision::Allow)]
    #[case(Some(STRANGER), Action::ViewPost, Decision::Allow)]
    #[case(None, Action::CreatePost, Decision::Deny)]
    #[case(Some(STRANGER), Action::CreatePost, Decision::Deny)]
    #[case(Some(ADMIN), Action::CreatePost, Decision::Allow)]
    #[case(Some(STRANGER), Action::EditPost, Decision::Deny)]
    #[case(Some(ADMIN), Action::EditPost, Decision::Allow)]
    #[case(Some(OWNER), Action::DeletePost, Decision::Deny)]
    #[case(Some(ADMIN), Action::DeletePost, Decision::Allow)]
    #[case(None, Action::CreateComment, Decision::Deny)]
    #[case(Some(STRANGER), Action::CreateComment, Decision::Allow)]
    #[case(Some(ADMIN), Action::CreateComment, Decision::Allow)]
    fn post_and_creation_rules(
        #[case] identity: Option<Identity>,
        #[case] action: Action<'static>,
        #[case] expected: Decision,
    ) {
        assert_eq!(authorize(identity.as_ref(), action), expected);
    }

    #[rstest]
    #[case(None, Decision::Deny)]
    #[case(Some(STRANGER), Decision::Deny)]
    #[case(Some(OWNER), Decision::Allow)]
    #[case(Some(ADMIN), Decision::Allow)]
    fn comment_mutations_need_owner_or_admin(
        comment: Comment,
        #[case] identity: Option<Identity>,
        #[case] expected: Decision,
    ) {
        assert_eq!(
            authorize(identity.as_ref(), Action::EditComment(&comment)),
            expected
        );
        assert_eq!(
            authorize(identity.as_ref(), Action::DeleteComment(&comment)),
            expected
        );
    }

    #[rstest]
    fn deny_requires_to_not_found() {
        let err = Decision::Deny.require().expect_err("deny fails");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(Decision::Allow.require().is_ok());
    }
}
