//! Explicit session context.
//!
//! The caller's identity is passed into every personalized operation instead
//! of being read from ambient state.

/// Signed-in user as supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
    pub user_photo_url: Option<String>,
}

/// Per-request session. Anonymous sessions may browse and favorite but not
/// vote or comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Convenience constructor for a user without a photo.
    #[must_use]
    pub fn user(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self::signed_in(Identity {
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_photo_url: None,
        })
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.user_id.as_str())
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.identity.is_none()
    }
}
