/// Signed-in identity. Created on sign-in, dropped on sign-out, and passed
/// by reference to anything that needs to act as the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
    token: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user_id: impl Into<String>, email: Option<String>, token: impl Into<String>) {
        self.identity = Some(Identity {
            user_id: user_id.into(),
            email,
            token: token.into(),
        });
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
    }

    pub fn user(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.identity.as_ref().map(|i| format!("Bearer {}", i.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut session = Session::signed_out();
        assert!(session.bearer().is_none());

        session.sign_in("user-1", Some("a@example.com".into()), "tok");
        assert!(session.is_signed_in());
        assert_eq!(session.bearer().as_deref(), Some("Bearer tok"));
        assert_eq!(session.user().map(|u| u.user_id.as_str()), Some("user-1"));

        session.sign_out();
        assert!(!session.is_signed_in());
        assert!(session.user().is_none());
    }
}
