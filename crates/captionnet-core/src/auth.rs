//! Simulated Sign-In
//!
//! The demo's account flow: any submitted form succeeds, nothing is
//! persisted, and signing out resets the session. Uploads are gated on the
//! signed-in state.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Which form the user opened
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Simulated account state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthState {
    #[default]
    SignedOut,
    /// Form submitted, fake round-trip in flight
    Pending { mode: AuthMode },
    SignedIn { display_name: String },
}

impl AuthState {
    /// Opens the sign-in/sign-up flow
    pub fn begin(&mut self, mode: AuthMode) {
        *self = AuthState::Pending { mode };
    }

    /// Completes the fake round-trip. Always succeeds.
    pub fn complete(&mut self, display_name: &str) {
        info!(display_name, "Simulated sign-in complete");
        *self = AuthState::SignedIn {
            display_name: display_name.to_string(),
        };
    }

    pub fn sign_out(&mut self) {
        *self = AuthState::SignedOut;
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_flow() {
        let mut auth = AuthState::default();
        assert!(!auth.is_signed_in());

        auth.begin(AuthMode::SignUp);
        assert_eq!(
            auth,
            AuthState::Pending {
                mode: AuthMode::SignUp
            }
        );
        assert!(!auth.is_signed_in());

        auth.complete("Amara");
        assert!(auth.is_signed_in());

        auth.sign_out();
        assert_eq!(auth, AuthState::SignedOut);
    }

    #[test]
    fn test_complete_without_begin_still_signs_in() {
        // The one-click provider path skips the form entirely.
        let mut auth = AuthState::default();
        auth.complete("Amara");
        assert!(auth.is_signed_in());
    }
}
