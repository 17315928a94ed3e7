//! Administrative session state.
//!
//! The session is an explicit value owned by the service and passed through
//! call boundaries, not a process-wide global. Credential matching is
//! deliberately trivial: skaters authenticate against their stored roster
//! entry, administrators against a fixed password.

use serde::{Deserialize, Serialize};

use crate::roster::Roster;

/// Fixed administrator credential. There are no multi-admin accounts.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Who is currently signed in on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Id of the signed-in skater, if any.
    pub current_user: Option<String>,

    /// Whether an administrator session is open.
    pub admin: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign a skater in. Only active skaters with matching credentials are
    /// accepted. Returns whether the login succeeded.
    pub fn login(&mut self, roster: &Roster, email: &str, password: &str) -> bool {
        match roster.find_by_email(email) {
            Some(skater) if skater.password == password && skater.active => {
                self.current_user = Some(skater.id.clone());
                true
            }
            _ => false,
        }
    }

    /// Open an administrator session. Returns whether the login succeeded.
    pub fn admin_login(&mut self, password: &str) -> bool {
        if password == ADMIN_PASSWORD {
            self.admin = true;
            true
        } else {
            false
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }

    pub fn admin_logout(&mut self) {
        self.admin = false;
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
