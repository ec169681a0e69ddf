//! Admin gating for cross-user views.
//!
//! A principal is an admin if it carries the admin role or its email appears
//! in the configured privileged list. Admins may view any user's journal;
//! everyone else only their own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("user '{principal}' may not view trades of '{target}'")]
    Forbidden { principal: UserId, target: UserId },

    #[error("admin privileges required")]
    AdminRequired,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// The authenticated caller, passed explicitly to anything that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(user_id),
            email: email.into(),
            role: Role::User,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    pub admin_emails: Vec<String>,
}

impl AccessPolicy {
    pub fn new(admin_emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            admin_emails: admin_emails.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin(&self, principal: &Principal) -> bool {
        principal.role == Role::Admin
            || self
                .admin_emails
                .iter()
                .any(|e| e.trim().eq_ignore_ascii_case(principal.email.trim()))
    }

    pub fn require_admin(&self, principal: &Principal) -> Result<(), AccessError> {
        if self.is_admin(principal) {
            Ok(())
        } else {
            Err(AccessError::AdminRequired)
        }
    }

    /// Self-access always; cross-user access (impersonation) for admins only.
    pub fn authorize_view(
        &self,
        principal: &Principal,
        target: &UserId,
    ) -> Result<(), AccessError> {
        if &principal.user_id == target || self.is_admin(principal) {
            Ok(())
        } else {
            Err(AccessError::Forbidden {
                principal: principal.user_id.clone(),
                target: target.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_by_email_is_case_insensitive() {
        let policy = AccessPolicy::new(["Boss@Example.com"]);
        let p = Principal::new("u1", "boss@example.com");
        assert!(policy.is_admin(&p));
        assert!(!policy.is_admin(&Principal::new("u2", "intern@example.com")));
    }

    #[test]
    fn admin_by_role() {
        let policy = AccessPolicy::default();
        let p = Principal::new("u1", "x@example.com").with_role(Role::Admin);
        assert!(policy.is_admin(&p));
        assert!(policy.require_admin(&p).is_ok());
    }

    #[test]
    fn users_view_only_themselves() {
        let policy = AccessPolicy::default();
        let p = Principal::new("u1", "a@example.com");
        assert!(policy.authorize_view(&p, &UserId::new("u1")).is_ok());
        assert_eq!(
            policy.authorize_view(&p, &UserId::new("u2")),
            Err(AccessError::Forbidden {
                principal: UserId::new("u1"),
                target: UserId::new("u2"),
            })
        );
        assert_eq!(policy.require_admin(&p), Err(AccessError::AdminRequired));
    }

    #[test]
    fn admins_can_impersonate() {
        let policy = AccessPolicy::new(["admin@example.com"]);
        let admin = Principal::new("root", "admin@example.com");
        assert!(policy.authorize_view(&admin, &UserId::new("anyone")).is_ok());
    }
}
