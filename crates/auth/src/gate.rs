//! Role gate
//!
//! Runs only on claims that already passed verification.

use crate::claims::{Claims, Role};

/// Result of a role check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    /// Carries what the caller had and what was required, for the audit log
    Rejected { role: Role, required: Vec<Role> },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted)
    }
}

/// Accept iff the token's role is one of `allowed_roles`
pub fn authorize(claims: &Claims, allowed_roles: &[Role]) -> Decision {
    if allowed_roles.contains(&claims.role) {
        Decision::Accepted
    } else {
        Decision::Rejected {
            role: claims.role,
            required: allowed_roles.to_vec(),
        }
    }
}

/// Compile-time role requirement for the `Authorized` extractor
pub trait RoleSet: Send + Sync + 'static {
    const ALLOWED: &'static [Role];
}

/// Administrators only
#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl RoleSet for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Administrators and teachers
#[derive(Debug, Clone, Copy)]
pub struct Staff;

impl RoleSet for Staff {
    const ALLOWED: &'static [Role] = &[Role::Admin, Role::Teacher];
}

/// Any signed-in role
#[derive(Debug, Clone, Copy)]
pub struct AnyRole;

impl RoleSet for AnyRole {
    const ALLOWED: &'static [Role] = &Role::ALL;
}
