/// Admin roles
///
/// The closed set of roles the service assigns when it writes a user.
/// Stored as lowercase TEXT in `users.role`.

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Admin
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::SuperAdmin),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_roles_case_insensitively() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse(" SuperAdmin ").unwrap(), Role::SuperAdmin);
    }

    #[test]
    fn parse_rejects_unknown_role() {
        assert!(matches!(
            Role::parse("customer"),
            Err(ValidationError::InvalidRole(r)) if r == "customer"
        ));
    }

    #[test]
    fn parse_reads_back_stored_tag() {
        for role in [Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(&role.to_string()).unwrap(), role);
        }
        assert_eq!(Role::SuperAdmin.as_str(), "superadmin");
    }

    #[test]
    fn default_is_admin() {
        assert_eq!(Role::default().as_str(), "admin");
    }
}
