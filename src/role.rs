//! Caller privilege levels as a typed, ordered enum.
//!
//! Roles are totally ordered: `Public < User < Admin`. A route requiring
//! `User` is open to `User` and `Admin` callers; a `Public` route is open to
//! everyone. The ordering is the whole policy — see [`decide`](crate::decide).
//!
//! The caller's role arrives pre-resolved in the [`ROLE_HEADER`] header.
//! anteroom never authenticates; whatever sits in front of it (a session
//! layer, an auth proxy) resolves the caller and forwards the role. Unknown
//! role strings are rejected at the server boundary with `400 Bad Request`
//! before routing or policy ever see them.

use std::fmt;
use std::str::FromStr;

/// Request header carrying the caller's pre-resolved role.
///
/// Absent header = anonymous caller = [`Role::Public`].
pub const ROLE_HEADER: &str = "x-role";

/// A caller privilege level.
///
/// Variant order is privilege order — `derive(PartialOrd, Ord)` does the rest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Role {
    Public,
    User,
    Admin,
}

impl Role {
    /// Returns the uppercase wire representation (e.g. `"ADMIN"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::User   => "USER",
            Self::Admin  => "ADMIN",
        }
    }
}

/// Parses a role string. Case-insensitive: header values come from
/// collaborating services that do not agree on casing.
impl FromStr for Role {
    type Err = InvalidRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("PUBLIC") {
            Ok(Self::Public)
        } else if s.eq_ignore_ascii_case("USER") {
            Ok(Self::User)
        } else if s.eq_ignore_ascii_case("ADMIN") {
            Ok(Self::Admin)
        } else {
            Err(InvalidRoleError { value: s.to_owned() })
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied role string that names no known role.
#[derive(Debug)]
pub struct InvalidRoleError {
    value: String,
}

impl InvalidRoleError {
    /// The offending string, as received.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {:?}", self.value)
    }
}

impl std::error::Error for InvalidRoleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("PUBLIC".parse::<Role>().unwrap(), Role::Public);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn rejects_unknown_role_and_names_it() {
        let err = "WIZARD".parse::<Role>().unwrap_err();
        assert_eq!(err.value(), "WIZARD");
        assert_eq!(err.to_string(), r#"invalid role: "WIZARD""#);
    }

    #[test]
    fn privilege_order_is_total() {
        assert!(Role::Public < Role::User);
        assert!(Role::User < Role::Admin);
        assert!(Role::Admin >= Role::Admin);
    }

    #[test]
    fn displays_wire_form() {
        assert_eq!(Role::Public.to_string(), "PUBLIC");
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }
}
