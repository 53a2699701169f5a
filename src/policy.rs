//! Per-route access policy.
//!
//! [`decide`] is the only rule in the system: compare the caller's [`Role`]
//! against the route's requirement under the privilege ordering. Pure
//! function, no I/O, no clock, no state.

use crate::role::Role;

/// A registered route: a path and the minimum role required to access it.
///
/// Built once at registration time, never mutated. The [`Router`](crate::Router)
/// owns one per registered path for the life of the process.
#[derive(Clone, Debug)]
pub struct Route {
    path: String,
    required_role: Role,
}

impl Route {
    pub fn new(path: impl Into<String>, required_role: Role) -> Self {
        Self { path: path.into(), required_role }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn required_role(&self) -> Role {
        self.required_role
    }
}

/// The outcome of evaluating a caller's role against a route's requirement.
///
/// Denial carries the reason handed back to the caller in the 403 body. The
/// reason only repeats the caller's own role and the route's requirement —
/// nothing internal leaks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessDecision {
    Allowed,
    Denied { reason: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `caller` may access `route`.
///
/// Allowed iff `caller >= route.required_role()`. A `Public` requirement is
/// the bottom of the ordering, so public routes admit every valid role.
///
/// ```rust
/// use anteroom::{Role, Route, decide};
///
/// let admin_panel = Route::new("/admin", Role::Admin);
/// assert!(decide(&admin_panel, Role::Admin).is_allowed());
/// assert!(!decide(&admin_panel, Role::User).is_allowed());
/// ```
pub fn decide(route: &Route, caller: Role) -> AccessDecision {
    if caller >= route.required_role {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied {
            reason: format!(
                "insufficient role: have {caller}, need {}",
                route.required_role
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Public, Role::User, Role::Admin];

    #[test]
    fn equal_or_higher_role_is_allowed() {
        for required in ROLES {
            let route = Route::new("/r", required);
            for caller in ROLES.into_iter().filter(|c| *c >= required) {
                assert!(decide(&route, caller).is_allowed(), "{caller} vs {required}");
            }
        }
    }

    #[test]
    fn lower_role_is_denied() {
        for required in ROLES {
            let route = Route::new("/r", required);
            for caller in ROLES.into_iter().filter(|c| *c < required) {
                assert!(!decide(&route, caller).is_allowed(), "{caller} vs {required}");
            }
        }
    }

    #[test]
    fn public_route_admits_everyone() {
        let route = Route::new("/public", Role::Public);
        for caller in ROLES {
            assert_eq!(decide(&route, caller), AccessDecision::Allowed);
        }
    }

    #[test]
    fn denial_reason_names_both_roles() {
        let route = Route::new("/hello", Role::User);
        let AccessDecision::Denied { reason } = decide(&route, Role::Public) else {
            panic!("expected denial");
        };
        assert_eq!(reason, "insufficient role: have PUBLIC, need USER");
    }
}
