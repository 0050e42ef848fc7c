//! Role-based access policy.
//!
//! Every protected route names the [`Operation`] it performs and asks
//! [`authorize`] for a [`Decision`]. The whole policy lives in the single
//! `match` below so it can be audited in one place.
//!
//! Any authenticated user may delete clients and contracts, but only admins
//! may edit them.

use std::fmt;

use crate::roles::Role;

/// The kind of record an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Client,
    Contract,
    Service,
    Dossier,
    Activity,
    User,
}

/// What the caller wants to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    pub resource: Resource,
    pub action: Action,
}

impl Operation {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.action, self.resource)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

/// Decide whether `role` may perform `operation`.
pub fn authorize(role: Role, operation: Operation) -> Decision {
    use Action::*;
    use Resource::*;

    let admin_only = match (operation.resource, operation.action) {
        (Client | Contract, Update) => true,
        (Client | Contract, Read | Create | Delete) => false,
        (Service | Dossier, _) => false,
        (Activity, Read) => false,
        (Activity, Create | Update | Delete) => true,
        (User, _) => true,
    };

    if admin_only && !role.is_admin() {
        Decision::Deny
    } else {
        Decision::Allow
    }
}
