use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::DbId;

/// The `(id, login, role)` tuple carried by a validated access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: DbId,
    pub login: String,
    pub role: Role,
}
