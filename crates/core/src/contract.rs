//! Contract lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a contract, stored as text in `contracts.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Signed or being negotiated, not yet running.
    #[default]
    EnCours,
    /// Running.
    Actif,
    /// Finished.
    Termine,
}

impl ContractStatus {
    /// Statuses whose contracts count toward dashboard revenue and the open
    /// contract count.
    pub const OPEN: [ContractStatus; 2] = [ContractStatus::Actif, ContractStatus::EnCours];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::EnCours => "en_cours",
            ContractStatus::Actif => "actif",
            ContractStatus::Termine => "termine",
        }
    }

    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }

    /// Text values of [`Self::OPEN`], ready to bind as a `TEXT[]` parameter.
    pub fn open_values() -> Vec<String> {
        Self::OPEN.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_cours" => Ok(ContractStatus::EnCours),
            "actif" => Ok(ContractStatus::Actif),
            "termine" => Ok(ContractStatus::Termine),
            other => Err(CoreError::Validation(format!(
                "Unknown contract status '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for ContractStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
