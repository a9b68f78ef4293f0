use fabric_types::validate::require_name;
use fabric_types::{Result, Validate};
use serde::{Deserialize, Serialize};

/// A fault or upgrade domain rule applied when placing replicas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServicePlacementPolicyDescription {
    /// Never place replicas in `domain_name`.
    InvalidDomain { domain_name: String },
    /// Place every replica in `domain_name`.
    RequiredDomain { domain_name: String },
    /// Prefer primaries in `domain_name`.
    PreferredPrimaryDomain { domain_name: String },
    /// Never place two replicas of a partition in the same domain.
    RequiredDomainDistribution,
    /// Place all replicas of a partition or none.
    NonPartiallyPlaceService,
}

impl ServicePlacementPolicyDescription {
    /// Returns the domain the policy refers to, if it names one.
    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        match self {
            Self::InvalidDomain { domain_name }
            | Self::RequiredDomain { domain_name }
            | Self::PreferredPrimaryDomain { domain_name } => Some(domain_name),
            Self::RequiredDomainDistribution | Self::NonPartiallyPlaceService => None,
        }
    }
}

impl Validate for ServicePlacementPolicyDescription {
    fn validate(&self) -> Result<()> {
        self.domain_name()
            .map_or(Ok(()), |name| require_name("domain_name", name))
    }
}
