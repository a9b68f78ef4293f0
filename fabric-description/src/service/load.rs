//! Load metrics, move cost and correlations.

use fabric_types::validate::{require_name, require_u32};
use fabric_types::{FabricUri, Result, Validate};
use serde::{Deserialize, Serialize};

/// Relative importance of a load metric when balancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLoadMetricWeight {
    Zero,
    #[default]
    Low,
    Medium,
    High,
}

/// Cost of moving a replica of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCost {
    Zero,
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Whether service packages are shared between services of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServicePackageActivationMode {
    #[default]
    SharedProcess,
    ExclusiveProcess,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLoadMetricDescription {
    pub name: String,
    #[serde(default)]
    pub weight: ServiceLoadMetricWeight,
    /// Default load reported for primaries (or for instances of a stateless service).
    #[serde(default)]
    pub primary_default_load: i64,
    #[serde(default)]
    pub secondary_default_load: i64,
}

impl ServiceLoadMetricDescription {
    pub fn new(name: impl Into<String>, weight: ServiceLoadMetricWeight) -> Self {
        Self {
            name: name.into(),
            weight,
            primary_default_load: 0,
            secondary_default_load: 0,
        }
    }

    pub fn with_default_loads(mut self, primary: i64, secondary: i64) -> Self {
        self.primary_default_load = primary;
        self.secondary_default_load = secondary;
        self
    }
}

impl Validate for ServiceLoadMetricDescription {
    fn validate(&self) -> Result<()> {
        require_name("name", &self.name)?;
        require_u32("primary_default_load", self.primary_default_load)?;
        require_u32("secondary_default_load", self.secondary_default_load)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCorrelationScheme {
    /// Place replicas near the replicas of the other service.
    Affinity,
    /// Place primaries with primaries and secondaries with secondaries.
    AlignedAffinity,
    /// Place replicas on the same nodes without role alignment.
    NonAlignedAffinity,
}

/// Declares a placement relationship with another service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCorrelationDescription {
    pub service_name: FabricUri,
    pub scheme: ServiceCorrelationScheme,
}

impl ServiceCorrelationDescription {
    pub fn new(service_name: FabricUri, scheme: ServiceCorrelationScheme) -> Self {
        Self {
            service_name,
            scheme,
        }
    }
}
