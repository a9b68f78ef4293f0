//! Service descriptions.
//!
//! A service is either stateful or stateless; everything else (partitioning,
//! placement, load metrics, scaling) is shared by both kinds.

mod load;
mod partition;
mod placement;
mod scaling;

pub use load::{
    MoveCost, ServiceCorrelationDescription, ServiceCorrelationScheme,
    ServiceLoadMetricDescription, ServiceLoadMetricWeight, ServicePackageActivationMode,
};
pub use partition::PartitionSchemeDescription;
pub use placement::ServicePlacementPolicyDescription;
pub use scaling::{
    ScalingMechanismDescription, ScalingPolicyDescription, ScalingTriggerDescription,
    UNBOUNDED_INSTANCE_COUNT,
};

use fabric_types::validate::{
    require_i32, require_name, require_name_opt, require_ordered,
    require_seconds_u32, require_u32, require_unique,
};
use fabric_types::{Error, FabricUri, Result, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// `instance_count` value that places one instance on every node.
pub const INSTANCE_COUNT_ALL_NODES: i64 = -1;

/// Replica set sizing and failover timing of a stateful service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatefulServiceSettings {
    pub target_replica_set_size: i64,
    pub min_replica_set_size: i64,
    #[serde(default)]
    pub has_persisted_state: bool,
    #[serde(default)]
    pub replica_restart_wait_duration: Option<Duration>,
    #[serde(default)]
    pub quorum_loss_wait_duration: Option<Duration>,
    #[serde(default)]
    pub stand_by_replica_keep_duration: Option<Duration>,
}

impl StatefulServiceSettings {
    pub fn new(target_replica_set_size: i64, min_replica_set_size: i64) -> Self {
        Self {
            target_replica_set_size,
            min_replica_set_size,
            has_persisted_state: false,
            replica_restart_wait_duration: None,
            quorum_loss_wait_duration: None,
            stand_by_replica_keep_duration: None,
        }
    }

    /// Returns true if any failover timing is set.
    #[must_use]
    pub fn has_failover_settings(&self) -> bool {
        self.replica_restart_wait_duration.is_some()
            || self.quorum_loss_wait_duration.is_some()
            || self.stand_by_replica_keep_duration.is_some()
    }
}

impl Validate for StatefulServiceSettings {
    fn validate(&self) -> Result<()> {
        require_i32("target_replica_set_size", self.target_replica_set_size)?;
        require_i32("min_replica_set_size", self.min_replica_set_size)?;
        if self.min_replica_set_size < 1 {
            return Err(Error::invalid_argument(
                "min_replica_set_size",
                format!(
                    "minimum replica set size {} must be at least 1",
                    self.min_replica_set_size
                ),
            ));
        }
        require_ordered(
            "min_replica_set_size",
            self.min_replica_set_size,
            "target_replica_set_size",
            self.target_replica_set_size,
        )?;
        let durations = [
            ("replica_restart_wait_duration", self.replica_restart_wait_duration),
            ("quorum_loss_wait_duration", self.quorum_loss_wait_duration),
            ("stand_by_replica_keep_duration", self.stand_by_replica_keep_duration),
        ];
        for (field, value) in durations {
            if let Some(value) = value {
                require_seconds_u32(field, value)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatelessServiceSettings {
    /// Number of instances per partition, or [`INSTANCE_COUNT_ALL_NODES`].
    pub instance_count: i64,
}

impl Validate for StatelessServiceSettings {
    fn validate(&self) -> Result<()> {
        require_i32("instance_count", self.instance_count)?;
        if self.instance_count != INSTANCE_COUNT_ALL_NODES && self.instance_count < 1 {
            return Err(Error::invalid_argument(
                "instance_count",
                format!(
                    "instance count {} must be at least 1, or -1 for every node",
                    self.instance_count
                ),
            ));
        }
        Ok(())
    }
}

/// Kind-specific part of a service description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceKindDescription {
    Stateful(StatefulServiceSettings),
    Stateless(StatelessServiceSettings),
}

impl ServiceKindDescription {
    #[must_use]
    pub fn is_stateful(&self) -> bool {
        matches!(self, Self::Stateful(_))
    }
}

impl Validate for ServiceKindDescription {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Stateful(settings) => settings.validate(),
            Self::Stateless(settings) => settings.validate(),
        }
    }
}

/// Request to create a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescription {
    /// Owning application. Unset for services created outside an application.
    #[serde(default)]
    pub application_name: Option<FabricUri>,
    pub service_name: FabricUri,
    pub service_type_name: String,
    /// Opaque bytes handed to every new replica or instance.
    #[serde(default)]
    pub initialization_data: Vec<u8>,
    #[serde(default)]
    pub partition_scheme: PartitionSchemeDescription,
    #[serde(default)]
    pub placement_constraints: Option<String>,
    #[serde(default)]
    pub correlations: Vec<ServiceCorrelationDescription>,
    #[serde(default)]
    pub metrics: Vec<ServiceLoadMetricDescription>,
    #[serde(default)]
    pub placement_policies: Vec<ServicePlacementPolicyDescription>,
    #[serde(default)]
    pub default_move_cost: Option<MoveCost>,
    #[serde(default)]
    pub service_package_activation_mode: ServicePackageActivationMode,
    #[serde(default)]
    pub service_dns_name: Option<String>,
    #[serde(default)]
    pub scaling_policies: Vec<ScalingPolicyDescription>,
    #[serde(flatten)]
    pub kind: ServiceKindDescription,
}

impl ServiceDescription {
    /// Creates a description with default partitioning and no optional settings.
    pub fn new(
        service_name: FabricUri,
        service_type_name: impl Into<String>,
        kind: ServiceKindDescription,
    ) -> Self {
        Self {
            application_name: None,
            service_name,
            service_type_name: service_type_name.into(),
            initialization_data: Vec::new(),
            partition_scheme: PartitionSchemeDescription::Singleton,
            placement_constraints: None,
            correlations: Vec::new(),
            metrics: Vec::new(),
            placement_policies: Vec::new(),
            default_move_cost: None,
            service_package_activation_mode: ServicePackageActivationMode::SharedProcess,
            service_dns_name: None,
            scaling_policies: Vec::new(),
            kind,
        }
    }

    pub fn stateful(
        service_name: FabricUri,
        service_type_name: impl Into<String>,
        settings: StatefulServiceSettings,
    ) -> Self {
        Self::new(
            service_name,
            service_type_name,
            ServiceKindDescription::Stateful(settings),
        )
    }

    pub fn stateless(
        service_name: FabricUri,
        service_type_name: impl Into<String>,
        instance_count: i64,
    ) -> Self {
        Self::new(
            service_name,
            service_type_name,
            ServiceKindDescription::Stateless(StatelessServiceSettings { instance_count }),
        )
    }

    pub fn with_application(mut self, application_name: FabricUri) -> Self {
        self.application_name = Some(application_name);
        self
    }

    pub fn with_partition_scheme(mut self, partition_scheme: PartitionSchemeDescription) -> Self {
        self.partition_scheme = partition_scheme;
        self
    }

    pub fn with_metric(mut self, metric: ServiceLoadMetricDescription) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_scaling_policy(mut self, policy: ScalingPolicyDescription) -> Self {
        self.scaling_policies.push(policy);
        self
    }

    fn validate_correlations(&self) -> Result<()> {
        require_unique(
            "correlations",
            self.correlations.iter().map(|c| c.service_name.as_str()),
        )?;
        if self
            .correlations
            .iter()
            .any(|c| c.service_name == self.service_name)
        {
            return Err(Error::invalid_argument(
                "correlations",
                format!("{} cannot be correlated with itself", self.service_name),
            ));
        }
        Ok(())
    }

    fn validate_scaling_policies(&self) -> Result<()> {
        if self.scaling_policies.len() > 1 {
            return Err(Error::invalid_argument(
                "scaling_policies",
                "at most one scaling policy is supported",
            ));
        }
        for (i, policy) in self.scaling_policies.iter().enumerate() {
            let field = format!("scaling_policies[{i}]");
            policy.validate().map_err(|e| e.within(&field))?;

            match policy.mechanism {
                ScalingMechanismDescription::PartitionInstanceCount { .. }
                    if self.kind.is_stateful() =>
                {
                    return Err(Error::invalid_argument(
                        field,
                        "instance count scaling requires a stateless service",
                    ));
                }
                ScalingMechanismDescription::AddRemoveIncrementalNamedPartition { .. }
                    if !self.partition_scheme.is_named() =>
                {
                    return Err(Error::invalid_argument(
                        field,
                        "named partition scaling requires the named partition scheme",
                    ));
                }
                _ => {}
            }
            if policy.trigger.uses_only_primary_load() && !self.kind.is_stateful() {
                return Err(Error::invalid_argument(
                    format!("{field}.trigger.use_only_primary_load"),
                    "only stateful services have primary load",
                ));
            }
        }
        Ok(())
    }
}

impl Validate for ServiceDescription {
    fn validate(&self) -> Result<()> {
        require_name("service_type_name", &self.service_type_name)?;
        require_name_opt("placement_constraints", self.placement_constraints.as_deref())?;
        require_name_opt("service_dns_name", self.service_dns_name.as_deref())?;
        require_u32(
            "initialization_data",
            self.initialization_data.len() as i64,
        )?;
        self.partition_scheme
            .validate()
            .map_err(|e| e.within("partition_scheme"))?;
        self.kind.validate()?;
        self.validate_correlations()?;

        require_unique("metrics", self.metrics.iter().map(|m| m.name.as_str()))?;
        for (i, metric) in self.metrics.iter().enumerate() {
            metric
                .validate()
                .map_err(|e| e.within(&format!("metrics[{i}]")))?;
        }
        for (i, policy) in self.placement_policies.iter().enumerate() {
            policy
                .validate()
                .map_err(|e| e.within(&format!("placement_policies[{i}]")))?;
        }
        self.validate_scaling_policies()
    }
}

impl fmt::Display for ServiceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.kind.is_stateful() {
            "stateful"
        } else {
            "stateless"
        };
        write!(
            f,
            "{} ({}, {kind}, {} partition(s))",
            self.service_name,
            self.service_type_name,
            self.partition_scheme.partition_count()
        )
    }
}
