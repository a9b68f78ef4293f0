//! Health policies, health-state filters and the application health query.

use crate::flags::filter_flags;
use fabric_types::validate::{require_name, require_percent};
use fabric_types::{FabricUri, Result, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

filter_flags! {
    /// Selects which health states are returned by a health query.
    pub struct HealthStateFilter {
        /// Entities with no reported health state.
        const NONE = 0x1;
        const OK = 0x2;
        const WARNING = 0x4;
        const ERROR = 0x8;
    }
    mask = 0xF;
}

/// Filters the health events returned with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthEventsFilter {
    #[serde(default)]
    pub health_state_filter: HealthStateFilter,
}

/// Filters the service children returned with an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceHealthStatesFilter {
    #[serde(default)]
    pub health_state_filter: HealthStateFilter,
}

/// Filters the deployed-application children returned with an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeployedApplicationHealthStatesFilter {
    #[serde(default)]
    pub health_state_filter: HealthStateFilter,
}

macro_rules! impl_state_filter {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn new(health_state_filter: HealthStateFilter) -> Self {
                    Self { health_state_filter }
                }
            }

            impl Validate for $name {
                fn validate(&self) -> Result<()> {
                    self.health_state_filter.require_valid("health_state_filter")
                }
            }
        )*
    };
}

impl_state_filter!(
    HealthEventsFilter,
    ServiceHealthStatesFilter,
    DeployedApplicationHealthStatesFilter,
);

/// Controls whether health statistics are computed for a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthStatisticsFilter {
    #[serde(default)]
    pub exclude_health_statistics: bool,
}

/// Unhealthy-child thresholds for services of one service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceTypeHealthPolicy {
    #[serde(default)]
    pub max_percent_unhealthy_services: u8,
    #[serde(default)]
    pub max_percent_unhealthy_partitions_per_service: u8,
    #[serde(default)]
    pub max_percent_unhealthy_replicas_per_partition: u8,
}

impl Validate for ServiceTypeHealthPolicy {
    fn validate(&self) -> Result<()> {
        require_percent("max_percent_unhealthy_services", self.max_percent_unhealthy_services)?;
        require_percent(
            "max_percent_unhealthy_partitions_per_service",
            self.max_percent_unhealthy_partitions_per_service,
        )?;
        require_percent(
            "max_percent_unhealthy_replicas_per_partition",
            self.max_percent_unhealthy_replicas_per_partition,
        )
    }
}

/// Policy used to evaluate the health of an application and its children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationHealthPolicy {
    #[serde(default)]
    pub consider_warning_as_error: bool,
    #[serde(default)]
    pub max_percent_unhealthy_deployed_applications: u8,
    #[serde(default)]
    pub default_service_type_health_policy: Option<ServiceTypeHealthPolicy>,
    /// Per service type overrides of the default policy.
    #[serde(default)]
    pub service_type_health_policy_map: BTreeMap<String, ServiceTypeHealthPolicy>,
}

impl ApplicationHealthPolicy {
    pub fn with_service_type_policy(
        mut self,
        service_type_name: impl Into<String>,
        policy: ServiceTypeHealthPolicy,
    ) -> Self {
        self.service_type_health_policy_map
            .insert(service_type_name.into(), policy);
        self
    }
}

impl Validate for ApplicationHealthPolicy {
    fn validate(&self) -> Result<()> {
        require_percent(
            "max_percent_unhealthy_deployed_applications",
            self.max_percent_unhealthy_deployed_applications,
        )?;
        self.default_service_type_health_policy
            .validate()
            .map_err(|e| e.within("default_service_type_health_policy"))?;
        for (name, policy) in &self.service_type_health_policy_map {
            let field = format!("service_type_health_policy_map[{name}]");
            require_name("service_type_health_policy_map", name)?;
            policy.validate().map_err(|e| e.within(&field))?;
        }
        Ok(())
    }
}

/// Query for the aggregated health of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationHealthQueryDescription {
    pub application_name: FabricUri,
    #[serde(default)]
    pub health_policy: Option<ApplicationHealthPolicy>,
    #[serde(default)]
    pub events_filter: Option<HealthEventsFilter>,
    #[serde(default)]
    pub services_filter: Option<ServiceHealthStatesFilter>,
    #[serde(default)]
    pub deployed_applications_filter: Option<DeployedApplicationHealthStatesFilter>,
    #[serde(default)]
    pub health_statistics_filter: Option<HealthStatisticsFilter>,
}

impl ApplicationHealthQueryDescription {
    pub fn new(application_name: FabricUri) -> Self {
        Self {
            application_name,
            health_policy: None,
            events_filter: None,
            services_filter: None,
            deployed_applications_filter: None,
            health_statistics_filter: None,
        }
    }
}

impl Validate for ApplicationHealthQueryDescription {
    fn validate(&self) -> Result<()> {
        self.health_policy
            .validate()
            .map_err(|e| e.within("health_policy"))?;
        self.events_filter
            .validate()
            .map_err(|e| e.within("events_filter"))?;
        self.services_filter
            .validate()
            .map_err(|e| e.within("services_filter"))?;
        self.deployed_applications_filter
            .validate()
            .map_err(|e| e.within("deployed_applications_filter"))
    }
}
