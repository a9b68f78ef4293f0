//! Request and query descriptions for the cluster-management API.
//!
//! Each description is a plain record that is built by the caller, checked
//! with [`Validate`] immediately before a single native call, projected into
//! its native layout by `fabric-ffi`, and then dropped. Descriptions read back
//! from native responses go through the inverse projection.
//!
//! Families:
//! - [`application`]: create / update application requests and capacity metrics
//! - [`query`]: paged application, service, application-type and partition queries
//! - [`health`]: health policies, health-state filters and health queries
//! - [`upgrade`]: rolling upgrade policies and upgrade requests
//! - [`service`]: service descriptions with partitioning, placement and scaling
//! - [`entry_point`]: code package entry points
//!
//! Variant families (partition schemes, placement policies, scaling triggers
//! and mechanisms, upgrade policies, entry points) are closed enums; the set
//! of variants is fixed by the native ABI.

mod flags;

pub mod application;
pub mod entry_point;
pub mod health;
pub mod query;
pub mod service;
pub mod upgrade;

pub use application::{
    ApplicationDescription, ApplicationMetricDescription, ApplicationUpdateDescription,
};
pub use entry_point::{
    CodePackageEntryPointDescription, ContainerHostEntryPointDescription,
    DllHostEntryPointDescription, DllHostHostedDllDescription, DllHostIsolationPolicy,
    ExeHostEntryPointDescription, ExeHostWorkingFolder,
};
pub use health::{
    ApplicationHealthPolicy, ApplicationHealthQueryDescription,
    DeployedApplicationHealthStatesFilter, HealthEventsFilter, HealthStateFilter,
    HealthStatisticsFilter, ServiceHealthStatesFilter, ServiceTypeHealthPolicy,
};
pub use query::{
    ApplicationDefinitionKindFilter, ApplicationQueryDescription,
    ApplicationTypeDefinitionKindFilter, PagedApplicationTypeQueryDescription,
    PartitionQueryDescription, ServiceQueryDescription,
};
pub use service::{
    MoveCost, PartitionSchemeDescription, ScalingMechanismDescription, ScalingPolicyDescription,
    ScalingTriggerDescription, ServiceCorrelationDescription, ServiceCorrelationScheme,
    ServiceDescription, ServiceKindDescription, ServiceLoadMetricDescription,
    ServiceLoadMetricWeight, ServicePackageActivationMode, ServicePlacementPolicyDescription,
    StatefulServiceSettings, StatelessServiceSettings,
};
pub use upgrade::{
    ApplicationUpgradeDescription, ApplicationUpgradeUpdateDescription, RollingUpgradeMode,
    RollingUpgradeModeKind, RollingUpgradeMonitoringPolicy, RollingUpgradePolicyDescription,
    UpgradeFailureAction, UpgradeKind, UpgradePolicyDescription,
};

pub use fabric_types::{Error, FabricUri, PartitionId, Result, Validate};
