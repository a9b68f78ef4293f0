use super::{BOOLEAN, BYTE, DWORD, FABRIC_URI, LONG, LONGLONG, LPCWSTR, ULONG};
use std::ffi::c_void;

pub type FABRIC_SERVICE_DESCRIPTION_KIND = i32;
pub const FABRIC_SERVICE_DESCRIPTION_KIND_INVALID: FABRIC_SERVICE_DESCRIPTION_KIND = 0;
pub const FABRIC_SERVICE_DESCRIPTION_KIND_STATEFUL: FABRIC_SERVICE_DESCRIPTION_KIND = 1;
pub const FABRIC_SERVICE_DESCRIPTION_KIND_STATELESS: FABRIC_SERVICE_DESCRIPTION_KIND = 2;

pub type FABRIC_PARTITION_SCHEME = i32;
pub const FABRIC_PARTITION_SCHEME_INVALID: FABRIC_PARTITION_SCHEME = 0;
pub const FABRIC_PARTITION_SCHEME_SINGLETON: FABRIC_PARTITION_SCHEME = 1;
pub const FABRIC_PARTITION_SCHEME_UNIFORM_INT64_RANGE: FABRIC_PARTITION_SCHEME = 2;
pub const FABRIC_PARTITION_SCHEME_NAMED: FABRIC_PARTITION_SCHEME = 3;

pub type FABRIC_PLACEMENT_POLICY_TYPE = i32;
pub const FABRIC_PLACEMENT_POLICY_INVALID: FABRIC_PLACEMENT_POLICY_TYPE = 0;
pub const FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN: FABRIC_PLACEMENT_POLICY_TYPE = 1;
pub const FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN: FABRIC_PLACEMENT_POLICY_TYPE = 2;
pub const FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN: FABRIC_PLACEMENT_POLICY_TYPE = 3;
pub const FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DISTRIBUTION: FABRIC_PLACEMENT_POLICY_TYPE = 4;
pub const FABRIC_PLACEMENT_POLICY_NONPARTIALLY_PLACE_SERVICE: FABRIC_PLACEMENT_POLICY_TYPE = 5;

pub type FABRIC_SERVICE_CORRELATION_SCHEME = i32;
pub const FABRIC_SERVICE_CORRELATION_SCHEME_INVALID: FABRIC_SERVICE_CORRELATION_SCHEME = 0;
pub const FABRIC_SERVICE_CORRELATION_SCHEME_AFFINITY: FABRIC_SERVICE_CORRELATION_SCHEME = 1;
pub const FABRIC_SERVICE_CORRELATION_SCHEME_ALIGNED_AFFINITY: FABRIC_SERVICE_CORRELATION_SCHEME = 2;
pub const FABRIC_SERVICE_CORRELATION_SCHEME_NONALIGNED_AFFINITY: FABRIC_SERVICE_CORRELATION_SCHEME = 3;

pub type FABRIC_SERVICE_LOAD_METRIC_WEIGHT = i32;
pub const FABRIC_SERVICE_LOAD_METRIC_WEIGHT_ZERO: FABRIC_SERVICE_LOAD_METRIC_WEIGHT = 0;
pub const FABRIC_SERVICE_LOAD_METRIC_WEIGHT_LOW: FABRIC_SERVICE_LOAD_METRIC_WEIGHT = 1;
pub const FABRIC_SERVICE_LOAD_METRIC_WEIGHT_MEDIUM: FABRIC_SERVICE_LOAD_METRIC_WEIGHT = 2;
pub const FABRIC_SERVICE_LOAD_METRIC_WEIGHT_HIGH: FABRIC_SERVICE_LOAD_METRIC_WEIGHT = 3;

pub type FABRIC_MOVE_COST = i32;
pub const FABRIC_MOVE_COST_ZERO: FABRIC_MOVE_COST = 0;
pub const FABRIC_MOVE_COST_LOW: FABRIC_MOVE_COST = 1;
pub const FABRIC_MOVE_COST_MEDIUM: FABRIC_MOVE_COST = 2;
pub const FABRIC_MOVE_COST_HIGH: FABRIC_MOVE_COST = 3;
pub const FABRIC_MOVE_COST_VERYHIGH: FABRIC_MOVE_COST = 4;

pub type FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE = i32;
pub const FABRIC_ISOLATION_LEVEL_SHARED_PROCESS: FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE = 0;
pub const FABRIC_ISOLATION_LEVEL_EXCLUSIVE_PROCESS: FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE = 1;

pub type FABRIC_SCALING_TRIGGER_KIND = i32;
pub const FABRIC_SCALING_TRIGGER_KIND_INVALID: FABRIC_SCALING_TRIGGER_KIND = 0;
pub const FABRIC_SCALING_TRIGGER_KIND_AVERAGE_PARTITION_LOAD: FABRIC_SCALING_TRIGGER_KIND = 1;
pub const FABRIC_SCALING_TRIGGER_KIND_AVERAGE_SERVICE_LOAD: FABRIC_SCALING_TRIGGER_KIND = 2;

pub type FABRIC_SCALING_MECHANISM_KIND = i32;
pub const FABRIC_SCALING_MECHANISM_KIND_INVALID: FABRIC_SCALING_MECHANISM_KIND = 0;
pub const FABRIC_SCALING_MECHANISM_KIND_PARTITION_INSTANCE_COUNT: FABRIC_SCALING_MECHANISM_KIND = 1;
pub const FABRIC_SCALING_MECHANISM_KIND_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION:
    FABRIC_SCALING_MECHANISM_KIND = 2;

pub type FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_FLAGS = i32;
pub const FABRIC_STATEFUL_SERVICE_SETTINGS_NONE: FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_FLAGS = 0;
pub const FABRIC_STATEFUL_SERVICE_SETTINGS_REPLICA_RESTART_WAIT_DURATION:
    FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_FLAGS = 0x1;
pub const FABRIC_STATEFUL_SERVICE_SETTINGS_QUORUM_LOSS_WAIT_DURATION:
    FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_FLAGS = 0x2;
pub const FABRIC_STATEFUL_SERVICE_SETTINGS_STANDBY_REPLICA_KEEP_DURATION:
    FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_FLAGS = 0x4;

// ── Partitioning ──────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_UNIFORM_INT64_RANGE_PARTITION_SCHEME_DESCRIPTION {
    pub PartitionCount: LONG,
    pub LowKey: LONGLONG,
    pub HighKey: LONGLONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_NAMED_PARTITION_SCHEME_DESCRIPTION {
    pub PartitionCount: LONG,
    pub Names: *const LPCWSTR,
    pub Reserved: *mut c_void,
}

// ── Placement, correlation, load ──────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN_DESCRIPTION {
    pub InvalidFaultDomain: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DESCRIPTION {
    pub RequiredFaultDomain: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN_DESCRIPTION {
    pub PreferredPrimaryFaultDomain: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PLACEMENT_POLICY_REQUIRED_DISTRIBUTION_DESCRIPTION {
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PLACEMENT_POLICY_NONPARTIALLY_PLACE_SERVICE_DESCRIPTION {
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_PLACEMENT_POLICY_DESCRIPTION {
    pub Type: FABRIC_PLACEMENT_POLICY_TYPE,
    /// Points at the policy struct selected by `Type`.
    pub Value: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_PLACEMENT_POLICY_LIST {
    pub PolicyCount: ULONG,
    pub Policies: *const FABRIC_SERVICE_PLACEMENT_POLICY_DESCRIPTION,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_CORRELATION_DESCRIPTION {
    pub ServiceName: FABRIC_URI,
    pub Scheme: FABRIC_SERVICE_CORRELATION_SCHEME,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION {
    pub Name: LPCWSTR,
    pub Weight: FABRIC_SERVICE_LOAD_METRIC_WEIGHT,
    pub PrimaryDefaultLoad: ULONG,
    pub SecondaryDefaultLoad: ULONG,
    pub Reserved: *mut c_void,
}

// ── Scaling ───────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_TRIGGER_AVERAGE_PARTITION_LOAD_DESCRIPTION {
    pub MetricName: LPCWSTR,
    pub LowerLoadThreshold: f64,
    pub UpperLoadThreshold: f64,
    pub ScaleIntervalInSeconds: ULONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION {
    pub MetricName: LPCWSTR,
    pub LowerLoadThreshold: f64,
    pub UpperLoadThreshold: f64,
    pub ScaleIntervalInSeconds: ULONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION_EX1 {
    pub UseOnlyPrimaryLoad: BOOLEAN,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_TRIGGER_DESCRIPTION {
    pub ScalingTriggerKind: FABRIC_SCALING_TRIGGER_KIND,
    pub ScalingTriggerDescription: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_MECHANISM_PARTITION_INSTANCE_COUNT {
    pub MaximumInstanceCount: LONG,
    pub MinimumInstanceCount: LONG,
    pub ScaleIncrement: LONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_MECHANISM_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION {
    pub MaximumPartitionCount: LONG,
    pub MinimumPartitionCount: LONG,
    pub ScaleIncrement: LONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SCALING_MECHANISM_DESCRIPTION {
    pub ScalingMechanismKind: FABRIC_SCALING_MECHANISM_KIND,
    pub ScalingMechanismDescription: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_SCALING_POLICY {
    pub ScalingTrigger: *const FABRIC_SCALING_TRIGGER_DESCRIPTION,
    pub ScalingMechanism: *const FABRIC_SCALING_MECHANISM_DESCRIPTION,
    pub Reserved: *mut c_void,
}

// ── Stateful ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS {
    /// Combination of `FABRIC_STATEFUL_SERVICE_SETTINGS_*` bits.
    pub Flags: DWORD,
    pub ReplicaRestartWaitDurationSeconds: DWORD,
    pub QuorumLossWaitDurationSeconds: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_EX1 {
    pub StandByReplicaKeepDurationSeconds: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub ServiceName: FABRIC_URI,
    pub ServiceTypeName: LPCWSTR,
    pub InitializationDataSize: ULONG,
    pub InitializationData: *const BYTE,
    pub PartitionScheme: FABRIC_PARTITION_SCHEME,
    /// Points at the scheme struct selected by `PartitionScheme`; null for singleton.
    pub PartitionSchemeDescription: *mut c_void,
    pub TargetReplicaSetSize: LONG,
    pub MinReplicaSetSize: LONG,
    pub PlacementConstraints: LPCWSTR,
    pub CorrelationCount: ULONG,
    pub Correlations: *const FABRIC_SERVICE_CORRELATION_DESCRIPTION,
    pub MetricCount: ULONG,
    pub Metrics: *const FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION,
    pub HasPersistedState: BOOLEAN,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX1 {
    pub PolicyList: *const FABRIC_SERVICE_PLACEMENT_POLICY_LIST,
    pub FailoverSettings: *const FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX2 {
    pub IsDefaultMoveCostSpecified: BOOLEAN,
    pub DefaultMoveCost: FABRIC_MOVE_COST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX3 {
    pub ServiceDnsName: LPCWSTR,
    pub ServicePackageActivationMode: FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX4 {
    pub ScalingPolicyCount: ULONG,
    pub ServiceScalingPolicies: *const FABRIC_SERVICE_SCALING_POLICY,
    pub Reserved: *mut c_void,
}

// ── Stateless ─────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATELESS_SERVICE_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub ServiceName: FABRIC_URI,
    pub ServiceTypeName: LPCWSTR,
    pub InitializationDataSize: ULONG,
    pub InitializationData: *const BYTE,
    pub PartitionScheme: FABRIC_PARTITION_SCHEME,
    pub PartitionSchemeDescription: *mut c_void,
    pub InstanceCount: LONG,
    pub PlacementConstraints: LPCWSTR,
    pub CorrelationCount: ULONG,
    pub Correlations: *const FABRIC_SERVICE_CORRELATION_DESCRIPTION,
    pub MetricCount: ULONG,
    pub Metrics: *const FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATELESS_SERVICE_DESCRIPTION_EX1 {
    pub PolicyList: *const FABRIC_SERVICE_PLACEMENT_POLICY_LIST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATELESS_SERVICE_DESCRIPTION_EX2 {
    pub IsDefaultMoveCostSpecified: BOOLEAN,
    pub DefaultMoveCost: FABRIC_MOVE_COST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATELESS_SERVICE_DESCRIPTION_EX3 {
    pub ServiceDnsName: LPCWSTR,
    pub ServicePackageActivationMode: FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_STATELESS_SERVICE_DESCRIPTION_EX4 {
    pub ScalingPolicyCount: ULONG,
    pub ServiceScalingPolicies: *const FABRIC_SERVICE_SCALING_POLICY,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_DESCRIPTION {
    pub Kind: FABRIC_SERVICE_DESCRIPTION_KIND,
    /// Points at the stateful or stateless struct selected by `Kind`.
    pub Value: *mut c_void,
}
