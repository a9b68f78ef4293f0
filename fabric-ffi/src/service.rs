use crate::abi::{
    abi_mismatch, chain, extension, flag_bits, from_boolean, from_seconds, narrow, payload,
    read_array, read_optional_string, read_optional_uri, read_string, read_uri, to_boolean,
    to_seconds,
};
use crate::health::optional_native;
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::service::{
    MoveCost, PartitionSchemeDescription, ScalingMechanismDescription, ScalingPolicyDescription,
    ScalingTriggerDescription, ServiceCorrelationDescription, ServiceCorrelationScheme,
    ServiceDescription, ServiceKindDescription, ServiceLoadMetricDescription,
    ServiceLoadMetricWeight, ServicePackageActivationMode, ServicePlacementPolicyDescription,
    StatefulServiceSettings, StatelessServiceSettings,
};
use std::ffi::c_void;
use std::ptr;

// ── Enumerations ──────────────────────────────────────────────────

fn weight_to_native(weight: ServiceLoadMetricWeight) -> FABRIC_SERVICE_LOAD_METRIC_WEIGHT {
    match weight {
        ServiceLoadMetricWeight::Zero => FABRIC_SERVICE_LOAD_METRIC_WEIGHT_ZERO,
        ServiceLoadMetricWeight::Low => FABRIC_SERVICE_LOAD_METRIC_WEIGHT_LOW,
        ServiceLoadMetricWeight::Medium => FABRIC_SERVICE_LOAD_METRIC_WEIGHT_MEDIUM,
        ServiceLoadMetricWeight::High => FABRIC_SERVICE_LOAD_METRIC_WEIGHT_HIGH,
    }
}

fn weight_from_native(weight: FABRIC_SERVICE_LOAD_METRIC_WEIGHT) -> ServiceLoadMetricWeight {
    match weight {
        FABRIC_SERVICE_LOAD_METRIC_WEIGHT_ZERO => ServiceLoadMetricWeight::Zero,
        FABRIC_SERVICE_LOAD_METRIC_WEIGHT_LOW => ServiceLoadMetricWeight::Low,
        FABRIC_SERVICE_LOAD_METRIC_WEIGHT_MEDIUM => ServiceLoadMetricWeight::Medium,
        FABRIC_SERVICE_LOAD_METRIC_WEIGHT_HIGH => ServiceLoadMetricWeight::High,
        other => abi_mismatch("FABRIC_SERVICE_LOAD_METRIC_WEIGHT", other),
    }
}

fn move_cost_to_native(cost: MoveCost) -> FABRIC_MOVE_COST {
    match cost {
        MoveCost::Zero => FABRIC_MOVE_COST_ZERO,
        MoveCost::Low => FABRIC_MOVE_COST_LOW,
        MoveCost::Medium => FABRIC_MOVE_COST_MEDIUM,
        MoveCost::High => FABRIC_MOVE_COST_HIGH,
        MoveCost::VeryHigh => FABRIC_MOVE_COST_VERYHIGH,
    }
}

fn move_cost_from_native(cost: FABRIC_MOVE_COST) -> MoveCost {
    match cost {
        FABRIC_MOVE_COST_ZERO => MoveCost::Zero,
        FABRIC_MOVE_COST_LOW => MoveCost::Low,
        FABRIC_MOVE_COST_MEDIUM => MoveCost::Medium,
        FABRIC_MOVE_COST_HIGH => MoveCost::High,
        FABRIC_MOVE_COST_VERYHIGH => MoveCost::VeryHigh,
        other => abi_mismatch("FABRIC_MOVE_COST", other),
    }
}

fn activation_mode_to_native(
    mode: ServicePackageActivationMode,
) -> FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE {
    match mode {
        ServicePackageActivationMode::SharedProcess => FABRIC_ISOLATION_LEVEL_SHARED_PROCESS,
        ServicePackageActivationMode::ExclusiveProcess => FABRIC_ISOLATION_LEVEL_EXCLUSIVE_PROCESS,
    }
}

fn activation_mode_from_native(
    mode: FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE,
) -> ServicePackageActivationMode {
    match mode {
        FABRIC_ISOLATION_LEVEL_SHARED_PROCESS => ServicePackageActivationMode::SharedProcess,
        FABRIC_ISOLATION_LEVEL_EXCLUSIVE_PROCESS => ServicePackageActivationMode::ExclusiveProcess,
        other => abi_mismatch("FABRIC_SERVICE_PACKAGE_ACTIVATION_MODE", other),
    }
}

fn correlation_scheme_to_native(
    scheme: ServiceCorrelationScheme,
) -> FABRIC_SERVICE_CORRELATION_SCHEME {
    match scheme {
        ServiceCorrelationScheme::Affinity => FABRIC_SERVICE_CORRELATION_SCHEME_AFFINITY,
        ServiceCorrelationScheme::AlignedAffinity => {
            FABRIC_SERVICE_CORRELATION_SCHEME_ALIGNED_AFFINITY
        }
        ServiceCorrelationScheme::NonAlignedAffinity => {
            FABRIC_SERVICE_CORRELATION_SCHEME_NONALIGNED_AFFINITY
        }
    }
}

fn correlation_scheme_from_native(
    scheme: FABRIC_SERVICE_CORRELATION_SCHEME,
) -> ServiceCorrelationScheme {
    match scheme {
        FABRIC_SERVICE_CORRELATION_SCHEME_AFFINITY => ServiceCorrelationScheme::Affinity,
        FABRIC_SERVICE_CORRELATION_SCHEME_ALIGNED_AFFINITY => {
            ServiceCorrelationScheme::AlignedAffinity
        }
        FABRIC_SERVICE_CORRELATION_SCHEME_NONALIGNED_AFFINITY => {
            ServiceCorrelationScheme::NonAlignedAffinity
        }
        other => abi_mismatch("FABRIC_SERVICE_CORRELATION_SCHEME", other),
    }
}

// ── Partitioning ──────────────────────────────────────────────────

fn partition_scheme_to_native(
    pin: &mut PinCollection,
    scheme: &PartitionSchemeDescription,
) -> (FABRIC_PARTITION_SCHEME, *mut c_void) {
    match scheme {
        PartitionSchemeDescription::Singleton => {
            (FABRIC_PARTITION_SCHEME_SINGLETON, ptr::null_mut())
        }
        PartitionSchemeDescription::UniformInt64Range {
            partition_count,
            low_key,
            high_key,
        } => {
            let native = FABRIC_UNIFORM_INT64_RANGE_PARTITION_SCHEME_DESCRIPTION {
                PartitionCount: narrow("partition_count", *partition_count),
                LowKey: *low_key,
                HighKey: *high_key,
                Reserved: ptr::null_mut(),
            };
            (
                FABRIC_PARTITION_SCHEME_UNIFORM_INT64_RANGE,
                pin.add_item(native).cast(),
            )
        }
        PartitionSchemeDescription::Named { partition_names } => {
            let names = partition_names
                .iter()
                .map(|name| pin.add_string(name))
                .collect();
            let (count, names) = pin.add_array(names);
            let native = FABRIC_NAMED_PARTITION_SCHEME_DESCRIPTION {
                PartitionCount: narrow("partition_count", i64::from(count)),
                Names: names,
                Reserved: ptr::null_mut(),
            };
            (FABRIC_PARTITION_SCHEME_NAMED, pin.add_item(native).cast())
        }
    }
}

unsafe fn partition_scheme_from_native(
    scheme: FABRIC_PARTITION_SCHEME,
    value: *mut c_void,
) -> PartitionSchemeDescription {
    match scheme {
        FABRIC_PARTITION_SCHEME_SINGLETON => PartitionSchemeDescription::Singleton,
        FABRIC_PARTITION_SCHEME_UNIFORM_INT64_RANGE => {
            let native = unsafe {
                payload::<FABRIC_UNIFORM_INT64_RANGE_PARTITION_SCHEME_DESCRIPTION>(value, scheme)
            };
            PartitionSchemeDescription::UniformInt64Range {
                partition_count: i64::from(native.PartitionCount),
                low_key: native.LowKey,
                high_key: native.HighKey,
            }
        }
        FABRIC_PARTITION_SCHEME_NAMED => {
            let native =
                unsafe { payload::<FABRIC_NAMED_PARTITION_SCHEME_DESCRIPTION>(value, scheme) };
            let count: ULONG = narrow("named partition count", i64::from(native.PartitionCount));
            let partition_names = unsafe { read_array(count, native.Names) }
                .iter()
                .map(|&name| unsafe { read_string(name) })
                .collect();
            PartitionSchemeDescription::Named { partition_names }
        }
        other => abi_mismatch("FABRIC_PARTITION_SCHEME", other),
    }
}

// ── Placement, correlation, load ──────────────────────────────────

impl ToNative for ServicePlacementPolicyDescription {
    type Native = FABRIC_SERVICE_PLACEMENT_POLICY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match self {
            Self::InvalidDomain { domain_name } => {
                let native = FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN_DESCRIPTION {
                    InvalidFaultDomain: pin.add_string(domain_name),
                    Reserved: ptr::null_mut(),
                };
                (FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN, pin.add_item(native).cast())
            }
            Self::RequiredDomain { domain_name } => {
                let native = FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DESCRIPTION {
                    RequiredFaultDomain: pin.add_string(domain_name),
                    Reserved: ptr::null_mut(),
                };
                (FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN, pin.add_item(native).cast())
            }
            Self::PreferredPrimaryDomain { domain_name } => {
                let native = FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN_DESCRIPTION {
                    PreferredPrimaryFaultDomain: pin.add_string(domain_name),
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN,
                    pin.add_item(native).cast(),
                )
            }
            Self::RequiredDomainDistribution => {
                let native = FABRIC_PLACEMENT_POLICY_REQUIRED_DISTRIBUTION_DESCRIPTION {
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DISTRIBUTION,
                    pin.add_item(native).cast(),
                )
            }
            Self::NonPartiallyPlaceService => {
                let native = FABRIC_PLACEMENT_POLICY_NONPARTIALLY_PLACE_SERVICE_DESCRIPTION {
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_PLACEMENT_POLICY_NONPARTIALLY_PLACE_SERVICE,
                    pin.add_item(native).cast(),
                )
            }
        };
        FABRIC_SERVICE_PLACEMENT_POLICY_DESCRIPTION {
            Type: kind,
            Value: value,
        }
    }
}

impl FromNative for ServicePlacementPolicyDescription {
    type Native = FABRIC_SERVICE_PLACEMENT_POLICY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.Type;
        match kind {
            FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN => {
                let value = unsafe {
                    payload::<FABRIC_PLACEMENT_POLICY_INVALID_DOMAIN_DESCRIPTION>(native.Value, kind)
                };
                Self::InvalidDomain {
                    domain_name: unsafe { read_string(value.InvalidFaultDomain) },
                }
            }
            FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN => {
                let value = unsafe {
                    payload::<FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DESCRIPTION>(
                        native.Value,
                        kind,
                    )
                };
                Self::RequiredDomain {
                    domain_name: unsafe { read_string(value.RequiredFaultDomain) },
                }
            }
            FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN => {
                let value = unsafe {
                    payload::<FABRIC_PLACEMENT_POLICY_PREFERRED_PRIMARY_DOMAIN_DESCRIPTION>(
                        native.Value,
                        kind,
                    )
                };
                Self::PreferredPrimaryDomain {
                    domain_name: unsafe { read_string(value.PreferredPrimaryFaultDomain) },
                }
            }
            // Both carry only a Reserved pointer; the payload is not read.
            FABRIC_PLACEMENT_POLICY_REQUIRED_DOMAIN_DISTRIBUTION => {
                Self::RequiredDomainDistribution
            }
            FABRIC_PLACEMENT_POLICY_NONPARTIALLY_PLACE_SERVICE => Self::NonPartiallyPlaceService,
            other => abi_mismatch("FABRIC_PLACEMENT_POLICY_TYPE", other),
        }
    }
}

fn placement_policies_to_native(
    pin: &mut PinCollection,
    policies: &[ServicePlacementPolicyDescription],
) -> *const FABRIC_SERVICE_PLACEMENT_POLICY_LIST {
    if policies.is_empty() {
        return ptr::null();
    }
    let items = policies.iter().map(|p| p.to_native(pin)).collect();
    let (count, items) = pin.add_array(items);
    pin.add_item(FABRIC_SERVICE_PLACEMENT_POLICY_LIST {
        PolicyCount: count,
        Policies: items,
    })
    .cast_const()
}

unsafe fn placement_policies_from_native(
    list: *const FABRIC_SERVICE_PLACEMENT_POLICY_LIST,
) -> Vec<ServicePlacementPolicyDescription> {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return Vec::new();
    };
    unsafe { read_array(list.PolicyCount, list.Policies) }
        .iter()
        .map(|p| unsafe { ServicePlacementPolicyDescription::from_native(p) })
        .collect()
}

impl ToNative for ServiceCorrelationDescription {
    type Native = FABRIC_SERVICE_CORRELATION_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_SERVICE_CORRELATION_DESCRIPTION {
            ServiceName: pin.add_uri(&self.service_name),
            Scheme: correlation_scheme_to_native(self.scheme),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ServiceCorrelationDescription {
    type Native = FABRIC_SERVICE_CORRELATION_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self::new(
            unsafe { read_uri(native.ServiceName) },
            correlation_scheme_from_native(native.Scheme),
        )
    }
}

impl ToNative for ServiceLoadMetricDescription {
    type Native = FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION {
            Name: pin.add_string(&self.name),
            Weight: weight_to_native(self.weight),
            PrimaryDefaultLoad: narrow("primary_default_load", self.primary_default_load),
            SecondaryDefaultLoad: narrow("secondary_default_load", self.secondary_default_load),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ServiceLoadMetricDescription {
    type Native = FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self::new(
            unsafe { read_string(native.Name) },
            weight_from_native(native.Weight),
        )
        .with_default_loads(
            i64::from(native.PrimaryDefaultLoad),
            i64::from(native.SecondaryDefaultLoad),
        )
    }
}

fn list_to_native<D: ToNative>(pin: &mut PinCollection, items: &[D]) -> (ULONG, *const D::Native) {
    let natives = items.iter().map(|item| item.to_native(pin)).collect();
    pin.add_array(natives)
}

unsafe fn list_from_native<D: FromNative>(count: ULONG, items: *const D::Native) -> Vec<D> {
    unsafe { read_array(count, items) }
        .iter()
        .map(|item| unsafe { D::from_native(item) })
        .collect()
}

// ── Scaling ───────────────────────────────────────────────────────

impl ToNative for ScalingTriggerDescription {
    type Native = FABRIC_SCALING_TRIGGER_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match self {
            Self::AveragePartitionLoad {
                metric_name,
                lower_load_threshold,
                upper_load_threshold,
                scale_interval,
            } => {
                let native = FABRIC_SCALING_TRIGGER_AVERAGE_PARTITION_LOAD_DESCRIPTION {
                    MetricName: pin.add_string(metric_name),
                    LowerLoadThreshold: *lower_load_threshold,
                    UpperLoadThreshold: *upper_load_threshold,
                    ScaleIntervalInSeconds: to_seconds("scale_interval", *scale_interval),
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_SCALING_TRIGGER_KIND_AVERAGE_PARTITION_LOAD,
                    pin.add_item(native).cast(),
                )
            }
            Self::AverageServiceLoad {
                metric_name,
                lower_load_threshold,
                upper_load_threshold,
                scale_interval,
                use_only_primary_load,
            } => {
                let ex1 = use_only_primary_load.then(|| {
                    FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION_EX1 {
                        UseOnlyPrimaryLoad: to_boolean(true),
                        Reserved: ptr::null_mut(),
                    }
                });
                let native = FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION {
                    MetricName: pin.add_string(metric_name),
                    LowerLoadThreshold: *lower_load_threshold,
                    UpperLoadThreshold: *upper_load_threshold,
                    ScaleIntervalInSeconds: to_seconds("scale_interval", *scale_interval),
                    Reserved: chain(pin, ex1),
                };
                (
                    FABRIC_SCALING_TRIGGER_KIND_AVERAGE_SERVICE_LOAD,
                    pin.add_item(native).cast(),
                )
            }
        };
        FABRIC_SCALING_TRIGGER_DESCRIPTION {
            ScalingTriggerKind: kind,
            ScalingTriggerDescription: value,
        }
    }
}

impl FromNative for ScalingTriggerDescription {
    type Native = FABRIC_SCALING_TRIGGER_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.ScalingTriggerKind;
        match kind {
            FABRIC_SCALING_TRIGGER_KIND_AVERAGE_PARTITION_LOAD => {
                let value = unsafe {
                    payload::<FABRIC_SCALING_TRIGGER_AVERAGE_PARTITION_LOAD_DESCRIPTION>(
                        native.ScalingTriggerDescription,
                        kind,
                    )
                };
                Self::AveragePartitionLoad {
                    metric_name: unsafe { read_string(value.MetricName) },
                    lower_load_threshold: value.LowerLoadThreshold,
                    upper_load_threshold: value.UpperLoadThreshold,
                    scale_interval: from_seconds(value.ScaleIntervalInSeconds),
                }
            }
            FABRIC_SCALING_TRIGGER_KIND_AVERAGE_SERVICE_LOAD => {
                let value = unsafe {
                    payload::<FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION>(
                        native.ScalingTriggerDescription,
                        kind,
                    )
                };
                let ex1 = unsafe {
                    extension::<FABRIC_SCALING_TRIGGER_AVERAGE_SERVICE_LOAD_DESCRIPTION_EX1>(
                        value.Reserved,
                    )
                };
                Self::AverageServiceLoad {
                    metric_name: unsafe { read_string(value.MetricName) },
                    lower_load_threshold: value.LowerLoadThreshold,
                    upper_load_threshold: value.UpperLoadThreshold,
                    scale_interval: from_seconds(value.ScaleIntervalInSeconds),
                    use_only_primary_load: ex1
                        .is_some_and(|ex1| from_boolean(ex1.UseOnlyPrimaryLoad)),
                }
            }
            other => abi_mismatch("FABRIC_SCALING_TRIGGER_KIND", other),
        }
    }
}

impl ToNative for ScalingMechanismDescription {
    type Native = FABRIC_SCALING_MECHANISM_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match *self {
            Self::PartitionInstanceCount {
                minimum_instance_count,
                maximum_instance_count,
                scale_increment,
            } => {
                let native = FABRIC_SCALING_MECHANISM_PARTITION_INSTANCE_COUNT {
                    MaximumInstanceCount: narrow("maximum_instance_count", maximum_instance_count),
                    MinimumInstanceCount: narrow("minimum_instance_count", minimum_instance_count),
                    ScaleIncrement: narrow("scale_increment", scale_increment),
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_SCALING_MECHANISM_KIND_PARTITION_INSTANCE_COUNT,
                    pin.add_item(native).cast(),
                )
            }
            Self::AddRemoveIncrementalNamedPartition {
                minimum_partition_count,
                maximum_partition_count,
                scale_increment,
            } => {
                let native = FABRIC_SCALING_MECHANISM_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION {
                    MaximumPartitionCount: narrow(
                        "maximum_partition_count",
                        maximum_partition_count,
                    ),
                    MinimumPartitionCount: narrow(
                        "minimum_partition_count",
                        minimum_partition_count,
                    ),
                    ScaleIncrement: narrow("scale_increment", scale_increment),
                    Reserved: ptr::null_mut(),
                };
                (
                    FABRIC_SCALING_MECHANISM_KIND_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION,
                    pin.add_item(native).cast(),
                )
            }
        };
        FABRIC_SCALING_MECHANISM_DESCRIPTION {
            ScalingMechanismKind: kind,
            ScalingMechanismDescription: value,
        }
    }
}

impl FromNative for ScalingMechanismDescription {
    type Native = FABRIC_SCALING_MECHANISM_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.ScalingMechanismKind;
        match kind {
            FABRIC_SCALING_MECHANISM_KIND_PARTITION_INSTANCE_COUNT => {
                let value = unsafe {
                    payload::<FABRIC_SCALING_MECHANISM_PARTITION_INSTANCE_COUNT>(
                        native.ScalingMechanismDescription,
                        kind,
                    )
                };
                Self::PartitionInstanceCount {
                    minimum_instance_count: i64::from(value.MinimumInstanceCount),
                    maximum_instance_count: i64::from(value.MaximumInstanceCount),
                    scale_increment: i64::from(value.ScaleIncrement),
                }
            }
            FABRIC_SCALING_MECHANISM_KIND_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION => {
                let value = unsafe {
                    payload::<FABRIC_SCALING_MECHANISM_ADD_REMOVE_INCREMENTAL_NAMED_PARTITION>(
                        native.ScalingMechanismDescription,
                        kind,
                    )
                };
                Self::AddRemoveIncrementalNamedPartition {
                    minimum_partition_count: i64::from(value.MinimumPartitionCount),
                    maximum_partition_count: i64::from(value.MaximumPartitionCount),
                    scale_increment: i64::from(value.ScaleIncrement),
                }
            }
            other => abi_mismatch("FABRIC_SCALING_MECHANISM_KIND", other),
        }
    }
}

impl ToNative for ScalingPolicyDescription {
    type Native = FABRIC_SERVICE_SCALING_POLICY;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_SERVICE_SCALING_POLICY {
            ScalingTrigger: optional_native(pin, Some(&self.trigger)),
            ScalingMechanism: optional_native(pin, Some(&self.mechanism)),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ScalingPolicyDescription {
    type Native = FABRIC_SERVICE_SCALING_POLICY;

    unsafe fn from_native(native: &Self::Native) -> Self {
        unsafe {
            Self::new(
                ScalingTriggerDescription::from_native_ptr(native.ScalingTrigger),
                ScalingMechanismDescription::from_native_ptr(native.ScalingMechanism),
            )
        }
    }
}

// ── Failover settings ─────────────────────────────────────────────

fn failover_settings_to_native(
    pin: &mut PinCollection,
    settings: &StatefulServiceSettings,
) -> *const FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS {
    if !settings.has_failover_settings() {
        return ptr::null();
    }
    let mut flags = FABRIC_STATEFUL_SERVICE_SETTINGS_NONE;
    if settings.replica_restart_wait_duration.is_some() {
        flags |= FABRIC_STATEFUL_SERVICE_SETTINGS_REPLICA_RESTART_WAIT_DURATION;
    }
    if settings.quorum_loss_wait_duration.is_some() {
        flags |= FABRIC_STATEFUL_SERVICE_SETTINGS_QUORUM_LOSS_WAIT_DURATION;
    }
    if settings.stand_by_replica_keep_duration.is_some() {
        flags |= FABRIC_STATEFUL_SERVICE_SETTINGS_STANDBY_REPLICA_KEEP_DURATION;
    }
    let ex1 = settings.stand_by_replica_keep_duration.map(|keep| {
        FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_EX1 {
            StandByReplicaKeepDurationSeconds: to_seconds("stand_by_replica_keep_duration", keep),
            Reserved: ptr::null_mut(),
        }
    });
    let native = FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS {
        Flags: flag_bits(flags),
        ReplicaRestartWaitDurationSeconds: to_seconds(
            "replica_restart_wait_duration",
            settings.replica_restart_wait_duration.unwrap_or_default(),
        ),
        QuorumLossWaitDurationSeconds: to_seconds(
            "quorum_loss_wait_duration",
            settings.quorum_loss_wait_duration.unwrap_or_default(),
        ),
        Reserved: chain(pin, ex1),
    };
    pin.add_item(native).cast_const()
}

unsafe fn failover_settings_from_native(
    settings: &mut StatefulServiceSettings,
    native: *const FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS,
) {
    let Some(native) = (unsafe { native.as_ref() }) else {
        return;
    };
    let has = |flag| native.Flags & flag_bits(flag) != 0;
    if has(FABRIC_STATEFUL_SERVICE_SETTINGS_REPLICA_RESTART_WAIT_DURATION) {
        settings.replica_restart_wait_duration =
            Some(from_seconds(native.ReplicaRestartWaitDurationSeconds));
    }
    if has(FABRIC_STATEFUL_SERVICE_SETTINGS_QUORUM_LOSS_WAIT_DURATION) {
        settings.quorum_loss_wait_duration =
            Some(from_seconds(native.QuorumLossWaitDurationSeconds));
    }
    if has(FABRIC_STATEFUL_SERVICE_SETTINGS_STANDBY_REPLICA_KEEP_DURATION) {
        let ex1 =
            unsafe { extension::<FABRIC_STATEFUL_SERVICE_FAILOVER_SETTINGS_EX1>(native.Reserved) };
        match ex1 {
            Some(ex1) => {
                settings.stand_by_replica_keep_duration =
                    Some(from_seconds(ex1.StandByReplicaKeepDurationSeconds));
            }
            None => abi_mismatch("missing extension for flag", "STANDBY_REPLICA_KEEP_DURATION"),
        }
    }
}

// ── Service descriptions ──────────────────────────────────────────

/// Native fields shared by the stateful and stateless layouts.
struct CommonNative {
    application_name: FABRIC_URI,
    service_name: FABRIC_URI,
    service_type_name: LPCWSTR,
    initialization_data: (ULONG, *const BYTE),
    partition_scheme: (FABRIC_PARTITION_SCHEME, *mut c_void),
    placement_constraints: LPCWSTR,
    correlations: (ULONG, *const FABRIC_SERVICE_CORRELATION_DESCRIPTION),
    metrics: (ULONG, *const FABRIC_SERVICE_LOAD_METRIC_DESCRIPTION),
}

impl CommonNative {
    fn new(pin: &mut PinCollection, description: &ServiceDescription) -> Self {
        Self {
            application_name: pin.add_optional_uri(description.application_name.as_ref()),
            service_name: pin.add_uri(&description.service_name),
            service_type_name: pin.add_string(&description.service_type_name),
            initialization_data: pin.add_blob(&description.initialization_data),
            partition_scheme: partition_scheme_to_native(pin, &description.partition_scheme),
            placement_constraints: pin
                .add_optional_string(description.placement_constraints.as_deref()),
            correlations: list_to_native(pin, &description.correlations),
            metrics: list_to_native(pin, &description.metrics),
        }
    }
}

/// Reads the fields shared by both layouts into a new description.
macro_rules! common_from_native {
    ($native:expr, $kind:expr) => {{
        let native = $native;
        let mut description = ServiceDescription::new(
            read_uri(native.ServiceName),
            read_string(native.ServiceTypeName),
            $kind,
        );
        description.application_name = read_optional_uri(native.ApplicationName);
        description.initialization_data =
            read_array(native.InitializationDataSize, native.InitializationData).to_vec();
        description.partition_scheme =
            partition_scheme_from_native(native.PartitionScheme, native.PartitionSchemeDescription);
        description.placement_constraints = read_optional_string(native.PlacementConstraints);
        description.correlations = list_from_native(native.CorrelationCount, native.Correlations);
        description.metrics = list_from_native(native.MetricCount, native.Metrics);
        description
    }};
}

/// Generates the EX2..EX4 projection and readback for one layout. Both
/// layouts share the same shape from EX2 on.
macro_rules! extension_tail {
    ($to_native:ident, $from_native:ident, $ex2:ident, $ex3:ident, $ex4:ident) => {
        fn $to_native(pin: &mut PinCollection, description: &ServiceDescription) -> *mut c_void {
            let ex4 = (!description.scaling_policies.is_empty()).then(|| {
                let (count, policies) = list_to_native(pin, &description.scaling_policies);
                $ex4 {
                    ScalingPolicyCount: count,
                    ServiceScalingPolicies: policies,
                    Reserved: ptr::null_mut(),
                }
            });
            let ex3 = (ex4.is_some()
                || description.service_dns_name.is_some()
                || description.service_package_activation_mode
                    != ServicePackageActivationMode::default())
            .then(|| $ex3 {
                ServiceDnsName: pin.add_optional_string(description.service_dns_name.as_deref()),
                ServicePackageActivationMode: activation_mode_to_native(
                    description.service_package_activation_mode,
                ),
                Reserved: chain(pin, ex4),
            });
            let ex2 = (ex3.is_some() || description.default_move_cost.is_some()).then(|| $ex2 {
                IsDefaultMoveCostSpecified: to_boolean(description.default_move_cost.is_some()),
                DefaultMoveCost: description
                    .default_move_cost
                    .map_or(FABRIC_MOVE_COST_ZERO, move_cost_to_native),
                Reserved: chain(pin, ex3),
            });
            chain(pin, ex2)
        }

        unsafe fn $from_native(description: &mut ServiceDescription, reserved: *mut c_void) {
            let Some(ex2) = (unsafe { extension::<$ex2>(reserved) }) else {
                return;
            };
            description.default_move_cost = from_boolean(ex2.IsDefaultMoveCostSpecified)
                .then(|| move_cost_from_native(ex2.DefaultMoveCost));

            let Some(ex3) = (unsafe { extension::<$ex3>(ex2.Reserved) }) else {
                return;
            };
            description.service_dns_name = unsafe { read_optional_string(ex3.ServiceDnsName) };
            description.service_package_activation_mode =
                activation_mode_from_native(ex3.ServicePackageActivationMode);

            if let Some(ex4) = unsafe { extension::<$ex4>(ex3.Reserved) } {
                description.scaling_policies = unsafe {
                    list_from_native(ex4.ScalingPolicyCount, ex4.ServiceScalingPolicies)
                };
            }
        }
    };
}

extension_tail!(
    stateful_tail_to_native,
    stateful_tail_from_native,
    FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX2,
    FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX3,
    FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX4
);

extension_tail!(
    stateless_tail_to_native,
    stateless_tail_from_native,
    FABRIC_STATELESS_SERVICE_DESCRIPTION_EX2,
    FABRIC_STATELESS_SERVICE_DESCRIPTION_EX3,
    FABRIC_STATELESS_SERVICE_DESCRIPTION_EX4
);

fn stateful_to_native(
    pin: &mut PinCollection,
    description: &ServiceDescription,
    settings: &StatefulServiceSettings,
) -> FABRIC_STATEFUL_SERVICE_DESCRIPTION {
    let common = CommonNative::new(pin, description);
    let tail = stateful_tail_to_native(pin, description);
    let ex1 = (!tail.is_null()
        || !description.placement_policies.is_empty()
        || settings.has_failover_settings())
    .then(|| FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX1 {
        PolicyList: placement_policies_to_native(pin, &description.placement_policies),
        FailoverSettings: failover_settings_to_native(pin, settings),
        Reserved: tail,
    });

    FABRIC_STATEFUL_SERVICE_DESCRIPTION {
        ApplicationName: common.application_name,
        ServiceName: common.service_name,
        ServiceTypeName: common.service_type_name,
        InitializationDataSize: common.initialization_data.0,
        InitializationData: common.initialization_data.1,
        PartitionScheme: common.partition_scheme.0,
        PartitionSchemeDescription: common.partition_scheme.1,
        TargetReplicaSetSize: narrow("target_replica_set_size", settings.target_replica_set_size),
        MinReplicaSetSize: narrow("min_replica_set_size", settings.min_replica_set_size),
        PlacementConstraints: common.placement_constraints,
        CorrelationCount: common.correlations.0,
        Correlations: common.correlations.1,
        MetricCount: common.metrics.0,
        Metrics: common.metrics.1,
        HasPersistedState: to_boolean(settings.has_persisted_state),
        Reserved: chain(pin, ex1),
    }
}

unsafe fn stateful_from_native(native: &FABRIC_STATEFUL_SERVICE_DESCRIPTION) -> ServiceDescription {
    let mut settings = StatefulServiceSettings::new(
        i64::from(native.TargetReplicaSetSize),
        i64::from(native.MinReplicaSetSize),
    );
    settings.has_persisted_state = from_boolean(native.HasPersistedState);

    let ex1 = unsafe { extension::<FABRIC_STATEFUL_SERVICE_DESCRIPTION_EX1>(native.Reserved) };
    if let Some(ex1) = ex1 {
        unsafe { failover_settings_from_native(&mut settings, ex1.FailoverSettings) };
    }
    let mut description =
        unsafe { common_from_native!(native, ServiceKindDescription::Stateful(settings)) };
    if let Some(ex1) = ex1 {
        description.placement_policies = unsafe { placement_policies_from_native(ex1.PolicyList) };
        unsafe { stateful_tail_from_native(&mut description, ex1.Reserved) };
    }
    description
}

fn stateless_to_native(
    pin: &mut PinCollection,
    description: &ServiceDescription,
    settings: StatelessServiceSettings,
) -> FABRIC_STATELESS_SERVICE_DESCRIPTION {
    let common = CommonNative::new(pin, description);
    let tail = stateless_tail_to_native(pin, description);
    let ex1 = (!tail.is_null() || !description.placement_policies.is_empty()).then(|| {
        FABRIC_STATELESS_SERVICE_DESCRIPTION_EX1 {
            PolicyList: placement_policies_to_native(pin, &description.placement_policies),
            Reserved: tail,
        }
    });

    FABRIC_STATELESS_SERVICE_DESCRIPTION {
        ApplicationName: common.application_name,
        ServiceName: common.service_name,
        ServiceTypeName: common.service_type_name,
        InitializationDataSize: common.initialization_data.0,
        InitializationData: common.initialization_data.1,
        PartitionScheme: common.partition_scheme.0,
        PartitionSchemeDescription: common.partition_scheme.1,
        InstanceCount: narrow("instance_count", settings.instance_count),
        PlacementConstraints: common.placement_constraints,
        CorrelationCount: common.correlations.0,
        Correlations: common.correlations.1,
        MetricCount: common.metrics.0,
        Metrics: common.metrics.1,
        Reserved: chain(pin, ex1),
    }
}

unsafe fn stateless_from_native(
    native: &FABRIC_STATELESS_SERVICE_DESCRIPTION,
) -> ServiceDescription {
    let settings = StatelessServiceSettings {
        instance_count: i64::from(native.InstanceCount),
    };
    let mut description =
        unsafe { common_from_native!(native, ServiceKindDescription::Stateless(settings)) };
    let ex1 = unsafe { extension::<FABRIC_STATELESS_SERVICE_DESCRIPTION_EX1>(native.Reserved) };
    if let Some(ex1) = ex1 {
        description.placement_policies = unsafe { placement_policies_from_native(ex1.PolicyList) };
        unsafe { stateless_tail_from_native(&mut description, ex1.Reserved) };
    }
    description
}

impl ToNative for ServiceDescription {
    type Native = FABRIC_SERVICE_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match &self.kind {
            ServiceKindDescription::Stateful(settings) => {
                let native = stateful_to_native(pin, self, settings);
                (FABRIC_SERVICE_DESCRIPTION_KIND_STATEFUL, pin.add_item(native).cast())
            }
            ServiceKindDescription::Stateless(settings) => {
                let native = stateless_to_native(pin, self, *settings);
                (FABRIC_SERVICE_DESCRIPTION_KIND_STATELESS, pin.add_item(native).cast())
            }
        };
        FABRIC_SERVICE_DESCRIPTION {
            Kind: kind,
            Value: value,
        }
    }
}

impl FromNative for ServiceDescription {
    type Native = FABRIC_SERVICE_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.Kind;
        match kind {
            FABRIC_SERVICE_DESCRIPTION_KIND_STATEFUL => unsafe {
                stateful_from_native(payload(native.Value, kind))
            },
            FABRIC_SERVICE_DESCRIPTION_KIND_STATELESS => unsafe {
                stateless_from_native(payload(native.Value, kind))
            },
            other => abi_mismatch("FABRIC_SERVICE_DESCRIPTION_KIND", other),
        }
    }
}
