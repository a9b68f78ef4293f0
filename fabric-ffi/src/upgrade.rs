use crate::abi::{
    abi_mismatch, chain, extension, flag_bits, from_boolean, from_seconds, payload, read_string,
    read_uri, to_boolean, to_seconds,
};
use crate::application::{parameters_from_native, parameters_to_native};
use crate::health::{optional_from_native, optional_native};
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::{
    ApplicationUpgradeDescription, ApplicationUpgradeUpdateDescription, RollingUpgradeMode,
    RollingUpgradeModeKind, RollingUpgradeMonitoringPolicy, RollingUpgradePolicyDescription,
    UpgradeFailureAction, UpgradeKind, UpgradePolicyDescription,
};
use std::ffi::c_void;
use std::ptr;

fn upgrade_kind_to_native(kind: UpgradeKind) -> FABRIC_APPLICATION_UPGRADE_KIND {
    match kind {
        UpgradeKind::Rolling => FABRIC_APPLICATION_UPGRADE_KIND_ROLLING,
    }
}

fn upgrade_kind_from_native(kind: FABRIC_APPLICATION_UPGRADE_KIND) -> UpgradeKind {
    match kind {
        FABRIC_APPLICATION_UPGRADE_KIND_ROLLING => UpgradeKind::Rolling,
        other => abi_mismatch("FABRIC_APPLICATION_UPGRADE_KIND", other),
    }
}

fn mode_to_native(mode: RollingUpgradeModeKind) -> FABRIC_ROLLING_UPGRADE_MODE {
    match mode {
        RollingUpgradeModeKind::UnmonitoredAuto => FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_AUTO,
        RollingUpgradeModeKind::UnmonitoredManual => FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_MANUAL,
        RollingUpgradeModeKind::Monitored => FABRIC_ROLLING_UPGRADE_MODE_MONITORED,
    }
}

fn mode_from_native(mode: FABRIC_ROLLING_UPGRADE_MODE) -> RollingUpgradeModeKind {
    match mode {
        FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_AUTO => RollingUpgradeModeKind::UnmonitoredAuto,
        FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_MANUAL => RollingUpgradeModeKind::UnmonitoredManual,
        FABRIC_ROLLING_UPGRADE_MODE_MONITORED => RollingUpgradeModeKind::Monitored,
        other => abi_mismatch("FABRIC_ROLLING_UPGRADE_MODE", other),
    }
}

fn failure_action_to_native(action: UpgradeFailureAction) -> FABRIC_MONITORED_UPGRADE_FAILURE_ACTION {
    match action {
        UpgradeFailureAction::Rollback => FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_ROLLBACK,
        UpgradeFailureAction::Manual => FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_MANUAL,
    }
}

fn failure_action_from_native(action: FABRIC_MONITORED_UPGRADE_FAILURE_ACTION) -> UpgradeFailureAction {
    match action {
        FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_ROLLBACK => UpgradeFailureAction::Rollback,
        FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_MANUAL => UpgradeFailureAction::Manual,
        other => abi_mismatch("FABRIC_MONITORED_UPGRADE_FAILURE_ACTION", other),
    }
}

// ── Policies ──────────────────────────────────────────────────────

impl ToNative for RollingUpgradeMonitoringPolicy {
    type Native = FABRIC_ROLLING_UPGRADE_MONITORING_POLICY;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex1 = self.health_check_stable_duration.map(|stable| {
            FABRIC_ROLLING_UPGRADE_MONITORING_POLICY_EX1 {
                HealthCheckStableDurationInSeconds: to_seconds(
                    "health_check_stable_duration",
                    stable,
                ),
                Reserved: ptr::null_mut(),
            }
        });
        FABRIC_ROLLING_UPGRADE_MONITORING_POLICY {
            FailureAction: failure_action_to_native(self.failure_action),
            HealthCheckWaitDurationInSeconds: to_seconds(
                "health_check_wait_duration",
                self.health_check_wait_duration,
            ),
            HealthCheckRetryTimeoutInSeconds: to_seconds(
                "health_check_retry_timeout",
                self.health_check_retry_timeout,
            ),
            UpgradeTimeoutInSeconds: to_seconds("upgrade_timeout", self.upgrade_timeout),
            UpgradeDomainTimeoutInSeconds: to_seconds(
                "upgrade_domain_timeout",
                self.upgrade_domain_timeout,
            ),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for RollingUpgradeMonitoringPolicy {
    type Native = FABRIC_ROLLING_UPGRADE_MONITORING_POLICY;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let ex1 = unsafe { extension::<FABRIC_ROLLING_UPGRADE_MONITORING_POLICY_EX1>(native.Reserved) };
        Self {
            failure_action: failure_action_from_native(native.FailureAction),
            health_check_wait_duration: from_seconds(native.HealthCheckWaitDurationInSeconds),
            health_check_stable_duration: ex1
                .map(|ex1| from_seconds(ex1.HealthCheckStableDurationInSeconds)),
            health_check_retry_timeout: from_seconds(native.HealthCheckRetryTimeoutInSeconds),
            upgrade_timeout: from_seconds(native.UpgradeTimeoutInSeconds),
            upgrade_domain_timeout: from_seconds(native.UpgradeDomainTimeoutInSeconds),
        }
    }
}

impl ToNative for RollingUpgradePolicyDescription {
    type Native = FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (monitoring_policy, health_policy) = match &self.mode {
            RollingUpgradeMode::Monitored {
                monitoring_policy,
                health_policy,
            } => (
                optional_native(pin, Some(monitoring_policy)),
                optional_native(pin, health_policy.as_ref()),
            ),
            RollingUpgradeMode::UnmonitoredAuto | RollingUpgradeMode::UnmonitoredManual => {
                (ptr::null(), ptr::null())
            }
        };
        FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION {
            RollingUpgradeMode: mode_to_native(self.mode.kind()),
            ForceRestart: to_boolean(self.force_restart),
            UpgradeReplicaSetCheckTimeoutInSeconds: to_seconds(
                "upgrade_replica_set_check_timeout",
                self.upgrade_replica_set_check_timeout,
            ),
            MonitoringPolicy: monitoring_policy,
            HealthPolicy: health_policy,
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for RollingUpgradePolicyDescription {
    type Native = FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mode = match mode_from_native(native.RollingUpgradeMode) {
            RollingUpgradeModeKind::UnmonitoredAuto => RollingUpgradeMode::UnmonitoredAuto,
            RollingUpgradeModeKind::UnmonitoredManual => RollingUpgradeMode::UnmonitoredManual,
            RollingUpgradeModeKind::Monitored => RollingUpgradeMode::Monitored {
                monitoring_policy: unsafe {
                    RollingUpgradeMonitoringPolicy::from_native_ptr(native.MonitoringPolicy)
                },
                health_policy: unsafe { optional_from_native(native.HealthPolicy) },
            },
        };
        Self {
            mode,
            force_restart: from_boolean(native.ForceRestart),
            upgrade_replica_set_check_timeout: from_seconds(
                native.UpgradeReplicaSetCheckTimeoutInSeconds,
            ),
        }
    }
}

fn upgrade_policy_to_native(
    pin: &mut PinCollection,
    policy: &UpgradePolicyDescription,
) -> (FABRIC_APPLICATION_UPGRADE_KIND, *mut c_void) {
    let value = match policy {
        UpgradePolicyDescription::Rolling(rolling) => {
            let native = rolling.to_native(pin);
            pin.add_item(native).cast()
        }
    };
    (upgrade_kind_to_native(policy.kind()), value)
}

unsafe fn upgrade_policy_from_native(
    kind: FABRIC_APPLICATION_UPGRADE_KIND,
    value: *mut c_void,
) -> UpgradePolicyDescription {
    match upgrade_kind_from_native(kind) {
        UpgradeKind::Rolling => {
            let native = unsafe { payload::<FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION>(value, kind) };
            UpgradePolicyDescription::Rolling(unsafe {
                RollingUpgradePolicyDescription::from_native(native)
            })
        }
    }
}

// ── Upgrade requests ──────────────────────────────────────────────

impl ToNative for ApplicationUpgradeDescription {
    type Native = FABRIC_APPLICATION_UPGRADE_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, policy) = upgrade_policy_to_native(pin, &self.upgrade_policy);
        FABRIC_APPLICATION_UPGRADE_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            TargetApplicationTypeVersion: pin.add_string(&self.target_application_type_version),
            ApplicationParameters: parameters_to_native(pin, &self.application_parameters),
            UpgradeKind: kind,
            UpgradePolicyDescription: policy,
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ApplicationUpgradeDescription {
    type Native = FABRIC_APPLICATION_UPGRADE_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        unsafe {
            Self {
                application_name: read_uri(native.ApplicationName),
                target_application_type_version: read_string(native.TargetApplicationTypeVersion),
                application_parameters: parameters_from_native(native.ApplicationParameters),
                upgrade_policy: upgrade_policy_from_native(
                    native.UpgradeKind,
                    native.UpgradePolicyDescription,
                ),
            }
        }
    }
}

impl ToNative for ApplicationUpgradeUpdateDescription {
    type Native = FABRIC_APPLICATION_UPGRADE_UPDATE_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let mut flags = FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_NONE;
        let mut set = |flag: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS, present: bool| {
            if present {
                flags |= flag;
            }
        };
        set(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_MODE, self.mode.is_some());
        set(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FORCE_RESTART, self.force_restart.is_some());
        set(
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_REPLICA_SET_CHECK_TIMEOUT,
            self.upgrade_replica_set_check_timeout.is_some(),
        );
        set(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FAILURE_ACTION, self.failure_action.is_some());
        set(
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_WAIT,
            self.health_check_wait_duration.is_some(),
        );
        set(
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_STABLE,
            self.health_check_stable_duration.is_some(),
        );
        set(
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_RETRY,
            self.health_check_retry_timeout.is_some(),
        );
        set(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_TIMEOUT, self.upgrade_timeout.is_some());
        set(
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_DOMAIN_TIMEOUT,
            self.upgrade_domain_timeout.is_some(),
        );
        set(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_POLICY, self.health_policy.is_some());

        // Unflagged monitoring fields carry defaults the server ignores.
        let defaults = RollingUpgradeMonitoringPolicy::default();
        let monitoring = self.changes_monitoring().then(|| RollingUpgradeMonitoringPolicy {
            failure_action: self.failure_action.unwrap_or(defaults.failure_action),
            health_check_wait_duration: self
                .health_check_wait_duration
                .unwrap_or(defaults.health_check_wait_duration),
            health_check_stable_duration: self.health_check_stable_duration,
            health_check_retry_timeout: self
                .health_check_retry_timeout
                .unwrap_or(defaults.health_check_retry_timeout),
            upgrade_timeout: self.upgrade_timeout.unwrap_or(defaults.upgrade_timeout),
            upgrade_domain_timeout: self
                .upgrade_domain_timeout
                .unwrap_or(defaults.upgrade_domain_timeout),
        });
        let rolling = FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION {
            RollingUpgradeMode: self
                .mode
                .map_or(FABRIC_ROLLING_UPGRADE_MODE_INVALID, mode_to_native),
            ForceRestart: to_boolean(self.force_restart.unwrap_or(false)),
            UpgradeReplicaSetCheckTimeoutInSeconds: to_seconds(
                "upgrade_replica_set_check_timeout",
                self.upgrade_replica_set_check_timeout.unwrap_or_default(),
            ),
            MonitoringPolicy: optional_native(pin, monitoring.as_ref()),
            HealthPolicy: ptr::null(),
            Reserved: ptr::null_mut(),
        };

        FABRIC_APPLICATION_UPGRADE_UPDATE_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            UpgradeKind: upgrade_kind_to_native(self.upgrade_kind),
            UpdateFlags: flag_bits(flags),
            UpgradePolicyDescription: pin.add_item(rolling).cast(),
            HealthPolicy: optional_native(pin, self.health_policy.as_ref()),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ApplicationUpgradeUpdateDescription {
    type Native = FABRIC_APPLICATION_UPGRADE_UPDATE_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let has = |flag| native.UpdateFlags & flag_bits(flag) != 0;
        let mut update = Self::new(unsafe { read_uri(native.ApplicationName) });
        update.upgrade_kind = upgrade_kind_from_native(native.UpgradeKind);
        update.health_policy = if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_POLICY) {
            unsafe { optional_from_native(native.HealthPolicy) }
        } else {
            None
        };

        let rolling = unsafe {
            payload::<FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION>(
                native.UpgradePolicyDescription,
                native.UpgradeKind,
            )
        };
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_MODE) {
            update.mode = Some(mode_from_native(rolling.RollingUpgradeMode));
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FORCE_RESTART) {
            update.force_restart = Some(from_boolean(rolling.ForceRestart));
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_REPLICA_SET_CHECK_TIMEOUT) {
            update.upgrade_replica_set_check_timeout =
                Some(from_seconds(rolling.UpgradeReplicaSetCheckTimeoutInSeconds));
        }

        let monitoring_flags = [
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FAILURE_ACTION,
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_WAIT,
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_STABLE,
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_RETRY,
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_TIMEOUT,
            FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_DOMAIN_TIMEOUT,
        ];
        if !monitoring_flags.iter().any(|&flag| has(flag)) {
            return update;
        }
        let monitoring =
            unsafe { RollingUpgradeMonitoringPolicy::from_native_ptr(rolling.MonitoringPolicy) };
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FAILURE_ACTION) {
            update.failure_action = Some(monitoring.failure_action);
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_WAIT) {
            update.health_check_wait_duration = Some(monitoring.health_check_wait_duration);
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_STABLE) {
            match monitoring.health_check_stable_duration {
                Some(stable) => update.health_check_stable_duration = Some(stable),
                None => abi_mismatch("missing extension for flag", "HEALTH_CHECK_STABLE"),
            }
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_RETRY) {
            update.health_check_retry_timeout = Some(monitoring.health_check_retry_timeout);
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_TIMEOUT) {
            update.upgrade_timeout = Some(monitoring.upgrade_timeout);
        }
        if has(FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_DOMAIN_TIMEOUT) {
            update.upgrade_domain_timeout = Some(monitoring.upgrade_domain_timeout);
        }
        update
    }
}
