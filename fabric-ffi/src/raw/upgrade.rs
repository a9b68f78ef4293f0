use super::{
    BOOLEAN, DWORD, FABRIC_APPLICATION_HEALTH_POLICY, FABRIC_APPLICATION_PARAMETER_LIST,
    FABRIC_URI, LPCWSTR,
};
use std::ffi::c_void;

pub type FABRIC_APPLICATION_UPGRADE_KIND = i32;
pub const FABRIC_APPLICATION_UPGRADE_KIND_INVALID: FABRIC_APPLICATION_UPGRADE_KIND = 0;
pub const FABRIC_APPLICATION_UPGRADE_KIND_ROLLING: FABRIC_APPLICATION_UPGRADE_KIND = 1;

pub type FABRIC_ROLLING_UPGRADE_MODE = i32;
pub const FABRIC_ROLLING_UPGRADE_MODE_INVALID: FABRIC_ROLLING_UPGRADE_MODE = 0;
pub const FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_AUTO: FABRIC_ROLLING_UPGRADE_MODE = 1;
pub const FABRIC_ROLLING_UPGRADE_MODE_UNMONITORED_MANUAL: FABRIC_ROLLING_UPGRADE_MODE = 2;
pub const FABRIC_ROLLING_UPGRADE_MODE_MONITORED: FABRIC_ROLLING_UPGRADE_MODE = 3;

pub type FABRIC_MONITORED_UPGRADE_FAILURE_ACTION = i32;
pub const FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_INVALID: FABRIC_MONITORED_UPGRADE_FAILURE_ACTION = 0;
pub const FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_ROLLBACK: FABRIC_MONITORED_UPGRADE_FAILURE_ACTION = 1;
pub const FABRIC_MONITORED_UPGRADE_FAILURE_ACTION_MANUAL: FABRIC_MONITORED_UPGRADE_FAILURE_ACTION = 2;

pub type FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = i32;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_NONE: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_MODE: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x1;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FORCE_RESTART: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x2;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_REPLICA_SET_CHECK_TIMEOUT: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x4;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_FAILURE_ACTION: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x8;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_WAIT: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x10;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_STABLE: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x20;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_CHECK_RETRY: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x40;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_TIMEOUT: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x80;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_UPGRADE_DOMAIN_TIMEOUT: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x100;
pub const FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_HEALTH_POLICY: FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS = 0x200;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_ROLLING_UPGRADE_MONITORING_POLICY {
    pub FailureAction: FABRIC_MONITORED_UPGRADE_FAILURE_ACTION,
    pub HealthCheckWaitDurationInSeconds: DWORD,
    pub HealthCheckRetryTimeoutInSeconds: DWORD,
    pub UpgradeTimeoutInSeconds: DWORD,
    pub UpgradeDomainTimeoutInSeconds: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_ROLLING_UPGRADE_MONITORING_POLICY_EX1 {
    pub HealthCheckStableDurationInSeconds: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_ROLLING_UPGRADE_POLICY_DESCRIPTION {
    pub RollingUpgradeMode: FABRIC_ROLLING_UPGRADE_MODE,
    pub ForceRestart: BOOLEAN,
    pub UpgradeReplicaSetCheckTimeoutInSeconds: DWORD,
    pub MonitoringPolicy: *const FABRIC_ROLLING_UPGRADE_MONITORING_POLICY,
    pub HealthPolicy: *const FABRIC_APPLICATION_HEALTH_POLICY,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_UPGRADE_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub TargetApplicationTypeVersion: LPCWSTR,
    pub ApplicationParameters: *const FABRIC_APPLICATION_PARAMETER_LIST,
    pub UpgradeKind: FABRIC_APPLICATION_UPGRADE_KIND,
    /// Points at the policy struct selected by `UpgradeKind`.
    pub UpgradePolicyDescription: *mut c_void,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_UPGRADE_UPDATE_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub UpgradeKind: FABRIC_APPLICATION_UPGRADE_KIND,
    /// Combination of `FABRIC_ROLLING_UPGRADE_UPDATE_FLAGS_*` bits.
    pub UpdateFlags: DWORD,
    pub UpgradePolicyDescription: *mut c_void,
    pub HealthPolicy: *const FABRIC_APPLICATION_HEALTH_POLICY,
    pub Reserved: *mut c_void,
}
