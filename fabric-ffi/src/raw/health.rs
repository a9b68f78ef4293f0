use super::{BOOLEAN, BYTE, DWORD, FABRIC_URI, LPCWSTR, ULONG};
use std::ffi::c_void;

pub type FABRIC_HEALTH_STATE_FILTER = i32;
pub const FABRIC_HEALTH_STATE_FILTER_DEFAULT: FABRIC_HEALTH_STATE_FILTER = 0;
pub const FABRIC_HEALTH_STATE_FILTER_NONE: FABRIC_HEALTH_STATE_FILTER = 0x1;
pub const FABRIC_HEALTH_STATE_FILTER_OK: FABRIC_HEALTH_STATE_FILTER = 0x2;
pub const FABRIC_HEALTH_STATE_FILTER_WARNING: FABRIC_HEALTH_STATE_FILTER = 0x4;
pub const FABRIC_HEALTH_STATE_FILTER_ERROR: FABRIC_HEALTH_STATE_FILTER = 0x8;
pub const FABRIC_HEALTH_STATE_FILTER_ALL: FABRIC_HEALTH_STATE_FILTER = 0xFFFF;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_HEALTH_EVENTS_FILTER {
    pub HealthStateFilter: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_HEALTH_STATES_FILTER {
    pub HealthStateFilter: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DEPLOYED_APPLICATION_HEALTH_STATES_FILTER {
    pub HealthStateFilter: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_HEALTH_STATISTICS_FILTER {
    pub ExcludeHealthStatistics: BOOLEAN,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_TYPE_HEALTH_POLICY {
    pub MaxPercentUnhealthyServices: BYTE,
    pub MaxPercentUnhealthyPartitionsPerService: BYTE,
    pub MaxPercentUnhealthyReplicasPerPartition: BYTE,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP_ITEM {
    pub ServiceTypeName: LPCWSTR,
    pub ServiceTypeHealthPolicy: *const FABRIC_SERVICE_TYPE_HEALTH_POLICY,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP {
    pub Count: ULONG,
    pub Items: *const FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP_ITEM,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_HEALTH_POLICY {
    pub ConsiderWarningAsError: BOOLEAN,
    pub MaxPercentUnhealthyDeployedApplications: BYTE,
    pub DefaultServiceTypeHealthPolicy: *const FABRIC_SERVICE_TYPE_HEALTH_POLICY,
    pub ServiceTypeHealthPolicyMap: *const FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub HealthPolicy: *const FABRIC_APPLICATION_HEALTH_POLICY,
    pub EventsFilter: *const FABRIC_HEALTH_EVENTS_FILTER,
    pub ServicesFilter: *const FABRIC_SERVICE_HEALTH_STATES_FILTER,
    pub DeployedApplicationsFilter: *const FABRIC_DEPLOYED_APPLICATION_HEALTH_STATES_FILTER,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION_EX1 {
    pub HealthStatisticsFilter: *const FABRIC_APPLICATION_HEALTH_STATISTICS_FILTER,
    pub Reserved: *mut c_void,
}
