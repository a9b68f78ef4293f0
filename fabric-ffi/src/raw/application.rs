use super::{BOOLEAN, DWORD, FABRIC_URI, LPCWSTR, ULONG};
use std::ffi::c_void;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_PARAMETER {
    pub Name: LPCWSTR,
    pub Value: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_PARAMETER_LIST {
    pub Count: ULONG,
    pub Items: *const FABRIC_APPLICATION_PARAMETER,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_METRIC_DESCRIPTION {
    pub Name: LPCWSTR,
    pub NodeReservationCapacity: ULONG,
    pub MaximumNodeCapacity: ULONG,
    pub TotalApplicationCapacity: ULONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_METRIC_LIST {
    pub Count: ULONG,
    pub Capacities: *const FABRIC_APPLICATION_METRIC_DESCRIPTION,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_CAPACITY_DESCRIPTION {
    pub MinimumNodes: ULONG,
    pub MaximumNodes: ULONG,
    pub Metrics: *const FABRIC_APPLICATION_METRIC_LIST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub ApplicationTypeName: LPCWSTR,
    pub ApplicationTypeVersion: LPCWSTR,
    pub ApplicationParameters: *const FABRIC_APPLICATION_PARAMETER_LIST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_DESCRIPTION_EX1 {
    pub ApplicationCapacity: *const FABRIC_APPLICATION_CAPACITY_DESCRIPTION,
    pub Reserved: *mut c_void,
}

pub type FABRIC_APPLICATION_UPDATE_DESCRIPTION_FLAGS = i32;
pub const FABRIC_APPLICATION_UPDATE_NONE: FABRIC_APPLICATION_UPDATE_DESCRIPTION_FLAGS = 0;
pub const FABRIC_APPLICATION_UPDATE_MINNODES: FABRIC_APPLICATION_UPDATE_DESCRIPTION_FLAGS = 0x1;
pub const FABRIC_APPLICATION_UPDATE_MAXNODES: FABRIC_APPLICATION_UPDATE_DESCRIPTION_FLAGS = 0x2;
pub const FABRIC_APPLICATION_UPDATE_METRICS: FABRIC_APPLICATION_UPDATE_DESCRIPTION_FLAGS = 0x4;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_UPDATE_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    /// Combination of `FABRIC_APPLICATION_UPDATE_*` bits.
    pub Flags: DWORD,
    pub RemoveApplicationCapacity: BOOLEAN,
    pub MinimumNodes: ULONG,
    pub MaximumNodes: ULONG,
    pub Metrics: *const FABRIC_APPLICATION_METRIC_LIST,
    pub Reserved: *mut c_void,
}
