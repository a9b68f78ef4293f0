use super::{BOOLEAN, DWORD, FABRIC_URI, GUID, LONG, LPCWSTR};
use std::ffi::c_void;

pub type FABRIC_APPLICATION_DEFINITION_KIND_FILTER = i32;
pub const FABRIC_APPLICATION_DEFINITION_KIND_FILTER_DEFAULT: FABRIC_APPLICATION_DEFINITION_KIND_FILTER = 0;
pub const FABRIC_APPLICATION_DEFINITION_KIND_FILTER_SERVICE_FABRIC_APPLICATION_DESCRIPTION:
    FABRIC_APPLICATION_DEFINITION_KIND_FILTER = 0x1;
pub const FABRIC_APPLICATION_DEFINITION_KIND_FILTER_COMPOSE: FABRIC_APPLICATION_DEFINITION_KIND_FILTER = 0x2;
pub const FABRIC_APPLICATION_DEFINITION_KIND_FILTER_ALL: FABRIC_APPLICATION_DEFINITION_KIND_FILTER = 0xFFFF;

pub type FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER = i32;
pub const FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER_DEFAULT:
    FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER = 0;
pub const FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER_SERVICE_FABRIC_APPLICATION_PACKAGE:
    FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER = 0x1;
pub const FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER_COMPOSE:
    FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER = 0x2;
pub const FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER_ALL:
    FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER = 0xFFFF;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_QUERY_DESCRIPTION {
    pub ApplicationNameFilter: FABRIC_URI,
    pub ContinuationToken: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_QUERY_DESCRIPTION_EX1 {
    pub ApplicationTypeNameFilter: LPCWSTR,
    pub ExcludeApplicationParameters: BOOLEAN,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_QUERY_DESCRIPTION_EX2 {
    pub MaxResults: LONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_APPLICATION_QUERY_DESCRIPTION_EX3 {
    /// Combination of `FABRIC_APPLICATION_DEFINITION_KIND_FILTER_*` bits.
    pub ApplicationDefinitionKindFilter: DWORD,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_QUERY_DESCRIPTION {
    pub ApplicationName: FABRIC_URI,
    pub ServiceNameFilter: FABRIC_URI,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_QUERY_DESCRIPTION_EX1 {
    pub ContinuationToken: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_QUERY_DESCRIPTION_EX2 {
    pub ServiceTypeNameFilter: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_QUERY_DESCRIPTION_EX3 {
    pub MaxResults: LONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_PAGED_APPLICATION_TYPE_QUERY_DESCRIPTION {
    pub ApplicationTypeNameFilter: LPCWSTR,
    pub ApplicationTypeVersionFilter: LPCWSTR,
    /// Combination of `FABRIC_APPLICATION_TYPE_DEFINITION_KIND_FILTER_*` bits.
    pub ApplicationTypeDefinitionKindFilter: DWORD,
    pub ExcludeApplicationParameters: BOOLEAN,
    pub ContinuationToken: LPCWSTR,
    pub MaxResults: LONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION {
    pub ServiceName: FABRIC_URI,
    /// The nil GUID means no filter.
    pub PartitionIdFilter: GUID,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX1 {
    pub ContinuationToken: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX2 {
    pub MaxResults: LONG,
    pub Reserved: *mut c_void,
}
