use super::{BOOLEAN, LPCWSTR, ULONG};
use std::ffi::c_void;

pub type FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = i32;
pub const FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_INVALID: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = 0;
pub const FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_NONE: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = 1;
pub const FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_EXEHOST: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = 2;
pub const FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_DLLHOST: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = 3;
pub const FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_CONTAINERHOST: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND = 4;

pub type FABRIC_EXEHOST_WORKING_FOLDER = i32;
pub const FABRIC_EXEHOST_WORKING_FOLDER_INVALID: FABRIC_EXEHOST_WORKING_FOLDER = 0;
pub const FABRIC_EXEHOST_WORKING_FOLDER_WORK: FABRIC_EXEHOST_WORKING_FOLDER = 1;
pub const FABRIC_EXEHOST_WORKING_FOLDER_CODE_PACKAGE: FABRIC_EXEHOST_WORKING_FOLDER = 2;
pub const FABRIC_EXEHOST_WORKING_FOLDER_CODE_BASE: FABRIC_EXEHOST_WORKING_FOLDER = 3;

pub type FABRIC_DLLHOST_ISOLATION_POLICY = i32;
pub const FABRIC_DLLHOST_ISOLATION_POLICY_INVALID: FABRIC_DLLHOST_ISOLATION_POLICY = 0;
pub const FABRIC_DLLHOST_ISOLATION_POLICY_SHARED_DOMAIN: FABRIC_DLLHOST_ISOLATION_POLICY = 1;
pub const FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_DOMAIN: FABRIC_DLLHOST_ISOLATION_POLICY = 2;
pub const FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_PROCESS: FABRIC_DLLHOST_ISOLATION_POLICY = 3;

pub type FABRIC_DLLHOST_HOSTED_DLL_KIND = i32;
pub const FABRIC_DLLHOST_HOSTED_DLL_KIND_INVALID: FABRIC_DLLHOST_HOSTED_DLL_KIND = 0;
pub const FABRIC_DLLHOST_HOSTED_DLL_KIND_UNMANAGED: FABRIC_DLLHOST_HOSTED_DLL_KIND = 1;
pub const FABRIC_DLLHOST_HOSTED_DLL_KIND_MANAGED: FABRIC_DLLHOST_HOSTED_DLL_KIND = 2;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION {
    pub Program: LPCWSTR,
    pub Arguments: LPCWSTR,
    pub WorkingFolder: FABRIC_EXEHOST_WORKING_FOLDER,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX1 {
    pub PeriodicIntervalInSeconds: ULONG,
    pub ConsoleRedirectionEnabled: BOOLEAN,
    pub ConsoleRedirectionFileRetentionCount: ULONG,
    pub ConsoleRedirectionFileMaxSizeInKb: ULONG,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX2 {
    pub IsExternalExecutable: BOOLEAN,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DLLHOST_HOSTED_UNMANAGED_DLL_DESCRIPTION {
    pub DllName: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DLLHOST_HOSTED_MANAGED_DLL_DESCRIPTION {
    pub AssemblyName: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION {
    pub Kind: FABRIC_DLLHOST_HOSTED_DLL_KIND,
    pub Value: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION_LIST {
    pub Count: ULONG,
    pub Items: *const FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_DLLHOST_ENTRY_POINT_DESCRIPTION {
    pub IsolationPolicyType: FABRIC_DLLHOST_ISOLATION_POLICY,
    pub HostedDlls: *const FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION_LIST,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_CONTAINERHOST_ENTRY_POINT_DESCRIPTION {
    pub ImageName: LPCWSTR,
    pub Commands: LPCWSTR,
    pub EntryPoint: LPCWSTR,
    pub Reserved: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FABRIC_CODE_PACKAGE_ENTRY_POINT {
    pub Kind: FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND,
    /// Points at the host struct selected by `Kind`; null for `NONE`.
    pub Value: *mut c_void,
    pub Reserved: *mut c_void,
}
