use crate::abi::{
    abi_mismatch, chain, extension, from_boolean, from_seconds, payload, read_array,
    read_optional_string, read_string, to_boolean, to_seconds,
};
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::entry_point::{
    CodePackageEntryPointDescription, ContainerHostEntryPointDescription,
    DllHostEntryPointDescription, DllHostHostedDllDescription, DllHostIsolationPolicy,
    ExeHostEntryPointDescription, ExeHostWorkingFolder,
};
use std::ffi::c_void;
use std::ptr;

fn working_folder_to_native(folder: ExeHostWorkingFolder) -> FABRIC_EXEHOST_WORKING_FOLDER {
    match folder {
        ExeHostWorkingFolder::Work => FABRIC_EXEHOST_WORKING_FOLDER_WORK,
        ExeHostWorkingFolder::CodePackage => FABRIC_EXEHOST_WORKING_FOLDER_CODE_PACKAGE,
        ExeHostWorkingFolder::CodeBase => FABRIC_EXEHOST_WORKING_FOLDER_CODE_BASE,
    }
}

fn working_folder_from_native(folder: FABRIC_EXEHOST_WORKING_FOLDER) -> ExeHostWorkingFolder {
    match folder {
        FABRIC_EXEHOST_WORKING_FOLDER_WORK => ExeHostWorkingFolder::Work,
        FABRIC_EXEHOST_WORKING_FOLDER_CODE_PACKAGE => ExeHostWorkingFolder::CodePackage,
        FABRIC_EXEHOST_WORKING_FOLDER_CODE_BASE => ExeHostWorkingFolder::CodeBase,
        other => abi_mismatch("FABRIC_EXEHOST_WORKING_FOLDER", other),
    }
}

fn isolation_policy_to_native(policy: DllHostIsolationPolicy) -> FABRIC_DLLHOST_ISOLATION_POLICY {
    match policy {
        DllHostIsolationPolicy::SharedDomain => FABRIC_DLLHOST_ISOLATION_POLICY_SHARED_DOMAIN,
        DllHostIsolationPolicy::DedicatedDomain => FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_DOMAIN,
        DllHostIsolationPolicy::DedicatedProcess => {
            FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_PROCESS
        }
    }
}

fn isolation_policy_from_native(policy: FABRIC_DLLHOST_ISOLATION_POLICY) -> DllHostIsolationPolicy {
    match policy {
        FABRIC_DLLHOST_ISOLATION_POLICY_SHARED_DOMAIN => DllHostIsolationPolicy::SharedDomain,
        FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_DOMAIN => DllHostIsolationPolicy::DedicatedDomain,
        FABRIC_DLLHOST_ISOLATION_POLICY_DEDICATED_PROCESS => {
            DllHostIsolationPolicy::DedicatedProcess
        }
        other => abi_mismatch("FABRIC_DLLHOST_ISOLATION_POLICY", other),
    }
}

// ── Exe host ──────────────────────────────────────────────────────

impl ToNative for ExeHostEntryPointDescription {
    type Native = FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex2 = self
            .is_external_executable
            .then(|| FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX2 {
                IsExternalExecutable: to_boolean(true),
                Reserved: ptr::null_mut(),
            });
        let ex1 = (ex2.is_some() || self.has_extended_settings()).then(|| {
            FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX1 {
                PeriodicIntervalInSeconds: to_seconds("periodic_interval", self.periodic_interval),
                ConsoleRedirectionEnabled: to_boolean(self.console_redirection_enabled),
                ConsoleRedirectionFileRetentionCount: self
                    .console_redirection_file_retention_count,
                ConsoleRedirectionFileMaxSizeInKb: self.console_redirection_file_max_size_in_kb,
                Reserved: chain(pin, ex2),
            }
        });

        FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION {
            Program: pin.add_string(&self.program),
            Arguments: pin.add_optional_string(self.arguments.as_deref()),
            WorkingFolder: working_folder_to_native(self.working_folder),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for ExeHostEntryPointDescription {
    type Native = FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mut description = Self::new(unsafe { read_string(native.Program) });
        description.arguments = unsafe { read_optional_string(native.Arguments) };
        description.working_folder = working_folder_from_native(native.WorkingFolder);

        let ex1 =
            unsafe { extension::<FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX1>(native.Reserved) };
        let Some(ex1) = ex1 else {
            return description;
        };
        description.periodic_interval = from_seconds(ex1.PeriodicIntervalInSeconds);
        description.console_redirection_enabled = from_boolean(ex1.ConsoleRedirectionEnabled);
        description.console_redirection_file_retention_count =
            ex1.ConsoleRedirectionFileRetentionCount;
        description.console_redirection_file_max_size_in_kb =
            ex1.ConsoleRedirectionFileMaxSizeInKb;

        let ex2 = unsafe { extension::<FABRIC_EXEHOST_ENTRY_POINT_DESCRIPTION_EX2>(ex1.Reserved) };
        if let Some(ex2) = ex2 {
            description.is_external_executable = from_boolean(ex2.IsExternalExecutable);
        }
        description
    }
}

// ── Dll host ──────────────────────────────────────────────────────

impl ToNative for DllHostHostedDllDescription {
    type Native = FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match self {
            Self::Unmanaged { dll_name } => {
                let native = FABRIC_DLLHOST_HOSTED_UNMANAGED_DLL_DESCRIPTION {
                    DllName: pin.add_string(dll_name),
                    Reserved: ptr::null_mut(),
                };
                (FABRIC_DLLHOST_HOSTED_DLL_KIND_UNMANAGED, pin.add_item(native).cast())
            }
            Self::Managed { assembly_name } => {
                let native = FABRIC_DLLHOST_HOSTED_MANAGED_DLL_DESCRIPTION {
                    AssemblyName: pin.add_string(assembly_name),
                    Reserved: ptr::null_mut(),
                };
                (FABRIC_DLLHOST_HOSTED_DLL_KIND_MANAGED, pin.add_item(native).cast())
            }
        };
        FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION {
            Kind: kind,
            Value: value,
        }
    }
}

impl FromNative for DllHostHostedDllDescription {
    type Native = FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.Kind;
        match kind {
            FABRIC_DLLHOST_HOSTED_DLL_KIND_UNMANAGED => {
                let value = unsafe {
                    payload::<FABRIC_DLLHOST_HOSTED_UNMANAGED_DLL_DESCRIPTION>(native.Value, kind)
                };
                Self::Unmanaged {
                    dll_name: unsafe { read_string(value.DllName) },
                }
            }
            FABRIC_DLLHOST_HOSTED_DLL_KIND_MANAGED => {
                let value = unsafe {
                    payload::<FABRIC_DLLHOST_HOSTED_MANAGED_DLL_DESCRIPTION>(native.Value, kind)
                };
                Self::Managed {
                    assembly_name: unsafe { read_string(value.AssemblyName) },
                }
            }
            other => abi_mismatch("FABRIC_DLLHOST_HOSTED_DLL_KIND", other),
        }
    }
}

impl ToNative for DllHostEntryPointDescription {
    type Native = FABRIC_DLLHOST_ENTRY_POINT_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let hosted_dlls = if self.hosted_dlls.is_empty() {
            ptr::null()
        } else {
            let items = self.hosted_dlls.iter().map(|dll| dll.to_native(pin)).collect();
            let (count, items) = pin.add_array(items);
            pin.add_item(FABRIC_DLLHOST_HOSTED_DLL_DESCRIPTION_LIST {
                Count: count,
                Items: items,
            })
            .cast_const()
        };
        FABRIC_DLLHOST_ENTRY_POINT_DESCRIPTION {
            IsolationPolicyType: isolation_policy_to_native(self.isolation_policy),
            HostedDlls: hosted_dlls,
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for DllHostEntryPointDescription {
    type Native = FABRIC_DLLHOST_ENTRY_POINT_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let hosted_dlls = match unsafe { native.HostedDlls.as_ref() } {
            Some(list) => unsafe { read_array(list.Count, list.Items) }
                .iter()
                .map(|dll| unsafe { DllHostHostedDllDescription::from_native(dll) })
                .collect(),
            None => Vec::new(),
        };
        Self {
            isolation_policy: isolation_policy_from_native(native.IsolationPolicyType),
            hosted_dlls,
        }
    }
}

// ── Container host ────────────────────────────────────────────────

impl ToNative for ContainerHostEntryPointDescription {
    type Native = FABRIC_CONTAINERHOST_ENTRY_POINT_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_CONTAINERHOST_ENTRY_POINT_DESCRIPTION {
            ImageName: pin.add_string(&self.image_name),
            Commands: pin.add_optional_string(self.commands.as_deref()),
            EntryPoint: pin.add_optional_string(self.entry_point.as_deref()),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ContainerHostEntryPointDescription {
    type Native = FABRIC_CONTAINERHOST_ENTRY_POINT_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        unsafe {
            Self {
                image_name: read_string(native.ImageName),
                commands: read_optional_string(native.Commands),
                entry_point: read_optional_string(native.EntryPoint),
            }
        }
    }
}

// ── Code package ──────────────────────────────────────────────────

impl ToNative for CodePackageEntryPointDescription {
    type Native = FABRIC_CODE_PACKAGE_ENTRY_POINT;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let (kind, value): (_, *mut c_void) = match self {
            Self::None => (FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_NONE, ptr::null_mut()),
            Self::ExeHost(exe) => {
                let native = exe.to_native(pin);
                (FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_EXEHOST, pin.add_item(native).cast())
            }
            Self::DllHost(dll) => {
                let native = dll.to_native(pin);
                (FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_DLLHOST, pin.add_item(native).cast())
            }
            Self::ContainerHost(container) => {
                let native = container.to_native(pin);
                (
                    FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_CONTAINERHOST,
                    pin.add_item(native).cast(),
                )
            }
        };
        FABRIC_CODE_PACKAGE_ENTRY_POINT {
            Kind: kind,
            Value: value,
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for CodePackageEntryPointDescription {
    type Native = FABRIC_CODE_PACKAGE_ENTRY_POINT;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let kind = native.Kind;
        match kind {
            FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_NONE => Self::None,
            FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_EXEHOST => Self::ExeHost(unsafe {
                ExeHostEntryPointDescription::from_native(payload(native.Value, kind))
            }),
            FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_DLLHOST => Self::DllHost(unsafe {
                DllHostEntryPointDescription::from_native(payload(native.Value, kind))
            }),
            FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND_CONTAINERHOST => Self::ContainerHost(unsafe {
                ContainerHostEntryPointDescription::from_native(payload(native.Value, kind))
            }),
            other => abi_mismatch("FABRIC_CODE_PACKAGE_ENTRY_POINT_KIND", other),
        }
    }
}
