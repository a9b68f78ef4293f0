//! Code package entry points.
//!
//! These are read back from the code package descriptions returned by the
//! runtime. They are validated like every other description so that a
//! package built by hand can be checked before use.

use fabric_types::validate::{
    require_name, require_name_opt, require_no_nul_opt, require_seconds_u32,
};
use fabric_types::{Result, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Folder an executable host starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExeHostWorkingFolder {
    #[default]
    Work,
    CodePackage,
    CodeBase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExeHostEntryPointDescription {
    pub program: String,
    #[serde(default)]
    pub arguments: Option<String>,
    #[serde(default)]
    pub working_folder: ExeHostWorkingFolder,
    /// Restart interval for periodically run executables. Zero runs once.
    #[serde(default)]
    pub periodic_interval: Duration,
    #[serde(default)]
    pub console_redirection_enabled: bool,
    #[serde(default)]
    pub console_redirection_file_retention_count: u32,
    #[serde(default)]
    pub console_redirection_file_max_size_in_kb: u32,
    /// The program lives outside the code package.
    #[serde(default)]
    pub is_external_executable: bool,
}

impl ExeHostEntryPointDescription {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: None,
            working_folder: ExeHostWorkingFolder::Work,
            periodic_interval: Duration::ZERO,
            console_redirection_enabled: false,
            console_redirection_file_retention_count: 0,
            console_redirection_file_max_size_in_kb: 0,
            is_external_executable: false,
        }
    }

    /// Returns true if any setting beyond program, arguments and working folder differs from its default.
    #[must_use]
    pub fn has_extended_settings(&self) -> bool {
        !self.periodic_interval.is_zero()
            || self.console_redirection_enabled
            || self.console_redirection_file_retention_count != 0
            || self.console_redirection_file_max_size_in_kb != 0
    }
}

impl Validate for ExeHostEntryPointDescription {
    fn validate(&self) -> Result<()> {
        require_name("program", &self.program)?;
        require_no_nul_opt("arguments", self.arguments.as_deref())?;
        require_seconds_u32("periodic_interval", self.periodic_interval)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DllHostIsolationPolicy {
    SharedDomain,
    #[default]
    DedicatedDomain,
    DedicatedProcess,
}

/// A library loaded by the DLL host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DllHostHostedDllDescription {
    Unmanaged { dll_name: String },
    Managed { assembly_name: String },
}

impl Validate for DllHostHostedDllDescription {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Unmanaged { dll_name } => require_name("dll_name", dll_name),
            Self::Managed { assembly_name } => require_name("assembly_name", assembly_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DllHostEntryPointDescription {
    #[serde(default)]
    pub isolation_policy: DllHostIsolationPolicy,
    #[serde(default)]
    pub hosted_dlls: Vec<DllHostHostedDllDescription>,
}

impl Validate for DllHostEntryPointDescription {
    fn validate(&self) -> Result<()> {
        for (i, dll) in self.hosted_dlls.iter().enumerate() {
            dll.validate()
                .map_err(|e| e.within(&format!("hosted_dlls[{i}]")))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHostEntryPointDescription {
    pub image_name: String,
    #[serde(default)]
    pub commands: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
}

impl Validate for ContainerHostEntryPointDescription {
    fn validate(&self) -> Result<()> {
        require_name("image_name", &self.image_name)?;
        require_no_nul_opt("commands", self.commands.as_deref())?;
        require_name_opt("entry_point", self.entry_point.as_deref())
    }
}

/// How the runtime starts a code package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodePackageEntryPointDescription {
    /// The package has no entry point of its own.
    None,
    ExeHost(ExeHostEntryPointDescription),
    DllHost(DllHostEntryPointDescription),
    ContainerHost(ContainerHostEntryPointDescription),
}

impl Validate for CodePackageEntryPointDescription {
    fn validate(&self) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::ExeHost(exe) => exe.validate().map_err(|e| e.within("exe_host")),
            Self::DllHost(dll) => dll.validate().map_err(|e| e.within("dll_host")),
            Self::ContainerHost(container) => container
                .validate()
                .map_err(|e| e.within("container_host")),
        }
    }
}
