//! Application upgrade requests and rolling upgrade policies.
//!
//! Monitoring data only exists on [`RollingUpgradeMode::Monitored`], so an
//! unmonitored upgrade cannot carry a health policy or failure action.

use crate::application::validate_parameters;
use crate::health::ApplicationHealthPolicy;
use fabric_types::validate::{require_name, require_seconds_u32};
use fabric_types::{Error, FabricUri, Result, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Default time to wait for a replica set to become safe before upgrading it.
pub const DEFAULT_REPLICA_SET_CHECK_TIMEOUT: Duration = Duration::from_secs(u32::MAX as u64);
/// Default time health must be retried before the failure action runs.
pub const DEFAULT_HEALTH_CHECK_RETRY_TIMEOUT: Duration = Duration::from_secs(600);
/// Upgrade and upgrade domain timeouts default to the largest native value.
pub const DEFAULT_UPGRADE_TIMEOUT: Duration = Duration::from_secs(u32::MAX as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    #[default]
    Rolling,
}

/// Action taken when a monitored upgrade violates its health policy or times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeFailureAction {
    Rollback,
    #[default]
    Manual,
}

/// Health monitoring settings of a monitored rolling upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingUpgradeMonitoringPolicy {
    pub failure_action: UpgradeFailureAction,
    pub health_check_wait_duration: Duration,
    /// Time health must stay stable before the next domain starts. Unset
    /// leaves the cluster default.
    #[serde(default)]
    pub health_check_stable_duration: Option<Duration>,
    pub health_check_retry_timeout: Duration,
    pub upgrade_timeout: Duration,
    pub upgrade_domain_timeout: Duration,
}

impl Default for RollingUpgradeMonitoringPolicy {
    fn default() -> Self {
        Self {
            failure_action: UpgradeFailureAction::default(),
            health_check_wait_duration: Duration::ZERO,
            health_check_stable_duration: None,
            health_check_retry_timeout: DEFAULT_HEALTH_CHECK_RETRY_TIMEOUT,
            upgrade_timeout: DEFAULT_UPGRADE_TIMEOUT,
            upgrade_domain_timeout: DEFAULT_UPGRADE_TIMEOUT,
        }
    }
}

impl Validate for RollingUpgradeMonitoringPolicy {
    fn validate(&self) -> Result<()> {
        require_seconds_u32("health_check_wait_duration", self.health_check_wait_duration)?;
        if let Some(stable) = self.health_check_stable_duration {
            require_seconds_u32("health_check_stable_duration", stable)?;
        }
        require_seconds_u32("health_check_retry_timeout", self.health_check_retry_timeout)?;
        require_seconds_u32("upgrade_timeout", self.upgrade_timeout)?;
        require_seconds_u32("upgrade_domain_timeout", self.upgrade_domain_timeout)?;
        if self.upgrade_domain_timeout > self.upgrade_timeout {
            return Err(Error::invalid_argument(
                "upgrade_domain_timeout",
                format!(
                    "upgrade domain timeout {}s is greater than upgrade timeout {}s",
                    self.upgrade_domain_timeout.as_secs(),
                    self.upgrade_timeout.as_secs()
                ),
            ));
        }
        Ok(())
    }
}

/// How a rolling upgrade advances between upgrade domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RollingUpgradeMode {
    /// Advance automatically without health checks.
    UnmonitoredAuto,
    /// Wait for an explicit request before each upgrade domain.
    UnmonitoredManual,
    /// Advance automatically while health stays within policy.
    Monitored {
        monitoring_policy: RollingUpgradeMonitoringPolicy,
        #[serde(default)]
        health_policy: Option<ApplicationHealthPolicy>,
    },
}

impl RollingUpgradeMode {
    #[must_use]
    pub fn kind(&self) -> RollingUpgradeModeKind {
        match self {
            Self::UnmonitoredAuto => RollingUpgradeModeKind::UnmonitoredAuto,
            Self::UnmonitoredManual => RollingUpgradeModeKind::UnmonitoredManual,
            Self::Monitored { .. } => RollingUpgradeModeKind::Monitored,
        }
    }
}

impl Validate for RollingUpgradeMode {
    fn validate(&self) -> Result<()> {
        match self {
            Self::UnmonitoredAuto | Self::UnmonitoredManual => Ok(()),
            Self::Monitored {
                monitoring_policy,
                health_policy,
            } => {
                monitoring_policy
                    .validate()
                    .map_err(|e| e.within("monitoring_policy"))?;
                health_policy.validate().map_err(|e| e.within("health_policy"))
            }
        }
    }
}

/// The mode of a rolling upgrade without its monitoring data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingUpgradeModeKind {
    UnmonitoredAuto,
    UnmonitoredManual,
    Monitored,
}

impl fmt::Display for RollingUpgradeModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnmonitoredAuto => "unmonitored-auto",
            Self::UnmonitoredManual => "unmonitored-manual",
            Self::Monitored => "monitored",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingUpgradePolicyDescription {
    pub mode: RollingUpgradeMode,
    #[serde(default)]
    pub force_restart: bool,
    pub upgrade_replica_set_check_timeout: Duration,
}

impl RollingUpgradePolicyDescription {
    pub fn new(mode: RollingUpgradeMode) -> Self {
        Self {
            mode,
            force_restart: false,
            upgrade_replica_set_check_timeout: DEFAULT_REPLICA_SET_CHECK_TIMEOUT,
        }
    }
}

impl Validate for RollingUpgradePolicyDescription {
    fn validate(&self) -> Result<()> {
        require_seconds_u32(
            "upgrade_replica_set_check_timeout",
            self.upgrade_replica_set_check_timeout,
        )?;
        self.mode.validate()
    }
}

/// Upgrade policy, tagged by upgrade kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradePolicyDescription {
    Rolling(RollingUpgradePolicyDescription),
}

impl UpgradePolicyDescription {
    #[must_use]
    pub fn kind(&self) -> UpgradeKind {
        match self {
            Self::Rolling(_) => UpgradeKind::Rolling,
        }
    }
}

impl Validate for UpgradePolicyDescription {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Rolling(policy) => policy.validate(),
        }
    }
}

/// Request to upgrade an application to another version of its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpgradeDescription {
    pub application_name: FabricUri,
    pub target_application_type_version: String,
    #[serde(default)]
    pub application_parameters: BTreeMap<String, String>,
    pub upgrade_policy: UpgradePolicyDescription,
}

impl Validate for ApplicationUpgradeDescription {
    fn validate(&self) -> Result<()> {
        require_name(
            "target_application_type_version",
            &self.target_application_type_version,
        )?;
        validate_parameters("application_parameters", &self.application_parameters)?;
        self.upgrade_policy
            .validate()
            .map_err(|e| e.within("upgrade_policy"))
    }
}

impl fmt::Display for ApplicationUpgradeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let UpgradePolicyDescription::Rolling(policy) = &self.upgrade_policy;
        write!(
            f,
            "{} -> {} ({})",
            self.application_name,
            self.target_application_type_version,
            policy.mode.kind()
        )
    }
}

/// Request to change the parameters of an upgrade that is in progress.
///
/// Each `Some` field is applied; everything else keeps its current value.
/// Monitoring fields may only change when the upgrade is, or becomes, monitored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpgradeUpdateDescription {
    pub application_name: FabricUri,
    #[serde(default)]
    pub upgrade_kind: UpgradeKind,
    #[serde(default)]
    pub mode: Option<RollingUpgradeModeKind>,
    #[serde(default)]
    pub force_restart: Option<bool>,
    #[serde(default)]
    pub upgrade_replica_set_check_timeout: Option<Duration>,
    #[serde(default)]
    pub failure_action: Option<UpgradeFailureAction>,
    #[serde(default)]
    pub health_check_wait_duration: Option<Duration>,
    #[serde(default)]
    pub health_check_stable_duration: Option<Duration>,
    #[serde(default)]
    pub health_check_retry_timeout: Option<Duration>,
    #[serde(default)]
    pub upgrade_timeout: Option<Duration>,
    #[serde(default)]
    pub upgrade_domain_timeout: Option<Duration>,
    #[serde(default)]
    pub health_policy: Option<ApplicationHealthPolicy>,
}

impl ApplicationUpgradeUpdateDescription {
    pub fn new(application_name: FabricUri) -> Self {
        Self {
            application_name,
            upgrade_kind: UpgradeKind::Rolling,
            mode: None,
            force_restart: None,
            upgrade_replica_set_check_timeout: None,
            failure_action: None,
            health_check_wait_duration: None,
            health_check_stable_duration: None,
            health_check_retry_timeout: None,
            upgrade_timeout: None,
            upgrade_domain_timeout: None,
            health_policy: None,
        }
    }

    /// Returns true if any monitoring-only setting is changed.
    #[must_use]
    pub fn changes_monitoring(&self) -> bool {
        self.failure_action.is_some()
            || self.health_check_wait_duration.is_some()
            || self.health_check_stable_duration.is_some()
            || self.health_check_retry_timeout.is_some()
            || self.upgrade_timeout.is_some()
            || self.upgrade_domain_timeout.is_some()
            || self.health_policy.is_some()
    }

    fn changes_anything(&self) -> bool {
        self.mode.is_some()
            || self.force_restart.is_some()
            || self.upgrade_replica_set_check_timeout.is_some()
            || self.changes_monitoring()
    }
}

impl Validate for ApplicationUpgradeUpdateDescription {
    fn validate(&self) -> Result<()> {
        if !self.changes_anything() {
            return Err(Error::invalid_argument(
                "application_name",
                format!(
                    "upgrade update for {} does not change anything",
                    self.application_name
                ),
            ));
        }
        if let Some(mode) = self.mode {
            if mode != RollingUpgradeModeKind::Monitored && self.changes_monitoring() {
                return Err(Error::invalid_argument(
                    "mode",
                    format!("monitoring settings cannot be changed in {mode} mode"),
                ));
            }
        }

        let durations = [
            (
                "upgrade_replica_set_check_timeout",
                self.upgrade_replica_set_check_timeout,
            ),
            ("health_check_wait_duration", self.health_check_wait_duration),
            ("health_check_stable_duration", self.health_check_stable_duration),
            ("health_check_retry_timeout", self.health_check_retry_timeout),
            ("upgrade_timeout", self.upgrade_timeout),
            ("upgrade_domain_timeout", self.upgrade_domain_timeout),
        ];
        for (field, value) in durations {
            if let Some(value) = value {
                require_seconds_u32(field, value)?;
            }
        }
        if let (Some(domain), Some(total)) = (self.upgrade_domain_timeout, self.upgrade_timeout) {
            if domain > total {
                return Err(Error::invalid_argument(
                    "upgrade_domain_timeout",
                    format!(
                        "upgrade domain timeout {}s is greater than upgrade timeout {}s",
                        domain.as_secs(),
                        total.as_secs()
                    ),
                ));
            }
        }
        self.health_policy
            .validate()
            .map_err(|e| e.within("health_policy"))
    }
}
