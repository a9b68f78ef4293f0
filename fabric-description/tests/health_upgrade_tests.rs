use fabric_description::upgrade::DEFAULT_UPGRADE_TIMEOUT;
use fabric_description::{
    ApplicationHealthPolicy, ApplicationHealthQueryDescription, ApplicationUpgradeDescription,
    ApplicationUpgradeUpdateDescription, FabricUri, HealthEventsFilter, HealthStateFilter,
    HealthStatisticsFilter, RollingUpgradeMode, RollingUpgradeModeKind,
    RollingUpgradeMonitoringPolicy, RollingUpgradePolicyDescription, ServiceHealthStatesFilter,
    ServiceTypeHealthPolicy, UpgradeFailureAction, UpgradeKind, UpgradePolicyDescription,
    Validate,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn app() -> FabricUri {
    FabricUri::parse("fabric:/Shop").unwrap()
}

fn field_of<T: Validate>(desc: &T) -> String {
    desc.validate().unwrap_err().field().unwrap().to_string()
}

fn monitored(policy: RollingUpgradeMonitoringPolicy) -> ApplicationUpgradeDescription {
    ApplicationUpgradeDescription {
        application_name: app(),
        target_application_type_version: "2.0.0".into(),
        application_parameters: Default::default(),
        upgrade_policy: UpgradePolicyDescription::Rolling(RollingUpgradePolicyDescription::new(
            RollingUpgradeMode::Monitored {
                monitoring_policy: policy,
                health_policy: None,
            },
        )),
    }
}

// ── Health filters ────────────────────────────────────────────────

#[test]
fn health_state_filter_bits() {
    let filter = HealthStateFilter::WARNING | HealthStateFilter::ERROR;
    assert_eq!(filter.bits(), 0xC);
    assert!(filter.is_valid());
    assert!(HealthStateFilter::ALL.is_valid());
    assert!(!HealthStateFilter::from_bits(0x10).is_valid());
}

#[test]
fn filter_with_undefined_bits_names_nested_field() {
    let mut query = ApplicationHealthQueryDescription::new(app());
    query.events_filter = Some(HealthEventsFilter::new(HealthStateFilter::from_bits(0x30)));
    assert_eq!(field_of(&query), "events_filter.health_state_filter");
}

#[test]
fn health_query_with_every_filter_is_valid() {
    let mut query = ApplicationHealthQueryDescription::new(app());
    query.health_policy = Some(ApplicationHealthPolicy::default());
    query.events_filter = Some(HealthEventsFilter::new(HealthStateFilter::ERROR));
    query.services_filter = Some(ServiceHealthStatesFilter::new(HealthStateFilter::ALL));
    query.health_statistics_filter = Some(HealthStatisticsFilter {
        exclude_health_statistics: true,
    });
    assert!(query.validate().is_ok());
}

// ── Health policies ───────────────────────────────────────────────

#[test]
fn percentages_above_100_rejected() {
    let policy = ServiceTypeHealthPolicy {
        max_percent_unhealthy_partitions_per_service: 101,
        ..Default::default()
    };
    assert_eq!(field_of(&policy), "max_percent_unhealthy_partitions_per_service");

    let app_policy = ApplicationHealthPolicy {
        max_percent_unhealthy_deployed_applications: 150,
        ..Default::default()
    };
    assert_eq!(field_of(&app_policy), "max_percent_unhealthy_deployed_applications");
}

#[test]
fn map_entry_errors_name_the_service_type() {
    let policy = ApplicationHealthPolicy::default().with_service_type_policy(
        "Frontend",
        ServiceTypeHealthPolicy {
            max_percent_unhealthy_services: 200,
            ..Default::default()
        },
    );
    assert_eq!(
        field_of(&policy),
        "service_type_health_policy_map[Frontend].max_percent_unhealthy_services"
    );
}

#[test]
fn health_policy_serde_roundtrip() {
    let policy = ApplicationHealthPolicy {
        consider_warning_as_error: true,
        max_percent_unhealthy_deployed_applications: 10,
        default_service_type_health_policy: Some(ServiceTypeHealthPolicy {
            max_percent_unhealthy_services: 5,
            max_percent_unhealthy_partitions_per_service: 6,
            max_percent_unhealthy_replicas_per_partition: 7,
        }),
        service_type_health_policy_map: Default::default(),
    }
    .with_service_type_policy("Backend", ServiceTypeHealthPolicy::default());
    let json = serde_json::to_string(&policy).unwrap();
    let parsed: ApplicationHealthPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, policy);
}

// ── Upgrade descriptions ──────────────────────────────────────────

#[test]
fn unmonitored_upgrade_is_valid() {
    let desc = ApplicationUpgradeDescription {
        application_name: app(),
        target_application_type_version: "2.0.0".into(),
        application_parameters: Default::default(),
        upgrade_policy: UpgradePolicyDescription::Rolling(RollingUpgradePolicyDescription::new(
            RollingUpgradeMode::UnmonitoredAuto,
        )),
    };
    assert!(desc.validate().is_ok());
    assert_eq!(desc.upgrade_policy.kind(), UpgradeKind::Rolling);
    assert_eq!(desc.to_string(), "fabric:/Shop -> 2.0.0 (unmonitored-auto)");
}

#[test]
fn blank_target_version_rejected() {
    let mut desc = monitored(RollingUpgradeMonitoringPolicy::default());
    desc.target_application_type_version.clear();
    assert_eq!(field_of(&desc), "target_application_type_version");
}

#[test]
fn monitoring_durations_must_fit_dword() {
    let policy = RollingUpgradeMonitoringPolicy {
        health_check_wait_duration: Duration::from_secs(u64::from(u32::MAX) + 1),
        ..Default::default()
    };
    assert_eq!(
        field_of(&monitored(policy)),
        "upgrade_policy.monitoring_policy.health_check_wait_duration"
    );
}

#[test]
fn fractional_monitoring_durations_rejected() {
    let policy = RollingUpgradeMonitoringPolicy {
        health_check_stable_duration: Some(Duration::from_millis(2_500)),
        ..Default::default()
    };
    assert_eq!(
        field_of(&monitored(policy)),
        "upgrade_policy.monitoring_policy.health_check_stable_duration"
    );

    let mut update = ApplicationUpgradeUpdateDescription::new(app());
    update.mode = Some(RollingUpgradeModeKind::Monitored);
    update.health_check_retry_timeout = Some(Duration::from_millis(100));
    assert_eq!(field_of(&update), "health_check_retry_timeout");
}

#[test]
fn domain_timeout_above_upgrade_timeout_rejected() {
    let policy = RollingUpgradeMonitoringPolicy {
        upgrade_timeout: Duration::from_secs(60),
        upgrade_domain_timeout: Duration::from_secs(120),
        ..Default::default()
    };
    assert_eq!(
        field_of(&monitored(policy)),
        "upgrade_policy.monitoring_policy.upgrade_domain_timeout"
    );
}

#[test]
fn monitoring_policy_defaults() {
    let policy = RollingUpgradeMonitoringPolicy::default();
    assert_eq!(policy.failure_action, UpgradeFailureAction::Manual);
    assert_eq!(policy.upgrade_timeout, DEFAULT_UPGRADE_TIMEOUT);
    assert!(policy.health_check_stable_duration.is_none());
    assert!(policy.validate().is_ok());
}

#[test]
fn upgrade_serde_roundtrip() {
    let desc = monitored(RollingUpgradeMonitoringPolicy {
        failure_action: UpgradeFailureAction::Rollback,
        health_check_stable_duration: Some(Duration::from_secs(30)),
        ..Default::default()
    });
    let json = serde_json::to_string(&desc).unwrap();
    assert!(json.contains("\"kind\":\"rolling\""));
    assert!(json.contains("\"mode\":\"monitored\""));
    let parsed: ApplicationUpgradeDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, desc);
}

// ── Upgrade update descriptions ───────────────────────────────────

#[test]
fn upgrade_update_requires_a_change() {
    let update = ApplicationUpgradeUpdateDescription::new(app());
    assert_eq!(field_of(&update), "application_name");
}

#[test]
fn monitoring_change_requires_monitored_mode() {
    let mut update = ApplicationUpgradeUpdateDescription::new(app());
    update.failure_action = Some(UpgradeFailureAction::Rollback);
    assert!(update.validate().is_ok());

    update.mode = Some(RollingUpgradeModeKind::Monitored);
    assert!(update.validate().is_ok());

    update.mode = Some(RollingUpgradeModeKind::UnmonitoredManual);
    assert_eq!(field_of(&update), "mode");
}

#[test]
fn mode_only_update_is_valid() {
    let mut update = ApplicationUpgradeUpdateDescription::new(app());
    update.mode = Some(RollingUpgradeModeKind::UnmonitoredAuto);
    update.force_restart = Some(true);
    assert!(update.validate().is_ok());
    assert!(!update.changes_monitoring());
}

#[test]
fn update_timeouts_checked() {
    let mut update = ApplicationUpgradeUpdateDescription::new(app());
    update.upgrade_timeout = Some(Duration::from_secs(10));
    update.upgrade_domain_timeout = Some(Duration::from_secs(20));
    assert_eq!(field_of(&update), "upgrade_domain_timeout");
}
