//! Shared helpers for native projection tests.

#![allow(dead_code)]

use fabric_description::{
    ApplicationHealthPolicy, FabricUri, RollingUpgradeMonitoringPolicy, ServiceTypeHealthPolicy,
    UpgradeFailureAction,
};
use fabric_ffi::{FromNative, PinCollection, ToNative};
use proptest::prelude::*;
use std::sync::Once;
use std::time::Duration;

static TRACING: Once = Once::new();

/// Routes `tracing` output to the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn uri(s: &str) -> FabricUri {
    FabricUri::parse(s).unwrap()
}

/// Projects `description`, reads it back, and returns the copy.
pub fn roundtrip<D>(description: &D) -> D
where
    D: ToNative + FromNative<Native = <D as ToNative>::Native>,
{
    init_tracing();
    let mut pin = PinCollection::new();
    let native = description.to_native(&mut pin);
    unsafe { D::from_native(&native) }
}

pub fn strict_health_policy() -> ApplicationHealthPolicy {
    let per_type = ServiceTypeHealthPolicy {
        max_percent_unhealthy_services: 10,
        max_percent_unhealthy_partitions_per_service: 20,
        max_percent_unhealthy_replicas_per_partition: 30,
    };
    ApplicationHealthPolicy {
        consider_warning_as_error: true,
        max_percent_unhealthy_deployed_applications: 5,
        default_service_type_health_policy: Some(per_type.clone()),
        ..ApplicationHealthPolicy::default()
    }
    .with_service_type_policy("CartType", per_type)
}

pub fn monitoring_policy() -> RollingUpgradeMonitoringPolicy {
    RollingUpgradeMonitoringPolicy {
        failure_action: UpgradeFailureAction::Rollback,
        health_check_wait_duration: Duration::from_secs(30),
        health_check_stable_duration: Some(Duration::from_secs(120)),
        health_check_retry_timeout: Duration::from_secs(600),
        upgrade_timeout: Duration::from_secs(7200),
        upgrade_domain_timeout: Duration::from_secs(1800),
    }
}

/// Durations across whole seconds, sub-second values and values beyond the
/// native `DWORD` range.
pub fn any_duration() -> impl Strategy<Value = Duration> {
    prop_oneof![
        (0u64..100_000).prop_map(Duration::from_secs),
        (0u64..10_000_000).prop_map(Duration::from_millis),
        any::<u64>().prop_map(Duration::from_nanos),
        (u64::from(u32::MAX)..=u64::from(u32::MAX) + 2).prop_map(Duration::from_secs),
    ]
}

/// Short strings that occasionally carry an embedded NUL.
pub fn any_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            8 => proptest::char::range('a', 'z'),
            1 => proptest::char::range('\u{e0}', '\u{ff}'),
            1 => Just('\0'),
        ],
        1..12,
    )
    .prop_map(|chars| chars.into_iter().collect::<String>())
}
