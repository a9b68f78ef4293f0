use fabric_description::{
    FabricUri, PartitionSchemeDescription, ScalingMechanismDescription, ScalingPolicyDescription,
    ScalingTriggerDescription, ServiceCorrelationDescription, ServiceCorrelationScheme,
    ServiceDescription, ServiceLoadMetricDescription, ServiceLoadMetricWeight,
    ServicePlacementPolicyDescription, StatefulServiceSettings, Validate,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::time::Duration;

fn uri(s: &str) -> FabricUri {
    FabricUri::parse(s).unwrap()
}

fn field_of<T: Validate>(desc: &T) -> String {
    desc.validate().unwrap_err().field().unwrap().to_string()
}

fn stateful() -> ServiceDescription {
    ServiceDescription::stateful(
        uri("fabric:/Shop/Cart"),
        "CartType",
        StatefulServiceSettings::new(3, 2),
    )
    .with_application(uri("fabric:/Shop"))
}

fn stateless() -> ServiceDescription {
    ServiceDescription::stateless(uri("fabric:/Shop/Web"), "WebType", 5)
}

fn named(names: &[&str]) -> PartitionSchemeDescription {
    PartitionSchemeDescription::Named {
        partition_names: names.iter().map(|n| n.to_string()).collect(),
    }
}

fn service_load_trigger() -> ScalingTriggerDescription {
    ScalingTriggerDescription::AverageServiceLoad {
        metric_name: "CPU".into(),
        lower_load_threshold: 0.2,
        upper_load_threshold: 0.8,
        scale_interval: Duration::from_secs(60),
        use_only_primary_load: false,
    }
}

// ── Kinds ─────────────────────────────────────────────────────────

#[test]
fn basic_services_are_valid() {
    assert!(stateful().validate().is_ok());
    assert!(stateless().validate().is_ok());
}

#[test]
fn min_replica_set_above_target_rejected() {
    let desc = ServiceDescription::stateful(
        uri("fabric:/Shop/Cart"),
        "CartType",
        StatefulServiceSettings::new(2, 3),
    );
    assert_eq!(field_of(&desc), "min_replica_set_size");
}

#[test]
fn min_replica_set_must_be_positive() {
    let settings = StatefulServiceSettings::new(3, 0);
    assert_eq!(field_of(&settings), "min_replica_set_size");
}

#[test]
fn instance_count_minus_one_means_every_node() {
    let desc = ServiceDescription::stateless(uri("fabric:/Shop/Web"), "WebType", -1);
    assert!(desc.validate().is_ok());

    let desc = ServiceDescription::stateless(uri("fabric:/Shop/Web"), "WebType", 0);
    assert_eq!(field_of(&desc), "instance_count");
}

#[test]
fn failover_durations_must_fit_dword() {
    let mut settings = StatefulServiceSettings::new(3, 2);
    settings.quorum_loss_wait_duration = Some(Duration::from_secs(u64::from(u32::MAX) + 1));
    assert_eq!(field_of(&settings), "quorum_loss_wait_duration");
}

#[test]
fn blank_service_type_rejected() {
    let mut desc = stateless();
    desc.service_type_name.clear();
    assert_eq!(field_of(&desc), "service_type_name");
}

// ── Partitioning ──────────────────────────────────────────────────

#[test]
fn uniform_range_rules() {
    let scheme = PartitionSchemeDescription::UniformInt64Range {
        partition_count: 4,
        low_key: 0,
        high_key: 99,
    };
    assert!(scheme.validate().is_ok());
    assert_eq!(scheme.partition_count(), 4);

    let inverted = PartitionSchemeDescription::UniformInt64Range {
        partition_count: 1,
        low_key: 10,
        high_key: 0,
    };
    assert_eq!(field_of(&inverted), "low_key");

    let too_many = PartitionSchemeDescription::UniformInt64Range {
        partition_count: 11,
        low_key: 0,
        high_key: 9,
    };
    assert_eq!(field_of(&too_many), "partition_count");

    let zero = PartitionSchemeDescription::UniformInt64Range {
        partition_count: 0,
        low_key: 0,
        high_key: 9,
    };
    assert_eq!(field_of(&zero), "partition_count");
}

#[test]
fn full_key_range_does_not_overflow() {
    let scheme = PartitionSchemeDescription::UniformInt64Range {
        partition_count: 26,
        low_key: i64::MIN,
        high_key: i64::MAX,
    };
    assert!(scheme.validate().is_ok());
}

#[test]
fn named_partition_rules() {
    assert!(named(&["a", "b"]).validate().is_ok());
    assert_eq!(field_of(&named(&[])), "partition_names");
    assert_eq!(field_of(&named(&["a", ""])), "partition_names");
    assert_eq!(field_of(&named(&["a", "a"])), "partition_names");
}

#[test]
fn partition_errors_are_nested() {
    let desc = stateless().with_partition_scheme(named(&[]));
    assert_eq!(field_of(&desc), "partition_scheme.partition_names");
}

// ── Placement, metrics, correlations ──────────────────────────────

#[test]
fn placement_policy_domain_required() {
    let mut desc = stateful();
    desc.placement_policies = vec![
        ServicePlacementPolicyDescription::RequiredDomainDistribution,
        ServicePlacementPolicyDescription::RequiredDomain {
            domain_name: String::new(),
        },
    ];
    assert_eq!(field_of(&desc), "placement_policies[1].domain_name");
}

#[test]
fn duplicate_load_metrics_rejected() {
    let desc = stateful()
        .with_metric(ServiceLoadMetricDescription::new("CPU", ServiceLoadMetricWeight::High))
        .with_metric(ServiceLoadMetricDescription::new("CPU", ServiceLoadMetricWeight::Low));
    assert_eq!(field_of(&desc), "metrics");
}

#[test]
fn default_load_must_fit_u32() {
    let desc = stateful().with_metric(
        ServiceLoadMetricDescription::new("CPU", ServiceLoadMetricWeight::Medium)
            .with_default_loads(-5, 0),
    );
    assert_eq!(field_of(&desc), "metrics[0].primary_default_load");
}

#[test]
fn self_correlation_rejected() {
    let mut desc = stateful();
    desc.correlations = vec![ServiceCorrelationDescription::new(
        uri("fabric:/Shop/Cart"),
        ServiceCorrelationScheme::Affinity,
    )];
    assert_eq!(field_of(&desc), "correlations");

    desc.correlations = vec![ServiceCorrelationDescription::new(
        uri("fabric:/Shop/Inventory"),
        ServiceCorrelationScheme::AlignedAffinity,
    )];
    assert!(desc.validate().is_ok());
}

// ── Scaling ───────────────────────────────────────────────────────

#[test]
fn instance_count_scaling_on_stateless() {
    let policy = ScalingPolicyDescription::new(
        service_load_trigger(),
        ScalingMechanismDescription::PartitionInstanceCount {
            minimum_instance_count: 1,
            maximum_instance_count: -1,
            scale_increment: 1,
        },
    );
    assert!(stateless().with_scaling_policy(policy.clone()).validate().is_ok());
    assert_eq!(
        field_of(&stateful().with_scaling_policy(policy)),
        "scaling_policies[0]"
    );
}

#[test]
fn named_partition_scaling_requires_named_scheme() {
    let policy = ScalingPolicyDescription::new(
        service_load_trigger(),
        ScalingMechanismDescription::AddRemoveIncrementalNamedPartition {
            minimum_partition_count: 1,
            maximum_partition_count: 4,
            scale_increment: 1,
        },
    );
    assert_eq!(
        field_of(&stateful().with_scaling_policy(policy.clone())),
        "scaling_policies[0]"
    );
    let desc = stateful()
        .with_partition_scheme(named(&["0"]))
        .with_scaling_policy(policy);
    assert!(desc.validate().is_ok());
}

#[test]
fn scaling_bounds_checked() {
    let mechanism = ScalingMechanismDescription::AddRemoveIncrementalNamedPartition {
        minimum_partition_count: 3,
        maximum_partition_count: -1,
        scale_increment: 1,
    };
    assert_eq!(field_of(&mechanism), "minimum_partition_count");

    let mechanism = ScalingMechanismDescription::PartitionInstanceCount {
        minimum_instance_count: 1,
        maximum_instance_count: 3,
        scale_increment: 0,
    };
    assert_eq!(field_of(&mechanism), "scale_increment");
}

#[test]
fn trigger_thresholds_ordered() {
    let trigger = ScalingTriggerDescription::AveragePartitionLoad {
        metric_name: "CPU".into(),
        lower_load_threshold: 0.9,
        upper_load_threshold: 0.1,
        scale_interval: Duration::from_secs(30),
    };
    assert_eq!(field_of(&trigger), "lower_load_threshold");

    let nan = ScalingTriggerDescription::AveragePartitionLoad {
        metric_name: "CPU".into(),
        lower_load_threshold: f64::NAN,
        upper_load_threshold: 1.0,
        scale_interval: Duration::from_secs(30),
    };
    assert_eq!(field_of(&nan), "lower_load_threshold");
}

#[test]
fn non_finite_upper_threshold_names_upper() {
    for upper in [f64::NAN, f64::INFINITY] {
        let trigger = ScalingTriggerDescription::AveragePartitionLoad {
            metric_name: "CPU".into(),
            lower_load_threshold: 0.5,
            upper_load_threshold: upper,
            scale_interval: Duration::from_secs(30),
        };
        let err = trigger.validate().unwrap_err();
        assert_eq!(err.field(), Some("upper_load_threshold"));
        assert!(err.to_string().contains("finite"));
    }
}

#[test]
fn fractional_scale_interval_rejected() {
    let trigger = ScalingTriggerDescription::AveragePartitionLoad {
        metric_name: "CPU".into(),
        lower_load_threshold: 0.1,
        upper_load_threshold: 0.9,
        scale_interval: Duration::from_millis(30_500),
    };
    assert_eq!(field_of(&trigger), "scale_interval");
}

#[test]
fn primary_load_only_for_stateful() {
    let trigger = ScalingTriggerDescription::AverageServiceLoad {
        metric_name: "CPU".into(),
        lower_load_threshold: 1.0,
        upper_load_threshold: 2.0,
        scale_interval: Duration::from_secs(60),
        use_only_primary_load: true,
    };
    let policy = ScalingPolicyDescription::new(
        trigger,
        ScalingMechanismDescription::PartitionInstanceCount {
            minimum_instance_count: 1,
            maximum_instance_count: 5,
            scale_increment: 1,
        },
    );
    assert_eq!(
        field_of(&stateless().with_scaling_policy(policy)),
        "scaling_policies[0].trigger.use_only_primary_load"
    );
}

#[test]
fn at_most_one_scaling_policy() {
    let policy = ScalingPolicyDescription::new(
        service_load_trigger(),
        ScalingMechanismDescription::PartitionInstanceCount {
            minimum_instance_count: 1,
            maximum_instance_count: 5,
            scale_increment: 1,
        },
    );
    let desc = stateless()
        .with_scaling_policy(policy.clone())
        .with_scaling_policy(policy);
    assert_eq!(field_of(&desc), "scaling_policies");
}

// ── Display and serde ─────────────────────────────────────────────

#[test]
fn display_summarises_kind_and_partitions() {
    let desc = stateful().with_partition_scheme(named(&["a", "b", "c"]));
    assert_eq!(desc.to_string(), "fabric:/Shop/Cart (CartType, stateful, 3 partition(s))");
}

#[test]
fn service_serde_roundtrip() {
    let mut desc = stateful()
        .with_partition_scheme(PartitionSchemeDescription::UniformInt64Range {
            partition_count: 2,
            low_key: -10,
            high_key: 10,
        })
        .with_metric(ServiceLoadMetricDescription::new("CPU", ServiceLoadMetricWeight::High));
    desc.placement_policies = vec![ServicePlacementPolicyDescription::PreferredPrimaryDomain {
        domain_name: "fd:/dc1".into(),
    }];
    let json = serde_json::to_string(&desc).unwrap();
    assert!(json.contains("\"kind\":\"stateful\""));
    let parsed: ServiceDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, desc);
}

proptest! {
    #[test]
    fn replica_set_order_matches_validation(target in 1i64..10, min in 1i64..10) {
        let settings = StatefulServiceSettings::new(target, min);
        prop_assert_eq!(settings.validate().is_ok(), min <= target);
    }

    #[test]
    fn uniform_count_fits_range(count in 1i64..50, low in -100i64..100, width in 0i64..50) {
        let scheme = PartitionSchemeDescription::UniformInt64Range {
            partition_count: count,
            low_key: low,
            high_key: low + width,
        };
        prop_assert_eq!(scheme.validate().is_ok(), count <= width + 1);
    }
}
