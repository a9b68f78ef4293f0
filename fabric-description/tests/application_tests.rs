use fabric_description::{
    ApplicationDescription, ApplicationMetricDescription, ApplicationUpdateDescription, Error,
    FabricUri, Validate,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn app_name() -> FabricUri {
    FabricUri::parse("fabric:/Shop").unwrap()
}

fn base() -> ApplicationDescription {
    ApplicationDescription::new(app_name(), "ShopType", "1.0.0")
}

fn field_of(err: Error) -> String {
    err.field().unwrap().to_string()
}

// ── ApplicationMetricDescription ──────────────────────────────────

#[test]
fn reservation_above_maximum_is_rejected() {
    let metric = ApplicationMetricDescription::new("CPU", 100, 50, 0);
    let err = metric.validate().unwrap_err();
    assert_eq!(field_of(err), "node_reservation_capacity");
}

#[test]
fn total_capacity_checked_against_maximum_nodes() {
    let metric = ApplicationMetricDescription::new("CPU", 50, 100, 100);
    let err = metric.validate_with_maximum_nodes(2).unwrap_err();
    assert_eq!(field_of(err), "total_application_capacity");
    assert!(metric.validate_with_maximum_nodes(1).is_ok());
}

#[test]
fn zero_maximum_nodes_skips_total_check() {
    let metric = ApplicationMetricDescription::new("CPU", 50, 100, 100);
    assert!(metric.validate_with_maximum_nodes(0).is_ok());
}

#[test]
fn zero_maximum_node_capacity_means_unlimited() {
    let metric = ApplicationMetricDescription::new("CPU", 500, 0, 0);
    assert!(metric.validate().is_ok());
}

#[test]
fn metric_capacity_must_fit_u32() {
    let metric = ApplicationMetricDescription::new("CPU", -1, 0, 0);
    assert_eq!(field_of(metric.validate().unwrap_err()), "node_reservation_capacity");

    let metric = ApplicationMetricDescription::new("CPU", 0, i64::from(u32::MAX) + 1, 0);
    assert_eq!(field_of(metric.validate().unwrap_err()), "maximum_node_capacity");
}

#[test]
fn large_product_does_not_overflow() {
    let max = i64::from(u32::MAX);
    let metric = ApplicationMetricDescription::new("Memory", 0, max, max);
    let err = metric.validate_with_maximum_nodes(max).unwrap_err();
    assert_eq!(field_of(err), "total_application_capacity");
}

#[test]
fn metric_name_required() {
    let metric = ApplicationMetricDescription::new("", 0, 0, 0);
    assert_eq!(field_of(metric.validate().unwrap_err()), "name");
}

// ── ApplicationDescription ────────────────────────────────────────

#[test]
fn base_description_is_valid() {
    let desc = base().with_parameter("InstanceCount", "3");
    assert!(desc.validate().is_ok());
    assert!(!desc.has_capacity());
}

#[test]
fn blank_type_name_names_field() {
    let mut desc = base();
    desc.application_type_name.clear();
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_type_name");

    let mut desc = base();
    desc.application_type_version.clear();
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_type_version");
}

#[test]
fn empty_parameter_name_rejected() {
    let desc = base().with_parameter("", "x");
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_parameters");
}

#[test]
fn embedded_nul_rejected_in_names_and_values() {
    let desc = ApplicationDescription::new(app_name(), "Shop\0Type", "1.0");
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_type_name");

    let desc = base().with_parameter("Mo\0de", "fast");
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_parameters");

    let desc = base().with_parameter("Mode", "fa\0st");
    assert_eq!(field_of(desc.validate().unwrap_err()), "application_parameters[Mode]");
}

#[test]
fn minimum_nodes_above_maximum_rejected() {
    let desc = base().with_nodes(5, 3);
    assert_eq!(field_of(desc.validate().unwrap_err()), "minimum_nodes");
}

#[test]
fn zero_maximum_nodes_allows_any_minimum() {
    let desc = base().with_nodes(5, 0);
    assert!(desc.validate().is_ok());
}

#[test]
fn node_counts_must_fit_u32() {
    let desc = base().with_nodes(0, i64::from(u32::MAX) + 1);
    assert_eq!(field_of(desc.validate().unwrap_err()), "maximum_nodes");
}

#[test]
fn metrics_use_application_maximum_nodes() {
    let metric = ApplicationMetricDescription::new("CPU", 50, 100, 100);
    let ok = base().with_nodes(1, 1).with_metric(metric.clone());
    assert!(ok.validate().is_ok());

    let bad = base().with_nodes(1, 2).with_metric(metric);
    assert_eq!(
        field_of(bad.validate().unwrap_err()),
        "metrics[0].total_application_capacity"
    );
}

#[test]
fn duplicate_metric_names_rejected() {
    let desc = base()
        .with_metric(ApplicationMetricDescription::new("CPU", 0, 0, 0))
        .with_metric(ApplicationMetricDescription::new("CPU", 1, 0, 0));
    assert_eq!(field_of(desc.validate().unwrap_err()), "metrics");
}

#[test]
fn display_includes_capacity_only_when_set() {
    assert_eq!(base().to_string(), "fabric:/Shop (ShopType 1.0.0)");
    let desc = base()
        .with_nodes(1, 3)
        .with_metric(ApplicationMetricDescription::new("CPU", 1, 2, 6));
    assert_eq!(
        desc.to_string(),
        "fabric:/Shop (ShopType 1.0.0) nodes=1..3 [CPU: reservation=1, max_node=2, total=6]"
    );
}

#[test]
fn serde_roundtrip_with_defaults() {
    let json = r#"{
        "application_name": "fabric:/Shop",
        "application_type_name": "ShopType",
        "application_type_version": "1.0.0"
    }"#;
    let desc: ApplicationDescription = serde_json::from_str(json).unwrap();
    assert_eq!(desc, base());

    let full = base()
        .with_parameter("A", "1")
        .with_nodes(1, 2)
        .with_metric(ApplicationMetricDescription::new("CPU", 1, 2, 4));
    let text = serde_json::to_string(&full).unwrap();
    let parsed: ApplicationDescription = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, full);
}

// ── ApplicationUpdateDescription ──────────────────────────────────

#[test]
fn update_requires_a_change() {
    let update = ApplicationUpdateDescription::new(app_name());
    assert_eq!(field_of(update.validate().unwrap_err()), "application_name");
}

#[test]
fn remove_capacity_excludes_other_changes() {
    let mut update = ApplicationUpdateDescription::new(app_name());
    update.remove_application_capacity = true;
    assert!(update.validate().is_ok());

    update.maximum_nodes = Some(3);
    assert_eq!(
        field_of(update.validate().unwrap_err()),
        "remove_application_capacity"
    );
}

#[test]
fn update_checks_node_order_when_both_set() {
    let mut update = ApplicationUpdateDescription::new(app_name());
    update.minimum_nodes = Some(4);
    assert!(update.validate().is_ok());

    update.maximum_nodes = Some(2);
    assert_eq!(field_of(update.validate().unwrap_err()), "minimum_nodes");
}

#[test]
fn update_metrics_checked_against_new_maximum() {
    let mut update = ApplicationUpdateDescription::new(app_name());
    update.maximum_nodes = Some(2);
    update.metrics = Some(vec![ApplicationMetricDescription::new("CPU", 50, 100, 100)]);
    assert_eq!(
        field_of(update.validate().unwrap_err()),
        "metrics[0].total_application_capacity"
    );
}

proptest! {
    #[test]
    fn node_order_matches_validation(min in 0i64..1000, max in 1i64..1000) {
        let desc = base().with_nodes(min, max);
        prop_assert_eq!(desc.validate().is_ok(), min <= max);
    }

    #[test]
    fn validation_is_idempotent(reservation in 0i64..200, max in 0i64..200, nodes in 0i64..10) {
        let desc = base()
            .with_nodes(0, nodes)
            .with_metric(ApplicationMetricDescription::new("M", reservation, max, 0));
        let first = desc.validate().is_ok();
        prop_assert_eq!(first, desc.validate().is_ok());
    }
}
