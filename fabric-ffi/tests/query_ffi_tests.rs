mod common;

use common::{any_text, roundtrip, uri};
use fabric_description::{
    ApplicationDefinitionKindFilter, ApplicationQueryDescription,
    ApplicationTypeDefinitionKindFilter, PagedApplicationTypeQueryDescription, PartitionId,
    PartitionQueryDescription, ServiceQueryDescription, Validate,
};
use fabric_ffi::abi::{from_guid, read_optional_string};
use fabric_ffi::raw::*;
use fabric_ffi::{PinCollection, ToNative};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ── Applications ──────────────────────────────────────────────────

#[test]
fn empty_application_query_is_base_only() {
    let mut pin = PinCollection::new();
    let native = ApplicationQueryDescription::default().to_native(&mut pin);
    assert!(native.ApplicationNameFilter.is_null());
    assert!(native.ContinuationToken.is_null());
    assert!(native.Reserved.is_null());
}

#[test]
fn kind_filter_allocates_every_level_below_it() {
    let query = ApplicationQueryDescription {
        application_definition_kind_filter: ApplicationDefinitionKindFilter::COMPOSE,
        ..ApplicationQueryDescription::default()
    };
    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);

    let ex1 = unsafe { &*native.Reserved.cast::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX1>() };
    assert!(ex1.ApplicationTypeNameFilter.is_null());
    let ex2 = unsafe { &*ex1.Reserved.cast::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX2>() };
    assert_eq!(ex2.MaxResults, 0);
    let ex3 = unsafe { &*ex2.Reserved.cast::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX3>() };
    assert_eq!(
        ex3.ApplicationDefinitionKindFilter,
        ApplicationDefinitionKindFilter::COMPOSE.bits()
    );
    assert!(ex3.Reserved.is_null());
}

#[test]
fn application_query_stops_at_deepest_set_level() {
    let query = ApplicationQueryDescription {
        exclude_application_parameters: true,
        ..ApplicationQueryDescription::default()
    };
    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);
    let ex1 = unsafe { &*native.Reserved.cast::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX1>() };
    assert_eq!(ex1.ExcludeApplicationParameters, TRUE);
    assert!(ex1.Reserved.is_null());
}

#[test]
fn full_application_query_roundtrip() {
    let query = ApplicationQueryDescription {
        application_name_filter: Some(uri("fabric:/Shop")),
        continuation_token: Some("page-2".into()),
        max_results: Some(50),
        application_definition_kind_filter:
            ApplicationDefinitionKindFilter::SERVICE_FABRIC_APPLICATION_DESCRIPTION,
        ..ApplicationQueryDescription::default()
    };
    assert_eq!(roundtrip(&query), query);
}

#[test]
fn zero_max_results_is_rejected_before_projection() {
    let query = ApplicationQueryDescription {
        max_results: Some(0),
        ..ApplicationQueryDescription::default()
    };
    let err = query.validate().unwrap_err();
    assert_eq!(err.field(), Some("max_results"));

    let unset = ApplicationQueryDescription::default();
    let mut pin = PinCollection::new();
    let native = unset.to_native(&mut pin);
    assert!(native.Reserved.is_null());
    assert_eq!(roundtrip(&unset).max_results, None);
}

// ── Services ──────────────────────────────────────────────────────

#[test]
fn continuation_token_sits_in_service_ex1() {
    let mut query = ServiceQueryDescription::new(uri("fabric:/Shop"));
    query.continuation_token = Some("token".into());
    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);

    let ex1 = unsafe { &*native.Reserved.cast::<FABRIC_SERVICE_QUERY_DESCRIPTION_EX1>() };
    assert_eq!(
        unsafe { read_optional_string(ex1.ContinuationToken) }.as_deref(),
        Some("token")
    );
    assert!(ex1.Reserved.is_null());
}

#[test]
fn service_query_roundtrip() {
    let mut query = ServiceQueryDescription::new(uri("fabric:/Shop"));
    query.service_type_name_filter = Some("CartType".into());
    query.max_results = Some(10);
    assert_eq!(roundtrip(&query), query);

    let mut by_name = ServiceQueryDescription::new(uri("fabric:/Shop"));
    by_name.service_name_filter = Some(uri("fabric:/Shop/Cart"));
    assert_eq!(roundtrip(&by_name), by_name);
}

// ── Application types ─────────────────────────────────────────────

#[test]
fn paged_application_type_query_is_flat() {
    let query = PagedApplicationTypeQueryDescription {
        application_type_name_filter: Some("ShopType".into()),
        application_type_version_filter: Some("1.0.0".into()),
        exclude_application_parameters: true,
        continuation_token: Some("next".into()),
        max_results: Some(25),
        ..PagedApplicationTypeQueryDescription::default()
    };
    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);
    assert!(native.Reserved.is_null());
    assert_eq!(native.MaxResults, 25);
    assert_eq!(roundtrip(&query), query);
}

#[test]
fn definition_kind_filter_roundtrip() {
    let query = PagedApplicationTypeQueryDescription {
        application_type_definition_kind_filter: ApplicationTypeDefinitionKindFilter::COMPOSE,
        ..PagedApplicationTypeQueryDescription::default()
    };
    assert_eq!(roundtrip(&query), query);
}

// ── Partitions ────────────────────────────────────────────────────

#[test]
fn missing_partition_filter_is_nil_guid() {
    let query = PartitionQueryDescription::new(uri("fabric:/Shop/Cart"));
    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);
    assert_eq!(native.PartitionIdFilter, GUID::default());
    assert!(native.Reserved.is_null());
    assert_eq!(roundtrip(&query), query);
}

#[test]
fn partition_filter_roundtrip() {
    let id = PartitionId::new();
    let mut query = PartitionQueryDescription::new(uri("fabric:/Shop/Cart"));
    query.partition_id_filter = Some(id);
    query.continuation_token = Some("p".into());
    query.max_results = Some(3);

    let mut pin = PinCollection::new();
    let native = query.to_native(&mut pin);
    assert_eq!(from_guid(&native.PartitionIdFilter), id.as_uuid());
    assert_eq!(roundtrip(&query), query);
}

// ── Properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn validated_application_queries_roundtrip_exactly(
        type_filter in proptest::option::of(any_text()),
        exclude in any::<bool>(),
        token in proptest::option::of(any_text()),
        max_results in proptest::option::of(-2i64..=i64::from(i32::MAX) + 2),
        kind in 0u32..=3,
    ) {
        let query = ApplicationQueryDescription {
            application_type_name_filter: type_filter,
            exclude_application_parameters: exclude,
            continuation_token: token,
            max_results,
            application_definition_kind_filter: ApplicationDefinitionKindFilter::from_bits(kind),
            ..ApplicationQueryDescription::default()
        };
        match query.validate() {
            Ok(()) => prop_assert_eq!(roundtrip(&query), query),
            Err(err) => prop_assert!(matches!(
                err.field(),
                Some(
                    "application_type_name_filter"
                        | "application_definition_kind_filter"
                        | "continuation_token"
                        | "max_results"
                )
            )),
        }
    }

    #[test]
    fn validated_partition_queries_roundtrip_exactly(
        token in proptest::option::of(any_text()),
        max_results in proptest::option::of(-1i64..100),
    ) {
        let mut query = PartitionQueryDescription::new(uri("fabric:/Shop/Cart"));
        query.partition_id_filter = Some(PartitionId::new());
        query.continuation_token = token;
        query.max_results = max_results;
        match query.validate() {
            Ok(()) => prop_assert_eq!(roundtrip(&query), query),
            Err(err) => prop_assert!(matches!(
                err.field(),
                Some("continuation_token" | "max_results")
            )),
        }
    }
}
