use crate::abi::{
    chain, extension, from_boolean, from_guid, narrow, read_optional_string, read_optional_uri,
    read_uri, to_boolean, to_guid,
};
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::{
    ApplicationDefinitionKindFilter, ApplicationQueryDescription,
    ApplicationTypeDefinitionKindFilter, PagedApplicationTypeQueryDescription, PartitionId,
    PartitionQueryDescription, ServiceQueryDescription,
};
use std::ptr;

// A native page size of zero lets the server choose, so `Some(0)` and
// `None` project to the same value and read back as `None`.
fn max_results_to_native(max_results: Option<i64>) -> LONG {
    narrow("max_results", max_results.unwrap_or(0))
}

fn max_results_from_native(max_results: LONG) -> Option<i64> {
    (max_results != 0).then(|| i64::from(max_results))
}

fn has_max_results(max_results: Option<i64>) -> bool {
    max_results.is_some_and(|m| m != 0)
}

// ── Applications ──────────────────────────────────────────────────

impl ToNative for ApplicationQueryDescription {
    type Native = FABRIC_APPLICATION_QUERY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex3 = (!self.application_definition_kind_filter.is_default()).then(|| {
            FABRIC_APPLICATION_QUERY_DESCRIPTION_EX3 {
                ApplicationDefinitionKindFilter: self.application_definition_kind_filter.bits(),
                Reserved: ptr::null_mut(),
            }
        });
        let ex2 = (ex3.is_some() || has_max_results(self.max_results)).then(|| {
            FABRIC_APPLICATION_QUERY_DESCRIPTION_EX2 {
                MaxResults: max_results_to_native(self.max_results),
                Reserved: chain(pin, ex3),
            }
        });
        let ex1 = (ex2.is_some()
            || self.application_type_name_filter.is_some()
            || self.exclude_application_parameters)
            .then(|| FABRIC_APPLICATION_QUERY_DESCRIPTION_EX1 {
                ApplicationTypeNameFilter: pin
                    .add_optional_string(self.application_type_name_filter.as_deref()),
                ExcludeApplicationParameters: to_boolean(self.exclude_application_parameters),
                Reserved: chain(pin, ex2),
            });

        FABRIC_APPLICATION_QUERY_DESCRIPTION {
            ApplicationNameFilter: pin.add_optional_uri(self.application_name_filter.as_ref()),
            ContinuationToken: pin.add_optional_string(self.continuation_token.as_deref()),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for ApplicationQueryDescription {
    type Native = FABRIC_APPLICATION_QUERY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mut query = Self {
            application_name_filter: unsafe { read_optional_uri(native.ApplicationNameFilter) },
            continuation_token: unsafe { read_optional_string(native.ContinuationToken) },
            ..Self::default()
        };
        let ex1 = unsafe { extension::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX1>(native.Reserved) };
        let Some(ex1) = ex1 else {
            return query;
        };
        query.application_type_name_filter =
            unsafe { read_optional_string(ex1.ApplicationTypeNameFilter) };
        query.exclude_application_parameters = from_boolean(ex1.ExcludeApplicationParameters);

        let ex2 = unsafe { extension::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX2>(ex1.Reserved) };
        let Some(ex2) = ex2 else {
            return query;
        };
        query.max_results = max_results_from_native(ex2.MaxResults);

        let ex3 = unsafe { extension::<FABRIC_APPLICATION_QUERY_DESCRIPTION_EX3>(ex2.Reserved) };
        if let Some(ex3) = ex3 {
            query.application_definition_kind_filter =
                ApplicationDefinitionKindFilter::from_bits(ex3.ApplicationDefinitionKindFilter);
        }
        query
    }
}

// ── Services ──────────────────────────────────────────────────────

impl ToNative for ServiceQueryDescription {
    type Native = FABRIC_SERVICE_QUERY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex3 = has_max_results(self.max_results).then(|| FABRIC_SERVICE_QUERY_DESCRIPTION_EX3 {
            MaxResults: max_results_to_native(self.max_results),
            Reserved: ptr::null_mut(),
        });
        let ex2 = (ex3.is_some() || self.service_type_name_filter.is_some()).then(|| {
            FABRIC_SERVICE_QUERY_DESCRIPTION_EX2 {
                ServiceTypeNameFilter: pin
                    .add_optional_string(self.service_type_name_filter.as_deref()),
                Reserved: chain(pin, ex3),
            }
        });
        let ex1 = (ex2.is_some() || self.continuation_token.is_some()).then(|| {
            FABRIC_SERVICE_QUERY_DESCRIPTION_EX1 {
                ContinuationToken: pin.add_optional_string(self.continuation_token.as_deref()),
                Reserved: chain(pin, ex2),
            }
        });

        FABRIC_SERVICE_QUERY_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            ServiceNameFilter: pin.add_optional_uri(self.service_name_filter.as_ref()),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for ServiceQueryDescription {
    type Native = FABRIC_SERVICE_QUERY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mut query = Self::new(unsafe { read_uri(native.ApplicationName) });
        query.service_name_filter = unsafe { read_optional_uri(native.ServiceNameFilter) };

        let ex1 = unsafe { extension::<FABRIC_SERVICE_QUERY_DESCRIPTION_EX1>(native.Reserved) };
        let Some(ex1) = ex1 else {
            return query;
        };
        query.continuation_token = unsafe { read_optional_string(ex1.ContinuationToken) };

        let ex2 = unsafe { extension::<FABRIC_SERVICE_QUERY_DESCRIPTION_EX2>(ex1.Reserved) };
        let Some(ex2) = ex2 else {
            return query;
        };
        query.service_type_name_filter = unsafe { read_optional_string(ex2.ServiceTypeNameFilter) };

        let ex3 = unsafe { extension::<FABRIC_SERVICE_QUERY_DESCRIPTION_EX3>(ex2.Reserved) };
        if let Some(ex3) = ex3 {
            query.max_results = max_results_from_native(ex3.MaxResults);
        }
        query
    }
}

// ── Application types ─────────────────────────────────────────────

impl ToNative for PagedApplicationTypeQueryDescription {
    type Native = FABRIC_PAGED_APPLICATION_TYPE_QUERY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_PAGED_APPLICATION_TYPE_QUERY_DESCRIPTION {
            ApplicationTypeNameFilter: pin
                .add_optional_string(self.application_type_name_filter.as_deref()),
            ApplicationTypeVersionFilter: pin
                .add_optional_string(self.application_type_version_filter.as_deref()),
            ApplicationTypeDefinitionKindFilter: self.application_type_definition_kind_filter.bits(),
            ExcludeApplicationParameters: to_boolean(self.exclude_application_parameters),
            ContinuationToken: pin.add_optional_string(self.continuation_token.as_deref()),
            MaxResults: max_results_to_native(self.max_results),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for PagedApplicationTypeQueryDescription {
    type Native = FABRIC_PAGED_APPLICATION_TYPE_QUERY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self {
            application_type_name_filter: unsafe {
                read_optional_string(native.ApplicationTypeNameFilter)
            },
            application_type_version_filter: unsafe {
                read_optional_string(native.ApplicationTypeVersionFilter)
            },
            application_type_definition_kind_filter: ApplicationTypeDefinitionKindFilter::from_bits(
                native.ApplicationTypeDefinitionKindFilter,
            ),
            exclude_application_parameters: from_boolean(native.ExcludeApplicationParameters),
            continuation_token: unsafe { read_optional_string(native.ContinuationToken) },
            max_results: max_results_from_native(native.MaxResults),
        }
    }
}

// ── Partitions ────────────────────────────────────────────────────

impl ToNative for PartitionQueryDescription {
    type Native = FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex2 = has_max_results(self.max_results).then(|| {
            FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX2 {
                MaxResults: max_results_to_native(self.max_results),
                Reserved: ptr::null_mut(),
            }
        });
        let ex1 = (ex2.is_some() || self.continuation_token.is_some()).then(|| {
            FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX1 {
                ContinuationToken: pin.add_optional_string(self.continuation_token.as_deref()),
                Reserved: chain(pin, ex2),
            }
        });

        FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION {
            ServiceName: pin.add_uri(&self.service_name),
            PartitionIdFilter: self
                .partition_id_filter
                .map(|id| to_guid(id.as_uuid()))
                .unwrap_or_default(),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for PartitionQueryDescription {
    type Native = FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mut query = Self::new(unsafe { read_uri(native.ServiceName) });
        let id = from_guid(&native.PartitionIdFilter);
        query.partition_id_filter = (!id.is_nil()).then(|| PartitionId::from_uuid(id));

        let ex1 =
            unsafe { extension::<FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX1>(native.Reserved) };
        let Some(ex1) = ex1 else {
            return query;
        };
        query.continuation_token = unsafe { read_optional_string(ex1.ContinuationToken) };

        let ex2 = unsafe { extension::<FABRIC_SERVICE_PARTITION_QUERY_DESCRIPTION_EX2>(ex1.Reserved) };
        if let Some(ex2) = ex2 {
            query.max_results = max_results_from_native(ex2.MaxResults);
        }
        query
    }
}
