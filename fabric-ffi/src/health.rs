use crate::abi::{
    chain, extension, from_boolean, optional, read_array, read_string, read_uri, to_boolean,
};
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::{
    ApplicationHealthPolicy, ApplicationHealthQueryDescription,
    DeployedApplicationHealthStatesFilter, HealthEventsFilter, HealthStateFilter,
    HealthStatisticsFilter, ServiceHealthStatesFilter, ServiceTypeHealthPolicy,
};
use std::collections::BTreeMap;
use std::ptr;

/// Projects an optional description into a pinned nested struct.
pub(crate) fn optional_native<D: ToNative>(
    pin: &mut PinCollection,
    description: Option<&D>,
) -> *const D::Native {
    let native = description.map(|d| d.to_native(pin));
    optional(pin, native)
}

/// Reads an optional nested struct. Null reads as `None`.
pub(crate) unsafe fn optional_from_native<D: FromNative>(native: *const D::Native) -> Option<D> {
    unsafe { native.as_ref() }.map(|native| unsafe { D::from_native(native) })
}

macro_rules! state_filter_native {
    ($($description:ident => $native:ident),* $(,)?) => {
        $(
            impl ToNative for $description {
                type Native = $native;

                fn to_native(&self, _pin: &mut PinCollection) -> Self::Native {
                    $native {
                        HealthStateFilter: self.health_state_filter.bits(),
                        Reserved: ptr::null_mut(),
                    }
                }
            }

            impl FromNative for $description {
                type Native = $native;

                unsafe fn from_native(native: &Self::Native) -> Self {
                    Self::new(HealthStateFilter::from_bits(native.HealthStateFilter))
                }
            }
        )*
    };
}

state_filter_native! {
    HealthEventsFilter => FABRIC_HEALTH_EVENTS_FILTER,
    ServiceHealthStatesFilter => FABRIC_SERVICE_HEALTH_STATES_FILTER,
    DeployedApplicationHealthStatesFilter => FABRIC_DEPLOYED_APPLICATION_HEALTH_STATES_FILTER,
}

impl ToNative for HealthStatisticsFilter {
    type Native = FABRIC_APPLICATION_HEALTH_STATISTICS_FILTER;

    fn to_native(&self, _pin: &mut PinCollection) -> Self::Native {
        FABRIC_APPLICATION_HEALTH_STATISTICS_FILTER {
            ExcludeHealthStatistics: to_boolean(self.exclude_health_statistics),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for HealthStatisticsFilter {
    type Native = FABRIC_APPLICATION_HEALTH_STATISTICS_FILTER;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self {
            exclude_health_statistics: from_boolean(native.ExcludeHealthStatistics),
        }
    }
}

impl ToNative for ServiceTypeHealthPolicy {
    type Native = FABRIC_SERVICE_TYPE_HEALTH_POLICY;

    fn to_native(&self, _pin: &mut PinCollection) -> Self::Native {
        FABRIC_SERVICE_TYPE_HEALTH_POLICY {
            MaxPercentUnhealthyServices: self.max_percent_unhealthy_services,
            MaxPercentUnhealthyPartitionsPerService: self
                .max_percent_unhealthy_partitions_per_service,
            MaxPercentUnhealthyReplicasPerPartition: self
                .max_percent_unhealthy_replicas_per_partition,
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ServiceTypeHealthPolicy {
    type Native = FABRIC_SERVICE_TYPE_HEALTH_POLICY;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self {
            max_percent_unhealthy_services: native.MaxPercentUnhealthyServices,
            max_percent_unhealthy_partitions_per_service: native
                .MaxPercentUnhealthyPartitionsPerService,
            max_percent_unhealthy_replicas_per_partition: native
                .MaxPercentUnhealthyReplicasPerPartition,
        }
    }
}

fn policy_map_to_native(
    pin: &mut PinCollection,
    map: &BTreeMap<String, ServiceTypeHealthPolicy>,
) -> *const FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP {
    if map.is_empty() {
        return ptr::null();
    }
    let items = map
        .iter()
        .map(|(name, policy)| FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP_ITEM {
            ServiceTypeName: pin.add_string(name),
            ServiceTypeHealthPolicy: optional_native(pin, Some(policy)),
        })
        .collect();
    let (count, items) = pin.add_array(items);
    pin.add_item(FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP {
        Count: count,
        Items: items,
    })
    .cast_const()
}

unsafe fn policy_map_from_native(
    map: *const FABRIC_SERVICE_TYPE_HEALTH_POLICY_MAP,
) -> BTreeMap<String, ServiceTypeHealthPolicy> {
    let Some(map) = (unsafe { map.as_ref() }) else {
        return BTreeMap::new();
    };
    unsafe { read_array(map.Count, map.Items) }
        .iter()
        .map(|item| unsafe {
            (
                read_string(item.ServiceTypeName),
                ServiceTypeHealthPolicy::from_native_ptr(item.ServiceTypeHealthPolicy),
            )
        })
        .collect()
}

impl ToNative for ApplicationHealthPolicy {
    type Native = FABRIC_APPLICATION_HEALTH_POLICY;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_APPLICATION_HEALTH_POLICY {
            ConsiderWarningAsError: to_boolean(self.consider_warning_as_error),
            MaxPercentUnhealthyDeployedApplications: self
                .max_percent_unhealthy_deployed_applications,
            DefaultServiceTypeHealthPolicy: optional_native(
                pin,
                self.default_service_type_health_policy.as_ref(),
            ),
            ServiceTypeHealthPolicyMap: policy_map_to_native(
                pin,
                &self.service_type_health_policy_map,
            ),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ApplicationHealthPolicy {
    type Native = FABRIC_APPLICATION_HEALTH_POLICY;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self {
            consider_warning_as_error: from_boolean(native.ConsiderWarningAsError),
            max_percent_unhealthy_deployed_applications: native
                .MaxPercentUnhealthyDeployedApplications,
            default_service_type_health_policy: unsafe {
                optional_from_native(native.DefaultServiceTypeHealthPolicy)
            },
            service_type_health_policy_map: unsafe {
                policy_map_from_native(native.ServiceTypeHealthPolicyMap)
            },
        }
    }
}

impl ToNative for ApplicationHealthQueryDescription {
    type Native = FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let ex1 = self.health_statistics_filter.as_ref().map(|filter| {
            FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION_EX1 {
                HealthStatisticsFilter: optional_native(pin, Some(filter)),
                Reserved: ptr::null_mut(),
            }
        });

        FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            HealthPolicy: optional_native(pin, self.health_policy.as_ref()),
            EventsFilter: optional_native(pin, self.events_filter.as_ref()),
            ServicesFilter: optional_native(pin, self.services_filter.as_ref()),
            DeployedApplicationsFilter: optional_native(
                pin,
                self.deployed_applications_filter.as_ref(),
            ),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for ApplicationHealthQueryDescription {
    type Native = FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let ex1 =
            unsafe { extension::<FABRIC_APPLICATION_HEALTH_QUERY_DESCRIPTION_EX1>(native.Reserved) };
        unsafe {
            Self {
                application_name: read_uri(native.ApplicationName),
                health_policy: optional_from_native(native.HealthPolicy),
                events_filter: optional_from_native(native.EventsFilter),
                services_filter: optional_from_native(native.ServicesFilter),
                deployed_applications_filter: optional_from_native(
                    native.DeployedApplicationsFilter,
                ),
                health_statistics_filter: ex1
                    .and_then(|ex1| optional_from_native(ex1.HealthStatisticsFilter)),
            }
        }
    }
}
