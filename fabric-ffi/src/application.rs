use crate::abi::{
    chain, extension, flag_bits, from_boolean, narrow, read_array, read_string, read_uri,
    to_boolean,
};
use crate::raw::*;
use crate::{FromNative, PinCollection, ToNative};
use fabric_description::{
    ApplicationDescription, ApplicationMetricDescription, ApplicationUpdateDescription,
};
use std::collections::BTreeMap;
use std::ptr;

pub(crate) fn parameters_to_native(
    pin: &mut PinCollection,
    parameters: &BTreeMap<String, String>,
) -> *const FABRIC_APPLICATION_PARAMETER_LIST {
    if parameters.is_empty() {
        return ptr::null();
    }
    let items = parameters
        .iter()
        .map(|(name, value)| FABRIC_APPLICATION_PARAMETER {
            Name: pin.add_string(name),
            Value: pin.add_string(value),
            Reserved: ptr::null_mut(),
        })
        .collect();
    let (count, items) = pin.add_array(items);
    pin.add_item(FABRIC_APPLICATION_PARAMETER_LIST {
        Count: count,
        Items: items,
    })
    .cast_const()
}

pub(crate) unsafe fn parameters_from_native(
    list: *const FABRIC_APPLICATION_PARAMETER_LIST,
) -> BTreeMap<String, String> {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return BTreeMap::new();
    };
    unsafe { read_array(list.Count, list.Items) }
        .iter()
        .map(|p| unsafe { (read_string(p.Name), read_string(p.Value)) })
        .collect()
}

fn metrics_to_native(
    pin: &mut PinCollection,
    metrics: &[ApplicationMetricDescription],
) -> *const FABRIC_APPLICATION_METRIC_LIST {
    if metrics.is_empty() {
        return ptr::null();
    }
    let items = metrics.iter().map(|m| m.to_native(pin)).collect();
    let (count, capacities) = pin.add_array(items);
    pin.add_item(FABRIC_APPLICATION_METRIC_LIST {
        Count: count,
        Capacities: capacities,
    })
    .cast_const()
}

unsafe fn metrics_from_native(
    list: *const FABRIC_APPLICATION_METRIC_LIST,
) -> Vec<ApplicationMetricDescription> {
    let Some(list) = (unsafe { list.as_ref() }) else {
        return Vec::new();
    };
    unsafe { read_array(list.Count, list.Capacities) }
        .iter()
        .map(|m| unsafe { ApplicationMetricDescription::from_native(m) })
        .collect()
}

impl ToNative for ApplicationMetricDescription {
    type Native = FABRIC_APPLICATION_METRIC_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        FABRIC_APPLICATION_METRIC_DESCRIPTION {
            Name: pin.add_string(&self.name),
            NodeReservationCapacity: narrow(
                "node_reservation_capacity",
                self.node_reservation_capacity,
            ),
            MaximumNodeCapacity: narrow("maximum_node_capacity", self.maximum_node_capacity),
            TotalApplicationCapacity: narrow(
                "total_application_capacity",
                self.total_application_capacity,
            ),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ApplicationMetricDescription {
    type Native = FABRIC_APPLICATION_METRIC_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        Self {
            name: unsafe { read_string(native.Name) },
            node_reservation_capacity: i64::from(native.NodeReservationCapacity),
            maximum_node_capacity: i64::from(native.MaximumNodeCapacity),
            total_application_capacity: i64::from(native.TotalApplicationCapacity),
        }
    }
}

impl ToNative for ApplicationDescription {
    type Native = FABRIC_APPLICATION_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let capacity = self.has_capacity().then(|| FABRIC_APPLICATION_CAPACITY_DESCRIPTION {
            MinimumNodes: narrow("minimum_nodes", self.minimum_nodes),
            MaximumNodes: narrow("maximum_nodes", self.maximum_nodes),
            Metrics: metrics_to_native(pin, &self.metrics),
            Reserved: ptr::null_mut(),
        });
        let ex1 = capacity.map(|capacity| FABRIC_APPLICATION_DESCRIPTION_EX1 {
            ApplicationCapacity: pin.add_item(capacity).cast_const(),
            Reserved: ptr::null_mut(),
        });

        FABRIC_APPLICATION_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            ApplicationTypeName: pin.add_string(&self.application_type_name),
            ApplicationTypeVersion: pin.add_string(&self.application_type_version),
            ApplicationParameters: parameters_to_native(pin, &self.application_parameters),
            Reserved: chain(pin, ex1),
        }
    }
}

impl FromNative for ApplicationDescription {
    type Native = FABRIC_APPLICATION_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let mut description = Self::new(
            unsafe { read_uri(native.ApplicationName) },
            unsafe { read_string(native.ApplicationTypeName) },
            unsafe { read_string(native.ApplicationTypeVersion) },
        );
        description.application_parameters =
            unsafe { parameters_from_native(native.ApplicationParameters) };

        let ex1 = unsafe { extension::<FABRIC_APPLICATION_DESCRIPTION_EX1>(native.Reserved) };
        let capacity = ex1.and_then(|ex1| unsafe { ex1.ApplicationCapacity.as_ref() });
        if let Some(capacity) = capacity {
            description.minimum_nodes = i64::from(capacity.MinimumNodes);
            description.maximum_nodes = i64::from(capacity.MaximumNodes);
            description.metrics = unsafe { metrics_from_native(capacity.Metrics) };
        }
        description
    }
}

impl ToNative for ApplicationUpdateDescription {
    type Native = FABRIC_APPLICATION_UPDATE_DESCRIPTION;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native {
        let mut flags = FABRIC_APPLICATION_UPDATE_NONE;
        if self.minimum_nodes.is_some() {
            flags |= FABRIC_APPLICATION_UPDATE_MINNODES;
        }
        if self.maximum_nodes.is_some() {
            flags |= FABRIC_APPLICATION_UPDATE_MAXNODES;
        }
        if self.metrics.is_some() {
            flags |= FABRIC_APPLICATION_UPDATE_METRICS;
        }

        FABRIC_APPLICATION_UPDATE_DESCRIPTION {
            ApplicationName: pin.add_uri(&self.application_name),
            Flags: flag_bits(flags),
            RemoveApplicationCapacity: to_boolean(self.remove_application_capacity),
            MinimumNodes: narrow("minimum_nodes", self.minimum_nodes.unwrap_or(0)),
            MaximumNodes: narrow("maximum_nodes", self.maximum_nodes.unwrap_or(0)),
            Metrics: self
                .metrics
                .as_deref()
                .map_or(ptr::null(), |metrics| metrics_to_native(pin, metrics)),
            Reserved: ptr::null_mut(),
        }
    }
}

impl FromNative for ApplicationUpdateDescription {
    type Native = FABRIC_APPLICATION_UPDATE_DESCRIPTION;

    unsafe fn from_native(native: &Self::Native) -> Self {
        let has = |flag| native.Flags & flag_bits(flag) != 0;
        let mut update = Self::new(unsafe { read_uri(native.ApplicationName) });
        update.remove_application_capacity = from_boolean(native.RemoveApplicationCapacity);
        update.minimum_nodes =
            has(FABRIC_APPLICATION_UPDATE_MINNODES).then(|| i64::from(native.MinimumNodes));
        update.maximum_nodes =
            has(FABRIC_APPLICATION_UPDATE_MAXNODES).then(|| i64::from(native.MaximumNodes));
        if has(FABRIC_APPLICATION_UPDATE_METRICS) {
            update.metrics = Some(unsafe { metrics_from_native(native.Metrics) });
        }
        update
    }
}
