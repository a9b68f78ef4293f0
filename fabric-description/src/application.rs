//! Application create and update requests.
//!
//! An application may reserve capacity across the cluster: a minimum and
//! maximum node count plus per-metric reservations. Capacities are carried
//! as `i64` on this side and narrowed to the native `u32` after validation.

use fabric_types::validate::{
    require_name, require_no_nul, require_ordered, require_u32, require_unique,
};
use fabric_types::{Error, FabricUri, Result, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Capacity reserved and limited for one load metric of an application.
///
/// A zero `maximum_node_capacity` or `total_application_capacity` means the
/// corresponding limit is not set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationMetricDescription {
    pub name: String,
    /// Load reserved on every node that hosts a replica of the application.
    pub node_reservation_capacity: i64,
    /// Maximum load of the application on a single node.
    pub maximum_node_capacity: i64,
    /// Maximum load of the application across the cluster.
    pub total_application_capacity: i64,
}

impl ApplicationMetricDescription {
    /// Creates a metric description.
    pub fn new(
        name: impl Into<String>,
        node_reservation_capacity: i64,
        maximum_node_capacity: i64,
        total_application_capacity: i64,
    ) -> Self {
        Self {
            name: name.into(),
            node_reservation_capacity,
            maximum_node_capacity,
            total_application_capacity,
        }
    }

    /// Validates the metric against the owning application's maximum node count.
    ///
    /// A `maximum_nodes` of zero skips the cluster-wide product check.
    pub fn validate_with_maximum_nodes(&self, maximum_nodes: i64) -> Result<()> {
        require_name("name", &self.name)?;
        require_u32("node_reservation_capacity", self.node_reservation_capacity)?;
        require_u32("maximum_node_capacity", self.maximum_node_capacity)?;
        require_u32("total_application_capacity", self.total_application_capacity)?;

        if self.maximum_node_capacity > 0
            && self.node_reservation_capacity > self.maximum_node_capacity
        {
            return Err(Error::invalid_argument(
                "node_reservation_capacity",
                format!(
                    "reservation {} for metric '{}' is greater than maximum node capacity {}",
                    self.node_reservation_capacity, self.name, self.maximum_node_capacity
                ),
            ));
        }

        if self.total_application_capacity > 0 && maximum_nodes > 0 {
            let product = i128::from(self.maximum_node_capacity) * i128::from(maximum_nodes);
            if product > i128::from(self.total_application_capacity) {
                return Err(Error::invalid_argument(
                    "total_application_capacity",
                    format!(
                        "maximum node capacity {} x maximum nodes {} = {} is greater than total application capacity {} for metric '{}'",
                        self.maximum_node_capacity,
                        maximum_nodes,
                        product,
                        self.total_application_capacity,
                        self.name
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for ApplicationMetricDescription {
    fn validate(&self) -> Result<()> {
        self.validate_with_maximum_nodes(0)
    }
}

impl fmt::Display for ApplicationMetricDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: reservation={}, max_node={}, total={}",
            self.name,
            self.node_reservation_capacity,
            self.maximum_node_capacity,
            self.total_application_capacity
        )
    }
}

/// Validates a metric list as a unit: unique names, each metric against `maximum_nodes`.
pub(crate) fn validate_metrics(
    field: &str,
    metrics: &[ApplicationMetricDescription],
    maximum_nodes: i64,
) -> Result<()> {
    require_unique(field, metrics.iter().map(|m| m.name.as_str()))?;
    for (i, metric) in metrics.iter().enumerate() {
        metric
            .validate_with_maximum_nodes(maximum_nodes)
            .map_err(|e| e.within(&format!("{field}[{i}]")))?;
    }
    Ok(())
}

pub(crate) fn validate_parameters(field: &str, parameters: &BTreeMap<String, String>) -> Result<()> {
    if parameters.keys().any(String::is_empty) {
        return Err(Error::invalid_argument(field, "parameter names must not be empty"));
    }
    for (name, value) in parameters {
        require_no_nul(field, name)?;
        require_no_nul(&format!("{field}[{name}]"), value)?;
    }
    Ok(())
}

/// Request to create an application instance of a provisioned application type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDescription {
    pub application_name: FabricUri,
    pub application_type_name: String,
    pub application_type_version: String,
    /// Overrides for parameters declared in the application manifest.
    #[serde(default)]
    pub application_parameters: BTreeMap<String, String>,
    /// Number of nodes on which capacity is reserved. Zero reserves nothing.
    #[serde(default)]
    pub minimum_nodes: i64,
    /// Maximum number of nodes the application may span. Zero means unlimited.
    #[serde(default)]
    pub maximum_nodes: i64,
    #[serde(default)]
    pub metrics: Vec<ApplicationMetricDescription>,
}

impl ApplicationDescription {
    /// Creates a description with no parameters and no capacity settings.
    pub fn new(
        application_name: FabricUri,
        application_type_name: impl Into<String>,
        application_type_version: impl Into<String>,
    ) -> Self {
        Self {
            application_name,
            application_type_name: application_type_name.into(),
            application_type_version: application_type_version.into(),
            application_parameters: BTreeMap::new(),
            minimum_nodes: 0,
            maximum_nodes: 0,
            metrics: Vec::new(),
        }
    }

    /// Adds an application parameter override.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.application_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets the node count range.
    pub fn with_nodes(mut self, minimum_nodes: i64, maximum_nodes: i64) -> Self {
        self.minimum_nodes = minimum_nodes;
        self.maximum_nodes = maximum_nodes;
        self
    }

    /// Adds a capacity metric.
    pub fn with_metric(mut self, metric: ApplicationMetricDescription) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Returns true if any capacity setting differs from its default.
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.minimum_nodes != 0 || self.maximum_nodes != 0 || !self.metrics.is_empty()
    }
}

impl Validate for ApplicationDescription {
    fn validate(&self) -> Result<()> {
        require_name("application_type_name", &self.application_type_name)?;
        require_name("application_type_version", &self.application_type_version)?;
        validate_parameters("application_parameters", &self.application_parameters)?;
        validate_node_range(self.minimum_nodes, self.maximum_nodes)?;
        validate_metrics("metrics", &self.metrics, self.maximum_nodes)
    }
}

fn validate_node_range(minimum_nodes: i64, maximum_nodes: i64) -> Result<()> {
    require_u32("minimum_nodes", minimum_nodes)?;
    require_u32("maximum_nodes", maximum_nodes)?;
    if maximum_nodes > 0 {
        require_ordered("minimum_nodes", minimum_nodes, "maximum_nodes", maximum_nodes)?;
    }
    Ok(())
}

impl fmt::Display for ApplicationDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.application_name, self.application_type_name, self.application_type_version
        )?;
        if self.has_capacity() {
            write!(f, " nodes={}..{}", self.minimum_nodes, self.maximum_nodes)?;
            for metric in &self.metrics {
                write!(f, " [{metric}]")?;
            }
        }
        Ok(())
    }
}

/// Request to change the capacity settings of an existing application.
///
/// Only the fields that are `Some` are changed. Setting
/// `remove_application_capacity` clears every capacity setting and excludes
/// all other changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdateDescription {
    pub application_name: FabricUri,
    #[serde(default)]
    pub remove_application_capacity: bool,
    #[serde(default)]
    pub minimum_nodes: Option<i64>,
    #[serde(default)]
    pub maximum_nodes: Option<i64>,
    #[serde(default)]
    pub metrics: Option<Vec<ApplicationMetricDescription>>,
}

impl ApplicationUpdateDescription {
    /// Creates an update that changes nothing yet.
    pub fn new(application_name: FabricUri) -> Self {
        Self {
            application_name,
            remove_application_capacity: false,
            minimum_nodes: None,
            maximum_nodes: None,
            metrics: None,
        }
    }

    fn has_capacity_change(&self) -> bool {
        self.minimum_nodes.is_some() || self.maximum_nodes.is_some() || self.metrics.is_some()
    }
}

impl Validate for ApplicationUpdateDescription {
    fn validate(&self) -> Result<()> {
        if self.remove_application_capacity {
            if self.has_capacity_change() {
                return Err(Error::invalid_argument(
                    "remove_application_capacity",
                    "capacity cannot be removed and changed in the same update",
                ));
            }
            return Ok(());
        }
        if !self.has_capacity_change() {
            return Err(Error::invalid_argument(
                "application_name",
                format!("update for {} does not change anything", self.application_name),
            ));
        }

        if let Some(minimum_nodes) = self.minimum_nodes {
            require_u32("minimum_nodes", minimum_nodes)?;
        }
        if let Some(maximum_nodes) = self.maximum_nodes {
            require_u32("maximum_nodes", maximum_nodes)?;
        }
        if let (Some(min), Some(max)) = (self.minimum_nodes, self.maximum_nodes) {
            validate_node_range(min, max)?;
        }
        if let Some(metrics) = &self.metrics {
            validate_metrics("metrics", metrics, self.maximum_nodes.unwrap_or(0))?;
        }
        Ok(())
    }
}
