//! Auto-scaling policies: a trigger that watches load and a mechanism that
//! changes the service in response.

use fabric_types::validate::{require_i32, require_name, require_seconds_u32};
use fabric_types::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `maximum_instance_count` value meaning "no upper bound".
pub const UNBOUNDED_INSTANCE_COUNT: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingTriggerDescription {
    /// Scales when the average load of a partition leaves the thresholds.
    AveragePartitionLoad {
        metric_name: String,
        lower_load_threshold: f64,
        upper_load_threshold: f64,
        scale_interval: Duration,
    },
    /// Scales when the average load across all partitions leaves the thresholds.
    AverageServiceLoad {
        metric_name: String,
        lower_load_threshold: f64,
        upper_load_threshold: f64,
        scale_interval: Duration,
        #[serde(default)]
        use_only_primary_load: bool,
    },
}

impl ScalingTriggerDescription {
    #[must_use]
    pub fn metric_name(&self) -> &str {
        match self {
            Self::AveragePartitionLoad { metric_name, .. }
            | Self::AverageServiceLoad { metric_name, .. } => metric_name,
        }
    }

    #[must_use]
    pub fn uses_only_primary_load(&self) -> bool {
        matches!(
            self,
            Self::AverageServiceLoad {
                use_only_primary_load: true,
                ..
            }
        )
    }
}

impl Validate for ScalingTriggerDescription {
    fn validate(&self) -> Result<()> {
        let (metric_name, lower, upper, interval) = match self {
            Self::AveragePartitionLoad {
                metric_name,
                lower_load_threshold,
                upper_load_threshold,
                scale_interval,
            }
            | Self::AverageServiceLoad {
                metric_name,
                lower_load_threshold,
                upper_load_threshold,
                scale_interval,
                ..
            } => (
                metric_name,
                *lower_load_threshold,
                *upper_load_threshold,
                *scale_interval,
            ),
        };
        require_name("metric_name", metric_name)?;
        if !lower.is_finite() || lower < 0.0 {
            return Err(Error::invalid_argument(
                "lower_load_threshold",
                format!("threshold {lower} must be a non-negative number"),
            ));
        }
        if !upper.is_finite() {
            return Err(Error::invalid_argument(
                "upper_load_threshold",
                format!("threshold {upper} must be a finite number"),
            ));
        }
        if lower > upper {
            return Err(Error::invalid_argument(
                "lower_load_threshold",
                format!("lower threshold {lower} is greater than upper threshold {upper}"),
            ));
        }
        require_seconds_u32("scale_interval", interval)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingMechanismDescription {
    /// Changes the instance count of a stateless partition.
    PartitionInstanceCount {
        minimum_instance_count: i64,
        /// [`UNBOUNDED_INSTANCE_COUNT`] removes the upper bound.
        maximum_instance_count: i64,
        scale_increment: i64,
    },
    /// Adds or removes named partitions.
    AddRemoveIncrementalNamedPartition {
        minimum_partition_count: i64,
        maximum_partition_count: i64,
        scale_increment: i64,
    },
}

impl Validate for ScalingMechanismDescription {
    fn validate(&self) -> Result<()> {
        let (min_field, min, max_field, max, increment, unbounded_allowed) = match *self {
            Self::PartitionInstanceCount {
                minimum_instance_count,
                maximum_instance_count,
                scale_increment,
            } => (
                "minimum_instance_count",
                minimum_instance_count,
                "maximum_instance_count",
                maximum_instance_count,
                scale_increment,
                true,
            ),
            Self::AddRemoveIncrementalNamedPartition {
                minimum_partition_count,
                maximum_partition_count,
                scale_increment,
            } => (
                "minimum_partition_count",
                minimum_partition_count,
                "maximum_partition_count",
                maximum_partition_count,
                scale_increment,
                false,
            ),
        };

        require_i32(min_field, min)?;
        require_i32(max_field, max)?;
        require_i32("scale_increment", increment)?;
        if min < 0 {
            return Err(Error::invalid_argument(
                min_field,
                format!("{min_field} {min} must not be negative"),
            ));
        }
        let unbounded = unbounded_allowed && max == UNBOUNDED_INSTANCE_COUNT;
        if !unbounded && min > max {
            return Err(Error::invalid_argument(
                min_field,
                format!("{min_field} ({min}) must not be greater than {max_field} ({max})"),
            ));
        }
        if increment <= 0 {
            return Err(Error::invalid_argument(
                "scale_increment",
                format!("scale increment {increment} must be positive"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingPolicyDescription {
    pub trigger: ScalingTriggerDescription,
    pub mechanism: ScalingMechanismDescription,
}

impl ScalingPolicyDescription {
    pub fn new(trigger: ScalingTriggerDescription, mechanism: ScalingMechanismDescription) -> Self {
        Self { trigger, mechanism }
    }
}

impl Validate for ScalingPolicyDescription {
    fn validate(&self) -> Result<()> {
        self.trigger.validate().map_err(|e| e.within("trigger"))?;
        self.mechanism.validate().map_err(|e| e.within("mechanism"))
    }
}
