use fabric_types::validate::{require_i32, require_name, require_unique};
use fabric_types::{Error, Result, Validate};
use serde::{Deserialize, Serialize};

/// How a service's key space is split into partitions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum PartitionSchemeDescription {
    /// One partition owning the whole key space.
    #[default]
    Singleton,
    /// `partition_count` contiguous ranges covering `low_key..=high_key`.
    UniformInt64Range {
        partition_count: i64,
        low_key: i64,
        high_key: i64,
    },
    /// One partition per name.
    Named { partition_names: Vec<String> },
}

impl PartitionSchemeDescription {
    #[must_use]
    pub fn partition_count(&self) -> i64 {
        match self {
            Self::Singleton => 1,
            Self::UniformInt64Range {
                partition_count, ..
            } => *partition_count,
            Self::Named { partition_names } => partition_names.len() as i64,
        }
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. })
    }
}

impl Validate for PartitionSchemeDescription {
    fn validate(&self) -> Result<()> {
        match self {
            Self::Singleton => Ok(()),
            Self::UniformInt64Range {
                partition_count,
                low_key,
                high_key,
            } => {
                require_i32("partition_count", *partition_count)?;
                if *partition_count < 1 {
                    return Err(Error::invalid_argument(
                        "partition_count",
                        format!("partition count {partition_count} must be at least 1"),
                    ));
                }
                if low_key > high_key {
                    return Err(Error::invalid_argument(
                        "low_key",
                        format!("low key {low_key} is greater than high key {high_key}"),
                    ));
                }
                let range = i128::from(*high_key) - i128::from(*low_key) + 1;
                if range < i128::from(*partition_count) {
                    return Err(Error::invalid_argument(
                        "partition_count",
                        format!(
                            "{partition_count} partitions do not fit in the key range {low_key}..={high_key}"
                        ),
                    ));
                }
                Ok(())
            }
            Self::Named { partition_names } => {
                if partition_names.is_empty() {
                    return Err(Error::invalid_argument(
                        "partition_names",
                        "at least one partition name is required",
                    ));
                }
                require_i32("partition_names", partition_names.len() as i64)?;
                for name in partition_names {
                    require_name("partition_names", name)?;
                }
                require_unique("partition_names", partition_names.iter().map(String::as_str))
            }
        }
    }
}
