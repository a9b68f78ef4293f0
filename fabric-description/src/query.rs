//! Paged query descriptions.
//!
//! Queries carry optional filters plus the paging pair (continuation token,
//! maximum results). Several filters are mutually exclusive: the server
//! accepts at most one way of narrowing the result set per query.

use crate::flags::filter_flags;
use fabric_types::validate::{require_i32, require_name_opt, require_no_nul_opt};
use fabric_types::{Error, FabricUri, PartitionId, Result, Validate};
use serde::{Deserialize, Serialize};

filter_flags! {
    /// Restricts application queries by how the application was defined.
    pub struct ApplicationDefinitionKindFilter {
        /// Applications described by an application manifest.
        const SERVICE_FABRIC_APPLICATION_DESCRIPTION = 0x1;
        /// Applications created from a compose file.
        const COMPOSE = 0x2;
    }
    mask = 0x3;
}

filter_flags! {
    /// Restricts application type queries by how the type was defined.
    pub struct ApplicationTypeDefinitionKindFilter {
        /// Types provisioned from an application package.
        const SERVICE_FABRIC_APPLICATION_PACKAGE = 0x1;
        /// Types created from a compose file.
        const COMPOSE = 0x2;
    }
    mask = 0x3;
}

/// Checks the paging pair. An unset `max_results` lets the server choose the
/// page size, so an explicit zero is rejected rather than aliased to it.
fn validate_paging(continuation_token: Option<&str>, max_results: Option<i64>) -> Result<()> {
    require_no_nul_opt("continuation_token", continuation_token)?;
    if let Some(max_results) = max_results {
        if max_results < 1 {
            return Err(Error::invalid_argument(
                "max_results",
                format!("value {max_results} must be positive; leave it unset to use the server default"),
            ));
        }
        require_i32("max_results", max_results)?;
    }
    Ok(())
}

fn exclusive(field: &str, other: &str) -> Error {
    Error::invalid_argument(field, format!("{field} cannot be combined with {other}"))
}

/// Query for application instances.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationQueryDescription {
    #[serde(default)]
    pub application_name_filter: Option<FabricUri>,
    #[serde(default)]
    pub application_type_name_filter: Option<String>,
    #[serde(default)]
    pub application_definition_kind_filter: ApplicationDefinitionKindFilter,
    #[serde(default)]
    pub exclude_application_parameters: bool,
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl Validate for ApplicationQueryDescription {
    fn validate(&self) -> Result<()> {
        require_name_opt(
            "application_type_name_filter",
            self.application_type_name_filter.as_deref(),
        )?;
        self.application_definition_kind_filter
            .require_valid("application_definition_kind_filter")?;

        let has_kind = !self.application_definition_kind_filter.is_default();
        if self.application_name_filter.is_some() {
            if self.application_type_name_filter.is_some() {
                return Err(exclusive(
                    "application_type_name_filter",
                    "application_name_filter",
                ));
            }
            if has_kind {
                return Err(exclusive(
                    "application_definition_kind_filter",
                    "application_name_filter",
                ));
            }
        } else if self.application_type_name_filter.is_some() && has_kind {
            return Err(exclusive(
                "application_definition_kind_filter",
                "application_type_name_filter",
            ));
        }
        validate_paging(self.continuation_token.as_deref(), self.max_results)
    }
}

/// Query for the services of one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceQueryDescription {
    pub application_name: FabricUri,
    #[serde(default)]
    pub service_name_filter: Option<FabricUri>,
    #[serde(default)]
    pub service_type_name_filter: Option<String>,
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl ServiceQueryDescription {
    pub fn new(application_name: FabricUri) -> Self {
        Self {
            application_name,
            service_name_filter: None,
            service_type_name_filter: None,
            continuation_token: None,
            max_results: None,
        }
    }
}

impl Validate for ServiceQueryDescription {
    fn validate(&self) -> Result<()> {
        require_name_opt(
            "service_type_name_filter",
            self.service_type_name_filter.as_deref(),
        )?;
        if self.service_name_filter.is_some() && self.service_type_name_filter.is_some() {
            return Err(exclusive("service_type_name_filter", "service_name_filter"));
        }
        validate_paging(self.continuation_token.as_deref(), self.max_results)
    }
}

/// Query for provisioned application types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PagedApplicationTypeQueryDescription {
    #[serde(default)]
    pub application_type_name_filter: Option<String>,
    #[serde(default)]
    pub application_type_version_filter: Option<String>,
    #[serde(default)]
    pub application_type_definition_kind_filter: ApplicationTypeDefinitionKindFilter,
    #[serde(default)]
    pub exclude_application_parameters: bool,
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl Validate for PagedApplicationTypeQueryDescription {
    fn validate(&self) -> Result<()> {
        require_name_opt(
            "application_type_name_filter",
            self.application_type_name_filter.as_deref(),
        )?;
        require_name_opt(
            "application_type_version_filter",
            self.application_type_version_filter.as_deref(),
        )?;
        self.application_type_definition_kind_filter
            .require_valid("application_type_definition_kind_filter")?;

        if self.application_type_version_filter.is_some() {
            if self.application_type_name_filter.is_none() {
                return Err(Error::invalid_argument(
                    "application_type_version_filter",
                    "a version filter requires application_type_name_filter",
                ));
            }
            if !self.application_type_definition_kind_filter.is_default() {
                return Err(exclusive(
                    "application_type_definition_kind_filter",
                    "application_type_version_filter",
                ));
            }
        }
        validate_paging(self.continuation_token.as_deref(), self.max_results)
    }
}

/// Query for the partitions of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionQueryDescription {
    pub service_name: FabricUri,
    #[serde(default)]
    pub partition_id_filter: Option<PartitionId>,
    #[serde(default)]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl PartitionQueryDescription {
    pub fn new(service_name: FabricUri) -> Self {
        Self {
            service_name,
            partition_id_filter: None,
            continuation_token: None,
            max_results: None,
        }
    }
}

impl Validate for PartitionQueryDescription {
    fn validate(&self) -> Result<()> {
        if let Some(id) = self.partition_id_filter {
            if id.as_uuid().is_nil() {
                return Err(Error::invalid_argument(
                    "partition_id_filter",
                    "the nil partition id is reserved for an absent filter",
                ));
            }
        }
        validate_paging(self.continuation_token.as_deref(), self.max_results)
    }
}
