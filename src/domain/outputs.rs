//! Structured-output types registered in the schema registry.
//!
//! `deny_unknown_fields` keeps the derived schemas closed
//! (`additionalProperties: false`), which the structured-output API requires
//! in strict mode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Flat list of storage bucket names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BucketList {
    pub buckets: Vec<String>,
}

/// One storage bucket with its resolved region and ARN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BucketSummary {
    pub name: String,
    pub region: String,
    pub arn: String,
}

impl BucketSummary {
    /// Normalize S3 location constraint values to standard region codes.
    pub fn normalize_region(location_constraint: Option<&str>) -> String {
        match location_constraint {
            None | Some("") | Some("US") => "us-east-1".to_string(),
            Some("EU") => "eu-west-1".to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Build an S3 bucket ARN.
    pub fn arn_for(bucket_name: &str) -> String {
        format!("arn:aws:s3:::{bucket_name}")
    }
}

/// Account owner of the listed buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BucketOwner {
    pub display_name: String,
    pub id: String,
}

/// Full bucket inventory report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BucketInventory {
    pub buckets: Vec<BucketSummary>,
    pub owner: BucketOwner,
}
