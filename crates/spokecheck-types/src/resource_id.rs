use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Provider-namespace resource path:
/// `/subscriptions/{uuid}/resourceGroups/{group}/providers/{Namespace.Name}/{type}/{name}[/{type}/{name}]*`.
///
/// Keywords are matched case-insensitively, as the cloud control plane does.
static RESOURCE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^/subscriptions/[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}
        /resourcegroups/[-\w.()]{1,90}
        /providers/[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)+
        (/[a-z][a-z0-9]*/[-\w.]{1,80})+
        $",
    )
    .expect("resource id pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceIdError {
    #[error("resource identifier is empty")]
    Empty,

    #[error("'{0}' is not a valid resource identifier (expected /subscriptions/<uuid>/resourceGroups/<group>/providers/<Namespace.Provider>/<type>/<name>)")]
    Malformed(String),
}

/// A validated cloud resource identifier.
///
/// Surrounding whitespace is trimmed and the original casing is preserved.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(input: &str) -> Result<Self, ResourceIdError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResourceIdError::Empty);
        }
        if !RESOURCE_ID.is_match(trimmed) {
            return Err(ResourceIdError::Malformed(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ResourceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}
