use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Limits and toggles for generic type resolution.
///
/// Usually embedded as a `[generics]` table in the decompiler config; every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct GenericsConfig {
    /// Upper bound on the number of ancestors visited by a single hierarchy walk.
    #[serde(default = "GenericsConfig::default_max_ancestors")]
    #[schemars(range(min = 1))]
    pub max_ancestors: usize,

    /// Nesting depth past which substitution stops descending and reports no substitution for
    /// the remaining subtree.
    #[serde(default = "GenericsConfig::default_max_substitution_depth")]
    #[schemars(range(min = 1))]
    pub max_substitution_depth: usize,

    /// Collect type variables from ancestors known only through classpath metadata.
    #[serde(default = "GenericsConfig::default_classpath_ancestors")]
    pub classpath_ancestors: bool,
}

impl GenericsConfig {
    fn default_max_ancestors() -> usize {
        4096
    }

    fn default_max_substitution_depth() -> usize {
        256
    }

    fn default_classpath_ancestors() -> bool {
        true
    }

    /// Parse a TOML fragment; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(GenericsConfig)
    }
}

impl Default for GenericsConfig {
    fn default() -> Self {
        Self {
            max_ancestors: Self::default_max_ancestors(),
            max_substitution_depth: Self::default_max_substitution_depth(),
            classpath_ancestors: Self::default_classpath_ancestors(),
        }
    }
}
