//! DriverId - driver abbreviation shared across a comparison

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Three-letter driver code such as `VER`, as printed on timing screens.
///
/// Parsed once per session and cloned into every series, report and map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(Arc<str>);

impl DriverId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hash of Arc<str> equals hash of str, so maps keyed by DriverId accept &str
impl Borrow<str> for DriverId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DriverId {
    fn from(code: &str) -> Self {
        Self(Arc::from(code))
    }
}

impl From<String> for DriverId {
    fn from(code: String) -> Self {
        Self(Arc::from(code))
    }
}

impl From<&DriverId> for DriverId {
    fn from(id: &DriverId) -> Self {
        id.clone()
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
