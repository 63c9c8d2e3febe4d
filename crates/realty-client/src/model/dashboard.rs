// Dashboard analytics model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dashboard analytics payload
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub counts: DashboardCounts,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entity counts shown on the dashboard
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    #[serde(default)]
    pub listings: u64,
    #[serde(default)]
    pub listings_published: u64,
    /// The backend spells this key `listongsDraft`
    #[serde(default, rename = "listongsDraft", alias = "listingsDraft")]
    pub listings_draft: u64,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub categories: u64,
    #[serde(default)]
    pub reviews: u64,
    #[serde(default)]
    pub sliders: u64,
}
