// Slider (banner) model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A home-page slider or banner
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Slider {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
