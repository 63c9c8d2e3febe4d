// Listing model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A property listing
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Backend fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A listing photo: either a bare URL or an object with a `url`/`path` key
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingImage {
    Url(String),
    Detailed(Map<String, Value>),
}

impl ListingImage {
    pub fn url(&self) -> Option<&str> {
        match self {
            ListingImage::Url(url) => Some(url),
            ListingImage::Detailed(fields) => ["url", "path", "src"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str)),
        }
    }
}

/// Prices arrive as numbers or decimal strings ("125000.00"). Anything
/// unreadable is dropped rather than failing the whole row.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    };
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_keeps_unknown_fields() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 7,
            "title": "Sea view apartment",
            "price": 125000.0,
            "status": "published",
            "sort_order": 3,
            "created_at": "2024-05-01T10:00:00.000000Z",
            "rooms": 3
        }))
        .unwrap();

        assert_eq!(listing.id, 7);
        assert_eq!(listing.title, "Sea view apartment");
        assert_eq!(listing.sort_order, Some(3));
        assert!(listing.created_at.is_some());
        assert!(listing.images.is_empty());
        assert_eq!(listing.extra.get("rooms"), Some(&json!(3)));

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["rooms"], json!(3));
    }

    #[test]
    fn test_listing_accepts_loose_price_and_image_shapes() {
        let listings: Vec<Listing> = serde_json::from_value(json!([
            {
                "id": 1,
                "price": "125000.00",
                "images": ["https://cdn.example.com/1.jpg"]
            },
            {
                "id": 2,
                "price": "1,250.50",
                "images": [{"id": 9, "url": "https://cdn.example.com/2.jpg"}, {"path": "uploads/3.jpg"}]
            },
            {"id": 3, "price": "on request"},
            {"id": 4, "price": null}
        ]))
        .unwrap();

        assert_eq!(listings[0].price, Some(125000.0));
        assert_eq!(listings[0].images[0].url(), Some("https://cdn.example.com/1.jpg"));
        assert_eq!(listings[1].price, Some(1250.5));
        assert_eq!(listings[1].images[0].url(), Some("https://cdn.example.com/2.jpg"));
        assert_eq!(listings[1].images[1].url(), Some("uploads/3.jpg"));
        assert_eq!(listings[2].price, None);
        assert_eq!(listings[3].price, None);
    }
}
