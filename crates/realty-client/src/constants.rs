// API path constants for the marketplace backend

pub mod api_path {
    // Listings
    pub const LISTINGS: &str = "/listings";
    pub const LISTINGS_REORDER: &str = "/listings/reorder";

    // Categories
    pub const CATEGORIES: &str = "/categories";
    pub const CATEGORIES_TREE: &str = "/categories/tree";
    pub const CATEGORIES_REORDER: &str = "/categories/reorder";

    // Users
    pub const USERS: &str = "/users";

    // Sliders
    pub const SLIDERS: &str = "/sliders";
    pub const SLIDERS_REORDER: &str = "/sliders/reorder";

    // Reviews
    pub const REVIEWS: &str = "/reviews";

    // Dashboard
    pub const DASHBOARD_ANALYTICS: &str = "/dashboard/analytics";
}

/// Path of a single resource under a collection endpoint
pub fn item_path(collection: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path() {
        assert_eq!(item_path(api_path::LISTINGS, 42), "/listings/42");
        assert_eq!(item_path("/users/", "abc"), "/users/abc");
    }
}
