// Model types for API requests and responses

pub mod category;
pub mod common;
pub mod dashboard;
pub mod listing;
pub mod review;
pub mod slider;
pub mod user;

pub use category::{Category, CategoryNode, build_category_tree};
pub use common::{ApiResponse, FieldErrors, Pagination};
pub use dashboard::{DashboardCounts, DashboardStats};
pub use listing::{Listing, ListingImage};
pub use review::Review;
pub use slider::Slider;
pub use user::User;
