//! Page views.

pub mod customer_review;
pub mod shops_grid;
pub mod user_admin;

pub use customer_review::CustomerReview;
pub use shops_grid::ShopsGrid;
pub use user_admin::UserAdmin;
