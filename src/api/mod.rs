pub mod bookings;
pub mod directory;
pub mod distance;
pub mod promotions;

pub use distance::DistanceRequest;
pub use promotions::NewCoupon;
