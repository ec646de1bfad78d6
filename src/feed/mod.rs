pub mod mock;
pub mod noop;
pub mod stripe;
pub mod variant;

pub use mock::MockFeed;
pub use noop::NoopFeed;
pub use stripe::StripeFeed;
pub use variant::FeedVariant;
