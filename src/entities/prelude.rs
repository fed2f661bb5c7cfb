pub use super::feed_earthquakes::Entity as FeedEarthquakes;
pub use super::feed_snapshots::Entity as FeedSnapshots;
