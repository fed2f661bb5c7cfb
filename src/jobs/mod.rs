pub mod anss_feed_sync;
