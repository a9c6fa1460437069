pub mod rss_atom;
pub mod traits;

pub use rss_atom::RssAtomSource;
pub use traits::FeedSource;
