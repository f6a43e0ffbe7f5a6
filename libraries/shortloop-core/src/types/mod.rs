//! Domain types shared across ShortLoop crates

mod blocklist;
mod category;
mod ids;
mod item;

pub use blocklist::BlockList;
pub use category::{Category, FeedRequest};
pub use ids::{ChannelId, VideoId};
pub use item::ContentItem;
