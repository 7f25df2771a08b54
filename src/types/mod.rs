pub mod reply;

pub use reply::ApiReply;
