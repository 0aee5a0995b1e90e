pub mod bridge;
pub mod filters;
pub mod message_box;
pub mod native;
pub mod types;
pub mod window;
