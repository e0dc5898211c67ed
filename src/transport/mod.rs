pub mod board;
pub mod client;
pub mod favorite;
pub mod font;
pub mod group;
pub mod list_param;
pub mod publisher;

pub use client::GraphQlClient;
pub use list_param::{Filter, ListParam, Pagination, Sorting};
