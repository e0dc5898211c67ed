pub mod board;
pub mod favorite;
pub mod font;
pub mod group;
pub mod publisher;
