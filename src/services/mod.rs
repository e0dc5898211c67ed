mod board_service;
mod favorite_service;
mod font_service;
mod group_service;
mod publisher_service;

pub use board_service::{BoardApi, BoardService};
pub use favorite_service::{FavoriteApi, FavoriteService};
pub use font_service::{FontApi, FontService};
pub use group_service::{GroupApi, GroupKind, GroupService, PlayBoardSource};
pub use publisher_service::{PublisherApi, PublisherService};

#[cfg(test)]
pub use board_service::MockBoardApi;
#[cfg(test)]
pub use favorite_service::MockFavoriteApi;
#[cfg(test)]
pub use font_service::MockFontApi;
#[cfg(test)]
pub use group_service::MockGroupApi;
#[cfg(test)]
pub use publisher_service::MockPublisherApi;
