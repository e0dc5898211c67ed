pub mod error;
pub mod fetcher;
pub mod filter;
pub mod projection;
pub mod query;
pub mod state;

pub use error::{ApplicationError, ListError, RejectionKind, TransportError};
pub use fetcher::{FetchOptions, FetchOutcome, ListSource, PagedFetcher};
pub use filter::{FilterBar, SwipeDirection};
pub use projection::{project, ListEvent, ScrollMetrics, ScrollProbe, Tile, TileSource};
pub use query::{FilterKey, ListPage, ListQuery};
pub use state::{Identify, ListState, LoadPhase};
