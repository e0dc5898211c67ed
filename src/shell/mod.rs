pub mod notify;
pub mod route;

pub use notify::{Level, Notification, Notifier};
pub use route::RouteState;
