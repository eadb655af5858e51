pub mod access;
pub mod audit;
pub mod caps;
pub mod config;
pub mod dispatch;
pub mod inspect;
pub mod next;
pub mod schema;
pub mod shared;
pub mod timeline;
pub mod transition;
