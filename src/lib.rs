pub mod banner;
pub mod consts;
pub mod error;
pub mod logging;
pub mod menu;
pub mod router;
pub mod store;
pub mod task;
