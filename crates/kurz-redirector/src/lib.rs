//! HTTP front end that turns `GET /<key>` into a redirect.

pub mod app;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use app::App;
pub use error::RedirectError;
pub use server::{serve, shutdown_signal};
pub use state::AppState;
