// canvas-api: Async Rust client for the Canvas LMS (Instructure) REST API

pub mod activity;
pub mod client;
pub mod error;
pub mod transport;
pub mod users;

pub use client::CanvasClient;
pub use error::Error;
pub use transport::TransportConfig;
