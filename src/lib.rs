//! scatter-viewport: pan/zoom viewport engine for large point surfaces.
//!
//! The crate maps an abstract data space onto a fixed pixel surface with
//! equal-unit scales, turns zoom requests into animated transform targets,
//! keeps an idle-extending render loop alive while the view moves and
//! resolves pointer positions to nearest data points. Drawing, point storage
//! and gesture recognition stay with the host through the traits in
//! [`render`] and [`core`].

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ViewportController, ViewportControllerConfig};
pub use error::{ViewError, ViewResult};
