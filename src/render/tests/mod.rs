//! Rendering tests, grouped by concern.

mod core;
mod features;
mod params;
