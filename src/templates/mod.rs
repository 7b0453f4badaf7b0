//! HTML templates and styling for the workbench front end.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme
//! - `components` - navigation bar, base template, index and debug pages
//! - `app_js` - client-side script driving the JSON API

mod app_js;
mod components;
mod styles;

pub use app_js::APP_JS;
pub use components::{base_html, debug_html, html_escape, index_html, nav_bar};
pub use styles::STYLE;
