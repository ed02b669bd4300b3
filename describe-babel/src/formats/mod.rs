//! Format implementations
//!
//! This module contains all format implementations that render document trees
//! (or, for JSON, also read them).

pub mod html;
pub mod json;
pub mod rst;
pub mod treeviz;

pub use html::{HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use rst::settings::RstSettings;
pub use rst::RstFormat;
pub use treeviz::TreevizFormat;
