//! Terminal UI for the `dropship` binary
//!
//! Design tokens live in `theme`; everything else is built from
//! primitives -> widgets -> blocks -> views.

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod live_region;
pub mod primitives;
pub mod sink;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
