//! Terminal UI rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: display-ready snapshot of the app state
//! - [`renderer`]: entry point that picks the list or detail layout
//! - [`components`]: per-element renderers
//! - [`helpers`]: the [`Frame`](helpers::Frame) buffer and text utilities
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InfoRow, InfoSection, SearchBarInfo, StatusLine,
    UIViewModel,
};
