//! Rendering adapter layer
//!
//! Everything that touches a terminal or the system clipboard. The
//! decision engine emits plain-data plans; this module draws them with
//! ratatui and runs the copy-confirmation lifecycle.

pub mod clipboard;
pub mod table_renderer;
