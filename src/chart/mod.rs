//! Backend-independent figure descriptions and the fixed benchmark layouts.

pub mod figure;
pub mod layouts;

pub use figure::{Figure, PanelSpec};
pub use layouts::Layout;
