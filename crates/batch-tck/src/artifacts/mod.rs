//! Artifacts usados por los casos de conformidad.

pub mod specialized;

pub use specialized::register_all;
