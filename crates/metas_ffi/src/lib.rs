//! Flutter bridge for the goal tracker core.

pub mod api;
