//! HTTP Routes

pub mod form;
pub mod predict;
