//! Utility modules

pub mod resource;
pub mod time;
