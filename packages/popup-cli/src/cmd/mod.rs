//! Command implementations

pub mod inspect;
pub mod interactive;
pub mod submit;
