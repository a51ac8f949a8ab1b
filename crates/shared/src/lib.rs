//! Types shared between the state core and the view layer.

pub mod domain;
pub mod error;
pub mod protocol;
