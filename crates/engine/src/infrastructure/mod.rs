//! Infrastructure: ports and their concrete adapters.

pub mod clock;
pub mod persistence;
pub mod ports;
