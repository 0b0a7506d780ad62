//! Control endpoint handlers.

pub mod mocks;
pub mod params;
pub mod storage;
pub mod system;
