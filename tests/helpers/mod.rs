#![allow(dead_code, unused_imports)]
pub mod fixtures;
pub mod test_store;

pub use fixtures::*;
pub use test_store::*;
