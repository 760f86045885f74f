pub mod error;
pub mod input;
pub mod money;
pub mod region;
pub mod tier;
