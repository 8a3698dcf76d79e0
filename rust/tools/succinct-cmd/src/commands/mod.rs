//! Command implementations for succinct-cmd

pub mod pack;
pub mod ptable;
