// Service module exports

pub mod demo;
pub mod filter;
pub mod settings;
pub mod storage;
pub mod task;
