// src/lib.rs

//! Hotel investment search and matching library

pub mod calculator;
pub mod error;
pub mod matching;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
