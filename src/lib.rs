// src/lib.rs

//! blockport: WordPress block and GenerateBlocks style extraction library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
