// src/lib.rs

//! jokebook: scraped joke catalogue with persistent ratings

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
