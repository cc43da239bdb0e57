//! Core domain types and logic.

pub mod aggregator;
pub mod calendar_date;
pub mod date_parser;
pub mod error;
pub mod report;
pub mod sample;
pub mod settings;
pub mod trade;
pub mod weekend;
