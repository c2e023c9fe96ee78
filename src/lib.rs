//! Attendance engine for shift-based time-clock data
//!
//! This crate reads vendor time-clock exports (real spreadsheets, HTML saved
//! as `.xls`, or delimited text), stores daily punches per employee, and
//! derives the payroll-relevant metrics of each day under a shift policy:
//! work hours, lembur hours, the loyalty band, the overtime bonus and
//! lateness.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod store;
