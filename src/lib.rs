//! Hall booking engine
//!
//! Computes per-slot availability for shared venues, creates bookings
//! atomically so no two active bookings ever share a (hall, slot, date)
//! key, and drives the pending/approved/rejected approval workflow.

pub mod approval;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod notify;
pub mod policy;
pub mod validation;
