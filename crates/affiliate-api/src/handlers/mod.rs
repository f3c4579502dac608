//! HTTP request handlers
//!
//! Thin adapters: extract, call one service, wrap the result.

pub mod admin;
pub mod affiliates;
pub mod applications;
pub mod auth;
pub mod health;
pub mod programs;
pub mod referrals;
pub mod settings;
