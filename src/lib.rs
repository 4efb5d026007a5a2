//! Web front-end for the churn classifier.
//!
//! Control flow per request is strictly linear:
//! receive → parse → encode → scale → infer → render.

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod pages;
