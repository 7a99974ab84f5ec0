//! Cake Concierge - Couple-Aware Cake Recommendation Engine
//!
//! Scores cake candidates against two weighted preference profiles, detects
//! when a real choice diverges from the computed optimum, and feeds that
//! divergence back into an adaptive preference learner.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
