//! SupportLab Core — the support-level evaluation engine.
//!
//! Ingests timestamped snapshots of price plus precomputed indicator values
//! and judges whether indicator-derived support levels hold over fixed
//! trading sessions:
//! - Session alignment against a configurable local anchor hour
//! - Pairing of boundaries into exact-length sessions (gaps dropped)
//! - Close-based pass/fail classification with intrasession safety margin
//! - Multi-candidate scanning with a plausibility filter
//! - Win-rate-first ranking of candidate supports
//!
//! Everything here is pure computation over in-memory slices. Data loading
//! and report rendering live in the runner crate.

pub mod candidates;
pub mod config;
pub mod domain;
pub mod engine;
