//! Intersection Synchronization Library
//!
//! A fairness-aware admission controller for a four-way intersection, plus a
//! headless multi-threaded driver that exercises it.

pub mod simulation;
