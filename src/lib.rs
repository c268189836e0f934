//! skewboost: class-imbalance experiments for gradient-boosted binary classifiers.
//!
//! This crate generates synthetic imbalanced datasets, trains one boosted-tree
//! model per sample-weighting strategy (uniform baseline, manual class
//! weights, automatic positive-class scaling) on a shared stratified split,
//! and compares confusion matrices and accuracy/precision/recall.
//!
//! The boosting engine itself (the `gbdt` crate) is treated as opaque: this
//! crate only supplies index-aligned labels and weights and interprets the
//! probability scores it returns.
pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod experiment;
pub mod models;
pub mod report;
pub mod weights;
