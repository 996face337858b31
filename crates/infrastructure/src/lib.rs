//! Ferrous Collector Infrastructure Layer
pub mod collectors;
pub mod loggers;
