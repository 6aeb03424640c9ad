//! Pipeline entry points.
//!
//! - `run_import`: Map posts into content blocks
//! - `run_styles`: Consolidate element CSS across pages
//! - `run_audit`: Report block types the mapper does not cover
//! - `run_inventory`: Snapshot block types, patterns, and templates

pub mod audit;
pub mod import;
pub mod inventory;
pub mod styles;

pub use audit::run_audit;
pub use import::run_import;
pub use inventory::run_inventory;
pub use styles::run_styles;
