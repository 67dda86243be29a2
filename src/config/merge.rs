//! Layer ordering for the merged settings view.

pub mod merge_policy;
