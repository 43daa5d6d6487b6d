//! Communication hooks for data-parallel gradient synchronization.
//!
//! Each hook implements the fixed `ReduceFn` signature and stands in for a
//! cross-process reduction running locally: the collective transport lives
//! behind this boundary and is not part of this workspace.

pub mod default;
pub mod quantization;
