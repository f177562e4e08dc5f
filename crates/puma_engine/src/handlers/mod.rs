//! Handler groups, one module per command family.
//!
//! Groups are siblings: none calls another, except that the evaluator lets
//! control-flow composites run transform actions through a step callback.

pub mod chaos;
pub mod control_flow;
pub mod file_ops;
pub mod terminal;
pub mod transform;
