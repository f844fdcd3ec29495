//! Query builder utilities
//!
//! This module provides SQL statement construction utilities.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod sql_generation;
pub mod statement;
pub mod update;


pub use builder::{QueryBuilder, TrashedScope};
pub use filter::{LogicalOperator, QueryCondition, QueryFilter, QueryOperator};
pub use ordering::SortOrder;
pub use statement::{DeleteStatement, SelectStatement, Statement, UpdateStatement};
pub use update::UpdateSet;
