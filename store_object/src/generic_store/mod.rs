pub mod bulk;
pub mod core;
pub mod scoped_query;
pub mod soft_deletable;

#[cfg(test)]
mod tests;

pub use self::core::SoftDeleteStore;
