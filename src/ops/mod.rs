pub mod check;
pub mod group_ops;
pub mod mutate;
pub mod query;
