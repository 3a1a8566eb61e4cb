pub mod catalog;
pub mod filter;
pub mod similarity;
pub mod topic;
pub mod types;
