pub mod finite_diff;
pub mod vector;
