pub mod case_range;
pub mod homework;
pub mod paths;
pub mod submission;
