pub mod collation;
pub mod coverage;
pub mod exercise_builder;

pub use collation::compare_labels;
pub use coverage::CoverageReport;
pub use exercise_builder::{build_exercise, extract_question_number};
