pub mod placement;
pub mod subject_ctx;
pub mod subject_flow;

pub use placement::Placement;
pub use subject_ctx::SubjectCtx;
pub use subject_flow::{assemble_subject, SubjectOutcome, SubjectStats};
