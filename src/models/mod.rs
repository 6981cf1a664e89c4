pub mod display;
pub mod exercise;
pub mod loaders;
pub mod question;
pub mod taxonomy;
pub mod tree;

pub use exercise::{Difficulty, Exercise};
pub use loaders::{load_taxonomy, parse_taxonomy, scan_corpus, CorpusScan, ScanWarning, ScanWarningKind, SubjectGroup};
pub use question::QuestionRecord;
pub use taxonomy::{Domain, PrefixCode, Subdomain, Taxonomy};
pub use tree::{find_exercise, find_node, flatten_exercises, NodeBody, TreeNode};
