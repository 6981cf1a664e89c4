pub mod corpus_loader;
pub mod taxonomy_loader;

pub use corpus_loader::{scan_corpus, CorpusScan, ScanWarning, ScanWarningKind, SubjectGroup};
pub use taxonomy_loader::{load_taxonomy, parse_taxonomy};
