pub mod normalizer;
pub mod report;
pub mod types;

pub use normalizer::{DISCARD_GLYPHS, normalize, normalize_label, normalize_with_tokens};
pub use report::{LabelEntry, LabelReport, classify};
pub use types::{
    CliError, DEFAULT_COMB_TOKEN, DEFAULT_UNK_TOKEN, LabelKind, NormalizeOptions, OutputFormat,
};
