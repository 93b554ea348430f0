pub mod classifier;
pub mod normalizer;

pub use classifier::{looks_like_option, looks_like_question, MIN_QUESTION_LEN};
pub use normalizer::{comparable, normalize_whitespace, strip_option_prefix};
