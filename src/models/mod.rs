pub mod answer;
pub mod loaders;
pub mod mcq;

pub use answer::{clamp_confidence, AiAnswer, ResolveMethod, ResolvedAnswer, Resolution};
pub use loaders::{load_all_text_files, load_text_document, TextDocument};
pub use mcq::{option_letter, AnswerOption, Mcq, SourceStrategy, MAX_OPTIONS, MIN_OPTIONS};
