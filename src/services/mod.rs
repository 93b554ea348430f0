pub mod dedup;
pub mod detector;
pub mod llm_service;
pub mod resolver;
pub mod validator;

pub use dedup::deduplicate;
pub use detector::McqDetector;
pub use llm_service::{build_answer_prompt, parse_ai_answer, LlmService};
pub use resolver::{levenshtein, AnswerResolver};
pub use validator::{validate, ValidationReport};
