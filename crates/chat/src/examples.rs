//! Example prompts offered by the example-question selector.

pub const EXAMPLE_QUESTIONS: [&str; 3] = [
    "What are the legal implications of AI-generated art?",
    "Explain the concept of 'force majeure' in contract law.",
    "What are the data privacy requirements under GDPR for a small business?",
];

/// Example question by zero-based index.
pub fn example_question(index: usize) -> Option<&'static str> {
    EXAMPLE_QUESTIONS.get(index).copied()
}
