//! Prompt template for multiple-choice quiz generation

use crate::context::AssembledContext;
use crate::quiz::{AnswerTypeConfig, DifficultyMix};

/// Inputs for one quiz-generation prompt.
#[derive(Debug, Clone, Copy)]
pub struct QuizPromptInput<'a> {
    pub context: &'a AssembledContext,
    pub question_count: u32,
    pub difficulty: DifficultyMix,
    /// Forbid questions drawn from supporting material.
    pub primary_only: bool,
    /// `None` (or a zero quota) means every question is single-answer.
    pub answer_types: Option<&'a AnswerTypeConfig>,
    /// Timestamp embedded into the example metadata.
    pub generated_at: &'a str,
}

/// Templates for the quiz-generation prompt sections
pub struct QuizPromptTemplate;

impl QuizPromptTemplate {
    /// Build the full prompt. Pure: the same input always yields the same text.
    pub fn build(input: &QuizPromptInput<'_>) -> String {
        let multiple = input
            .answer_types
            .filter(|config| config.multiple_count() > 0);

        let mut prompt = String::new();
        prompt.push_str(Self::preamble());
        prompt.push_str("\n\nLEARNING CONTENT:\n");
        prompt.push_str(input.context.as_str());
        prompt.push('\n');
        if input.primary_only {
            prompt.push_str(Self::scope_restriction());
        }
        prompt.push_str(&format!(
            "\nTASK: Generate {} multiple-choice questions.\n\nREQUIREMENTS:\n\n",
            input.question_count
        ));
        prompt.push_str(&Self::difficulty_section(&input.difficulty));
        prompt.push_str(Self::question_type_section());
        prompt.push_str(&match multiple {
            Some(config) => Self::mixed_answer_section(input.question_count, config),
            None => Self::single_answer_section().to_string(),
        });
        prompt.push_str(Self::quality_section());
        prompt.push_str(&Self::output_schema(
            input.question_count,
            input.generated_at,
            multiple.is_some(),
        ));
        prompt
    }

    pub fn preamble() -> &'static str {
        "You are an expert educator creating assessment questions for students."
    }

    /// Hard restriction to primary material.
    pub fn scope_restriction() -> &'static str {
        r#"
CRITICAL SCOPE RESTRICTION:
- Generate questions ONLY from PRIMARY SOURCE MATERIALS
- Supporting materials are for context/reference only
- Do NOT create questions from supporting documents or websites
- All questions must be answerable from primary materials alone
- Primary materials set the scope and boundary for quiz content
"#
    }

    pub fn difficulty_section(mix: &DifficultyMix) -> String {
        format!(
            r#"1. DIFFICULTY DISTRIBUTION:
   - Easy: {} questions (recall, definitions)
   - Medium: {} questions (understanding, application)
   - Hard: {} questions (analysis, synthesis)

"#,
            mix.easy, mix.medium, mix.hard
        )
    }

    pub fn question_type_section() -> &'static str {
        r#"2. QUESTION TYPES:
   - Conceptual understanding: 40%
   - Application/problem-solving: 30%
   - Factual recall: 20%
   - Analysis/evaluation: 10%

"#
    }

    pub fn single_answer_section() -> &'static str {
        r#"3. ANSWER TYPE:
   - ALL questions must be Single Answer ONLY (only ONE correct option)
   - Do NOT generate any multiple answer questions
   - ALL questions should have "answer_type": "single"
   - correct_answer field should be a single letter like "B", NOT an array

"#
    }

    pub fn mixed_answer_section(question_count: u32, config: &AnswerTypeConfig) -> String {
        let mix = config.multiple_difficulty();
        format!(
            r#"3. ANSWER TYPE VARIETY:
   - Single Answer: {} questions (only ONE correct option)
   - Multiple Answer: {} questions (TWO or more correct options, marked with "answer_type": "multiple")
     * Multiple Answer Difficulty: {} easy, {} medium, {} hard
   - For multiple answer questions:
     * Clearly indicate which options are correct
     * Use "Select all that apply" or similar phrasing in question text
     * correct_answer field should be an array like ["A", "C"]

"#,
            config.single_count(question_count),
            config.multiple_count(),
            mix.easy,
            mix.medium,
            mix.hard
        )
    }

    pub fn quality_section() -> &'static str {
        r#"4. QUALITY STANDARDS:
   - Each question has EXACTLY 4 options (A, B, C, D)
   - Distractors are plausible but clearly wrong if you know the material
   - Questions are standalone and clear
   - Cover the ENTIRE PRIMARY content proportionally, not just one section
   - Use varied question stems
   - Only use information explicitly stated in primary materials
   - Avoid questions like "According to the document..."

"#
    }

    /// JSON-shaped example of the expected reply.
    ///
    /// The multiple-answer example item is only shown when such questions are requested.
    pub fn output_schema(question_count: u32, generated_at: &str, with_multiple: bool) -> String {
        let multiple_item = if with_multiple {
            r#",
    {
      "id": 2,
      "question": "Select all that apply...",
      "options": {
        "A": "Correct option 1",
        "B": "Incorrect option",
        "C": "Correct option 2",
        "D": "Incorrect option"
      },
      "correct_answer": ["A", "C"],
      "answer_type": "multiple",
      "difficulty": "hard",
      "topic": "Topic being tested",
      "question_type": "analysis",
      "explanation": "Why A and C are correct"
    }"#
        } else {
            ""
        };

        format!(
            r#"OUTPUT JSON SCHEMA:
{{
  "questions": [
    {{
      "id": 1,
      "question": "Question text here?",
      "options": {{
        "A": "Option A",
        "B": "Option B",
        "C": "Option C",
        "D": "Option D"
      }},
      "correct_answer": "B",
      "answer_type": "single",
      "difficulty": "medium",
      "topic": "Topic being tested",
      "question_type": "application",
      "explanation": "Why B is correct"
    }}{}
  ],
  "metadata": {{
    "total_questions": {},
    "generated_at": "{}"
  }}
}}"#,
            multiple_item, question_count, generated_at
        )
    }
}
