//! Create quiz use case
//!
//! Composes the whole generation pipeline into one operation:
//!
//! 1. **Validate request** - question count, difficulty mix, answer-type quota
//! 2. **Extract** - every source through the [`DocumentExtractor`], bounded
//!    concurrency, results kept in input order; failures are logged and skipped
//! 3. **Assemble** - primary-first context within the [`ContextBudget`](docquiz_domain::ContextBudget)
//! 4. **Prompt** - [`QuizPromptTemplate`] with the scope restriction always on
//! 5. **Generate** - one call through the [`GenerationClient`]
//! 6. **Stamp and validate** - source metadata, advisory validation issues
//!
//! Validation issues never block the result; they are logged and returned
//! alongside it for the reviewer.

use crate::config::GenerationParams;
use crate::ports::document_extractor::{DocumentExtractor, ExtractionError};
use crate::ports::generation_client::{GenerationClient, GenerationError};
use crate::ports::progress::{GenerationProgressNotifier, NoProgress};
use docquiz_domain::quiz::validate;
use docquiz_domain::{
    AnswerTypeConfig, DifficultyMix, DomainError, ExtractedFragment, QuizPromptInput,
    QuizPromptTemplate, QuizResult, SourceDocument, ValidationIssue, assemble,
};
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that abort quiz creation.
#[derive(Error, Debug)]
pub enum CreateQuizError {
    #[error("Invalid request: {0}")]
    InvalidRequest(DomainError),

    #[error("No valid primary documents could be processed")]
    NoPrimaryContent,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl CreateQuizError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CreateQuizError::Cancelled)
    }
}

impl From<DomainError> for CreateQuizError {
    fn from(error: DomainError) -> Self {
        if error.is_no_primary_content() {
            CreateQuizError::NoPrimaryContent
        } else {
            CreateQuizError::InvalidRequest(error)
        }
    }
}

/// Input for the CreateQuiz use case.
#[derive(Debug, Clone)]
pub struct CreateQuizInput {
    /// Documents questions must be drawn from.
    pub primary_docs: Vec<SourceDocument>,
    /// Context-only documents.
    pub supporting_docs: Vec<SourceDocument>,
    /// Context-only web pages.
    pub website_urls: Vec<String>,
    pub question_count: u32,
    /// Defaults to a 25/50/25 split of `question_count`.
    pub difficulty_mix: Option<DifficultyMix>,
    /// `None` means all questions are single-answer.
    pub answer_types: Option<AnswerTypeConfig>,
}

impl CreateQuizInput {
    pub fn new(primary_docs: Vec<SourceDocument>, question_count: u32) -> Self {
        Self {
            primary_docs,
            supporting_docs: Vec::new(),
            website_urls: Vec::new(),
            question_count,
            difficulty_mix: None,
            answer_types: None,
        }
    }

    pub fn with_supporting_docs(mut self, docs: Vec<SourceDocument>) -> Self {
        self.supporting_docs = docs;
        self
    }

    pub fn with_website_urls(mut self, urls: Vec<String>) -> Self {
        self.website_urls = urls;
        self
    }

    pub fn with_difficulty_mix(mut self, mix: DifficultyMix) -> Self {
        self.difficulty_mix = Some(mix);
        self
    }

    pub fn with_answer_types(mut self, config: AnswerTypeConfig) -> Self {
        self.answer_types = Some(config);
        self
    }

    /// Check the request before any extraction work is done.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.question_count == 0 {
            return Err(DomainError::InvalidQuestionCount);
        }
        if let Some(mix) = &self.difficulty_mix {
            mix.ensure_total(self.question_count)?;
        }
        if let Some(config) = &self.answer_types {
            config.ensure_fits(self.question_count)?;
        }
        Ok(())
    }

    /// Difficulty mix to request: the explicit one or the default split.
    pub fn effective_difficulty_mix(&self) -> DifficultyMix {
        self.difficulty_mix
            .unwrap_or_else(|| DifficultyMix::default_for(self.question_count))
    }

    /// All sources in pipeline order: primary, supporting files, websites.
    fn sources(&self) -> Vec<SourceDocument> {
        self.primary_docs
            .iter()
            .chain(self.supporting_docs.iter())
            .cloned()
            .chain(self.website_urls.iter().map(SourceDocument::supporting_url))
            .collect()
    }
}

/// A source that produced no fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub label: String,
    pub error: ExtractionError,
}

/// Output from the CreateQuiz use case.
#[derive(Debug, Clone)]
pub struct CreateQuizOutput {
    /// The generated quiz with source metadata stamped.
    pub quiz: QuizResult,
    /// Advisory validation issues; empty when every question is well-formed.
    pub issues: Vec<ValidationIssue>,
    /// Sources that were skipped, in input order.
    pub skipped: Vec<SkippedSource>,
    /// Whether the assembled context had to be cut to fit the budget.
    pub context_truncated: bool,
}

/// Use case for generating a quiz from documents and web pages.
pub struct CreateQuizUseCase {
    extractor: Arc<dyn DocumentExtractor>,
    client: Arc<dyn GenerationClient>,
    params: GenerationParams,
    cancellation_token: Option<CancellationToken>,
}

impl CreateQuizUseCase {
    pub fn new(extractor: Arc<dyn DocumentExtractor>, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            extractor,
            client,
            params: GenerationParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Executes quiz creation without progress reporting.
    pub async fn execute(&self, input: CreateQuizInput) -> Result<CreateQuizOutput, CreateQuizError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Executes quiz creation with progress notifications.
    ///
    /// # Errors
    ///
    /// - [`CreateQuizError::InvalidRequest`] - the request failed validation
    /// - [`CreateQuizError::NoPrimaryContent`] - no primary source yielded text
    /// - [`CreateQuizError::Generation`] - the model call failed
    /// - [`CreateQuizError::Cancelled`] - the cancellation token fired
    pub async fn execute_with_progress(
        &self,
        input: CreateQuizInput,
        progress: &dyn GenerationProgressNotifier,
    ) -> Result<CreateQuizOutput, CreateQuizError> {
        input.validate()?;
        self.check_cancelled()?;

        let sources = input.sources();
        info!(
            "Extracting {} sources ({} primary)",
            sources.len(),
            input.primary_docs.len()
        );
        progress.on_extraction_start(sources.len());

        let (fragments, skipped) = self
            .cancellable(self.extract_all(&sources, progress))
            .await?;

        let context = assemble(&fragments, &self.params.context_budget)?;
        if context.is_truncated() {
            warn!(
                "Context of {} chars exceeds budget of {} chars; middle truncated",
                context.original_chars(),
                self.params.context_budget.max_chars()
            );
        }
        debug!("Assembled context: {} chars", context.char_len());

        let difficulty = input.effective_difficulty_mix();
        let generated_at = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
        let prompt = QuizPromptTemplate::build(&QuizPromptInput {
            context: &context,
            question_count: input.question_count,
            difficulty,
            primary_only: true,
            answer_types: input.answer_types.as_ref(),
            generated_at: &generated_at,
        });

        info!(
            "Generating {} questions ({} easy, {} medium, {} hard)",
            input.question_count, difficulty.easy, difficulty.medium, difficulty.hard
        );
        progress.on_generation_start(prompt.len());

        let mut quiz = match self.cancellable(self.client.generate(&prompt)).await? {
            Ok(quiz) => quiz,
            Err(e) => {
                warn!("Generation failed: {}", e);
                return Err(e.into());
            }
        };
        quiz.stamp_sources(context.primary_count(), context.supporting_count());

        let issues = validate(&quiz);
        for issue in &issues {
            warn!("Validation issue: {}", issue);
        }
        info!(
            "Generated {} questions with {} validation issues",
            quiz.len(),
            issues.len()
        );
        progress.on_generation_complete(quiz.len(), issues.len());

        Ok(CreateQuizOutput {
            quiz,
            issues,
            skipped,
            context_truncated: context.is_truncated(),
        })
    }

    /// Extract every source, keeping input order regardless of completion order.
    async fn extract_all(
        &self,
        sources: &[SourceDocument],
        progress: &dyn GenerationProgressNotifier,
    ) -> (Vec<ExtractedFragment>, Vec<SkippedSource>) {
        let results: Vec<_> = futures::stream::iter(sources.iter().map(|doc| async move {
            let label = doc.label();
            let outcome = self.extractor.extract(doc).await.and_then(|text| {
                ExtractedFragment::from_source(doc, text)
                    .ok_or_else(|| ExtractionError::Empty(doc.location().to_string()))
            });
            progress.on_source_done(&label, outcome.is_ok());
            (label, outcome)
        }))
        .buffered(self.params.max_concurrent_extractions.max(1))
        .collect()
        .await;

        let mut fragments = Vec::new();
        let mut skipped = Vec::new();
        for (label, outcome) in results {
            match outcome {
                Ok(fragment) => {
                    debug!("Extracted {} chars from {}", fragment.text().len(), label);
                    fragments.push(fragment);
                }
                Err(error) => {
                    warn!("Skipping {}: {}", label, error);
                    skipped.push(SkippedSource { label, error });
                }
            }
        }
        (fragments, skipped)
    }

    fn check_cancelled(&self) -> Result<(), CreateQuizError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(CreateQuizError::Cancelled);
        }
        Ok(())
    }

    async fn cancellable<F: Future>(&self, future: F) -> Result<F::Output, CreateQuizError> {
        match &self.cancellation_token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(CreateQuizError::Cancelled),
                output = future => Ok(output),
            },
            None => Ok(future.await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docquiz_domain::quiz::{Difficulty, GeneratedQuestion, IssueKind};
    use docquiz_domain::{ContextBudget, PageRange};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Fakes ====================

    #[derive(Default)]
    struct FakeExtractor {
        texts: HashMap<String, Result<String, ExtractionError>>,
        delays_ms: HashMap<String, u64>,
    }

    impl FakeExtractor {
        fn with(mut self, location: &str, text: &str) -> Self {
            self.texts.insert(location.to_string(), Ok(text.to_string()));
            self
        }

        fn failing(mut self, location: &str) -> Self {
            self.texts.insert(
                location.to_string(),
                Err(ExtractionError::unreadable(location, "corrupt")),
            );
            self
        }

        fn delayed(mut self, location: &str, ms: u64) -> Self {
            self.delays_ms.insert(location.to_string(), ms);
            self
        }
    }

    #[async_trait]
    impl DocumentExtractor for FakeExtractor {
        async fn extract(&self, document: &SourceDocument) -> Result<String, ExtractionError> {
            if let Some(ms) = self.delays_ms.get(document.location()) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.texts
                .get(document.location())
                .cloned()
                .unwrap_or_else(|| Err(ExtractionError::Unsupported(document.location().to_string())))
        }
    }

    struct FakeClient {
        reply: Result<QuizResult, GenerationError>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn replying(reply: Result<QuizResult, GenerationError>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerationClient for FakeClient {
        async fn generate(&self, prompt: &str) -> Result<QuizResult, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn questions(count: u64) -> QuizResult {
        QuizResult::new(
            (1..=count)
                .map(|i| {
                    GeneratedQuestion::single(i, format!("Q{}?", i), ["a", "b", "c", "d"], "B", Difficulty::Medium)
                })
                .collect(),
        )
    }

    fn lecture() -> SourceDocument {
        SourceDocument::primary_file("/tmp/lecture.pdf")
            .unwrap()
            .with_page_range(PageRange::new(1, 10).unwrap())
    }

    fn use_case(extractor: FakeExtractor, client: Arc<FakeClient>) -> CreateQuizUseCase {
        CreateQuizUseCase::new(Arc::new(extractor), client)
    }

    // ==================== Pipeline ====================

    #[tokio::test]
    async fn test_primary_and_website_end_to_end() {
        let extractor = FakeExtractor::default()
            .with("/tmp/lecture.pdf", "T1")
            .with("https://example.com/page", "T2");
        let client = Arc::new(FakeClient::replying(Ok(questions(20))));

        let input = CreateQuizInput::new(vec![lecture()], 20)
            .with_website_urls(vec!["https://example.com/page".to_string()]);
        let output = use_case(extractor, client.clone()).execute(input).await.unwrap();

        let prompt = client.last_prompt();
        let t1 = prompt.find("T1").unwrap();
        let t2 = prompt.find("T2").unwrap();
        assert!(t1 < t2);
        assert!(prompt.contains("PRIMARY DOCUMENT: lecture.pdf (pages 1-10)"));
        assert!(prompt.contains("CRITICAL SCOPE RESTRICTION"));
        assert!(prompt.contains("ALL questions must be Single Answer ONLY"));
        assert!(prompt.contains("Easy: 5 questions"));

        assert_eq!(output.quiz.len(), 20);
        assert_eq!(output.quiz.metadata.primary_count, Some(1));
        assert_eq!(output.quiz.metadata.supporting_count, Some(1));
        assert_eq!(output.quiz.metadata.source_type.as_deref(), Some("primary_documents"));
        assert!(output.issues.is_empty());
        assert!(output.skipped.is_empty());
        assert!(!output.context_truncated);
    }

    #[tokio::test]
    async fn test_malformed_question_is_returned_with_issue() {
        let mut quiz = questions(3);
        quiz.questions[1].options.as_mut().unwrap().remove("D");
        let client = Arc::new(FakeClient::replying(Ok(quiz)));
        let extractor = FakeExtractor::default().with("/tmp/lecture.pdf", "T1");

        let output = use_case(extractor, client)
            .execute(CreateQuizInput::new(vec![lecture()], 3))
            .await
            .unwrap();

        assert_eq!(output.quiz.len(), 3);
        assert_eq!(output.issues.len(), 1);
        assert_eq!(output.issues[0].question_index, Some(2));
        assert_eq!(output.issues[0].kind, IssueKind::OptionCount);
    }

    #[tokio::test]
    async fn test_failed_documents_are_skipped() {
        let broken = SourceDocument::primary_file("/tmp/broken.docx").unwrap();
        let extractor = FakeExtractor::default()
            .failing("/tmp/broken.docx")
            .with("/tmp/lecture.pdf", "T1");
        let client = Arc::new(FakeClient::replying(Ok(questions(2))));

        let output = use_case(extractor, client.clone())
            .execute(CreateQuizInput::new(vec![broken, lecture()], 2))
            .await
            .unwrap();

        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].label, "PRIMARY DOCUMENT: broken.docx");
        assert_eq!(output.quiz.metadata.primary_count, Some(1));
        assert!(!client.last_prompt().contains("broken.docx"));
    }

    #[tokio::test]
    async fn test_extraction_order_is_input_order() {
        let first = SourceDocument::primary_file("/tmp/a.pdf").unwrap();
        let second = SourceDocument::primary_file("/tmp/b.pdf").unwrap();
        let extractor = FakeExtractor::default()
            .with("/tmp/a.pdf", "FIRST")
            .with("/tmp/b.pdf", "SECOND")
            .delayed("/tmp/a.pdf", 50);
        let client = Arc::new(FakeClient::replying(Ok(questions(1))));

        use_case(extractor, client.clone())
            .execute(CreateQuizInput::new(vec![first, second], 1))
            .await
            .unwrap();

        let prompt = client.last_prompt();
        assert!(prompt.find("FIRST").unwrap() < prompt.find("SECOND").unwrap());
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl GenerationProgressNotifier for RecordingProgress {
        fn on_extraction_start(&self, total: usize) {
            self.events.lock().unwrap().push(format!("start {}", total));
        }

        fn on_source_done(&self, label: &str, success: bool) {
            self.events.lock().unwrap().push(format!("{} {}", label, success));
        }

        fn on_generation_start(&self, _prompt_chars: usize) {
            self.events.lock().unwrap().push("generate".to_string());
        }

        fn on_generation_complete(&self, question_count: usize, issue_count: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {} {}", question_count, issue_count));
        }
    }

    #[tokio::test]
    async fn test_progress_notifications() {
        let extractor = FakeExtractor::default()
            .with("/tmp/lecture.pdf", "T1")
            .failing("/tmp/notes.docx");
        let client = Arc::new(FakeClient::replying(Ok(questions(2))));
        let progress = RecordingProgress::default();

        let input = CreateQuizInput::new(vec![lecture()], 2)
            .with_supporting_docs(vec![SourceDocument::supporting_file("/tmp/notes.docx").unwrap()]);
        use_case(extractor, client)
            .execute_with_progress(input, &progress)
            .await
            .unwrap();

        let events = progress.events.into_inner().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("start 2"));
        assert!(events.contains(&"PRIMARY DOCUMENT: lecture.pdf (pages 1-10) true".to_string()));
        assert!(events.contains(&"SUPPORTING DOCUMENT: notes.docx false".to_string()));
        assert_eq!(&events[3..], ["generate".to_string(), "done 2 0".to_string()]);
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_no_primary_content() {
        let extractor = FakeExtractor::default()
            .failing("/tmp/lecture.pdf")
            .with("https://example.com", "context");
        let client = Arc::new(FakeClient::replying(Ok(questions(1))));

        let input = CreateQuizInput::new(vec![lecture()], 5)
            .with_website_urls(vec!["https://example.com".to_string()]);
        let err = use_case(extractor, client.clone()).execute(input).await.unwrap_err();

        assert!(matches!(err, CreateQuizError::NoPrimaryContent));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let extractor = FakeExtractor::default().with("/tmp/lecture.pdf", "T1");
        let client = Arc::new(FakeClient::replying(Err(GenerationError::QuotaExceeded(
            "Resource has been exhausted".to_string(),
        ))));

        let err = use_case(extractor, client)
            .execute(CreateQuizInput::new(vec![lecture()], 5))
            .await
            .unwrap_err();

        match err {
            CreateQuizError::Generation(GenerationError::QuotaExceeded(detail)) => {
                assert_eq!(detail, "Resource has been exhausted")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_requests_rejected_before_extraction() {
        let client = Arc::new(FakeClient::replying(Ok(questions(1))));
        let uc = use_case(FakeExtractor::default(), client);

        let err = uc.execute(CreateQuizInput::new(vec![lecture()], 0)).await.unwrap_err();
        assert!(matches!(err, CreateQuizError::InvalidRequest(DomainError::InvalidQuestionCount)));

        let input = CreateQuizInput::new(vec![lecture()], 10).with_difficulty_mix(DifficultyMix::new(1, 1, 1));
        let err = uc.execute(input).await.unwrap_err();
        assert!(matches!(
            err,
            CreateQuizError::InvalidRequest(DomainError::DifficultyMixMismatch { .. })
        ));

        let input = CreateQuizInput::new(vec![lecture()], 2)
            .with_answer_types(AnswerTypeConfig::with_default_difficulty(3));
        let err = uc.execute(input).await.unwrap_err();
        assert!(matches!(
            err,
            CreateQuizError::InvalidRequest(DomainError::InvalidAnswerTypeConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let client = Arc::new(FakeClient::replying(Ok(questions(1))));
        let uc = use_case(FakeExtractor::default().with("/tmp/lecture.pdf", "T1"), client)
            .with_cancellation(token);

        let err = uc.execute(CreateQuizInput::new(vec![lecture()], 1)).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_during_extraction() {
        let token = CancellationToken::new();
        let client = Arc::new(FakeClient::replying(Ok(questions(1))));
        let extractor = FakeExtractor::default()
            .with("/tmp/lecture.pdf", "T1")
            .delayed("/tmp/lecture.pdf", 5_000);
        let uc = use_case(extractor, client.clone()).with_cancellation(token.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = uc.execute(CreateQuizInput::new(vec![lecture()], 1)).await.unwrap_err();
        canceller.await.unwrap();

        assert!(err.is_cancelled());
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    // ==================== Options ====================

    #[tokio::test]
    async fn test_truncation_reported_and_answer_types_forwarded() {
        let long = "x".repeat(10_000);
        let extractor = FakeExtractor::default().with("/tmp/lecture.pdf", &long);
        let client = Arc::new(FakeClient::replying(Ok(questions(4))));
        let uc = use_case(extractor, client.clone())
            .with_params(GenerationParams::default().with_context_budget(ContextBudget::from_chars(2_000)));

        let input = CreateQuizInput::new(vec![lecture()], 4)
            .with_answer_types(AnswerTypeConfig::new(2, DifficultyMix::new(0, 1, 1)).unwrap());
        let output = uc.execute(input).await.unwrap();

        assert!(output.context_truncated);
        let prompt = client.last_prompt();
        assert!(prompt.contains("[... content truncated ...]"));
        assert!(prompt.contains("Multiple Answer: 2 questions"));
        assert!(prompt.contains("Single Answer: 2 questions"));
    }
}
