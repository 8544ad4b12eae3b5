//! JSONL question store.
//!
//! Each saved question is serialized as a single JSON line with `category`
//! and `imported_at` fields, appended to `<dir>/<category>.jsonl`.

use async_trait::async_trait;
use docquiz_application::{ImportSummary, QuestionStore, StoreError};
use docquiz_domain::QuizResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Question store that appends one JSON object per line.
///
/// Appends are serialized through an internal lock.
#[derive(Debug, Clone)]
pub struct JsonlQuestionStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonlQuestionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `category`.
    pub fn category_path(&self, category: &str) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(format!("{}.jsonl", category_file_stem(category)?)))
    }
}

/// Turn a category name into a safe file stem.
fn category_file_stem(category: &str) -> Result<String, StoreError> {
    let trimmed = category.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('.')
        || trimmed.contains(['/', '\\'])
        || trimmed.chars().any(char::is_control)
    {
        return Err(StoreError::InvalidCategory(category.to_string()));
    }
    Ok(trimmed.split_whitespace().collect::<Vec<_>>().join("_"))
}

#[async_trait]
impl QuestionStore for JsonlQuestionStore {
    async fn save_validated_questions(
        &self,
        quiz: &QuizResult,
        category: &str,
    ) -> Result<ImportSummary, StoreError> {
        let path = self.category_path(category)?;
        let category = category.trim().to_string();
        let imported_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Serialize up front so failures are counted per question.
        let mut summary = ImportSummary::default();
        let mut lines = Vec::with_capacity(quiz.questions.len());
        for (i, question) in quiz.questions.iter().enumerate() {
            let record = match serde_json::to_value(question) {
                Ok(serde_json::Value::Object(mut map)) => {
                    map.insert("category".to_string(), category.clone().into());
                    map.insert("imported_at".to_string(), imported_at.clone().into());
                    serde_json::Value::Object(map)
                }
                Ok(other) => serde_json::json!({
                    "category": category,
                    "imported_at": imported_at,
                    "data": other,
                }),
                Err(e) => {
                    summary.failed_count += 1;
                    summary.errors.push(format!("Q{}: {}", i + 1, e));
                    continue;
                }
            };
            lines.push(serde_json::to_string(&record)?);
        }

        let lock = Arc::clone(&self.write_lock);
        let written = lines.len();
        tokio::task::spawn_blocking(move || append_lines(&lock, &path, &lines))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;

        summary.success_count = written;
        debug!("Saved {} questions to category '{}'", written, category);
        Ok(summary)
    }
}

fn append_lines(lock: &Mutex<()>, path: &Path, lines: &[String]) -> Result<(), StoreError> {
    let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file: File = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush().inspect_err(|e| warn!("Could not flush {}: {}", path.display(), e))?;
    Ok(())
}
