use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn, error};

use crate::csv_io::{FestivalReader, SourceRow, write_output};
use crate::error::Result;
use crate::language::Language;
use crate::record::{FieldTag, Festival, OutputRecord, UNKNOWN_FESTIVAL_ID};
use crate::translate::Translator;

/// Result of translating one field into one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTranslation {
    /// Backend returned a translation
    Translated(String),
    /// Backend failed; carries the original text
    Fallback(String),
    /// Nothing to translate; carries the text unchanged
    Skipped(String),
}

impl FieldTranslation {
    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) | Self::Fallback(text) | Self::Skipped(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Result of processing one input row
#[derive(Debug)]
pub enum RowOutcome {
    /// One output row per language, in `Language::ALL` order
    Translated {
        rows: Vec<OutputRecord>,
        fallbacks: usize,
    },
    /// Row abandoned; nothing was emitted for it
    Skipped {
        festival_id: String,
        reason: String,
    },
}

#[derive(Debug)]
pub struct BatchReport {
    pub rows: Vec<OutputRecord>,
    pub rows_read: usize,
    pub rows_translated: usize,
    pub rows_skipped: usize,
    pub fallbacks: usize,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl BatchReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Sequential festival translation job.
///
/// Rows are handled one at a time in file order; every field of every
/// language is awaited before the next request goes out.
pub struct BatchJob {
    translator: Box<dyn Translator>,
    row_delay: Duration,
    show_progress: bool,
}

impl BatchJob {
    pub fn new(translator: Box<dyn Translator>, row_delay: Duration) -> Self {
        Self {
            translator,
            row_delay,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Read `input`, translate every row and write `output`.
    ///
    /// Only an unreadable input or an unwritable output aborts the run.
    pub async fn run_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<BatchReport> {
        let input = input.as_ref();
        let output = output.as_ref();
        info!("Loading festivals from {}", input.display());

        let rows = FestivalReader::open(input)?.collect::<Result<Vec<_>>>()?;
        info!("Loaded {} rows", rows.len());

        let report = self.run(rows).await;

        let written = write_output(output, &report.rows)?;
        info!("Wrote {} rows to {}", written, output.display());
        info!(
            "Translation finished in {}s: {} rows read, {} translated, {} skipped, {} field fallbacks",
            report.elapsed().num_seconds(),
            report.rows_read,
            report.rows_translated,
            report.rows_skipped,
            report.fallbacks
        );

        Ok(report)
    }

    /// Translate already loaded rows and return the accumulated output
    pub async fn run(&self, rows: Vec<SourceRow>) -> BatchReport {
        let started_at = Local::now();
        let rows_read = rows.len();
        let progress = self.progress_bar(rows_read as u64);

        info!("Translating {} rows with {} backend", rows_read, self.translator.name());

        let mut output = Vec::with_capacity(rows_read * Language::ALL.len());
        let mut rows_translated = 0;
        let mut rows_skipped = 0;
        let mut fallbacks = 0;

        for row in rows {
            match self.process_row(row).await {
                RowOutcome::Translated { rows, fallbacks: row_fallbacks } => {
                    output.extend(rows);
                    rows_translated += 1;
                    fallbacks += row_fallbacks;
                }
                RowOutcome::Skipped { festival_id, reason } => {
                    error!("Error processing festival {}: {}", festival_id, reason);
                    rows_skipped += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        BatchReport {
            rows: output,
            rows_read,
            rows_translated,
            rows_skipped,
            fallbacks,
            started_at,
            finished_at: Local::now(),
        }
    }

    /// Translate one row into every language, or skip it entirely
    pub async fn process_row(&self, row: SourceRow) -> RowOutcome {
        let SourceRow { line, festival_id, record } = row;

        let record = match record {
            Ok(record) => record,
            Err(e) => {
                return RowOutcome::Skipped {
                    festival_id: festival_id.unwrap_or_else(|| UNKNOWN_FESTIVAL_ID.to_string()),
                    reason: format!("line {}: {}", line, e),
                };
            }
        };

        let festival = Festival::from(record);
        info!("Processing festival {}", festival.festival_id);
        self.throttle().await;

        let mut fallbacks = 0;
        let mut rows = Vec::with_capacity(Language::ALL.len());
        for language in Language::ALL {
            let name = self
                .translate_field(&festival, festival.name.as_deref(), language, FieldTag::Name)
                .await;
            let description = self
                .translate_field(&festival, festival.description.as_deref(), language, FieldTag::Description)
                .await;
            fallbacks += usize::from(name.is_fallback()) + usize::from(description.is_fallback());
            rows.push(OutputRecord::new(&festival, name.into_text(), description.into_text(), language));
        }

        RowOutcome::Translated { rows, fallbacks }
    }

    /// Missing values get the field's placeholder without calling the backend
    async fn translate_field(
        &self,
        festival: &Festival,
        value: Option<&str>,
        language: Language,
        tag: FieldTag,
    ) -> FieldTranslation {
        match value {
            Some(text) => self.translate(text, language, &festival.festival_id, tag).await,
            None => FieldTranslation::Skipped(tag.placeholder().to_string()),
        }
    }

    /// Translate `text`, falling back to the original text on any backend error
    pub async fn translate(
        &self,
        text: &str,
        target: Language,
        festival_id: &str,
        tag: FieldTag,
    ) -> FieldTranslation {
        if text.trim().is_empty() {
            info!("Skipping translation for festival {} tag {} because the text is empty", festival_id, tag);
            return FieldTranslation::Skipped(text.to_string());
        }

        match self.translator.translate(text, target).await {
            Ok(translation) => FieldTranslation::Translated(translation),
            Err(e) => {
                warn!("Translation error: festival {} tag {} ({}): {}", festival_id, tag, target, e);
                FieldTranslation::Fallback(text.to_string())
            }
        }
    }

    async fn throttle(&self) {
        if !self.row_delay.is_zero() {
            tokio::time::sleep(self.row_delay).await;
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} festivals ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}
