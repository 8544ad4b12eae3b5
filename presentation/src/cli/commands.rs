//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for generated quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable question listing with validation notes
    Summary,
    /// The quiz as pretty-printed JSON
    Json,
}

impl From<OutputFormat> for docquiz_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => docquiz_domain::OutputFormat::Summary,
            OutputFormat::Json => docquiz_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for docquiz
#[derive(Parser, Debug)]
#[command(name = "docquiz")]
#[command(author, version, about = "Generate multiple-choice quizzes from course documents")]
#[command(long_about = r#"
docquiz turns lecture material into multiple-choice questions.

Primary documents (PDF, DOCX, PPTX) define what the questions may cover.
Supporting documents and web pages are given to the model as background only.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./docquiz.toml      Project-level config
3. ~/.config/docquiz/config.toml   Global config

The API key is read from the GEMINI_API_KEY environment variable unless
[gemini] api_key_env names another one.

Example:
  docquiz lecture.pdf --page-ranges "lecture.pdf: 1-10" -n 20
  docquiz week3.pptx --supporting notes.docx --url https://example.com/topic
  docquiz lecture.pdf --multiple 5 --easy 30 --medium 40 --hard 30 --save "Week 3"
"#)]
pub struct Cli {
    /// Primary documents that questions are drawn from
    #[arg(value_name = "FILE", required_unless_present = "show_config")]
    pub primary: Vec<PathBuf>,

    /// Supporting documents (context only, can be specified multiple times)
    #[arg(short, long, value_name = "FILE")]
    pub supporting: Vec<PathBuf>,

    /// Supporting web pages (context only, can be specified multiple times)
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Page ranges for PDF files as `name: from-to` (can be specified multiple times)
    #[arg(short, long = "page-ranges", value_name = "NAME:FROM-TO")]
    pub page_ranges: Vec<String>,

    /// Number of questions to generate
    #[arg(short = 'n', long = "questions", value_name = "N")]
    pub questions: Option<u32>,

    /// Percentage of easy questions
    #[arg(long, value_name = "PCT")]
    pub easy: Option<u32>,

    /// Percentage of medium questions
    #[arg(long, value_name = "PCT")]
    pub medium: Option<u32>,

    /// Percentage of hard questions
    #[arg(long, value_name = "PCT")]
    pub hard: Option<u32>,

    /// Number of multiple-answer questions
    #[arg(long, value_name = "N")]
    pub multiple: Option<u32>,

    /// Easy multiple-answer questions
    #[arg(long, value_name = "N", requires = "multiple")]
    pub multiple_easy: Option<u32>,

    /// Medium multiple-answer questions
    #[arg(long, value_name = "N", requires = "multiple")]
    pub multiple_medium: Option<u32>,

    /// Hard multiple-answer questions
    #[arg(long, value_name = "N", requires = "multiple")]
    pub multiple_hard: Option<u32>,

    /// Output format (defaults to the config file value, then summary)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Save the valid questions into this category
    #[arg(long, value_name = "CATEGORY")]
    pub save: Option<String>,

    /// Only save these question ids (comma separated)
    #[arg(long, value_name = "IDS", value_delimiter = ',', requires = "save")]
    pub select: Vec<String>,

    /// Directory of the question store
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
