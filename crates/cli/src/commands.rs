use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, ValueEnum};
use owo_colors::OwoColorize;
use sententia_core::{
    Analyzer, CsvConfig, Document, ExtractionConfig, ExtractionReport, InputRow, JsonConfig, LexiconConfig,
    LexiconSet, OutputRow, TableFormat, TextConfig, TitlePolicy, convert_to_csv, convert_to_json, extract_all,
    extract_article, fetch_file, join, read_input, record_to_json, record_to_text,
};

use crate::echo;

/// Output format for the joined table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormatArg {
    Csv,
    Json,
}

impl From<TableFormatArg> for TableFormat {
    fn from(arg: TableFormatArg) -> Self {
        match arg {
            TableFormatArg::Csv => TableFormat::Csv,
            TableFormatArg::Json => TableFormat::Json,
        }
    }
}

/// Output format for a single scored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct LexiconArgs {
    /// Stop-word directory or file (default: ./StopWords)
    #[arg(long, value_name = "PATH")]
    pub stop_words: Option<PathBuf>,

    /// Master dictionary directory or file (default: ./MasterDictionary)
    #[arg(long, value_name = "PATH")]
    pub master_dictionary: Option<PathBuf>,

    /// Keep lexicon words as written instead of lower-casing them
    #[arg(long)]
    pub case_sensitive_lexicons: bool,
}

impl LexiconArgs {
    fn config(&self) -> LexiconConfig {
        let mut builder = LexiconConfig::builder().fold_case(!self.case_sensitive_lexicons);
        if let Some(dir) = &self.stop_words {
            builder = builder.stop_words_dir(dir);
        }
        if let Some(dir) = &self.master_dictionary {
            builder = builder.master_dictionary_dir(dir);
        }
        builder.build()
    }

    fn load(&self) -> anyhow::Result<LexiconSet> {
        LexiconSet::load(&self.config()).context("Failed to load lexicons")
    }
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Maximum number of URLs fetched at once
    #[arg(long, default_value = "6", value_name = "NUM")]
    pub workers: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,
}

impl FetchArgs {
    fn config(&self, articles_dir: &Path) -> ExtractionConfig {
        let mut builder = ExtractionConfig::builder()
            .workers(self.workers)
            .articles_dir(articles_dir)
            .timeout(self.timeout);
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        builder.build()
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv", value_name = "FORMAT")]
    pub format: TableFormatArg,

    /// Pretty print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input CSV with URL_ID and URL columns
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Directory article files are written to
    #[arg(long, default_value = "extracted_articles", value_name = "DIR")]
    pub articles_dir: PathBuf,

    /// Analyze only the article body, without its title line
    #[arg(long)]
    pub exclude_title: bool,

    #[command(flatten)]
    pub lexicon: LexiconArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input CSV with URL_ID and URL columns
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Directory article files are written to
    #[arg(long, default_value = "extracted_articles", value_name = "DIR")]
    pub articles_dir: PathBuf,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input CSV with URL_ID and URL columns
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Directory holding the article files
    #[arg(long, default_value = "extracted_articles", value_name = "DIR")]
    pub articles_dir: PathBuf,

    /// Analyze only the article body, without its title line
    #[arg(long)]
    pub exclude_title: bool,

    #[command(flatten)]
    pub lexicon: LexiconArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Text file to score, or "-" for stdin (default: stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Treat the input as an article page and extract it first
    #[arg(long)]
    pub html: bool,

    /// Identifier printed with the metrics (default: the file name)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Analyze only the text below the first blank line
    #[arg(long)]
    pub exclude_title: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", value_name = "FORMAT")]
    pub format: ScoreFormat,

    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

fn title_policy(exclude_title: bool) -> TitlePolicy {
    if exclude_title { TitlePolicy::Exclude } else { TitlePolicy::Include }
}

/// Extracts, analyzes and writes the joined table.
pub async fn run(args: &RunArgs, verbose: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if verbose {
        echo::print_step(1, 4, "Loading lexicons");
    }
    let step = Instant::now();
    let lexicons = args.lexicon.load()?;
    timings.push(("Lexicons".to_string(), step.elapsed()));

    let rows = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    tracing::debug!(input = %args.input.display(), rows = rows.len(), "read input table");

    if verbose {
        echo::print_step(2, 4, &format!("Extracting {} articles", rows.len()));
    }
    let step = Instant::now();
    let config = args.fetch.config(&args.articles_dir);
    let reports = extract_all(&rows, &config).await.context("Failed to extract articles")?;
    timings.push(("Extraction".to_string(), step.elapsed()));
    report_extraction(&reports);

    if verbose {
        echo::print_step(3, 4, "Scoring articles");
    }
    let step = Instant::now();
    let title = title_policy(args.exclude_title);
    let documents = load_extracted(&reports, title);

    let output = score_and_join(lexicons, &documents, &rows);
    timings.push(("Analysis".to_string(), step.elapsed()));

    if verbose {
        echo::print_step(4, 4, "Writing output");
    }
    write_table(&output, &args.output)?;

    if verbose {
        echo::print_timing_summary(start.elapsed(), &timings);
    }
    Ok(())
}

/// Fetches every URL and writes the article files.
pub async fn extract(args: &ExtractArgs, verbose: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let rows = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    tracing::debug!(input = %args.input.display(), rows = rows.len(), "read input table");

    if verbose {
        echo::print_step(1, 1, &format!("Extracting {} articles", rows.len()));
    }

    let config = args.fetch.config(&args.articles_dir);
    let reports = extract_all(&rows, &config).await.context("Failed to extract articles")?;
    report_extraction(&reports);

    let bytes: u64 = reports
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok())
        .filter_map(|path| fs::metadata(path).ok())
        .map(|m| m.len())
        .sum();
    echo::print_info(&format!(
        "Articles written to {} ({})",
        args.articles_dir.display(),
        echo::format_size(bytes as usize)
    ));

    if verbose {
        echo::print_timing_summary(start.elapsed(), &[("Extraction".to_string(), start.elapsed())]);
    }
    Ok(())
}

/// Scores an existing articles directory and writes the joined table.
pub fn analyze(args: &AnalyzeArgs, verbose: bool) -> anyhow::Result<()> {
    let start = Instant::now();

    if verbose {
        echo::print_step(1, 3, "Loading lexicons");
    }
    let lexicons = args.lexicon.load()?;
    let rows = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    tracing::debug!(input = %args.input.display(), rows = rows.len(), "read input table");

    if verbose {
        echo::print_step(2, 3, &format!("Scoring articles in {}", args.articles_dir.display()));
    }
    let documents = Document::load_dir(&args.articles_dir, title_policy(args.exclude_title))
        .with_context(|| format!("Failed to read articles: {}", args.articles_dir.display()))?;
    let output = score_and_join(lexicons, &documents, &rows);

    if verbose {
        echo::print_step(3, 3, "Writing output");
    }
    write_table(&output, &args.output)?;

    if verbose {
        echo::print_timing_summary(start.elapsed(), &[("Analysis".to_string(), start.elapsed())]);
    }
    Ok(())
}

/// Scores one text and prints its metrics.
pub fn score(args: &ScoreArgs, verbose: bool) -> anyhow::Result<()> {
    let lexicons = args.lexicon.load()?;

    let (input, default_id) = match args.input.as_deref() {
        None => (read_stdin()?, "stdin".to_string()),
        Some(path) if path == Path::new("-") => (read_stdin()?, "stdin".to_string()),
        Some(path) => {
            let contents = fetch_file(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
            let id = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.split('.').next())
                .unwrap_or("input")
                .to_string();
            (contents, id)
        }
    };

    if verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(input.len()).bright_white());
    }

    let text = if args.html {
        let article = extract_article(&input).context("Failed to extract article")?;
        if verbose {
            eprintln!("  {} {}", "Title:".dimmed(), article.title.bright_white());
        }
        article.to_artifact()
    } else {
        input
    };

    let id = args.id.clone().unwrap_or(default_id);
    let document = Document::from_artifact(id, &text, title_policy(args.exclude_title));
    let record = Analyzer::new(lexicons).analyze(&document).context("Failed to score text")?;

    let output = match args.format {
        ScoreFormat::Text => record_to_text(&record, &TextConfig::default()),
        ScoreFormat::Json => record_to_json(&record, true).context("Failed to convert to JSON")? + "\n",
    };
    print!("{}", output);

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
    Ok(buffer)
}

fn score_and_join(lexicons: LexiconSet, documents: &[Document], rows: &[InputRow]) -> Vec<OutputRow> {
    let report = Analyzer::new(lexicons).analyze_all(documents);
    for (id, error) in &report.failures {
        echo::print_warning(&format!("{}: {}", id, error));
    }
    echo::print_analysis_summary(documents.len(), &report);

    join(rows, &report.table)
}

/// Loads the artifact of every successful report under its row's URL_ID.
/// An artifact that cannot be read is warned about and left out.
fn load_extracted(reports: &[ExtractionReport], title: TitlePolicy) -> Vec<Document> {
    let mut documents = Vec::new();
    for report in reports {
        let Ok(path) = &report.outcome else { continue };
        match Document::load_as(report.url_id.clone(), path, title) {
            Ok(document) => documents.push(document),
            Err(e) => echo::print_warning(&format!("{}: {}", report.url_id, e)),
        }
    }
    documents
}

fn report_extraction(reports: &[ExtractionReport]) {
    let extracted = reports.iter().filter(|r| r.is_success()).count();
    let failed = reports.len() - extracted;

    if failed == 0 {
        echo::print_success(&format!("Extracted {} articles", extracted));
    } else {
        echo::print_warning(&format!("Extracted {} of {} articles ({} failed)", extracted, reports.len(), failed));
    }
}

fn write_table(rows: &[OutputRow], args: &OutputArgs) -> anyhow::Result<()> {
    let output = match TableFormat::from(args.format) {
        TableFormat::Csv => convert_to_csv(rows, &CsvConfig::default()).context("Failed to convert to CSV")?,
        TableFormat::Json => {
            convert_to_json(rows, &JsonConfig { pretty: args.pretty }).context("Failed to convert to JSON")? + "\n"
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", output),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        lexicon: LexiconArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    }

    #[test]
    fn test_lexicon_args_to_config() {
        let cli = TestCli::parse_from([
            "test",
            "--stop-words",
            "sw",
            "--master-dictionary",
            "md",
            "--case-sensitive-lexicons",
        ]);
        let config = cli.lexicon.config();

        assert_eq!(config.stop_words_dir, PathBuf::from("sw"));
        assert_eq!(config.master_dictionary_dir, PathBuf::from("md"));
        assert!(!config.fold_case);
    }

    #[test]
    fn test_fetch_args_defaults() {
        let cli = TestCli::parse_from(["test"]);
        let config = cli.fetch.config(Path::new("out"));

        assert_eq!(config.workers, 6);
        assert_eq!(config.fetch.timeout, 30);
        assert_eq!(config.articles_dir, PathBuf::from("out"));
        assert!(cli.lexicon.config().fold_case);
    }

    #[test]
    fn test_title_policy() {
        assert_eq!(title_policy(false), TitlePolicy::Include);
        assert_eq!(title_policy(true), TitlePolicy::Exclude);
    }

    #[test]
    fn test_load_extracted_keeps_row_ids_and_skips_bad_artifacts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dotted = tmp.path().join("123.0.txt");
        let latin1 = tmp.path().join("7.txt");
        fs::write(&dotted, "Title\n\nBody.").unwrap();
        fs::write(&latin1, b"Caf\xe9\n\nOpen late.").unwrap();

        let report = |id: &str, outcome| ExtractionReport { url_id: id.to_string(), url: String::new(), outcome };
        let reports = vec![
            report("123.0", Ok(dotted)),
            report("7", Ok(latin1)),
            report("8", Ok(tmp.path().join("8.txt"))),
            report("9", Err(sententia_core::SententiaError::InvalidUrl("x".to_string()))),
        ];

        let documents = load_extracted(&reports, TitlePolicy::Include);
        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["123.0", "7"]);
        assert!(documents[1].raw_text.starts_with("Caf\u{FFFD}"));
    }
}
