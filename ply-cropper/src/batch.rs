/// Directory-level orchestration: discovery, per-file processing and the batch report.
use crate::bounds::CropBounds;
use crate::constants::{DEFAULT_DEST_DIR, DEFAULT_PATTERN, DEFAULT_SOURCE_DIR};
use crate::error::CropError;
use crate::report::{ConsoleReporter, Reporter};
use crate::transform::{CropTransform, EmptyResult, TransformOutcome, TransformStats};
use indicatif::MultiProgress;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Settings for one batch run over a source directory.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned (non-recursively) for input files.
    pub source_dir: PathBuf,
    /// Directory receiving cropped files under their original names.
    pub dest_dir: PathBuf,
    /// Shell-style file name pattern with `*`, `?` and `[seq]`.
    pub pattern: String,
    pub bounds: CropBounds,
    pub sort_by_importance: bool,
    /// Worker threads; `None` lets rayon pick.
    pub jobs: Option<usize>,
    /// Where to write the JSON summary, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            bounds: CropBounds::default(),
            sort_by_importance: true,
            jobs: None,
            report_path: None,
        }
    }
}

/// Result of a successful single-file run.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written(TransformStats),
    /// Crop left nothing, no output file was created.
    Empty(EmptyResult),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileResult {
    Written(TransformStats),
    Empty(EmptyResult),
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub result: FileResult,
}

/// Aggregated outcome of a batch, serialized as the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub crop_bounds: CropBounds,
    pub dest_dir: PathBuf,
    pub written: usize,
    pub empty: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    fn new(config: &BatchConfig, files: Vec<FileReport>) -> Self {
        let count = |wanted: fn(&FileResult) -> bool| {
            files.iter().filter(|file| wanted(&file.result)).count()
        };
        Self {
            crop_bounds: config.bounds,
            dest_dir: config.dest_dir.clone(),
            written: count(|r| matches!(r, FileResult::Written(_))),
            empty: count(|r| matches!(r, FileResult::Empty(_))),
            failed: count(|r| matches!(r, FileResult::Failed { .. })),
            files,
        }
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }
}

/// List files in `dir` whose names match `pattern`, sorted by name.
pub fn discover_ply_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CropError> {
    if !dir.is_dir() {
        return Err(CropError::MissingSource(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CropError::read(dir, e))? {
        let path = entry.map_err(|e| CropError::read(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if matches_pattern(pattern, &name) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CropError::NoInputFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Shell-style match of a whole file name: `*`, `?` and `[seq]`/`[!seq]`
/// classes with `a-z` ranges. Dot-files get no special treatment, and an
/// unclosed `[` is matched literally.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    let tokens = compile_pattern(pattern);
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match tokens.get(p) {
            Some(PatternToken::Star) => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(token) if token.matches(name[n]) => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more character.
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..]
        .iter()
        .all(|token| matches!(token, PatternToken::Star))
}

#[derive(Debug, Clone, PartialEq)]
enum PatternToken {
    Star,
    AnyChar,
    Literal(char),
    Class {
        negated: bool,
        ranges: Vec<(char, char)>,
    },
}

impl PatternToken {
    fn matches(&self, c: char) -> bool {
        match self {
            Self::Star | Self::AnyChar => true,
            Self::Literal(expected) => *expected == c,
            Self::Class { negated, ranges } => {
                ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi) != *negated
            }
        }
    }
}

fn compile_pattern(pattern: &str) -> Vec<PatternToken> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => tokens.push(PatternToken::Star),
            '?' => tokens.push(PatternToken::AnyChar),
            '[' => {
                if let Some((class, next)) = compile_class(&chars, i + 1) {
                    tokens.push(class);
                    i = next;
                    continue;
                }
                tokens.push(PatternToken::Literal('['));
            }
            c => tokens.push(PatternToken::Literal(c)),
        }
        i += 1;
    }
    tokens
}

/// Parse a class body starting after `[`; returns the token and the index past `]`.
/// A `]` right after the opening (or after `!`) is a member, not the end.
fn compile_class(chars: &[char], start: usize) -> Option<(PatternToken, usize)> {
    let negated = chars.get(start) == Some(&'!');
    let first = if negated { start + 1 } else { start };
    let mut ranges = Vec::new();
    let mut i = first;
    loop {
        let c = *chars.get(i)?;
        if c == ']' && i > first {
            return Some((PatternToken::Class { negated, ranges }, i + 1));
        }
        match (chars.get(i + 1), chars.get(i + 2)) {
            (Some(&'-'), Some(&end)) if end != ']' => {
                ranges.push((c, end));
                i += 3;
            }
            _ => {
                ranges.push((c, c));
                i += 1;
            }
        }
    }
}

/// Read, transform and write one file.
/// The destination directory is created only when there is something to write.
pub fn process_file(
    input: &Path,
    output: &Path,
    transform: &CropTransform,
    reporter: &dyn Reporter,
) -> Result<FileOutcome, CropError> {
    let data = fs::read(input).map_err(|e| CropError::read(input, e))?;

    match transform.transform(&data, reporter)? {
        TransformOutcome::Written { output: bytes, stats } => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent).map_err(|e| CropError::write(parent, e))?;
            }
            fs::write(output, &bytes).map_err(|e| CropError::write(output, e))?;
            info!("Successfully wrote {}", output.display());
            Ok(FileOutcome::Written(stats))
        }
        TransformOutcome::Empty(result) => Ok(FileOutcome::Empty(result)),
    }
}

/// Crop every matching file in the source directory.
/// A failing file is logged and recorded; it never stops the rest of the batch.
pub fn run_batch(
    config: &BatchConfig,
    progress: Option<MultiProgress>,
) -> Result<BatchSummary, CropError> {
    let inputs = discover_ply_files(&config.source_dir, &config.pattern)?;
    info!("Found {} PLY files to process", inputs.len());

    let transform =
        CropTransform::new(config.bounds).with_importance_sort(config.sort_by_importance);
    let pool = build_pool(config.jobs)?;

    let files: Vec<FileReport> = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| {
                let name = input.file_name().unwrap_or_default();
                let label = name.to_string_lossy().to_string();
                let output = config.dest_dir.join(name);
                info!("Processing {}", input.display());

                let reporter = ConsoleReporter::new(label, progress.clone());
                let result = match process_file(input, &output, &transform, &reporter) {
                    Ok(FileOutcome::Written(stats)) => FileResult::Written(stats),
                    Ok(FileOutcome::Empty(result)) => FileResult::Empty(result),
                    Err(e) => {
                        error!("Error processing {}: {}", input.display(), e);
                        FileResult::Failed {
                            error: e.to_string(),
                        }
                    }
                };

                FileReport {
                    input: input.clone(),
                    output,
                    result,
                }
            })
            .collect()
    });

    let summary = BatchSummary::new(config, files);
    info!("Processing complete!");
    info!(
        "Successfully processed {}/{} files",
        summary.written,
        summary.total()
    );
    info!("Output directory: {}", config.dest_dir.display());

    if let Some(report_path) = &config.report_path {
        write_report(&summary, report_path)?;
    }

    Ok(summary)
}

/// Write the batch summary as pretty JSON.
pub fn write_report(summary: &BatchSummary, path: &Path) -> Result<(), CropError> {
    let json = serde_json::to_string_pretty(summary)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CropError::write(parent, e))?;
    }
    fs::write(path, json).map_err(|e| CropError::write(path, e))?;
    info!("Saved batch report {}", path.display());
    Ok(())
}

fn build_pool(jobs: Option<usize>) -> Result<rayon::ThreadPool, CropError> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    Ok(builder.build()?)
}
