/// Progress and result reporting for the crop pipeline.
use crate::bounds::CropBounds;
use crate::constants::{BYTES_PER_MB, PROGRESS_CHARS, PROGRESS_TEMPLATE};
use crate::filter::FilterSummary;
use crate::header::PlyHeader;
use crate::transform::{EmptyResult, TransformStats};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use tracing::{info, warn};

/// Pipeline phases that report incremental progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Decode,
    Encode,
}

impl Phase {
    fn label(self) -> &'static str {
        match self {
            Phase::Decode => "Reading vertices",
            Phase::Encode => "Writing vertices",
        }
    }

    fn done_label(self) -> &'static str {
        match self {
            Phase::Decode => "Vertices read",
            Phase::Encode => "Vertices written",
        }
    }
}

/// Receives diagnostics from a single file transform.
/// Every hook defaults to a no-op; none of them influence the output.
pub trait Reporter {
    fn input_loaded(&self, _bytes: usize) {}

    fn header_parsed(&self, _header: &PlyHeader) {}

    /// `done` of `total` points handled in `phase`.
    fn progress(&self, _phase: Phase, _done: usize, _total: usize) {}

    fn filtered(&self, _summary: &FilterSummary, _bounds: &CropBounds) {}

    fn sorted(&self, _points: usize) {}

    fn empty(&self, _result: &EmptyResult) {}

    fn completed(&self, _stats: &TransformStats) {}
}

/// Drops every report.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reports through `tracing` events and indicatif progress bars.
pub struct ConsoleReporter {
    /// File label prefixed to log lines.
    label: String,
    /// Shared bar container, `None` to log without bars.
    progress: Option<MultiProgress>,
    bar: Mutex<Option<(Phase, ProgressBar)>>,
}

impl ConsoleReporter {
    pub fn new(label: impl Into<String>, progress: Option<MultiProgress>) -> Self {
        Self {
            label: label.into(),
            progress,
            bar: Mutex::new(None),
        }
    }

    fn create_bar(&self, phase: Phase, total: usize) -> Option<ProgressBar> {
        let multi = self.progress.as_ref()?;
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_CHARS);
        let pb = multi.add(ProgressBar::new(total as u64));
        pb.set_style(style);
        pb.set_message(format!("{} ({})", phase.label(), self.label));
        Some(pb)
    }
}

impl Reporter for ConsoleReporter {
    fn input_loaded(&self, bytes: usize) {
        info!(
            "{}: file size {:.2} MB",
            self.label,
            bytes as f64 / BYTES_PER_MB
        );
    }

    fn header_parsed(&self, header: &PlyHeader) {
        info!(
            "{}: found {} vertices, row size: {} bytes",
            self.label,
            header.vertex_count,
            header.layout.stride()
        );
    }

    fn progress(&self, phase: Phase, done: usize, total: usize) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };

        if slot.as_ref().is_none_or(|(current, _)| *current != phase) {
            if let Some((_, previous)) = slot.take() {
                previous.finish_and_clear();
            }
            *slot = self.create_bar(phase, total).map(|pb| (phase, pb));
        }

        match slot.as_ref() {
            Some((_, pb)) => {
                pb.set_position(done as u64);
                if done >= total {
                    pb.finish_with_message(format!("{} ({})", phase.done_label(), self.label));
                }
            }
            None if done < total => {
                info!("{}: {} {}/{}...", self.label, phase.label(), done, total);
            }
            None => {}
        }
    }

    fn filtered(&self, summary: &FilterSummary, bounds: &CropBounds) {
        info!("{}: filtering results:", self.label);
        info!("  Original vertices: {}", summary.input_points);
        info!("  Filtered vertices: {}", summary.retained_points);
        info!("  Reduction: {:.1}%", summary.reduction_percent());
        info!("  Data bounds: {}", summary.data_bounds);
        info!("  Crop bounds: {}", bounds);
    }

    fn sorted(&self, points: usize) {
        info!("{}: sorted {} vertices by importance", self.label, points);
    }

    fn empty(&self, result: &EmptyResult) {
        warn!(
            "{}: no vertices remain after filtering ({} read)",
            self.label, result.input_points
        );
    }

    fn completed(&self, stats: &TransformStats) {
        info!(
            "{}: size reduction: {:.1}% ({:.2} MB, {} -> {} vertices)",
            self.label,
            stats.size_reduction_percent,
            stats.output_bytes as f64 / BYTES_PER_MB,
            stats.decoded_points,
            stats.output_points
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::DataBounds;

    #[test]
    fn test_null_reporter_accepts_everything() {
        let reporter = NullReporter;
        reporter.input_loaded(10);
        reporter.progress(Phase::Decode, 5, 10);
        reporter.sorted(3);
    }

    #[test]
    fn test_console_reporter_without_bars() {
        let reporter = ConsoleReporter::new("a.ply", None);
        reporter.progress(Phase::Decode, 10_000, 20_000);
        reporter.progress(Phase::Decode, 20_000, 20_000);
        reporter.progress(Phase::Encode, 0, 5);
        assert!(reporter.bar.lock().unwrap().is_none());

        let summary = FilterSummary {
            input_points: 4,
            retained_points: 1,
            data_bounds: DataBounds::new(),
        };
        reporter.filtered(&summary, &CropBounds::default());
    }

    #[test]
    fn test_console_reporter_switches_bars_between_phases() {
        let multi = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let reporter = ConsoleReporter::new("b.ply", Some(multi));

        reporter.progress(Phase::Decode, 10, 20);
        reporter.progress(Phase::Encode, 3, 20);
        let slot = reporter.bar.lock().unwrap();
        let (phase, pb) = slot.as_ref().unwrap();
        assert_eq!(*phase, Phase::Encode);
        assert_eq!(pb.position(), 3);
    }
}
