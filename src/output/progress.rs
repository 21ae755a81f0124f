//! Progress display for dataset builds.
//!
//! One bar tracks recordings; while a recording is being cut, a second bar
//! for its intervals sits under it in the same [`MultiProgress`].

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const BAR_CHARS: &str = "█▓▒░ ";

/// Shared progress area for a build; hidden when progress is disabled.
pub fn create_multi_progress(enabled: bool) -> MultiProgress {
    if enabled {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

/// Add the recordings bar to `multi`.
pub fn create_recording_progress(
    multi: &MultiProgress,
    total_recordings: usize,
    enabled: bool,
) -> Option<ProgressBar> {
    if !enabled || total_recordings == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_recordings as u64).with_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} recordings ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(BAR_CHARS),
    );
    Some(multi.add(pb))
}

/// Interval bar for one recording, removed from its [`MultiProgress`] when
/// dropped so finished recordings do not pile up on screen.
pub struct UtteranceProgress {
    bar: ProgressBar,
    multi: MultiProgress,
}

impl UtteranceProgress {
    /// Advance by one interval.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Intervals visited so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Drop for UtteranceProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
        self.multi.remove(&self.bar);
    }
}

/// Add an interval bar for `recording_id` under the recordings bar.
pub fn create_utterance_progress(
    multi: &MultiProgress,
    total_intervals: usize,
    recording_id: &str,
    enabled: bool,
) -> Option<UtteranceProgress> {
    if !enabled || total_intervals == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_intervals as u64).with_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} {bar:30.green/white} {pos}/{len} intervals {prefix}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(BAR_CHARS),
    );
    pb.set_prefix(recording_id.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    Some(UtteranceProgress {
        bar: multi.add(pb),
        multi: multi.clone(),
    })
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> MultiProgress {
        create_multi_progress(false)
    }

    #[test]
    fn test_disabled_progress_is_none() {
        let multi = hidden();
        assert!(create_recording_progress(&multi, 10, false).is_none());
        assert!(create_utterance_progress(&multi, 10, "call1", false).is_none());
    }

    #[test]
    fn test_empty_progress_is_none() {
        let multi = hidden();
        assert!(create_recording_progress(&multi, 0, true).is_none());
        assert!(create_utterance_progress(&multi, 0, "call1", true).is_none());
    }

    #[test]
    fn test_recording_bar_advances() {
        let multi = hidden();
        let pb = create_recording_progress(&multi, 3, true);
        inc_progress(pb.as_ref());
        inc_progress(pb.as_ref());
        assert_eq!(pb.as_ref().map(ProgressBar::position), Some(2));
        finish_progress(pb, "done");
        finish_progress(None, "done");
    }

    #[test]
    fn test_utterance_bar_shares_multi_progress() {
        let multi = hidden();
        let outer = create_recording_progress(&multi, 1, true);
        {
            let inner = create_utterance_progress(&multi, 4, "call1", true);
            let Some(inner) = inner else {
                unreachable!("enabled bar with intervals");
            };
            inner.inc();
            inner.inc();
            assert_eq!(inner.position(), 2);
        }
        inc_progress(outer.as_ref());
        assert_eq!(outer.as_ref().map(ProgressBar::position), Some(1));
    }
}
