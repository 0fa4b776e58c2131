//! Progress bar display management and coordination.
//!
//! The [`ProgressDisplay`] is owned by the multiplexer and cloned into each
//! in-flight transfer future; all clones share the same [`MultiProgress`],
//! so bars from concurrent transfers render together.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager coordinating the pool's progress bars.
#[derive(Clone)]
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main bar, counting completed transfers.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display manager.
    pub fn new(style_options: StyleOptions) -> Self {
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        // The total number of transfers is unknown up front; the main bar is
        // a counter without a length.
        let main = Arc::new(multi.add(style_options.main().clone().to_progress_bar(0)));
        main.unset_length();
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Create a child progress bar for one transfer.
    ///
    /// `size` is the expected body length, 0 when the server did not say.
    pub fn create_child_progress(&self, size: u64) -> ProgressBar {
        self.multi
            .add(self.style_options.child().clone().to_progress_bar(size))
    }

    /// Count one more completed transfer on the main bar.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping the main bar based
    /// on configuration.
    pub fn finish(&self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}
