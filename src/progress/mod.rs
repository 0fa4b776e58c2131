//! Progress module containing progress bar functionality.
//!
//! Progress reporting for a pool is open-ended: transfers keep arriving for
//! as long as the pool lives, so the main bar counts completed transfers
//! rather than tracking a fixed total, and each active transfer gets its own
//! child bar sized from the response's Content-Length.
//!
//! # Examples
//!
//! ## Custom progress bar styling
//!
//! ```rust
//! use fetchpool::progress::{StyleOptions, ProgressBarOpts};
//!
//! let style_options = StyleOptions::new(
//!     ProgressBarOpts::new(
//!         Some("{spinner} {pos} transfers done".to_string()),
//!         None,
//!         true,
//!         false,
//!     ),
//!     ProgressBarOpts::with_pip_style(),
//! );
//! ```
//!
//! ## Hidden progress bars
//!
//! ```rust
//! use fetchpool::progress::{StyleOptions, ProgressBarOpts};
//!
//! let hidden_style = StyleOptions::new(
//!     ProgressBarOpts::hidden(),
//!     ProgressBarOpts::hidden(),
//! );
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
