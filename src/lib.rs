//! A small console progress bar.
//!
//! ```no_run
//! use consolebar::{BarOption, ProgressBar};
//!
//! let bar = ProgressBar::new(100, [BarOption::Width(40)])?;
//! for _ in 0..100 {
//!     bar.increment()?;
//! }
//! # Ok::<(), consolebar::BarError>(())
//! ```

pub mod clock;
pub mod error;
pub mod options;
pub mod progress;
pub mod render;
pub mod sink;
pub mod theme;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::BarError;
pub use options::{BarConfig, BarOption};
pub use progress::{BarBuilder, ProgressBar};
pub use sink::SharedBuffer;
pub use theme::Theme;
