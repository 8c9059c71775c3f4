//! # termviz-plot — drawing primitives for termviz windows
//!
//! Every primitive here is a plain sequence of grid writes on a
//! [`Window`](termviz_term::window::Window). None of them render: callers
//! decide when a frame is complete and call `render()` themselves. In naive
//! mode the writes reach the terminal as they happen.
//!
//! # Architecture
//!
//! ```text
//! rect.rs        solid rectangle, strict bounds (all or nothing)
//! bars.rs        bar chart along the bottom edge, heights saturate
//! wrap.rs        hard-wrapped text block, one chunk per row
//! progress.rs    percentage bar pulled from a ValueProvider
//! projection.rs  rotate → perspective project → clipped Bresenham lines
//! ```
//!
//! # Failure policy
//!
//! Arguments are validated before the first cell is written, so a rejected
//! call leaves the window exactly as it was.

// Projection math mixes float coordinates with integer cell indices.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod bars;
pub mod progress;
pub mod projection;
pub mod rect;
pub mod wrap;

pub use bars::{draw_bars, max_bars};
pub use progress::{Progress, ValueProvider};
pub use projection::{draw_line, Axis, Point2, Projection, Vec3, Wireframe};
pub use rect::{draw_rectangle, Rect};
pub use wrap::wrap_text;
