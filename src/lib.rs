// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # textpos
//!
//! Caret, selection, and pointer offset mapping for line-oriented text
//! surfaces.
//!
//! A plain-text input surface and a styled read-only render surface stay in
//! sync by sharing one body string and one selection range of flat offsets.
//! This crate owns the arithmetic between the three coordinate spaces
//! involved — pixel pointer positions, row/column positions, and flat
//! offsets — plus the line-level edits that must preserve selection
//! semantics across a mutation.
//!
//! The engine is total on its hot paths: pointer and keystroke handling
//! clamp out-of-range input to the nearest valid position instead of
//! failing, so at worst a caret lands somewhere unintended but valid.
//!
//! ## Modules
//!
//! - [`index`]: Row boundary index, the leaf every lookup builds on
//! - [`position`]: Flat-offset ↔ row/column translation
//! - [`locate`]: Pointer and native-selection resolution
//! - [`mutate`]: Line-level edits (duplicate line)
//! - [`gutter`]: Line-enumeration labels
//! - [`session`]: Shared body + selection state for the two surfaces
//! - [`config`]: Layout metrics and their config-file overrides

pub mod config;
pub mod gutter;
pub mod index;
pub mod locate;
pub mod mutate;
pub mod position;
pub mod session;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::LayoutMetrics;
    pub use crate::index::RowIndex;
    pub use crate::locate::{PointerPos, SelectionAnchor, TextMeasurer};
    pub use crate::mutate::Direction;
    pub use crate::position::{RowCol, Selection};
    pub use crate::session::EditSession;
}
