//! # TUI Components
//!
//! Each component file is self-contained: state types, event types,
//! rendering, and tests live together.
//!
//! Two patterns, as elsewhere in the TUI:
//! - stateful overlay components (`Picker`) that hold list state and emit
//!   high-level events
//! - mostly-stateless form components (`Composer`) that render borrowed core
//!   state plus a small slice of presentation state (tab, focus)

pub mod composer;
pub mod picker;

pub use composer::{Channel, Composer, ComposerState, FocusField, apply_edit};
pub use picker::{Picker, PickerEntry, PickerEvent, PickerState};
