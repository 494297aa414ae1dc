//! # Mailforge Editor
//!
//! Editing engine for Mailforge templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Template tree + projection        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Commands: (Template, Command) → Template │
//! │  - History: snapshot undo/redo              │
//! │  - Selection + hover tracking               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html / storage                     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Commands never fail**: a stale id or locked target is a no-op with
//!    a [`NoopReason`], and the document comes back unchanged
//! 2. **Selection lives beside the document**, never inside it
//! 3. **History stores whole snapshots**, selection included
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailforge_editor::{Command, EditSession};
//! use mailforge_document::{ComponentType, Template, ViewMode};
//!
//! let mut session = EditSession::new(Template::new());
//! session.dispatch(Command::AddSection { view: ViewMode::Desktop, at_index: None });
//!
//! let section_id = session.selection().section_id().unwrap().to_string();
//! session.dispatch(Command::AddComponentToSection {
//!     section_id,
//!     component_type: ComponentType::Text,
//!     view: ViewMode::Desktop,
//! });
//!
//! session.undo();
//! ```

mod errors;
pub mod history;
pub mod mutations;
pub mod patch;
pub mod presets;
pub mod selection;
mod session;

pub use errors::EditorError;
pub use history::{History, Snapshot, DEFAULT_MAX_LEVELS};
pub use mutations::{apply, Command, NoopReason, Outcome, SelectionEffect, Transition};
pub use patch::{ComponentPatch, NodePatch};
pub use presets::{PresetComponent, RowPreset};
pub use selection::{Hover, HoverKind, NodeKind, Selection};
pub use session::{parse_script, Action, EditSession, SessionAction};
