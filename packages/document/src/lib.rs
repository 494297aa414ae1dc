//! # Mailforge Document
//!
//! Schema of an email/hero template and the read paths over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: Template tree + default tables    │
//! │  - Template → views → sections → rows →     │
//! │    components                               │
//! │  - Id generation                            │
//! │  - View projection (visible tree, columns)  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations, history, selection       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html / storage: export + persist   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! 1. Every id is unique across the whole template and never reused
//! 2. Desktop and mobile views are independent trees
//! 3. Columns are derived from `columnIndex`, never stored
//! 4. Hidden nodes stay in the model but are excluded from projection

pub mod component;
pub mod defaults;
pub mod id_generator;
pub mod projection;
pub mod style;
pub mod template;
pub mod visitor;

pub use component::{
    ButtonProperties, Component, ComponentKind, ComponentType, ImageProperties, Position,
    TextProperties,
};
pub use id_generator::IdGenerator;
pub use projection::{partition_columns, project, ProjectedRow, ProjectedSection, ViewProjection};
pub use style::{BoxStyle, FlexLayout, RowProperties, SectionProperties, Typography};
pub use template::{Row, Section, Template, TemplateSettings, TemplateView, TemplateViews, ViewMode};
pub use visitor::{collect_ids, duplicate_ids, NodeCounts, Visitor};
