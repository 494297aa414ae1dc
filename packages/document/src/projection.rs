//! # View Projection
//!
//! Read-only derivation of what a renderer or exporter should paint for one
//! viewport. Hidden sections, rows and components are dropped; components are
//! grouped into their row's columns. Columns are never stored in the document.

use crate::component::Component;
use crate::template::{Row, Section, Template, ViewMode};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewProjection<'a> {
    pub mode: ViewMode,
    pub sections: Vec<ProjectedSection<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedSection<'a> {
    pub section: &'a Section,
    pub rows: Vec<ProjectedRow<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow<'a> {
    pub row: &'a Row,
    /// One entry per column, visible components only
    pub columns: Vec<Vec<&'a Component>>,
}

/// Project the visible tree of `mode`
pub fn project(template: &Template, mode: ViewMode) -> ViewProjection<'_> {
    let sections = template
        .view(mode)
        .sections
        .iter()
        .filter(|section| section.visible)
        .map(|section| ProjectedSection {
            section,
            rows: section
                .rows
                .iter()
                .filter(|row| row.visible)
                .map(project_row)
                .collect(),
        })
        .collect();

    ViewProjection { mode, sections }
}

fn project_row(row: &Row) -> ProjectedRow<'_> {
    let columns = partition_columns(row)
        .into_iter()
        .map(|column| column.into_iter().filter(|c| c.visible).collect())
        .collect();

    ProjectedRow { row, columns }
}

/// Group every component of `row` into `row.properties.columns` buckets
///
/// A component whose `column_index` is outside the grid lands in bucket 0.
/// Relative order inside a bucket follows the row's component order.
pub fn partition_columns(row: &Row) -> Vec<Vec<&Component>> {
    let count = row.properties.column_count();
    let mut columns: Vec<Vec<&Component>> = vec![Vec::new(); count];

    for component in &row.components {
        let index = component.column_index();
        let bucket = if index < count { index } else { 0 };
        columns[bucket].push(component);
    }

    columns
}

impl ViewProjection<'_> {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Visible components in paint order
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.columns.iter())
            .flat_map(|column| column.iter().copied())
    }
}
