use crate::component::Component;
use crate::template::{Row, Section, Template, TemplateView, ViewMode};
use std::collections::HashMap;

/// Visitor pattern for traversing a template immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_template(&mut self, template: &Template) {
        walk_template(self, template);
    }

    fn visit_view(&mut self, mode: ViewMode, view: &TemplateView) {
        walk_view(self, mode, view);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_component(&mut self, _component: &Component) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<V: Visitor>(visitor: &mut V, template: &Template) {
    visitor.visit_view(ViewMode::Desktop, &template.views.desktop);
    visitor.visit_view(ViewMode::Mobile, &template.views.mobile);
}

pub fn walk_view<V: Visitor>(visitor: &mut V, _mode: ViewMode, view: &TemplateView) {
    for section in &view.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for row in &section.rows {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: Visitor>(visitor: &mut V, row: &Row) {
    for component in &row.components {
        visitor.visit_component(component);
    }
}

#[derive(Default)]
struct IdCollector {
    ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_section(&mut self, section: &Section) {
        self.ids.push(section.id.clone());
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        self.ids.push(row.id.clone());
        walk_row(self, row);
    }

    fn visit_component(&mut self, component: &Component) {
        self.ids.push(component.id.clone());
    }
}

/// Every node id in the template, both views, in tree order
pub fn collect_ids(template: &Template) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_template(template);
    collector.ids
}

/// Ids that occur more than once anywhere in the template
pub fn duplicate_ids(template: &Template) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for id in collect_ids(template) {
        let count = counts.entry(id.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(id);
        }
    }
    order
}

/// Count of sections, rows and components in one view
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeCounts {
    pub sections: usize,
    pub rows: usize,
    pub components: usize,
}

impl Visitor for NodeCounts {
    fn visit_section(&mut self, section: &Section) {
        self.sections += 1;
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        self.rows += 1;
        walk_row(self, row);
    }

    fn visit_component(&mut self, _component: &Component) {
        self.components += 1;
    }
}

impl NodeCounts {
    pub fn of_view(template: &Template, mode: ViewMode) -> Self {
        let mut counts = NodeCounts::default();
        counts.visit_view(mode, template.view(mode));
        counts
    }
}
