//! Plain data handed to templates. Built from controller state so templates never
//! see generic types.

use crate::models::{Cell, FormField, Resource, ResourceId, ResourceKind, SchoolStat};
use crate::services::{group_stats, Notice, ResourceController, View};

pub struct TabView {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl TabView {
    pub fn all(active: ResourceKind) -> Vec<TabView> {
        ResourceKind::ALL
            .iter()
            .map(|kind| TabView {
                label: kind.label(),
                href: format!("/admin/dashboard?tab={}", kind),
                active: *kind == active,
            })
            .collect()
    }
}

pub struct RowView {
    pub id: ResourceId,
    pub title: String,
    pub cells: Vec<Cell>,
    /// Current value for the inline editor.
    pub value: Option<String>,
    pub unread: bool,
    pub confirm_delete: bool,
    /// A call on this row is still in flight; its actions are disabled.
    pub saving: bool,
}

/// One admin tab: the table, the add form and any notices.
pub struct PanelView {
    pub resource: &'static str,
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub loaded: bool,
    pub error: Option<String>,
    pub can_create: bool,
    pub can_update: bool,
    pub is_inbox: bool,
    pub modal: Option<Vec<FormField>>,
    pub notices: Vec<Notice>,
}

impl PanelView {
    /// Drains the controller's notices. `pending_delete` asks for confirmation on that row.
    pub fn build<R: Resource>(
        controller: &mut ResourceController<R>,
        pending_delete: Option<ResourceId>,
    ) -> Self {
        let kind = R::KIND;
        let (loaded, error, rows) = match controller.view() {
            View::Loaded(items) => (
                true,
                None,
                items
                    .iter()
                    .map(|item| RowView {
                        id: item.id(),
                        title: item.title().to_string(),
                        cells: item.cells(),
                        value: item.inline_value().map(str::to_string),
                        unread: item.is_unread(),
                        confirm_delete: pending_delete == Some(item.id()),
                        saving: controller.is_saving(item.id()),
                    })
                    .collect(),
            ),
            View::Failed(message) => (false, Some(message.to_string()), Vec::new()),
            View::Idle | View::Loading => (false, None, Vec::new()),
        };

        let columns: Vec<&'static str> = rows
            .first()
            .map(|row: &RowView| row.cells.iter().map(|cell| cell.label).collect())
            .unwrap_or_default();

        Self {
            resource: kind.as_str(),
            title: kind.label(),
            columns,
            rows,
            loaded,
            error,
            can_create: kind.admin_can_create(),
            can_update: kind.admin_can_update(),
            is_inbox: kind == ResourceKind::Contact,
            modal: controller.modal().map(|modal| modal.fields()),
            notices: controller.take_notices(),
        }
    }
}

/// Stats of one category on the public pages.
pub struct StatSection {
    pub title: &'static str,
    pub stats: Vec<SchoolStat>,
}

impl StatSection {
    pub fn from_stats(stats: &[SchoolStat]) -> Vec<StatSection> {
        group_stats(stats)
            .into_iter()
            .map(|group| StatSection {
                title: group.category.label(),
                stats: group.stats.into_iter().cloned().collect(),
            })
            .collect()
    }
}
