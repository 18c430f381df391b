//! Read-only views over a fetched collection, used by the public pages.

use crate::models::{Resource, SchoolStat, Staff, StatCategory};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Blank or "All" (any case) selects everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case("all") => Self::All,
            Some(v) => Self::Only(v.to_string()),
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(name) => name,
        }
    }

    /// For highlighting the selected filter button.
    pub fn is_active(&self, name: &str) -> bool {
        self.as_str() == name
    }
}

/// Items whose category matches, in their original order.
pub fn filter_by_category<'a, R: Resource>(items: &'a [R], filter: &CategoryFilter) -> Vec<&'a R> {
    items
        .iter()
        .filter(|item| filter.matches(item.category()))
        .collect()
}

/// Distinct non-empty categories in first-seen order.
pub fn categories<R: Resource>(items: &[R]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|item| item.category()) {
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

pub fn leadership(staff: &[Staff]) -> Vec<&Staff> {
    staff.iter().filter(|member| member.is_leadership).collect()
}

/// The first `n` items. Collections arrive latest first.
pub fn latest<R>(items: &[R], n: usize) -> &[R] {
    &items[..n.min(items.len())]
}

#[derive(Debug, PartialEq)]
pub struct StatGroup<'a> {
    pub category: StatCategory,
    pub stats: Vec<&'a SchoolStat>,
}

/// Stats bucketed by category, groups in first-seen order.
pub fn group_stats(stats: &[SchoolStat]) -> Vec<StatGroup<'_>> {
    let mut groups: Vec<StatGroup<'_>> = Vec::new();
    for stat in stats {
        let category = stat.category_kind();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.stats.push(stat),
            None => groups.push(StatGroup {
                category,
                stats: vec![stat],
            }),
        }
    }
    groups
}

pub fn stat_value<'a>(stats: &'a [SchoolStat], key: &str) -> Option<&'a str> {
    stats
        .iter()
        .find(|stat| stat.stat_key == key)
        .map(|stat| stat.stat_value.as_str())
}
