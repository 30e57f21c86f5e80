//! Future-vision bucket list.

use super::log_rejected;
use crate::clock::Clock;
use crate::gate::GatePass;
use crate::kv::KeyValueStore;
use crate::list::{PersistedList, Placement};
use crate::model::bucket::{BucketCategory, BucketItem};
use crate::model::RecordId;

/// Completion filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn matches(self, item: &BucketItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }
}

/// Category filter; also the category new items are filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(BucketCategory),
}

impl CategoryFilter {
    fn matches(self, item: &BucketItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == category,
        }
    }

    /// Category for a new item; "all" files it under life.
    pub fn category_for_new_item(self) -> BucketCategory {
        match self {
            Self::All => BucketCategory::Life,
            Self::Only(category) => category,
        }
    }
}

pub struct BucketList<S: KeyValueStore, C: Clock> {
    list: PersistedList<BucketItem, S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> BucketList<S, C> {
    pub fn open(store: S, clock: C) -> Self {
        Self {
            list: PersistedList::open(store),
            clock,
        }
    }

    /// All items, newest first.
    pub fn items(&self) -> &[BucketItem] {
        self.list.records()
    }

    pub fn add(&mut self, text: &str, filter: CategoryFilter) -> Option<RecordId> {
        let id = self.list.fresh_id();
        let category = filter.category_for_new_item();
        match BucketItem::new(id, text, category, self.clock.now()) {
            Ok(item) => Some(self.list.insert(item, Placement::Front)),
            Err(err) => {
                log_rejected("bucket", &err);
                None
            }
        }
    }

    /// Flips completion of `id`. Returns the new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let now = self.clock.now();
        let mut completed = None;
        self.list.update(id, |item| {
            item.toggle(now);
            completed = Some(item.completed);
        });
        completed
    }

    pub fn remove(&mut self, id: &str, pass: &GatePass) -> bool {
        self.list.remove(id, pass)
    }

    /// Items passing both filters, in list order.
    pub fn visible(&self, status: StatusFilter, category: CategoryFilter) -> Vec<&BucketItem> {
        self.items()
            .iter()
            .filter(|item| status.matches(item) && category.matches(item))
            .collect()
    }

    /// Items of one category under a status filter, for the grouped sections.
    pub fn section(&self, category: BucketCategory, status: StatusFilter) -> Vec<&BucketItem> {
        self.visible(status, CategoryFilter::Only(category))
    }

    /// Rounded share of completed items among the visible ones; 0 when none are visible.
    pub fn completion_percentage(&self, status: StatusFilter, category: CategoryFilter) -> u8 {
        let visible = self.visible(status, category);
        if visible.is_empty() {
            return 0;
        }
        let done = visible.iter().filter(|item| item.completed).count();
        (done as f64 / visible.len() as f64 * 100.0).round() as u8
    }
}
