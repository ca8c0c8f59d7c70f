//! Storage allocation: a fixed split of slots between categories followed by
//! first-fit selection inside the category's share.
//!
//! Partitioning is rigid.  A category whose share is full gets
//! [`TaskError::NoSpace`] even while other shares have room.

use wh_core::StorageId;
use wh_grid::Storage;

use crate::{Category, TaskError, TaskResult};

/// Storage slots assigned to each category, in category-list order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Partition {
    shares: Vec<(Category, Vec<StorageId>)>,
}

impl Partition {
    /// The storages assigned to `category`, in attachment order.
    pub fn get(&self, category: &Category) -> Option<&[StorageId]> {
        self.shares
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &[StorageId])> {
        self.shares.iter().map(|(c, ids)| (c, ids.as_slice()))
    }

    /// Share sizes in category order.
    pub fn sizes(&self) -> Vec<usize> {
        self.shares.iter().map(|(_, ids)| ids.len()).collect()
    }
}

/// Split `storages` (in attachment order) into consecutive blocks, one per
/// category.  Every block holds `storages.len() / categories.len()` slots and
/// the first `storages.len() % categories.len()` categories get one more.
pub fn category_partition(storages: &[Storage], categories: &[Category]) -> Partition {
    if categories.is_empty() {
        return Partition::default();
    }
    let base = storages.len() / categories.len();
    let extra = storages.len() % categories.len();

    let mut start = 0;
    let shares = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let size = base + usize::from(i < extra);
            let ids = storages[start..start + size].iter().map(|s| s.id).collect();
            start += size;
            (category.clone(), ids)
        })
        .collect();

    Partition { shares }
}

/// First non-full storage in `category`'s share.
pub fn allocate(
    storages:   &[Storage],
    categories: &[Category],
    category:   &Category,
) -> TaskResult<StorageId> {
    let partition = category_partition(storages, categories);
    let share = partition
        .get(category)
        .ok_or_else(|| TaskError::UnknownCategory(category.clone()))?;

    share
        .iter()
        .copied()
        .find(|id| storages.iter().any(|s| s.id == *id && !s.is_full()))
        .ok_or_else(|| TaskError::NoSpace(category.clone()))
}
