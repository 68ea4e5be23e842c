use std::collections::BTreeSet;

use super::model::{Category, Region, SalesDataset, SalesRecord};

// ---------------------------------------------------------------------------
// Filter selection: which Regions and Categories are shown
// ---------------------------------------------------------------------------

/// The two multi-select lists in the side panel.
///
/// Unlike a "no filter" convention, an empty set really means nothing is
/// selected: a record passes only when both its region and its category
/// are in the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<Region>,
    pub categories: BTreeSet<Category>,
}

impl FilterSelection {
    /// Everything present in the dataset selected, the initial state.
    pub fn all(dataset: &SalesDataset) -> Self {
        FilterSelection {
            regions: dataset.regions.clone(),
            categories: dataset.categories.clone(),
        }
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.regions.contains(&record.region) && self.categories.contains(&record.category)
    }
}

/// Return indices of records that pass the selection, in dataset order.
pub fn filtered_indices(dataset: &SalesDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn dataset() -> SalesDataset {
        SalesDataset::from_records(vec![
            record((2019, 1, 5), "iPhone", 1, 700.0, "Boston"),
            record((2019, 1, 6), "27in 4K Monitor", 1, 389.99, "Dallas"),
            record((2019, 2, 7), "USB-C Charging Cable", 3, 11.95, "Boston"),
            record((2019, 2, 8), "AA Batteries (4-pack)", 2, 3.84, "Austin"),
        ])
    }

    #[test]
    fn everything_selected_keeps_every_row() {
        let ds = dataset();
        let sel = FilterSelection::all(&ds);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2, 3]);
    }

    #[test]
    fn region_and_category_must_both_match() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = BTreeSet::from([Region::East]);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);

        sel.categories = BTreeSet::from([Category::Accessories, Category::Electronics]);
        assert_eq!(filtered_indices(&ds, &sel), vec![2]);
    }

    #[test]
    fn empty_region_set_selects_nothing() {
        let ds = dataset();
        let mut sel = FilterSelection::all(&ds);
        sel.regions.clear();
        assert!(filtered_indices(&ds, &sel).is_empty());
    }
}
