use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Region / Category – the two derived categorical columns
// ---------------------------------------------------------------------------

/// Coarse geographic bucket derived from the purchase city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    East,
    West,
    South,
    North,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::East,
        Region::West,
        Region::South,
        Region::North,
        Region::Central,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::East => "East",
            Region::West => "West",
            Region::South => "South",
            Region::North => "North",
            Region::Central => "Central",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse product-type bucket derived from the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Electronics,
    Mobile,
    Accessories,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Mobile,
        Category::Accessories,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Mobile => "Mobile",
            Category::Accessories => "Accessories",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one cleaned row of the extract
// ---------------------------------------------------------------------------

/// A single sale line after cleaning and derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDateTime,
    pub product: String,
    pub units_sold: i64,
    pub unit_price: f64,
    /// Taken from the source `Sales` column, never recomputed.
    pub revenue: f64,
    pub purchase_address: String,
    pub cost: f64,
    pub profit: f64,
    pub city_name: String,
    pub region: Region,
    pub category: Category,
    /// Every other source column (e.g. `Order_ID`), kept verbatim so that
    /// duplicate removal compares whole rows.
    pub extra: BTreeMap<String, String>,
}

/// Hashable identity of a record used for duplicate removal.
/// Floats compare by bit pattern, which is exact row-value equality.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct RecordKey<'a> {
    date: NaiveDateTime,
    product: &'a str,
    units_sold: i64,
    unit_price: u64,
    revenue: u64,
    purchase_address: &'a str,
    extra: Vec<(&'a str, CellKey<'a>)>,
}

/// A passthrough cell as a typed reader would see it: numeric text compares
/// by value (`176558` equals `176558.0`), anything else verbatim.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Number(u64),
    Text(&'a str),
}

impl<'a> CellKey<'a> {
    fn new(cell: &'a str) -> Self {
        match cell.trim().parse::<f64>() {
            // `+ 0.0` folds -0.0 into 0.0.
            Ok(v) if v.is_finite() => CellKey::Number((v + 0.0).to_bits()),
            _ => CellKey::Text(cell),
        }
    }
}

impl SalesRecord {
    pub(crate) fn key(&self) -> RecordKey<'_> {
        // Cost, profit, city, region and category are functions of the
        // fields below, so they need not take part in the comparison.
        RecordKey {
            date: self.date,
            product: &self.product,
            units_sold: self.units_sold,
            unit_price: self.unit_price.to_bits(),
            revenue: self.revenue.to_bits(),
            purchase_address: &self.purchase_address,
            extra: self
                .extra
                .iter()
                .map(|(name, cell)| (name.as_str(), CellKey::new(cell)))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete cleaned extract
// ---------------------------------------------------------------------------

/// The cleaned dataset with the distinct filter values pre-computed.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub records: Vec<SalesRecord>,
    /// Regions present in the data (populates the Region multi-select).
    pub regions: BTreeSet<Region>,
    /// Categories present in the data (populates the Category multi-select).
    pub categories: BTreeSet<Category>,
}

impl SalesDataset {
    /// Build the filter indices from the cleaned records.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let regions = records.iter().map(|r| r.region).collect();
        let categories = records.iter().map(|r| r.category).collect();
        SalesDataset {
            records,
            regions,
            categories,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::classify::{category_for_product, region_for_city};
    use chrono::NaiveDate;

    /// Build a record the way the cleaner would, for use across test modules.
    pub(crate) fn record(
        ymd: (i32, u32, u32),
        product: &str,
        units_sold: i64,
        unit_price: f64,
        city: &str,
    ) -> SalesRecord {
        let revenue = units_sold as f64 * unit_price;
        let cost = revenue * crate::config::COST_RATIO;
        SalesRecord {
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            product: product.to_string(),
            units_sold,
            unit_price,
            revenue,
            purchase_address: format!("1 Main St, {city}, XX 00000"),
            cost,
            profit: revenue - cost,
            city_name: city.to_string(),
            region: region_for_city(city),
            category: category_for_product(product),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn dataset_collects_distinct_filter_values() {
        let ds = SalesDataset::from_records(vec![
            record((2019, 1, 2), "iPhone", 1, 700.0, "Boston"),
            record((2019, 1, 3), "Wired Headphones", 2, 11.99, "Boston"),
            record((2019, 2, 3), "Lightning Charging Cable", 1, 14.95, "Austin"),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.regions.iter().copied().collect::<Vec<_>>(),
            vec![Region::East, Region::Central]
        );
        assert_eq!(
            ds.categories.iter().copied().collect::<Vec<_>>(),
            vec![Category::Mobile, Category::Accessories]
        );
    }

    #[test]
    fn record_key_includes_passthrough_columns() {
        let a = record((2019, 1, 2), "iPhone", 1, 700.0, "Boston");
        let mut b = a.clone();
        assert_eq!(a.key(), b.key());
        b.extra.insert("Order_ID".into(), "176558".into());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn numeric_passthrough_compares_by_value() {
        let mut a = record((2019, 1, 2), "iPhone", 1, 700.0, "Boston");
        let mut b = a.clone();
        a.extra.insert("Order_ID".into(), "176558".into());
        b.extra.insert("Order_ID".into(), "176558.0".into());
        assert_eq!(a.key(), b.key());

        b.extra.insert("Order_ID".into(), "176558.5".into());
        assert_ne!(a.key(), b.key());

        // Text stays verbatim.
        a.extra.insert("Note".into(), "gift".into());
        b.extra.insert("Order_ID".into(), "176558".into());
        b.extra.insert("Note".into(), "Gift".into());
        assert_ne!(a.key(), b.key());
    }
}
