use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use super::model::{Category, Region, SalesDataset, SalesRecord};
use crate::config::TOP_PRODUCTS;

// ---------------------------------------------------------------------------
// Aggregates shown by the dashboard
// ---------------------------------------------------------------------------

/// Sums over the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyMetrics {
    pub revenue: f64,
    pub profit: f64,
    pub units_sold: i64,
}

impl KeyMetrics {
    /// Revenue truncated toward zero, as displayed.
    pub fn whole_revenue(&self) -> i64 {
        self.revenue.trunc() as i64
    }

    /// Profit truncated toward zero, as displayed.
    pub fn whole_profit(&self) -> i64 {
        self.profit.trunc() as i64
    }
}

/// Revenue and profit for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    /// First day of the month.
    pub month: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
}

/// Columns entering the correlation matrix, in display order.
pub const CORRELATION_COLUMNS: [&str; 5] = ["Units_Sold", "Unit_Price", "Revenue", "Cost", "Profit"];

/// Pairwise Pearson correlation of [`CORRELATION_COLUMNS`].
/// Entries involving a constant column are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationMatrix {
    pub values: [[f64; 5]; 5],
}

impl CorrelationMatrix {
    pub fn labels(&self) -> &'static [&'static str; 5] {
        &CORRELATION_COLUMNS
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Everything the central panel draws for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub record_count: usize,
    pub metrics: KeyMetrics,
    /// Chronological.
    pub monthly: Vec<MonthlyTotals>,
    /// Descending by revenue.
    pub by_category: Vec<(Category, f64)>,
    /// In region order; only regions with records appear.
    pub by_region: Vec<(Region, f64)>,
    /// At most [`TOP_PRODUCTS`] entries, descending by revenue.
    pub top_products: Vec<(String, f64)>,
    pub correlation: CorrelationMatrix,
}

impl Summary {
    /// Aggregate the records at `indices`.  `None` when the selection is
    /// empty: there is nothing to chart.
    pub fn compute(dataset: &SalesDataset, indices: &[usize]) -> Option<Summary> {
        if indices.is_empty() {
            return None;
        }
        let records: Vec<&SalesRecord> = indices.iter().map(|&i| &dataset.records[i]).collect();

        Some(Summary {
            record_count: records.len(),
            metrics: key_metrics(&records),
            monthly: monthly_totals(&records),
            by_category: revenue_by_category(&records),
            by_region: revenue_by_region(&records),
            top_products: top_products(&records, TOP_PRODUCTS),
            correlation: correlation_matrix(&records),
        })
    }
}

pub fn key_metrics(records: &[&SalesRecord]) -> KeyMetrics {
    records.iter().fold(KeyMetrics::default(), |acc, r| KeyMetrics {
        revenue: acc.revenue + r.revenue,
        profit: acc.profit + r.profit,
        units_sold: acc.units_sold.saturating_add(r.units_sold),
    })
}

pub fn monthly_totals(records: &[&SalesRecord]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = months.entry((r.date.year(), r.date.month())).or_default();
        entry.0 += r.revenue;
        entry.1 += r.profit;
    }
    months
        .into_iter()
        .filter_map(|((year, month), (revenue, profit))| {
            Some(MonthlyTotals {
                month: NaiveDate::from_ymd_opt(year, month, 1)?,
                revenue,
                profit,
            })
        })
        .collect()
}

pub fn revenue_by_category(records: &[&SalesRecord]) -> Vec<(Category, f64)> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.category).or_default() += r.revenue;
    }
    let mut out: Vec<_> = totals.into_iter().collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}

pub fn revenue_by_region(records: &[&SalesRecord]) -> Vec<(Region, f64)> {
    let mut totals: BTreeMap<Region, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.region).or_default() += r.revenue;
    }
    totals.into_iter().collect()
}

/// The `n` products with the largest summed revenue, descending.
/// Equal revenues are ordered by product name.
pub fn top_products(records: &[&SalesRecord], n: usize) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for r in records {
        *totals.entry(r.product.as_str()).or_default() += r.revenue;
    }
    let mut out: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(name, revenue)| (name.to_string(), revenue))
        .collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out.truncate(n);
    out
}

pub fn correlation_matrix(records: &[&SalesRecord]) -> CorrelationMatrix {
    let columns: [Vec<f64>; 5] = [
        records.iter().map(|r| r.units_sold as f64).collect(),
        records.iter().map(|r| r.unit_price).collect(),
        records.iter().map(|r| r.revenue).collect(),
        records.iter().map(|r| r.cost).collect(),
        records.iter().map(|r| r.profit).collect(),
    ];

    let mut values = [[f64::NAN; 5]; 5];
    for i in 0..5 {
        for j in i..5 {
            let c = pearson(&columns[i], &columns[j]);
            let c = if i == j && !c.is_nan() { 1.0 } else { c };
            values[i][j] = c;
            values[j][i] = c;
        }
    }
    CorrelationMatrix { values }
}

/// Pearson correlation coefficient.  `NaN` for fewer than two points or a
/// zero-variance input.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}
