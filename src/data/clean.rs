use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::classify::{category_for_product, city_from_address, region_for_city};
use super::error::{LoadError, LoadResult};
use super::model::{SalesDataset, SalesRecord};
use crate::config::COST_RATIO;

// ---------------------------------------------------------------------------
// RawTable – what every input format is reduced to
// ---------------------------------------------------------------------------

/// Header row plus text cells, exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Header normalisation
// ---------------------------------------------------------------------------

/// Incidental index column written by `df.to_csv()` without `index=False`.
pub const DROPPED_INDEX_COLUMN: &str = "Unnamed:_0";

/// (source header, cleaned header) for the columns the dashboard relies on.
const REQUIRED_COLUMNS: [(&str, &str); 6] = [
    ("Order_Date", "Date"),
    ("Quantity_Ordered", "Units_Sold"),
    ("Price_Each", "Unit_Price"),
    ("Sales", "Revenue"),
    ("Product", "Product"),
    ("Purchase_Address", "Purchase_Address"),
];

/// Trim and replace internal spaces with underscores.
pub fn normalize_header(header: &str) -> String {
    header.trim().replace(' ', "_")
}

fn rename(header: String) -> String {
    REQUIRED_COLUMNS
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, renamed)| renamed.to_string())
        .unwrap_or(header)
}

/// Positions of the required columns in a row.
struct ColumnIndex {
    date: usize,
    units_sold: usize,
    unit_price: usize,
    revenue: usize,
    product: usize,
    address: usize,
    /// Every other kept column: (position, cleaned name).
    extra: Vec<(usize, String)>,
}

impl ColumnIndex {
    fn resolve(raw_headers: &[String]) -> LoadResult<Self> {
        let headers: Vec<Option<String>> = raw_headers
            .iter()
            .enumerate()
            .map(|(i, h)| match normalize_header(h) {
                // Blank headers get the name a dataframe reader would give them.
                h if h.is_empty() => format!("Unnamed:_{i}"),
                h => h,
            })
            .map(|h| (h != DROPPED_INDEX_COLUMN).then(|| rename(h)))
            .collect();

        let find = |(source, cleaned): (&'static str, &'static str)| {
            headers
                .iter()
                .position(|h| h.as_deref() == Some(cleaned))
                .ok_or(LoadError::MissingColumn(source))
        };

        let [date, units_sold, unit_price, revenue, product, address] = REQUIRED_COLUMNS;
        let index = ColumnIndex {
            date: find(date)?,
            units_sold: find(units_sold)?,
            unit_price: find(unit_price)?,
            revenue: find(revenue)?,
            product: find(product)?,
            address: find(address)?,
            extra: Vec::new(),
        };

        let required = index.required();
        let extra = headers
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !required.contains(i))
            .filter_map(|(i, h)| h.map(|h| (i, h)))
            .collect();

        Ok(ColumnIndex { extra, ..index })
    }

    fn required(&self) -> [usize; 6] {
        [
            self.date,
            self.units_sold,
            self.unit_price,
            self.revenue,
            self.product,
            self.address,
        ]
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Timestamp layouts accepted for the order date, tried in order.
/// The first is the layout of the monthly sales extracts.
const DATE_TIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an order date.  Also accepts RFC 3339 timestamps with an offset
/// (converted to UTC), a bare `%Y-%m-%d` (midnight) and integer epoch
/// milliseconds, which is how `to_json` writes datetimes.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            value
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.naive_utc())
        })
}

fn parse_float(value: &str, row: usize, column: &'static str) -> LoadResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        })
}

/// Integer count; an integral float such as `2.0` is accepted too.
fn parse_count(value: &str, row: usize, column: &'static str) -> LoadResult<i64> {
    let trimmed = value.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(LoadError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Turn a raw table into the cleaned dataset.
///
/// Stages run column-wise in a fixed order: `Date` → numeric columns →
/// `Cost`/`Profit` → `City_Name` → `Region` → `Category` → duplicate
/// removal.  The first bad cell aborts the load, so a bad date is reported
/// ahead of a bad number anywhere in the file.
pub fn clean_table(table: RawTable) -> LoadResult<SalesDataset> {
    let cols = ColumnIndex::resolve(&table.headers)?;
    let rows = &table.rows;

    let dates = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let value = &r[cols.date];
            parse_date(value).ok_or_else(|| LoadError::InvalidDate {
                row: i,
                value: value.clone(),
            })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let units_sold = rows
        .iter()
        .enumerate()
        .map(|(i, r)| parse_count(&r[cols.units_sold], i, "Quantity_Ordered"))
        .collect::<LoadResult<Vec<_>>>()?;
    let unit_price = rows
        .iter()
        .enumerate()
        .map(|(i, r)| parse_float(&r[cols.unit_price], i, "Price_Each"))
        .collect::<LoadResult<Vec<_>>>()?;
    let revenue = rows
        .iter()
        .enumerate()
        .map(|(i, r)| parse_float(&r[cols.revenue], i, "Sales"))
        .collect::<LoadResult<Vec<_>>>()?;

    let cost: Vec<f64> = revenue.iter().map(|r| r * COST_RATIO).collect();

    let cities = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let address = &r[cols.address];
            city_from_address(address).ok_or_else(|| LoadError::MalformedAddress {
                row: i,
                address: address.clone(),
            })
        })
        .collect::<LoadResult<Vec<_>>>()?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let city = cities[i];
        let product = &row[cols.product];
        records.push(SalesRecord {
            date: dates[i],
            product: product.clone(),
            units_sold: units_sold[i],
            unit_price: unit_price[i],
            revenue: revenue[i],
            purchase_address: row[cols.address].clone(),
            cost: cost[i],
            profit: revenue[i] - cost[i],
            city_name: city.to_string(),
            region: region_for_city(city),
            category: category_for_product(product),
            extra: cols
                .extra
                .iter()
                .map(|(pos, name)| (name.clone(), row[*pos].clone()))
                .collect::<BTreeMap<_, _>>(),
        });
    }

    let before = records.len();
    let records = drop_duplicates(records);
    log::debug!(
        "Cleaned {} rows, dropped {} duplicates",
        before,
        before - records.len()
    );

    Ok(SalesDataset::from_records(records))
}

/// Remove exact duplicates, keeping the first occurrence and the original order.
pub fn drop_duplicates(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(records.len());
        records.iter().map(|r| seen.insert(r.key())).collect()
    };
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Category, Region};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    const HEADERS: &[&str] = &[
        "Unnamed: 0",
        "Order ID",
        "Product",
        "Quantity Ordered",
        "Price Each",
        "Order Date",
        "Purchase Address",
        " Sales ",
    ];

    #[test]
    fn headers_are_trimmed_and_underscored() {
        assert_eq!(normalize_header("  Order Date "), "Order_Date");
        assert_eq!(normalize_header("Unnamed: 0"), DROPPED_INDEX_COLUMN);
        assert_eq!(normalize_header("Product"), "Product");
    }

    #[test]
    fn derives_every_column() {
        let ds = clean_table(table(
            HEADERS,
            &[&[
                "0",
                "176558",
                "USB-C Charging Cable",
                "2",
                "11.95",
                "04/19/19 08:46",
                "917 1st St, Boston, MA 02215",
                "23.9",
            ]],
        ))
        .unwrap();

        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(
            r.date,
            NaiveDate::from_ymd_opt(2019, 4, 19)
                .unwrap()
                .and_hms_opt(8, 46, 0)
                .unwrap()
        );
        assert_eq!(r.units_sold, 2);
        assert_eq!(r.unit_price, 11.95);
        assert_eq!(r.revenue, 23.9);
        assert!((r.cost - 23.9 * 0.70).abs() < 1e-9);
        assert!((r.profit - (23.9 - 23.9 * 0.70)).abs() < 1e-9);
        assert_eq!(r.city_name, "Boston");
        assert_eq!(r.region, Region::East);
        assert_eq!(r.category, Category::Accessories);

        // The index column is gone, other columns pass through under their cleaned names.
        assert_eq!(r.extra.len(), 1);
        assert_eq!(r.extra.get("Order_ID").map(String::as_str), Some("176558"));
    }

    #[test]
    fn blank_leading_header_is_the_dropped_index() {
        let mut headers = HEADERS.to_vec();
        headers[0] = "";
        let ds = clean_table(table(
            &headers,
            &[&[
                "7",
                "176558",
                "Lightning Charging Cable",
                "1",
                "14.95",
                "04/19/19 08:46",
                "1 Main St, Portland, OR 97035",
                "14.95",
            ]],
        ))
        .unwrap();
        assert_eq!(ds.records[0].extra.keys().collect::<Vec<_>>(), vec!["Order_ID"]);
        assert_eq!(ds.records[0].region, Region::North);
    }

    #[test]
    fn exact_duplicates_collapse_to_one_row() {
        let row: &[&str] = &[
            "0",
            "176559",
            "27in 4K Monitor",
            "1",
            "389.99",
            "04/07/19 22:30",
            "44 Pine St, Austin, TX 73301",
            "389.99",
        ];
        let ds = clean_table(table(HEADERS, &[row, row])).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].category, Category::Electronics);
        assert_eq!(ds.records[0].region, Region::Central);
    }

    #[test]
    fn rows_differing_only_by_index_are_duplicates() {
        let mut second = vec![
            "1",
            "176559",
            "Google Phone",
            "1",
            "600",
            "04/07/19 22:30",
            "44 Pine St, Seattle, WA 98101",
            "600",
        ];
        let first = {
            let mut r = second.clone();
            r[0] = "0";
            r
        };
        let ds = clean_table(table(HEADERS, &[first.as_slice(), second.as_slice()])).unwrap();
        assert_eq!(ds.len(), 1);

        // A different order id keeps both rows.
        second[1] = "176560";
        let ds = clean_table(table(HEADERS, &[first.as_slice(), second.as_slice()])).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].extra["Order_ID"], "176559");
        assert_eq!(ds.records[1].extra["Order_ID"], "176560");
    }

    #[test]
    fn missing_required_column_is_reported_by_source_name() {
        let err = clean_table(table(
            &["Order Date", "Product", "Quantity Ordered", "Price Each", "Purchase Address"],
            &[],
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Sales")));
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let err = clean_table(table(
            HEADERS,
            &[&[
                "0",
                "1",
                "iPhone",
                "1",
                "700",
                "Order Date",
                "1 Main St, Dallas, TX 75001",
                "700",
            ]],
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 0, .. }));
    }

    #[test]
    fn address_without_comma_is_fatal() {
        let err = clean_table(table(
            HEADERS,
            &[&[
                "0",
                "1",
                "iPhone",
                "1",
                "700",
                "04/07/19 22:30",
                "nowhere in particular",
                "700",
            ]],
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::MalformedAddress { row: 0, .. }));
    }

    #[test]
    fn non_numeric_quantity_is_fatal() {
        let err = clean_table(table(
            HEADERS,
            &[&[
                "0",
                "1",
                "iPhone",
                "one",
                "700",
                "04/07/19 22:30",
                "1 Main St, Dallas, TX 75001",
                "700",
            ]],
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidNumber {
                column: "Quantity_Ordered",
                ..
            }
        ));
    }

    #[test]
    fn date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2019, 12, 30)
            .unwrap()
            .and_hms_opt(0, 1, 0)
            .unwrap();
        assert_eq!(parse_date("12/30/19 00:01"), Some(expected));
        assert_eq!(parse_date("12/30/2019 00:01"), Some(expected));
        assert_eq!(parse_date("2019-12-30 00:01:00"), Some(expected));
        assert_eq!(parse_date("2019-12-30T00:01:00"), Some(expected));
        assert_eq!(parse_date(" 2019-12-30 00:01 "), Some(expected));
        assert_eq!(parse_date("1577664060000"), Some(expected));
        assert_eq!(
            parse_date("2019-12-30"),
            NaiveDate::from_ymd_opt(2019, 12, 30).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn bad_date_is_reported_before_bad_number() {
        let err = clean_table(table(
            HEADERS,
            &[
                &[
                    "0",
                    "1",
                    "iPhone",
                    "1",
                    "700",
                    "04/07/19 22:30",
                    "1 Main St, Dallas, TX 75001",
                    "n/a",
                ],
                &[
                    "1",
                    "2",
                    "iPhone",
                    "1",
                    "700",
                    "not a date",
                    "1 Main St, Dallas, TX 75001",
                    "700",
                ],
            ],
        ))
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn offset_timestamps_convert_to_utc() {
        let expected = NaiveDate::from_ymd_opt(2019, 4, 19)
            .unwrap()
            .and_hms_opt(8, 46, 0)
            .unwrap();
        assert_eq!(parse_date("2019-04-19T08:46:00+00:00"), Some(expected));
        assert_eq!(parse_date("2019-04-19T08:46:00Z"), Some(expected));
        assert_eq!(parse_date("2019-04-19T10:46:00+02:00"), Some(expected));
    }

    #[test]
    fn numeric_passthrough_cells_compare_by_value() {
        let row = |order_id: &'static str| -> Vec<&'static str> {
            vec![
                "0",
                order_id,
                "27in 4K Monitor",
                "1",
                "389.99",
                "04/07/19 22:30",
                "44 Pine St, Austin, TX 73301",
                "389.99",
            ]
        };
        let (a, b) = (row("176558"), row("176558.0"));
        let ds = clean_table(table(HEADERS, &[a.as_slice(), b.as_slice()])).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].extra["Order_ID"], "176558");
    }

    #[test]
    fn integral_float_counts_are_accepted() {
        assert_eq!(parse_count("2.0", 0, "Quantity_Ordered").unwrap(), 2);
        assert!(parse_count("2.5", 0, "Quantity_Ordered").is_err());
    }
}
