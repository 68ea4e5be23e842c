//! Writes a deterministic synthetic sales extract (`sales_data.csv` and
//! `sales_data.parquet`) in the layout of the monthly electronics-store
//! exports the dashboard reads.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const ROWS: usize = 2_000;
/// Roughly one row in this many is written twice, like the real exports.
const DUPLICATE_EVERY: u64 = 50;

/// (product, unit price)
const PRODUCTS: &[(&str, f64)] = &[
    ("USB-C Charging Cable", 11.95),
    ("Lightning Charging Cable", 14.95),
    ("AAA Batteries (4-pack)", 2.99),
    ("AA Batteries (4-pack)", 3.84),
    ("Wired Headphones", 11.99),
    ("Apple Airpods Headphones", 150.0),
    ("Bose SoundSport Headphones", 99.99),
    ("27in FHD Monitor", 149.99),
    ("27in 4K Gaming Monitor", 389.99),
    ("34in Ultrawide Monitor", 379.99),
    ("Flatscreen TV", 300.0),
    ("Macbook Pro Laptop", 1700.0),
    ("ThinkPad Laptop", 999.99),
    ("iPhone", 700.0),
    ("Google Phone", 600.0),
    ("Vareebadd Phone", 400.0),
    ("20in Monitor", 109.99),
    ("LG Washing Machine", 600.0),
    ("LG Dryer", 600.0),
];

/// (city, state, zip)
const CITIES: &[(&str, &str, &str)] = &[
    ("New York City", "NY", "10001"),
    ("Boston", "MA", "02215"),
    ("San Francisco", "CA", "94016"),
    ("Los Angeles", "CA", "90001"),
    ("Dallas", "TX", "75001"),
    ("Atlanta", "GA", "30301"),
    ("Seattle", "WA", "98101"),
    ("Portland", "OR", "97035"),
    ("Austin", "TX", "73301"),
];

const STREETS: &[&str] = &["Main St", "Park St", "Lincoln St", "Spruce St", "Hill St", "Church St"];

/// One output row, with the column names of the source exports.
#[derive(Debug, Clone, Serialize)]
struct SaleRow {
    #[serde(rename = "Order ID")]
    order_id: i64,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Quantity Ordered")]
    quantity: i64,
    #[serde(rename = "Price Each")]
    price: f64,
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Purchase Address")]
    address: String,
    #[serde(rename = "Sales")]
    sales: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SaleRow> {
    let mut rows = Vec::with_capacity(ROWS + ROWS / DUPLICATE_EVERY as usize);
    let mut order_id = 176_558;

    while rows.len() < ROWS {
        let &(product, price) = rng.pick(PRODUCTS);
        let &(city, state, zip) = rng.pick(CITIES);
        let street = rng.pick(STREETS);
        // Cheap items sell in larger quantities.
        let quantity = if price < 20.0 { 1 + rng.below(3) as i64 } else { 1 };
        let month = 1 + rng.below(12);
        let day = 1 + rng.below(28);
        let hour = rng.below(24);
        let minute = rng.below(60);

        let row = SaleRow {
            order_id,
            product: product.to_string(),
            quantity,
            price,
            order_date: format!("{month:02}/{day:02}/19 {hour:02}:{minute:02}"),
            address: format!(
                "{} {street}, {city}, {state} {zip}",
                100 + rng.below(900)
            ),
            sales: (quantity as f64 * price * 100.0).round() / 100.0,
        };
        order_id += 1;

        if rng.below(DUPLICATE_EVERY) == 0 {
            rows.push(row.clone());
        }
        rows.push(row);
    }
    rows
}

fn write_csv(path: &str, rows: &[SaleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[SaleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Order ID", DataType::Int64, false),
        Field::new("Product", DataType::Utf8, false),
        Field::new("Quantity Ordered", DataType::Int64, false),
        Field::new("Price Each", DataType::Float64, false),
        Field::new("Order Date", DataType::Utf8, false),
        Field::new("Purchase Address", DataType::Utf8, false),
        Field::new("Sales", DataType::Float64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.order_id))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.product))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.quantity))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.price))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.order_date))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.address))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sales))),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv("sales_data.csv", &rows)?;
    write_parquet("sales_data.parquet", &rows)?;

    log::info!("Wrote {} rows to sales_data.csv and sales_data.parquet", rows.len());
    println!("Wrote {} sale lines to sales_data.csv / sales_data.parquet", rows.len());
    Ok(())
}
