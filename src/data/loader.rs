use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use arrow::error::ArrowError;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::{clean_table, RawTable};
use super::error::{LoadError, LoadResult};
use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a sales extract.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one row per sale line (the usual extract)
/// * `.json`    – `[{ "Order ID": ..., "Product": ..., ... }, ...]`
/// * `.parquet` – any flat schema with the same columns
pub fn load_file(path: &Path) -> LoadResult<SalesDataset> {
    let table = read_table(path)?;
    log::debug!(
        "Read {} rows with headers {:?} from {}",
        table.rows.len(),
        table.headers,
        path.display()
    );
    clean_table(table)
}

/// Read any supported file into a [`RawTable`] without interpreting cells.
pub fn read_table(path: &Path) -> LoadResult<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(open(path)?),
        "json" => read_json(open(path)?),
        "parquet" | "pq" => read_parquet(open(path)?),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::MissingFile(path.to_path_buf()),
        _ => LoadError::Io(e),
    })
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.  Every record must
/// have as many fields as the header.
fn read_csv(file: File) -> LoadResult<RawTable> {
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let rows = reader
        .records()
        .map(|record| -> LoadResult<Vec<String>> {
            Ok(record?.iter().map(str::to_string).collect())
        })
        .collect::<LoadResult<Vec<_>>>()?;

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Order ID": 176558, "Product": "USB-C Charging Cable", ... },
///   ...
/// ]
/// ```
///
/// Headers are the union of keys in first-seen order; a key absent from a
/// record reads as an empty cell.
fn read_json(file: File) -> LoadResult<RawTable> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(file))?;
    let records = root.as_array().ok_or(LoadError::InvalidJsonRecord {
        row: 0,
        reason: "expected a top-level array of records".into(),
    })?;

    let mut objects = Vec::with_capacity(records.len());
    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::InvalidJsonRecord {
            row: i,
            reason: "not a JSON object".into(),
        })?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).  Each cell goes through Arrow's
/// display formatter, so timestamps come out as `2019-04-19T08:46:00`
/// and nulls as empty cells.
fn read_parquet(file: File) -> LoadResult<RawTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch in reader {
        let batch = batch?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, ArrowError>>()?;

        for row in 0..batch.num_rows() {
            rows.push(
                formatters
                    .iter()
                    .map(|f| f.value(row).to_string())
                    .collect(),
            );
        }
    }

    Ok(RawTable { headers, rows })
}
