use super::DataLoadError;
use crate::model::{
    block_group::BlockGroup,
    calibration::{BaselineVisitRecord, BaselineVisitation},
    distance::{DistanceMatrix, DISTANCE_TABLE},
    population::{Population, POPULATION_TABLE},
    site::{
        site_attributes::parse_attribute_str, Site, SiteAttributes, SiteCoefficients, SiteRecord,
        ATTRIBUTE_NAMES,
    },
};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use indexmap::IndexMap;
use itertools::Itertools;
use kdam::{Bar, BarBuilder, BarExt};
use std::{
    collections::{BTreeMap, HashSet},
    fs::File,
    io::{BufReader, Read},
};

pub const SITE_TABLE: &str = "site";
pub const COEFFICIENTS_TABLE: &str = "site coefficients";
pub const BASELINE_VISITS_TABLE: &str = "baseline visits";

pub fn is_gzip(filepath: &str) -> bool {
    filepath.ends_with(".gz")
}

/// opens a reference table file, decompressing it when the filename ends in `.gz`.
pub fn open_table(table: &str, filepath: &str) -> Result<Box<dyn Read>, DataLoadError> {
    let f = File::open(filepath).map_err(|e| DataLoadError::MissingTable {
        table: table.to_string(),
        filepath: filepath.to_string(),
        source: e,
    })?;
    let r: Box<dyn Read> = if is_gzip(filepath) {
        Box::new(BufReader::new(GzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(r)
}

/// reads the site catalog, keyed by site name.
pub fn read_sites<R: Read>(
    reader: R,
    bar_builder: Option<BarBuilder>,
) -> Result<BTreeMap<String, Site>, DataLoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = read_headers(&mut csv_reader, SITE_TABLE)?;
    let expected = ["name", "latitude", "longitude"]
        .into_iter()
        .chain(ATTRIBUTE_NAMES)
        .collect_vec();
    require_columns(&headers, &expected, SITE_TABLE)?;

    let mut bar = build_bar(bar_builder)?;
    let mut sites = BTreeMap::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let record = row.map_err(|e| csv_error(SITE_TABLE, e))?;
        check_numeric_cells(&record, &headers, &expected[1..], row_idx, SITE_TABLE)?;
        let site = record
            .deserialize::<SiteRecord>(Some(&headers))
            .map(Site::from)
            .map_err(|e| csv_error(SITE_TABLE, e))?;
        if sites.contains_key(&site.name) {
            return Err(DataLoadError::DuplicateKey {
                table: SITE_TABLE.to_string(),
                key: site.name,
            });
        }
        sites.insert(site.name.clone(), site);
        tick(&mut bar);
    }
    finish(bar);
    Ok(sites)
}

/// reads the single-row site coefficient table.
pub fn read_coefficients<R: Read>(reader: R) -> Result<SiteCoefficients, DataLoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = read_headers(&mut csv_reader, COEFFICIENTS_TABLE)?;
    require_columns(&headers, &ATTRIBUTE_NAMES, COEFFICIENTS_TABLE)?;
    let rows = csv_reader
        .records()
        .enumerate()
        .map(|(row_idx, row)| {
            let record = row.map_err(|e| csv_error(COEFFICIENTS_TABLE, e))?;
            check_numeric_cells(&record, &headers, &ATTRIBUTE_NAMES, row_idx, COEFFICIENTS_TABLE)?;
            record
                .deserialize::<SiteAttributes>(Some(&headers))
                .map_err(|e| csv_error(COEFFICIENTS_TABLE, e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let n_rows = rows.len();
    match rows.into_iter().exactly_one() {
        Ok(row) => Ok(SiteCoefficients::from(row)),
        Err(_) => Err(DataLoadError::schema_mismatch(
            COEFFICIENTS_TABLE,
            format!("expected exactly one row of coefficients, found {n_rows}"),
        )),
    }
}

/// reads a wide distance matrix. the first column holds site names and each
/// following column is one block group.
pub fn read_distance_matrix<R: Read>(
    reader: R,
    bar_builder: Option<BarBuilder>,
) -> Result<DistanceMatrix, DataLoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = read_headers(&mut csv_reader, DISTANCE_TABLE)?;
    if headers.len() < 2 {
        return Err(DataLoadError::schema_mismatch(
            DISTANCE_TABLE,
            String::from("expected a site name column followed by at least one block group column"),
        ));
    }
    if let Some(dup) = headers.iter().skip(1).duplicates().next() {
        return Err(DataLoadError::DuplicateKey {
            table: DISTANCE_TABLE.to_string(),
            key: dup.to_string(),
        });
    }
    let block_groups = headers
        .iter()
        .skip(1)
        .map(BlockGroup::from_label)
        .collect_vec();

    let mut bar = build_bar(bar_builder)?;
    let mut rows: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let record = row.map_err(|e| csv_error(DISTANCE_TABLE, e))?;
        let (name, values) = read_keyed_row(&record, &headers, row_idx, DISTANCE_TABLE)?;
        if rows.contains_key(&name) {
            return Err(DataLoadError::DuplicateKey {
                table: DISTANCE_TABLE.to_string(),
                key: name,
            });
        }
        rows.insert(name, values);
        tick(&mut bar);
    }
    finish(bar);
    DistanceMatrix::new(block_groups, rows)
}

/// reads the population table. the first column holds block group ids and
/// each following column is one demographic group.
pub fn read_population<R: Read>(reader: R) -> Result<Population, DataLoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = read_headers(&mut csv_reader, POPULATION_TABLE)?;
    if headers.len() < 2 {
        return Err(DataLoadError::schema_mismatch(
            POPULATION_TABLE,
            String::from("expected a block group column followed by at least one demographic group column"),
        ));
    }
    if let Some(dup) = headers.iter().skip(1).duplicates().next() {
        return Err(DataLoadError::DuplicateKey {
            table: POPULATION_TABLE.to_string(),
            key: dup.to_string(),
        });
    }
    let mut block_groups = vec![];
    let mut columns: Vec<Vec<f64>> = vec![vec![]; headers.len() - 1];
    for (row_idx, row) in csv_reader.records().enumerate() {
        let record = row.map_err(|e| csv_error(POPULATION_TABLE, e))?;
        let (block_group, values) = read_keyed_row(&record, &headers, row_idx, POPULATION_TABLE)?;
        block_groups.push(block_group);
        for (col, value) in columns.iter_mut().zip(values) {
            col.push(value);
        }
    }
    let groups = headers
        .iter()
        .skip(1)
        .map(String::from)
        .zip(columns)
        .collect::<IndexMap<_, _>>();
    Population::new(block_groups, groups)
}

/// reads the `site_name,visits` baseline visitation table.
pub fn read_baseline_visits<R: Read>(reader: R) -> Result<BaselineVisitation, DataLoadError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = read_headers(&mut csv_reader, BASELINE_VISITS_TABLE)?;
    require_columns(&headers, &["site_name", "visits"], BASELINE_VISITS_TABLE)?;
    let mut visits = BTreeMap::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let record = row.map_err(|e| csv_error(BASELINE_VISITS_TABLE, e))?;
        check_numeric_cells(&record, &headers, &["visits"], row_idx, BASELINE_VISITS_TABLE)?;
        let record = record
            .deserialize::<BaselineVisitRecord>(Some(&headers))
            .map_err(|e| csv_error(BASELINE_VISITS_TABLE, e))?;
        if visits.insert(record.site_name.clone(), record.visits).is_some() {
            return Err(DataLoadError::DuplicateKey {
                table: BASELINE_VISITS_TABLE.to_string(),
                key: record.site_name,
            });
        }
    }
    Ok(BaselineVisitation::new(visits))
}

fn read_headers<R: Read>(
    reader: &mut csv::Reader<R>,
    table: &str,
) -> Result<StringRecord, DataLoadError> {
    reader
        .headers()
        .cloned()
        .map_err(|e| csv_error(table, e))
}

fn require_columns(
    headers: &StringRecord,
    expected: &[&str],
    table: &str,
) -> Result<(), DataLoadError> {
    let present = headers.iter().collect::<HashSet<_>>();
    match expected.iter().find(|col| !present.contains(*col)) {
        Some(col) => Err(DataLoadError::MissingColumn {
            table: table.to_string(),
            column: col.to_string(),
        }),
        None => Ok(()),
    }
}

/// splits a row into its key (first field) and its numeric values
fn read_keyed_row(
    record: &StringRecord,
    headers: &StringRecord,
    row_idx: usize,
    table: &str,
) -> Result<(String, Vec<f64>), DataLoadError> {
    let key = record
        .get(0)
        .map(|k| k.trim().to_string())
        .ok_or_else(|| DataLoadError::schema_mismatch(table, format!("row {row_idx} is empty")))?;
    let values = record
        .iter()
        .enumerate()
        .skip(1)
        .map(|(col_idx, cell)| {
            parse_attribute_str(cell)
                .ok_or_else(|| malformed_value(headers, col_idx, cell, row_idx, table))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((key, values))
}

/// checks that each named column of a row holds a finite number or boolean token
fn check_numeric_cells(
    record: &StringRecord,
    headers: &StringRecord,
    columns: &[&str],
    row_idx: usize,
    table: &str,
) -> Result<(), DataLoadError> {
    for (col_idx, header) in headers.iter().enumerate() {
        if !columns.contains(&header) {
            continue;
        }
        let cell = record.get(col_idx).unwrap_or_default();
        if parse_attribute_str(cell).is_none() {
            return Err(malformed_value(headers, col_idx, cell, row_idx, table));
        }
    }
    Ok(())
}

fn malformed_value(
    headers: &StringRecord,
    col_idx: usize,
    cell: &str,
    row_idx: usize,
    table: &str,
) -> DataLoadError {
    DataLoadError::MalformedValue {
        table: table.to_string(),
        row: row_idx,
        column: headers.get(col_idx).unwrap_or_default().to_string(),
        value: cell.to_string(),
    }
}

fn csv_error(table: &str, source: csv::Error) -> DataLoadError {
    DataLoadError::CsvError {
        table: table.to_string(),
        source,
    }
}

fn build_bar(bar_builder: Option<BarBuilder>) -> Result<Option<Bar>, DataLoadError> {
    bar_builder
        .map(|b| {
            b.build().map_err(|e| {
                DataLoadError::InternalError(format!("error building progress bar: {e}"))
            })
        })
        .transpose()
}

fn tick(bar: &mut Option<Bar>) {
    if let Some(b) = bar.as_mut() {
        let _ = b.update(1);
    }
}

fn finish(bar: Option<Bar>) {
    if bar.is_some() {
        eprintln!();
    }
}
