use super::AppError;
use crate::model::{
    equity::BlockGroupUtility, merge::merge_ops::SiteCoordinates, SiteMatrix, SiteSummary,
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
};

#[derive(Serialize)]
struct VisitRow<'a> {
    site_name: &'a str,
    visits: f64,
}

#[derive(Serialize)]
struct LocationRow<'a> {
    site_name: &'a str,
    latitude: f64,
    longitude: f64,
}

/// a buffered writer to `output`, or to stdout when no path is given
pub fn open_output(output: Option<&str>) -> Result<Box<dyn Write>, AppError> {
    match output {
        Some(filepath) => {
            let file = File::create(filepath).map_err(|e| AppError::WriteError {
                filepath: filepath.to_string(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

pub fn write_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer).map_err(|e| AppError::WriteError {
        filepath: String::from("<output>"),
        source: e,
    })
}

pub fn write_visits<W: Write>(visits: &BTreeMap<String, f64>, writer: W) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (site_name, visits) in visits.iter() {
        csv_writer.serialize(VisitRow {
            site_name,
            visits: *visits,
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// wide table with one row per site and one column per block group
pub fn write_site_matrix<W: Write>(matrix: &SiteMatrix, writer: W) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let header =
        std::iter::once("site_name").chain(matrix.block_groups().iter().map(String::as_str));
    csv_writer.write_record(header)?;
    for (site, row) in matrix.sites().iter().zip(matrix.rows().iter()) {
        let record = std::iter::once(site.clone()).chain(row.iter().map(|v| v.to_string()));
        csv_writer.write_record(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// one row per block group and one column per demographic group
pub fn write_block_group_utility<W: Write>(
    utility: &BlockGroupUtility,
    writer: W,
) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let header = std::iter::once("block_group").chain(utility.groups.iter().map(String::as_str));
    csv_writer.write_record(header)?;
    for (block_group, row) in utility.block_groups.iter() {
        let record =
            std::iter::once(block_group.clone()).chain(row.iter().map(|v| v.to_string()));
        csv_writer.write_record(record)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_locations<W: Write>(
    locations: &BTreeMap<String, SiteCoordinates>,
    writer: W,
) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (site_name, coords) in locations.iter() {
        csv_writer.serialize(LocationRow {
            site_name,
            latitude: coords.latitude,
            longitude: coords.longitude,
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_summary<W: Write>(summary: &[SiteSummary], writer: W) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in summary.iter() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
