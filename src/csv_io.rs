use csv::{ByteRecord, ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, FestlangError};
use crate::record::{InputRecord, OutputRecord};

/// Columns every row needs. When one is absent from the header each row is
/// skipped; `festival_id` is optional and defaults to "Unknown".
pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "description", "address"];
pub const FESTIVAL_ID_COLUMN: &str = "festival_id";
pub const OUTPUT_COLUMNS: [&str; 5] = ["festival_id", "name", "description", "address", "lang"];

/// One input row, decoded or not.
///
/// Decoding errors are kept on the row so the batch job can skip it
/// without stopping the whole run.
#[derive(Debug)]
pub struct SourceRow {
    /// 1-based line number in the input file
    pub line: u64,
    /// Raw `festival_id` cell, recovered even when the row is malformed
    pub festival_id: Option<String>,
    pub record: Result<InputRecord>,
}

pub struct FestivalReader<R> {
    reader: csv::Reader<R>,
    headers: ByteRecord,
    id_index: Option<usize>,
    missing_column: Option<&'static str>,
}

impl FestivalReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FestlangError::FileNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> FestivalReader<R> {
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .from_reader(rdr);

        let headers = reader.byte_headers()?.clone();
        let missing_column = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|h| h == column.as_bytes()));
        if let Some(column) = missing_column {
            warn!("Input has no {} column, every row will be skipped", column);
        }
        let id_index = headers.iter().position(|h| h == FESTIVAL_ID_COLUMN.as_bytes());
        if id_index.is_none() {
            debug!("Input has no {} column", FESTIVAL_ID_COLUMN);
        }

        Ok(Self { reader, headers, id_index, missing_column })
    }

    /// Next row in file order. Only I/O failures are returned as `Err`.
    pub fn next_row(&mut self) -> Result<Option<SourceRow>> {
        let mut raw = ByteRecord::new();
        match self.reader.read_byte_record(&mut raw) {
            Ok(false) => Ok(None),
            Ok(true) => {
                let line = raw.position().map(|p| p.line()).unwrap_or_default();
                let festival_id = self.id_index
                    .and_then(|idx| raw.get(idx))
                    .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
                    .filter(|id| !id.is_empty());
                let record = match self.missing_column {
                    Some(column) => Err(FestlangError::MissingColumn(column.to_string())),
                    None => raw
                        .deserialize::<InputRecord>(Some(&self.headers))
                        .map_err(|e| FestlangError::MalformedRow { line, reason: e.to_string() }),
                };
                Ok(Some(SourceRow { line, festival_id, record }))
            }
            Err(e) if e.is_io_error() => Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                Ok(Some(SourceRow {
                    line,
                    festival_id: None,
                    record: Err(FestlangError::MalformedRow { line, reason: e.to_string() }),
                }))
            }
        }
    }
}

impl<R: Read> Iterator for FestivalReader<R> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Writes the multilingual rows to `path`, creating parent directories.
/// Returns the number of data rows written.
pub fn write_output<P: AsRef<Path>>(path: P, rows: &[OutputRecord]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_records(file, rows)
}

/// Header is always written, so an empty run still yields a valid file
pub fn write_records<W: Write>(wtr: W, rows: &[OutputRecord]) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(wtr);

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(rows.len())
}
