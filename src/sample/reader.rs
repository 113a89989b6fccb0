use log::{debug, info};

use crate::error::{Result, TreeError};
use super::Sample;

use std::io::{self, Read};
use std::path::Path;


/// Feature values are clamped into `[-CLIP_BOUND, CLIP_BOUND]` by default,
/// the range the block feature dumps were clipped to before training.
pub const CLIP_BOUND: f64 = 1e18;


/// A struct that reads a [`Sample`] from a delimited text file.
///
/// By default, [`SampleReader`] assumes
/// ```text
/// has_header: true,
/// delimiter:  b';',
/// clip:       Some((-CLIP_BOUND, CLIP_BOUND)),
/// target:     None,
/// ```
///
/// # Example
/// ```no_run
/// use minitrees::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("/path/to/blocks.csv")
///     .target_feature("MTSChosen")
///     .read()
///     .unwrap();
/// println!("{} blocks", sample.shape().0);
/// ```
#[derive(Debug, Clone)]
pub struct SampleReader<P> {
    file:       Option<P>,
    has_header: bool,
    delimiter:  u8,
    clip:       Option<(f64, f64)>,
    target:     Option<String>,
}


impl<P> Default for SampleReader<P> {
    fn default() -> Self {
        Self {
            file:       None,
            has_header: true,
            delimiter:  b';',
            clip:       Some((-CLIP_BOUND, CLIP_BOUND)),
            target:     None,
        }
    }
}


impl<P> SampleReader<P> {
    /// Set the flag whether the file has the header row or not.
    /// Default is `true`.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the field delimiter. Default is `b';'`.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }


    /// Clamp every value into `[lower, upper]` after reading.
    pub fn clip(mut self, lower: f64, upper: f64) -> Self {
        self.clip = Some((lower, upper));
        self
    }


    /// Keep the values as they are in the file.
    pub fn no_clip(mut self) -> Self {
        self.clip = None;
        self
    }


    /// Set the column name that holds the true class of each row.
    /// The column is removed from the features.
    pub fn target_feature<S: Into<String>>(mut self, column: S) -> Self {
        self.target = Some(column.into());
        self
    }


    /// Reads a sample from any reader, ignoring the file name.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Sample> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let names = if self.has_header {
            let header = reader.headers()?;
            Some(header.iter().map(str::to_string).collect::<Vec<_>>())
        } else {
            None
        };

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let values = record.iter()
                .enumerate()
                .map(|(column, cell)| {
                    cell.parse::<f64>()
                        .map_err(|_| TreeError::InvalidValue {
                            row,
                            column,
                            value: cell.to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(values);
        }

        let mut sample = match names {
            Some(names) => Sample::new(names, rows)?,
            None => Sample::from_rows(rows)?,
        };

        if let Some(column) = &self.target {
            sample = sample.set_target(column)?;
        }

        if let Some((lower, upper)) = self.clip {
            let n_clipped = sample.clip(lower, upper);
            if n_clipped > 0 {
                debug!("clipped {n_clipped} values into [{lower}, {upper}]");
            }
        }
        Ok(sample)
    }
}


impl<P> SampleReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self`.
    pub fn read(self) -> Result<Sample> {
        let file = self.file.as_ref()
            .ok_or_else(|| io::Error::new(
                io::ErrorKind::InvalidInput,
                "the file name is not set; use `SampleReader::file`",
            ))?;
        let path = file.as_ref();

        let handle = std::fs::File::open(path)?;
        let sample = self.read_from(io::BufReader::new(handle))?;

        let (n_rows, n_columns) = sample.shape();
        info!(
            "read {n_rows} rows x {n_columns} columns from {}",
            path.display(),
        );
        Ok(sample)
    }
}
