use std::path::PathBuf;

use csv_core::WriteResult;

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Format {
    Table,
    Jsonl,
    Csv,
}

#[derive(clap::Parser)]
#[group(id = "output::Args")]
pub struct Args {
    /// Write to this file instead of the terminal.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    #[arg(long, short='f', value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not open the specified output file at {1:?}")]
    OpenOutputFile(#[source] std::io::Error, PathBuf),
    #[error("could not write data to the output file at {1:?}")]
    WriteFile(#[source] std::io::Error, PathBuf),
    #[error("could not write data to the terminal")]
    WriteStdout(#[source] std::io::Error),
    #[error("could not serialize registers to JSON")]
    SerializeJson(#[source] serde_json::Error),
    #[error("could not quote `{0}` as a CSV field")]
    QuoteCsv(String),
}

impl Args {
    pub fn to_output(self) -> Result<Output, Error> {
        let io = match &self.output {
            None => Box::new(std::io::stdout().lock()) as Box<_>,
            Some(path) => Box::new(
                std::fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .map_err(|e| Error::OpenOutputFile(e, path.clone()))?,
            ) as Box<_>,
        };
        let formatter = match &self.format {
            Format::Table => Formatter::Table { comfy: new_table(&[]), headers: Vec::new() },
            Format::Jsonl => Formatter::Jsonl,
            Format::Csv => Formatter::Csv { written_records: false },
        };
        Ok(Output { args: self, io, formatter })
    }
}

fn new_table(headers: &[&'static str]) -> comfy_table::Table {
    let mut comfy = comfy_table::Table::new();
    comfy.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    if !headers.is_empty() {
        comfy.set_header(headers.to_vec());
    }
    comfy
}

pub struct Output {
    args: Args,
    io: Box<dyn std::io::Write>,
    formatter: Formatter,
}

enum Formatter {
    Csv { written_records: bool },
    Table { comfy: comfy_table::Table, headers: Vec<&'static str> },
    Jsonl,
}

impl Output {
    /// Column names. Must precede any record.
    pub fn headers(&mut self, hdrs: &[&'static str]) -> Result<(), Error> {
        match &mut self.formatter {
            Formatter::Csv { written_records } => {
                debug_assert!(!*written_records, "headers must precede any record");
                if *written_records {
                    return Ok(());
                }
                *written_records = true;
                self.write_csv_row(hdrs)?;
            }
            Formatter::Table { comfy, headers } => {
                *headers = hdrs.to_vec();
                comfy.set_header(hdrs.to_vec());
            }
            Formatter::Jsonl => {}
        }
        Ok(())
    }

    fn write_csv_row<V: std::ops::Deref<Target = str>>(
        &mut self,
        values: &[V],
    ) -> Result<(), Error> {
        // Quoting at most doubles a field, plus the two enclosing quotes.
        let max_len = 2 + 2 * values.iter().map(|v| v.len()).max().unwrap_or(0);
        let mut output = vec![0; max_len];
        let mut writer = csv_core::Writer::new();
        for (index, value) in values.iter().enumerate() {
            let (WriteResult::InputEmpty, _, ob) = writer.field(value.as_bytes(), &mut output) else {
                return Err(Error::QuoteCsv(value.to_string()));
            };
            self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))?;
            if index + 1 < values.len() {
                let (WriteResult::InputEmpty, ob) = writer.delimiter(&mut output) else {
                    return Err(Error::QuoteCsv(value.to_string()));
                };
                self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))?;
            }
        }
        let (WriteResult::InputEmpty, ob) = writer.terminator(&mut output) else {
            return Err(Error::QuoteCsv(String::new()));
        };
        self.io.write_all(&output[..ob]).map_err(|e| self.write_error(e))
    }

    pub fn record<R: serde::Serialize>(
        &mut self,
        table_row: impl FnOnce() -> Vec<String>,
        serde_record: impl FnOnce() -> R,
    ) -> Result<(), Error> {
        match &mut self.formatter {
            Formatter::Csv { written_records } => {
                *written_records = true;
                let values = table_row();
                self.write_csv_row(&values)?;
            }
            Formatter::Table { comfy, .. } => {
                comfy.add_row(table_row());
            }
            Formatter::Jsonl => {
                serde_json::to_writer(&mut self.io, &serde_record())
                    .map_err(Error::SerializeJson)?;
                writeln!(self.io).map_err(|e| self.write_error(e))?
            }
        }
        Ok(())
    }

    fn write_error(&self, e: std::io::Error) -> Error {
        match &self.args.output {
            None => Error::WriteStdout(e),
            Some(p) => Error::WriteFile(e, p.into()),
        }
    }

    /// Emit everything recorded so far, keeping the output open for more records.
    pub fn batch(&mut self) -> Result<(), Error> {
        if let Formatter::Table { comfy, headers } = &mut self.formatter {
            if comfy.row_iter().next().is_some() {
                let table = std::mem::replace(comfy, new_table(headers));
                writeln!(self.io, "{table}").map_err(|e| self.write_error(e))?;
            }
        }
        self.io.flush().map_err(|e| self.write_error(e))
    }

    pub fn commit(mut self) -> Result<(), Error> {
        self.batch()
    }
}
