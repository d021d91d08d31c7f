//! Utilities for working with CSV files.
//!
//! Fields are comma-separated; a field may be wrapped in double quotes to carry commas, with `""`
//! standing for a literal quote inside a quoted field. Records are line-delimited, so a field
//! cannot hold a line break.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Lines, Read, Write};
use std::path::Path;

pub struct CsvWriter<W: Write = File> {
    writer: BufWriter<W>,
}
impl CsvWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::create(path)?;
        Ok(Self::from(file))
    }
}

impl<W: Write> CsvWriter<W> {
    /// Appends a record as one line. A field containing a line break is rejected with
    /// [io::ErrorKind::InvalidInput] before anything is written.
    pub fn append<R>(&mut self, record: R) -> Result<(), io::Error>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let data = record.into_iter().collect::<Vec<_>>();
        for datum in &data {
            let str: &str = datum.as_ref();
            if str.contains(['\n', '\r']) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("line break in field {str:?}"),
                ));
            }
        }

        let mut first = true;
        for datum in &data {
            if first {
                first = false;
            } else {
                self.writer.write_all(b",")?;
            }
            let str: &str = datum.as_ref();
            self.writer.write_all(quote(str).as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> Result<W, io::Error> {
        self.writer.into_inner().map_err(|err| err.into_error())
    }
}

impl<W: Write> From<W> for CsvWriter<W> {
    fn from(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }
}

fn quote(datum: &str) -> Cow<str> {
    if datum.contains([',', '"']) {
        Cow::Owned(format!("\"{}\"", datum.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(datum)
    }
}

pub struct CsvReader<R: Read = File> {
    lines: Lines<BufReader<R>>,
}
impl CsvReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::from(file))
    }
}

impl<R: Read> CsvReader<R> {
    pub fn read(&mut self) -> Option<Result<Vec<String>, io::Error>> {
        self.lines.next().map(|line| line.map(|line| split(&line)))
    }
}

impl<R: Read> From<R> for CsvReader<R> {
    fn from(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

fn split(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = vec![];
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(char) = chars.next() {
        match (char, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => quoted = !quoted,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(char),
        }
    }
    fields.push(field);
    fields
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    items: Vec<Cow<'static, str>>,
}
impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, || Cow::Borrowed(""));
        Self { items }
    }

    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let items = values
            .into_iter()
            .map(|value| Cow::Owned(value.to_string()))
            .collect();
        Self { items }
    }

    pub fn set(&mut self, ordinal: impl Into<usize>, value: impl ToString) {
        self.items[ordinal.into()] = Cow::Owned(value.to_string())
    }
}

impl IntoIterator for Record {
    type Item = Cow<'static, str>;
    type IntoIter = std::vec::IntoIter<Cow<'static, str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
