//! Where a report adapter writes its output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    File(PathBuf),
}

impl ReportTarget {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => ReportTarget::File(p),
            None => ReportTarget::Stdout,
        }
    }

    pub fn open(&self) -> io::Result<Box<dyn Write>> {
        match self {
            ReportTarget::Stdout => Ok(Box::new(io::stdout().lock())),
            ReportTarget::File(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        }
    }
}
