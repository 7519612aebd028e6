// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use log::info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::Error;
use crate::machine::{Machine, Options, Output};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Process(#[from] Error),
}

pub fn read_content(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Write the lines, each terminated by a newline.
///
/// The lines go to a temporary file in the same directory, which then
/// replaces `path`; a failed write leaves `path` untouched.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        for line in lines {
            writeln!(out, "{}", line.as_ref())?;
        }
        out.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Process the file at `input` and write the result to `output`.
///
/// Nothing is written unless the whole file was processed successfully.
pub fn transform_file(machine: Machine, input: &Path, output: &Path,
                      options: &Options) -> Result<Output, FileError> {
    let content = read_content(input)
        .map_err(|source| FileError::Read { path: input.into(), source })?;
    let result = machine.process(&input.display().to_string(), &content, options)?;
    write_lines(output, &result.program.render())
        .map_err(|source| FileError::Write { path: output.into(), source })?;
    info!("wrote {} lines to {}", result.program.lines.len(), output.display());
    Ok(result)
}

/// `dir/name.ext` becomes `dir/name-transformed.ext`.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}-transformed.{}", stem, ext.to_string_lossy()),
        None => format!("{}-transformed", stem),
    };
    input.with_file_name(name)
}
