/**************************************************************************/
/*  This file is part of DIMACS2MANCHESTER.                               */
/*                                                                        */
/*  Copyright (C) 2025                                                    */
/*    CEA (Commissariat à l'énergie atomique et aux énergies              */
/*         alternatives)                                                  */
/*                                                                        */
/*  you can redistribute it and/or modify it under the terms of the GNU   */
/*  Lesser General Public License as published by the Free Software       */
/*  Foundation, version 2.1.                                              */
/*                                                                        */
/*  It is distributed in the hope that it will be useful,                 */
/*  but WITHOUT ANY WARRANTY; without even the implied warranty of        */
/*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the         */
/*  GNU Lesser General Public License for more details.                   */
/*                                                                        */
/*  See the GNU Lesser General Public License version 2.1                 */
/*  for more details (enclosed in the file licenses/LGPLv2.1).            */
/*                                                                        */
/**************************************************************************/

//! Sources of DIMACS text

use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Something DIMACS text can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The standard input of the process
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Source {
    /// `-` denotes standard input, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Source {
        if arg == Path::new("-") {
            Source::Stdin
        } else {
            Source::File(arg.to_owned())
        }
    }

    /// The sources designated by these command line arguments, in order. No argument at all means
    /// standard input.
    pub fn from_args(args: &[PathBuf]) -> Vec<Source> {
        if args.is_empty() {
            vec![Source::Stdin]
        } else {
            args.iter().map(|arg| Source::from_arg(arg)).collect()
        }
    }

    /// Opens the source for buffered reading.
    pub fn open(&self) -> anyhow::Result<Box<dyn BufRead>> {
        match self {
            Source::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
            Source::File(path) => {
                let file = File::open(path).with_context(|| {
                    format!("opening input file {} for reading", path.display())
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Iterator over the lines of a reader, line terminator included.
/// Bytes which are not valid utf-8 are replaced by U+FFFD instead of failing.
pub struct Lines<R: BufRead> {
    read: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.read.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Returns an iterator over the lines of `read`.
pub fn lines<R: BufRead>(read: R) -> Lines<R> {
    Lines {
        read,
        buf: Vec::new(),
    }
}
