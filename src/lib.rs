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

#![warn(missing_docs)]

//! Converts DIMACS CNF formulas to Manchester syntax, e.g. `(_1 OR NOT _2 OR _0) AND ...`

pub mod convert;
pub mod input;
pub mod rewrite;

use anyhow::Context;
use convert::FormulaWriter;
use input::Source;
use std::path::PathBuf;
use structopt::StructOpt;

/// Configuration options
#[derive(Debug, StructOpt)]
#[structopt(
    name = "convert",
    about = "Converts a DIMACS CNF formula to a Manchester syntax expression"
)]
pub struct Opt {
    /// Input files, read one after the other as a single formula. `-` or no file at all reads
    /// standard input.
    #[structopt(parse(from_os_str))]
    inputs: Vec<PathBuf>,

    /// Enable debug output on stderr.
    #[structopt(short, long)]
    debug: bool,
}

fn setup_tracing(opt: &Opt) -> anyhow::Result<()> {
    use tracing::Level;
    use tracing_subscriber::prelude::*;
    let min_level = if opt.debug { Level::TRACE } else { Level::INFO };
    // stdout carries the formula
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::filter_fn(move |metadata| {
            *metadata.level() <= min_level
        }));
    let subscriber = tracing_subscriber::Registry::default().with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default tracing collector")?;
    Ok(())
}

/// Converts the sources in order into one formula written to stdout.
/// All sources are opened before anything is written, so that a missing file produces no output.
fn convert_sources(sources: &[Source]) -> anyhow::Result<convert::Summary> {
    let reads = sources
        .iter()
        .map(|source| source.open().map(|read| (source, read)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let stdout = std::io::stdout();
    let mut formula = FormulaWriter::new(std::io::BufWriter::new(stdout.lock()));
    for (source, read) in reads {
        tracing::debug!(%source, "converting");
        formula.push_read(read, source)?;
    }
    formula.finish()
}

/// entrypoint of the binary
pub fn run() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    setup_tracing(&opt)?;
    let sources = Source::from_args(&opt.inputs);
    let summary = convert_sources(&sources)?;
    if summary.clauses == 0 {
        tracing::debug!("no clause found, the formula is empty");
    }
    Ok(())
}
