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

//! DIMACS CNF to Manchester syntax, one line at a time.
//!
//! Every clause line `1 -2 0` becomes a clause expression `(_1 OR NOT _2 OR _0)`; the trailing
//! `0` of DIMACS clauses is kept as a literal. Clause expressions are joined by
//! [`CLAUSE_SEPARATOR`] and the formula ends with a single newline.

use crate::input::lines;
use crate::rewrite::{is_space, rewrite};
use anyhow::Context;
use std::fmt::Display;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

/// Written between two clause expressions
pub const CLAUSE_SEPARATOR: &str = " AND \n";

/// Returns true for problem lines (`p cnf ...`) and comments (`c ...`), ignoring leading
/// whitespace.
/// ```
/// use dimacs2manchester::convert::is_header;
/// assert!(is_header("p cnf 3 2"));
/// assert!(is_header("  c comment"));
/// assert!(!is_header("1 -2 0"));
/// ```
pub fn is_header(line: &str) -> bool {
    matches!(
        line.trim_start_matches(is_space).chars().next(),
        Some('p') | Some('c')
    )
}

/// What an input line contributes to the formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// problem line or comment, skipped
    Header,
    /// nothing but whitespace, skipped
    Blank,
    /// a clause expression, parenthesized
    Clause(String),
}

/// `strip` also removes nul bytes
fn is_strippable(c: char) -> bool {
    c == '\0' || is_space(c)
}

/// Classifies a line, and converts it if it is a clause.
pub fn classify(line: &str) -> Line {
    if is_header(line) {
        return Line::Header;
    }
    let stripped = line.trim_matches(is_strippable);
    if stripped.is_empty() {
        Line::Blank
    } else {
        Line::Clause(format!("({})", rewrite(stripped)))
    }
}

/// The clause expression of a clause line, None for headers and blank lines.
/// ```
/// use dimacs2manchester::convert::clause_expression;
/// assert_eq!(clause_expression(" -3 4 0\n").unwrap(), "(NOT _3 OR _4 OR _0)");
/// assert_eq!(clause_expression("c comment"), None);
/// ```
pub fn clause_expression(line: &str) -> Option<String> {
    match classify(line) {
        Line::Clause(expression) => Some(expression),
        Line::Header | Line::Blank => None,
    }
}

/// Counters for a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// lines read
    pub lines: usize,
    /// problem and comment lines skipped
    pub headers: usize,
    /// whitespace only lines skipped
    pub blanks: usize,
    /// clause expressions written
    pub clauses: usize,
}

/// Writes the formula expression as lines are pushed, so that input is never held in memory.
pub struct FormulaWriter<W: Write> {
    writer: W,
    summary: Summary,
}

impl<W: Write> FormulaWriter<W> {
    /// Creates a writer for an empty formula
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            summary: Summary::default(),
        }
    }

    /// Converts one input line and writes its clause expression, if any.
    pub fn push_line(&mut self, line: &str) -> std::io::Result<()> {
        self.summary.lines += 1;
        match classify(line) {
            Line::Header => {
                trace!(line = %line.trim_end(), "skipping header");
                self.summary.headers += 1;
            }
            Line::Blank => self.summary.blanks += 1,
            Line::Clause(expression) => {
                if self.summary.clauses != 0 {
                    self.writer.write_all(CLAUSE_SEPARATOR.as_bytes())?;
                }
                self.writer.write_all(expression.as_bytes())?;
                self.summary.clauses += 1;
            }
        }
        Ok(())
    }

    /// Pushes all lines of `read`. `name` is only used in error messages.
    pub fn push_read(&mut self, read: impl BufRead, name: impl Display) -> anyhow::Result<()> {
        for line in lines(read) {
            let line = line.with_context(|| format!("reading {}", name))?;
            self.push_line(&line).context("writing formula")?;
        }
        Ok(())
    }

    /// Terminates the formula with a newline and flushes the writer.
    pub fn finish(mut self) -> anyhow::Result<Summary> {
        self.writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush())
            .context("writing formula")?;
        let summary = self.summary;
        debug!(
            lines = summary.lines,
            headers = summary.headers,
            blanks = summary.blanks,
            clauses = summary.clauses,
            "conversion done"
        );
        Ok(summary)
    }
}

/// Converts the whole DIMACS text of `read` to a Manchester syntax formula written to `write`.
pub fn convert(read: impl BufRead, write: impl Write) -> anyhow::Result<Summary> {
    let mut formula = FormulaWriter::new(write);
    formula.push_read(read, "input")?;
    formula.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn convert_str(input: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        convert(input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn two_clauses() -> anyhow::Result<()> {
        let out = convert_str("c example\np cnf 2 2\n1 -2 0\n-1 2 0\n")?;
        assert_eq!(out, "(_1 OR NOT _2 OR _0) AND \n(NOT _1 OR _2 OR _0)\n");
        Ok(())
    }

    #[test]
    fn empty_input() -> anyhow::Result<()> {
        assert_eq!(convert_str("")?, "\n");
        Ok(())
    }

    #[test]
    fn only_headers() -> anyhow::Result<()> {
        assert_eq!(convert_str("c a comment\np cnf 0 0\n   c indented\n")?, "\n");
        Ok(())
    }

    #[test]
    fn blank_lines_and_crlf() -> anyhow::Result<()> {
        let out = convert_str("p cnf 3 2\r\n\r\n  1\t -3  0 \r\n\n-2 0")?;
        assert_eq!(out, "(_1 OR NOT _3 OR _0) AND \n(NOT _2 OR _0)\n");
        Ok(())
    }

    #[test]
    fn header_is_anchored_after_leading_whitespace() {
        assert_eq!(classify("\t p cnf 1 1"), Line::Header);
        assert_eq!(classify("1 c 0"), Line::Clause("(_1 OR c OR _0)".to_owned()));
        assert_eq!(classify(" \t\n"), Line::Blank);
    }

    #[test]
    fn summary_counts_lines() -> anyhow::Result<()> {
        let summary = convert("c x\np cnf 1 2\n1 0\n\n-1 0\n".as_bytes(), std::io::sink())?;
        assert_eq!(
            summary,
            Summary {
                lines: 5,
                headers: 2,
                blanks: 1,
                clauses: 2
            }
        );
        Ok(())
    }

    #[test]
    fn several_reads_make_one_formula() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut formula = FormulaWriter::new(&mut out);
        formula.push_read("p cnf 1 1\n1 0\n".as_bytes(), "first")?;
        formula.push_read("c nothing\n".as_bytes(), "second")?;
        formula.push_read("-1 0\n".as_bytes(), "third")?;
        formula.finish()?;
        assert_eq!(String::from_utf8(out)?, "(_1 OR _0) AND \n(NOT _1 OR _0)\n");
        Ok(())
    }

    /// Literal as rendered in a clause expression
    fn term(literal: isize) -> String {
        if literal < 0 {
            format!("NOT _{}", -literal)
        } else {
            format!("_{}", literal)
        }
    }

    #[test]
    fn random_formulas() -> anyhow::Result<()> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let separators = [" ", "  ", "\t", " \t "];
        for _ in 0..200 {
            let nvars: isize = rng.gen_range(1..50);
            let nclauses = rng.gen_range(0..20);
            let mut input = format!("p cnf {} {}\n", nvars, nclauses);
            let mut expected = Vec::new();
            for i in 0..nclauses {
                if rng.gen_bool(0.2) {
                    input.push_str(&format!("c before clause {}\n", i));
                }
                let len = rng.gen_range(1..6);
                let mut literals: Vec<isize> = (0..len)
                    .map(|_| {
                        let var = rng.gen_range(1..=nvars);
                        if rng.gen() {
                            -var
                        } else {
                            var
                        }
                    })
                    .collect();
                literals.push(0);
                let separator = separators[rng.gen_range(0..separators.len())];
                let line: Vec<String> = literals.iter().map(|l| l.to_string()).collect();
                input.push_str(&line.join(separator));
                input.push('\n');
                let terms: Vec<String> = literals.iter().map(|&l| term(l)).collect();
                assert_eq!(terms.len(), len + 1);
                expected.push(format!("({})", terms.join(" OR ")));
            }
            let out = convert_str(&input)?;
            assert_eq!(out, format!("{}\n", expected.join(CLAUSE_SEPARATOR)));
            assert_eq!(out.matches('(').count(), nclauses);
            assert!(!out.trim_end_matches('\n').ends_with(char::is_whitespace));
            assert!(out.ends_with('\n') && !out.ends_with("\n\n") || out == "\n");
        }
        Ok(())
    }
}
