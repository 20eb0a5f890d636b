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

//! Textual rewrites turning a DIMACS clause line into a disjunction.
//!
//! Each pass is a pure `&str -> String` function. They are applied in the
//! order of [`PASSES`]: later passes see the text produced by earlier ones,
//! e.g. the space in `NOT ` must not be turned into ` OR `.

use nom::bytes::complete::{tag, take_while1};
use nom::IResult;

/// Whitespace as understood by the rewrites: space, `\t`, `\n`, `\x0b`, `\x0c` and `\r`.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// A maximal run of ascii digits
fn digits(input: &str) -> IResult<&str, &str> {
    nom::character::complete::digit1(input)
}

/// A maximal run of whitespace
fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(is_space)(input)
}

/// A minus sign
fn dash(input: &str) -> IResult<&str, &str> {
    tag("-")(input)
}

/// Copies `input`, calling `replace` instead of copying wherever `pattern` matches a non empty
/// prefix of the remaining text. Text where `pattern` fails is copied one char at a time.
fn replace_all<'a, P>(
    input: &'a str,
    mut pattern: P,
    mut replace: impl FnMut(&mut String, &'a str),
) -> String
where
    P: nom::Parser<&'a str, &'a str, nom::error::Error<&'a str>>,
{
    let mut res = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        match pattern.parse(rest) {
            Ok((remaining, matched)) if !matched.is_empty() => {
                replace(&mut res, matched);
                rest = remaining;
            }
            _ => {
                res.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    res
}

/// Prefixes every run of digits with an underscore, so that literal `12` becomes `_12`.
/// ```
/// use dimacs2manchester::rewrite::tag_literals;
/// assert_eq!(tag_literals("-12 3 0"), "-_12 _3 _0");
/// ```
pub fn tag_literals(line: &str) -> String {
    replace_all(line, digits, |res, number| {
        res.push('_');
        res.push_str(number);
    })
}

/// Replaces every run of whitespace by ` OR `.
pub fn separate_literals(line: &str) -> String {
    replace_all(line, spaces, |res, _| res.push_str(" OR "))
}

/// Replaces every `-` by `NOT `.
pub fn mark_negations(line: &str) -> String {
    replace_all(line, dash, |res, _| res.push_str("NOT "))
}

/// A single rewrite pass
pub type Pass = fn(&str) -> String;

/// The rewrites, in the order they must be applied.
pub const PASSES: [Pass; 3] = [tag_literals, separate_literals, mark_negations];

/// Applies all [`PASSES`] in order to a trimmed clause line.
/// ```
/// use dimacs2manchester::rewrite::rewrite;
/// assert_eq!(rewrite("1 -2 0"), "_1 OR NOT _2 OR _0");
/// ```
pub fn rewrite(line: &str) -> String {
    PASSES.iter().fold(line.to_owned(), |text, pass| pass(&text))
}
