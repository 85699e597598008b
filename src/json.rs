//! Canonical pretty-JSON rendering.
//!
//! Outputs the index views and ranked query results in a fixed, deterministic
//! textual format where newlines separate elements and nesting is indented
//! with tabs. The bytes are the contract: downstream tooling diffs this
//! output, so the format must never drift.
//!
//! # Format contract
//!
//! - one tab per nesting level, nothing else for indentation
//! - every array/object element is preceded by a newline and its indent;
//!   elements are separated by a bare comma, no trailing comma
//! - the closing bracket sits on its own line, one level out
//! - empty array is `[` newline `]`, empty object is `{` newline `}`
//! - object keys are double-quoted and followed by `: `
//! - no implicit trailing newline and no surrounding whitespace
//!
//! Scalar values are written **verbatim**: the writer neither quotes nor
//! escapes them. A caller that wants a JSON string value must supply it
//! pre-quoted (and pre-escaped); a value containing a raw quote or control
//! character will produce output that is not valid JSON. The same applies to
//! object keys and `where` locations, which are quote-enclosed but not
//! escaped. Known limitation, kept for byte-exact compatibility.
//!
//! These functions take no locks and share no state; the usual single-writer
//! rule applies to whatever sink they are handed.
//!
//! # Rendering shapes
//!
//! | shape                        | sink form             | file form                     | string form               |
//! |------------------------------|-----------------------|-------------------------------|---------------------------|
//! | array of scalars             | [`write_array`]       | [`write_array_to_path`]       | [`array_to_string`]       |
//! | object of scalars            | [`write_object`]      | [`write_object_to_path`]      | [`object_to_string`]      |
//! | object of arrays             | [`write_nested_array`]| [`write_nested_array_to_path`]| [`nested_array_to_string`]|
//! | object of objects of arrays  | [`write_nested_object`]| [`write_nested_object_to_path`]| [`nested_object_to_string`]|
//! | query → ranked [`MatchResult`]s | [`write_results`]  | [`write_results_to_path`]     | [`results_to_string`]     |
//!
//! The nested-object shape is exactly what [`crate::TermIndex::view`] yields;
//! the results shape expects sequences pre-sorted with
//! [`crate::rank_results`] — no sorting happens here.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::ranking::MatchResult;

/// Write a newline followed by `level` tabs.
fn next_line<W: Write>(out: &mut W, level: usize) -> io::Result<()> {
    out.write_all(b"\n")?;
    for _ in 0..level {
        out.write_all(b"\t")?;
    }
    Ok(())
}

/// Write a quote-enclosed key followed by `: `.
fn write_key<W: Write>(key: &str, out: &mut W) -> io::Result<()> {
    quote_enclose(key, out)?;
    out.write_all(b": ")
}

fn quote_enclose<W: Write>(value: &str, out: &mut W) -> io::Result<()> {
    out.write_all(b"\"")?;
    out.write_all(value.as_bytes())?;
    out.write_all(b"\"")
}

fn into_string(buf: Vec<u8>) -> io::Result<String> {
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

// ============================================================================
// ARRAY OF SCALARS
// ============================================================================

/// Write `elements` as a pretty JSON array to `out`, starting at indent
/// `level`. Values are written verbatim (see module docs).
pub fn write_array<W, I>(elements: I, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: fmt::Display,
{
    out.write_all(b"[")?;
    let inner = level + 1;

    let mut iter = elements.into_iter();
    if let Some(first) = iter.next() {
        next_line(out, inner)?;
        write!(out, "{}", first)?;
        for elem in iter {
            out.write_all(b",")?;
            next_line(out, inner)?;
            write!(out, "{}", elem)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"]")
}

/// Write `elements` as a pretty JSON array to the file at `path`.
///
/// The file handle is scoped to this call: it is flushed and closed on every
/// exit path, including mid-write failure. A failed write leaves whatever
/// prefix already reached the file; there is no temp-file-and-rename step.
pub fn write_array_to_path<I, P>(elements: I, path: P) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: fmt::Display,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_array(elements, &mut out, 0)?;
    out.flush()
}

/// Render `elements` as a pretty JSON array string.
pub fn array_to_string<I>(elements: I) -> io::Result<String>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut buf = Vec::new();
    write_array(elements, &mut buf, 0)?;
    into_string(buf)
}

// ============================================================================
// OBJECT OF SCALARS
// ============================================================================

/// Write `entries` as a pretty JSON object to `out`, starting at indent
/// `level`. Keys are quote-enclosed; values are written verbatim.
pub fn write_object<W, I, K, V>(entries: I, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: fmt::Display,
{
    out.write_all(b"{")?;
    let inner = level + 1;

    let mut iter = entries.into_iter();
    if let Some((key, value)) = iter.next() {
        next_line(out, inner)?;
        write_key(key.as_ref(), out)?;
        write!(out, "{}", value)?;
        for (key, value) in iter {
            out.write_all(b",")?;
            next_line(out, inner)?;
            write_key(key.as_ref(), out)?;
            write!(out, "{}", value)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"}")
}

/// Write `entries` as a pretty JSON object to the file at `path`.
pub fn write_object_to_path<I, K, V, P>(entries: I, path: P) -> io::Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: fmt::Display,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_object(entries, &mut out, 0)?;
    out.flush()
}

/// Render `entries` as a pretty JSON object string.
pub fn object_to_string<I, K, V>(entries: I) -> io::Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: fmt::Display,
{
    let mut buf = Vec::new();
    write_object(entries, &mut buf, 0)?;
    into_string(buf)
}

// ============================================================================
// OBJECT OF ARRAYS
// ============================================================================

/// Write `entries` as a pretty JSON object whose values are arrays.
///
/// This is the shape of [`crate::TermIndex::locations_of`]: location keys
/// mapping to position arrays.
pub fn write_nested_array<W, I, K, V>(entries: I, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
{
    out.write_all(b"{")?;
    let inner = level + 1;

    let mut iter = entries.into_iter();
    if let Some((key, values)) = iter.next() {
        next_line(out, inner)?;
        write_key(key.as_ref(), out)?;
        write_array(values, out, inner)?;
        for (key, values) in iter {
            out.write_all(b",")?;
            next_line(out, inner)?;
            write_key(key.as_ref(), out)?;
            write_array(values, out, inner)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"}")
}

/// Write `entries` as a pretty JSON object of arrays to the file at `path`.
pub fn write_nested_array_to_path<I, K, V, P>(entries: I, path: P) -> io::Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_nested_array(entries, &mut out, 0)?;
    out.flush()
}

/// Render `entries` as a pretty JSON object-of-arrays string.
pub fn nested_array_to_string<I, K, V>(entries: I) -> io::Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
{
    let mut buf = Vec::new();
    write_nested_array(entries, &mut buf, 0)?;
    into_string(buf)
}

// ============================================================================
// OBJECT OF OBJECTS OF ARRAYS
// ============================================================================

/// Write `entries` as a pretty JSON object of objects of arrays.
///
/// This is the natural shape of [`crate::TermIndex::view`]: term keys mapping
/// to location objects mapping to position arrays. The index's iteration
/// order is the output order; nothing is re-sorted here.
pub fn write_nested_object<W, I, K, M, K2, V>(entries: I, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, M)>,
    K: AsRef<str>,
    M: IntoIterator<Item = (K2, V)>,
    K2: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
{
    out.write_all(b"{")?;
    let inner = level + 1;

    let mut iter = entries.into_iter();
    if let Some((key, nested)) = iter.next() {
        next_line(out, inner)?;
        write_key(key.as_ref(), out)?;
        write_nested_array(nested, out, inner)?;
        for (key, nested) in iter {
            out.write_all(b",")?;
            next_line(out, inner)?;
            write_key(key.as_ref(), out)?;
            write_nested_array(nested, out, inner)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"}")
}

/// Write `entries` as a pretty JSON object of objects of arrays to the file
/// at `path`.
pub fn write_nested_object_to_path<I, K, M, K2, V, P>(entries: I, path: P) -> io::Result<()>
where
    I: IntoIterator<Item = (K, M)>,
    K: AsRef<str>,
    M: IntoIterator<Item = (K2, V)>,
    K2: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_nested_object(entries, &mut out, 0)?;
    out.flush()
}

/// Render `entries` as a pretty JSON object-of-objects string.
pub fn nested_object_to_string<I, K, M, K2, V>(entries: I) -> io::Result<String>
where
    I: IntoIterator<Item = (K, M)>,
    K: AsRef<str>,
    M: IntoIterator<Item = (K2, V)>,
    K2: AsRef<str>,
    V: IntoIterator,
    V::Item: fmt::Display,
{
    let mut buf = Vec::new();
    write_nested_object(entries, &mut buf, 0)?;
    into_string(buf)
}

// ============================================================================
// QUERY RESULTS
// ============================================================================

/// Write one match record as a fixed three-field object.
///
/// Key order is `count`, `score`, `where`, always. The score is the fixed
/// 8-decimal rendering from [`MatchResult::score_string`]; the location is
/// quote-enclosed (not escaped).
fn write_result<W: Write>(result: &MatchResult, out: &mut W, level: usize) -> io::Result<()> {
    next_line(out, level)?;
    out.write_all(b"{")?;
    let inner = level + 1;

    next_line(out, inner)?;
    write_key("count", out)?;
    write!(out, "{}", result.match_count())?;
    out.write_all(b",")?;

    next_line(out, inner)?;
    write_key("score", out)?;
    out.write_all(result.score_string().as_bytes())?;
    out.write_all(b",")?;

    next_line(out, inner)?;
    write_key("where", out)?;
    quote_enclose(result.location(), out)?;

    next_line(out, level)?;
    out.write_all(b"}")
}

/// Write a sequence of match records as a pretty JSON array of result objects.
fn write_result_array<'a, W, R>(results: R, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    R: IntoIterator<Item = &'a MatchResult>,
{
    out.write_all(b"[")?;
    let inner = level + 1;

    let mut iter = results.into_iter();
    if let Some(first) = iter.next() {
        write_result(first, out, inner)?;
        for result in iter {
            out.write_all(b",")?;
            write_result(result, out, inner)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"]")
}

/// Write `entries` mapping each query string to its ranked results.
///
/// Result sequences must already be in ranking order (see
/// [`crate::rank_results`]); this writer preserves whatever order it is given.
pub fn write_results<'a, W, I, K, R>(entries: I, out: &mut W, level: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (K, R)>,
    K: AsRef<str>,
    R: IntoIterator<Item = &'a MatchResult>,
{
    out.write_all(b"{")?;
    let inner = level + 1;

    let mut iter = entries.into_iter();
    if let Some((key, results)) = iter.next() {
        next_line(out, inner)?;
        write_key(key.as_ref(), out)?;
        write_result_array(results, out, inner)?;
        for (key, results) in iter {
            out.write_all(b",")?;
            next_line(out, inner)?;
            write_key(key.as_ref(), out)?;
            write_result_array(results, out, inner)?;
        }
    }
    next_line(out, level)?;
    out.write_all(b"}")
}

/// Write query → ranked results to the file at `path`.
pub fn write_results_to_path<'a, I, K, R, P>(entries: I, path: P) -> io::Result<()>
where
    I: IntoIterator<Item = (K, R)>,
    K: AsRef<str>,
    R: IntoIterator<Item = &'a MatchResult>,
    P: AsRef<Path>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write_results(entries, &mut out, 0)?;
    out.flush()
}

/// Render query → ranked results as a string.
pub fn results_to_string<'a, I, K, R>(entries: I) -> io::Result<String>
where
    I: IntoIterator<Item = (K, R)>,
    K: AsRef<str>,
    R: IntoIterator<Item = &'a MatchResult>,
{
    let mut buf = Vec::new();
    write_results(entries, &mut buf, 0)?;
    into_string(buf)
}
