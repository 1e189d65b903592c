//! Minimal Python lexing for string extraction.
//!
//! This is not a Python parser. It knows just enough to tell code apart from
//! strings and comments, to follow bracket nesting across lines, and to read
//! string literals, which is what finding `tr()` calls requires.

use crate::utils::{build_line_index, offset_to_line};

/// Lexical layout of a Python source file.
#[derive(Debug)]
pub struct PythonSource<'a> {
    pub content: &'a str,
    line_index: Vec<usize>,
    /// Byte ranges `[start, end)` covered by strings or comments, in order.
    non_code: Vec<(usize, usize)>,
    /// For each line (0-based), whether it starts a new logical line.
    logical: Vec<bool>,
}

impl<'a> PythonSource<'a> {
    pub fn new(content: &'a str) -> Self {
        let line_index = build_line_index(content);
        let mut non_code = Vec::new();
        let mut logical = vec![false; line_index.len()];

        let bytes = content.as_bytes();
        let mut depth: usize = 0;
        let mut line = 0;
        let mut continued = false;
        let mut i = 0;
        logical[0] = true;

        while i < bytes.len() {
            match bytes[i] {
                b'#' => {
                    let end = content[i..].find('\n').map_or(bytes.len(), |n| i + n);
                    non_code.push((i, end));
                    i = end;
                }
                b'\'' | b'"' => {
                    let end = skip_string(bytes, i);
                    non_code.push((i, end));
                    // Lines that start inside a multi-line string are not logical lines
                    while line + 1 < line_index.len() && line_index[line + 1] <= end {
                        line += 1;
                    }
                    i = end;
                }
                b'(' | b'[' | b'{' => {
                    depth += 1;
                    i += 1;
                }
                b')' | b']' | b'}' => {
                    depth = depth.saturating_sub(1);
                    i += 1;
                }
                b'\\' if bytes.get(i + 1) == Some(&b'\n') => {
                    continued = true;
                    i += 1;
                }
                b'\n' => {
                    line += 1;
                    if line < logical.len() {
                        logical[line] = depth == 0 && !continued;
                    }
                    continued = false;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Self {
            content,
            line_index,
            non_code,
            logical,
        }
    }

    /// 1-based line of a byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        offset_to_line(&self.line_index, offset)
    }

    /// True if the offset falls inside a string literal or a comment.
    pub fn is_non_code(&self, offset: usize) -> bool {
        let idx = self.non_code.partition_point(|&(start, _)| start <= offset);
        idx > 0 && offset < self.non_code[idx - 1].1
    }

    /// Logical lines as `(1-based line number, text)`.
    pub fn logical_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.line_index
            .iter()
            .enumerate()
            .filter(|(n, _)| self.logical[*n])
            .map(|(n, &start)| {
                let end = self
                    .line_index
                    .get(n + 1)
                    .map_or(self.content.len(), |e| e.saturating_sub(1));
                (n + 1, &self.content[start..end.max(start)])
            })
    }
}

/// Byte offset just past the string literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let triple = bytes.get(start + 1) == Some(&quote) && bytes.get(start + 2) == Some(&quote);
    let mut i = if triple { start + 3 } else { start + 1 };

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if !triple => return i,
            c if c == quote => {
                if !triple {
                    return i + 1;
                }
                if bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote) {
                    return i + 3;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Indentation width of a line, tabs advancing to the next multiple of 8.
pub fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            _ => break,
        }
    }
    width
}

/// Reads string literal arguments of a call, starting right after `(`.
pub struct ArgReader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> ArgReader<'a> {
    pub fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '\\');
        self.pos += rest.len() - trimmed.len();
    }

    /// Read one argument made only of (possibly adjacent) string literals.
    ///
    /// Returns `None` if the argument is anything else, e.g. an f-string,
    /// a variable or an expression mixing literals and names.
    pub fn string_arg(&mut self) -> Option<String> {
        let mut value = String::new();
        let mut found = false;
        loop {
            self.skip_ws();
            match self.literal() {
                Some(part) => {
                    value.push_str(&part);
                    found = true;
                }
                None => break,
            }
        }
        self.skip_ws();
        let terminated = self.rest().starts_with(',') || self.rest().starts_with(')');
        (found && terminated).then_some(value)
    }

    /// Consume a `,` separator. Returns false at `)` or anything else.
    pub fn comma(&mut self) -> bool {
        self.skip_ws();
        if self.rest().starts_with(',') {
            self.pos += 1;
            self.skip_ws();
            !self.rest().starts_with(')')
        } else {
            false
        }
    }

    fn literal(&mut self) -> Option<String> {
        let rest = self.rest();
        let prefix_len = rest
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if prefix_len > 2 {
            return None;
        }
        let prefix = rest[..prefix_len].to_ascii_lowercase();
        let raw = match prefix.as_str() {
            "" | "u" => false,
            "r" => true,
            // f-strings and bytes are not translatable text
            _ => return None,
        };

        let body = &rest[prefix_len..];
        let quote = body.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let triple_quote: String = std::iter::repeat_n(quote, 3).collect();
        let (delim, start) = if body.starts_with(&triple_quote) {
            (triple_quote.as_str(), 3)
        } else {
            (&body[..1], 1)
        };

        let mut out = String::new();
        let mut chars = body[start..].char_indices();
        while let Some((i, c)) = chars.next() {
            if body[start + i..].starts_with(delim) {
                self.pos += prefix_len + start + i + delim.len();
                return Some(out);
            }
            match c {
                '\\' if raw => {
                    out.push('\\');
                    if let Some((_, next)) = chars.next() {
                        out.push(next);
                    }
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, '\n')) => {}
                    Some((_, 'x')) => {
                        let hex: String = (0..2).filter_map(|_| chars.next().map(|(_, c)| c)).collect();
                        out.push(u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)?);
                    }
                    Some((_, 'u')) => {
                        let hex: String = (0..4).filter_map(|_| chars.next().map(|(_, c)| c)).collect();
                        out.push(u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)?);
                    }
                    Some((_, other)) => {
                        if !matches!(other, '\\' | '\'' | '"') {
                            out.push('\\');
                        }
                        out.push(other);
                    }
                    None => return None,
                },
                '\n' if delim.len() == 1 => return None,
                c => out.push(c),
            }
        }
        None
    }
}
