//! Line reader: raw document text -> `(level, tag, value)` records.
//!
//! Every interchange line has the shape `LEVEL TAG [VALUE]` or, for record
//! openers, `LEVEL @POINTER@ TAG`. The reader walks the text once and yields
//! records lazily; nothing is buffered beyond the current line.

/// Delimiter that opens and closes a pointer such as `@I1@`.
pub const POINTER_DELIMITER: char = '@';

/// One interchange line, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number in the source.
    pub line: u32,
    pub level: u32,
    pub tag: &'a str,
    /// Rest of the line after the tag, or the pointer for pointer-first lines.
    pub value: &'a str,
}

/// What the scanner saw on one non-blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanned<'a> {
    Record(Record<'a>),
    /// Fewer than two tokens, or a level that is not a non-negative integer.
    Malformed { line: u32, text: &'a str },
}

/// Lazy scanner over the lines of one document. Blank lines are skipped.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
    line: u32,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Scanner {
            rest: src.strip_prefix('\u{feff}').unwrap_or(src),
            line: 0,
            done: false,
        }
    }

    /// Split off the next physical line. Accepts `\n`, `\r\n` and lone `\r`.
    fn next_line(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        self.line += 1;
        match self.rest.find(['\n', '\r']) {
            Some(idx) => {
                let text = &self.rest[..idx];
                let skip = if self.rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[idx + skip..];
                Some(text)
            }
            None => {
                self.done = true;
                Some(self.rest)
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Scanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.next_line()?;
            if text.trim().is_empty() {
                continue;
            }
            return Some(scan_line(text, self.line));
        }
    }
}

/// Scan every non-blank line, malformed ones included.
pub fn scan(src: &str) -> Scanner<'_> {
    Scanner::new(src)
}

/// Well-formed records only; malformed lines are dropped silently.
pub fn lex(src: &str) -> impl Iterator<Item = Record<'_>> {
    scan(src).filter_map(|s| match s {
        Scanned::Record(r) => Some(r),
        Scanned::Malformed { .. } => None,
    })
}

/// Split a leading whitespace-delimited token off `s`.
fn take_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}

fn scan_line(text: &str, line: u32) -> Scanned<'_> {
    let malformed = Scanned::Malformed {
        line,
        text: text.trim(),
    };

    let Some((level_tok, rest)) = take_token(text) else {
        return malformed;
    };
    let Some((second, rest)) = take_token(rest) else {
        return malformed;
    };
    let Ok(level) = level_tok.parse::<u32>() else {
        return malformed;
    };

    // `0 @I1@ INDI`: the pointer comes first, the tag follows it.
    if second.starts_with(POINTER_DELIMITER) {
        let tag = take_token(rest).map(|(t, _)| t).unwrap_or_default();
        return Scanned::Record(Record {
            line,
            level,
            tag,
            value: second,
        });
    }

    Scanned::Record(Record {
        line,
        level,
        tag: second,
        value: rest.trim(),
    })
}
