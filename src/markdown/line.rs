// SPDX-License-Identifier: MIT

//! Line classification for PR descriptions

/// What a single line of markdown is, as far as option parsing cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// ATX heading: `## Label`
    Heading { text: &'a str },
    /// Task list item: `- [x] Label`
    Checkbox { checked: bool, label: &'a str },
    /// Opening or closing code fence
    Fence(Fence),
    /// Anything else
    Other,
}

/// A run of three or more backticks or tildes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    pub marker: char,
    pub len: usize,
}

impl Fence {
    /// Whether `self`, seen inside a block opened by `open`, closes it
    pub fn closes(&self, open: &Fence) -> bool {
        self.marker == open.marker && self.len >= open.len
    }
}

/// Classify one line (without its line terminator)
pub fn classify(line: &str) -> Line<'_> {
    // Four or more leading spaces make an indented code line, not a heading
    let indent = line.bytes().take_while(|b| *b == b' ').count();
    if indent <= 3 {
        let body = &line[indent..];
        if let Some(fence) = classify_fence(body) {
            return Line::Fence(fence);
        }
        if let Some(heading) = classify_heading(body) {
            return heading;
        }
    }
    // Nested list items may sit at any depth
    classify_checkbox(line).unwrap_or(Line::Other)
}

fn classify_fence(line: &str) -> Option<Fence> {
    let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = line.chars().take_while(|c| *c == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}

fn classify_heading(line: &str) -> Option<Line<'_>> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = strip_closing_sequence(rest.trim());
    if text.is_empty() {
        return None;
    }
    Some(Line::Heading { text })
}

/// `Label ##` -> `Label`; `C#` is left alone
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        return text;
    }
    if without.is_empty() || without.ends_with(char::is_whitespace) {
        return without.trim_end();
    }
    text
}

fn classify_checkbox(line: &str) -> Option<Line<'_>> {
    let rest = strip_list_marker(line.trim_start())?.trim_start();
    let rest = rest.strip_prefix('[')?;

    let mut chars = rest.chars();
    let state = chars.next()?;
    let rest = chars.as_str().strip_prefix(']')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let label = rest.trim();
    if label.is_empty() {
        return None;
    }
    Some(Line::Checkbox {
        checked: matches!(state, 'x' | 'X'),
        label,
    })
}

/// Strip a bullet (`-`, `*`, `+`) or ordered (`1.`, `1)`) list marker. The
/// marker must be followed by whitespace.
fn strip_list_marker(line: &str) -> Option<&str> {
    let after = match line.strip_prefix(|c: char| matches!(c, '-' | '*' | '+')) {
        Some(rest) => rest,
        None => {
            let digits = line.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 || digits > 9 {
                return None;
            }
            line[digits..].strip_prefix(|c: char| c == '.' || c == ')')?
        }
    };
    after.starts_with(char::is_whitespace).then_some(after)
}
