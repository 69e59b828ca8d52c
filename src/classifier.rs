use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::Path;

/// Extensions of formats we can't safely read as text. Files with these
/// extensions are never inspected and always kept.
const EXCLUDED_EXTENSIONS: &[&str] = &[
    "xls", "xlsx", "xlsm", "xlsb", // spreadsheets
    "bin", "exe", "dll", // binaries
    "zip", "tar", "gz", // archives
    "png", "jpg", "jpeg", // images
    "pdf",
];

/// Characters whose presence suggests the text has sentence structure.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Content shorter than this (in characters) without a terminator is junk.
const MIN_PROSE_CHARS: usize = 30;

/// Single lines with at most this many words and no terminator are junk.
const MAX_FRAGMENT_WORDS: usize = 3;

/// Line boundaries besides `\n` and `\r`: vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line/paragraph separators.
const EXTRA_LINE_BREAKS: &[char] = &[
    '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Good,
    Junk,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Good => f.write_str("good"),
            Verdict::Junk => f.write_str("junk"),
        }
    }
}

/// The rule that decided a file's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Known non-text format, left alone.
    ExcludedExtension,
    /// None of the junk rules matched.
    Prose,
    /// Nothing but whitespace.
    Empty,
    /// A single line of a few words without sentence punctuation.
    ShortSingleLine,
    /// Under 30 characters without sentence punctuation.
    ShortWithoutPunctuation,
    /// Only digits, symbols and whitespace.
    NoAlphabetic,
    /// The file could not be read.
    Unreadable,
}

impl Reason {
    pub fn verdict(self) -> Verdict {
        match self {
            Reason::ExcludedExtension | Reason::Prose => Verdict::Good,
            Reason::Empty
            | Reason::ShortSingleLine
            | Reason::ShortWithoutPunctuation
            | Reason::NoAlphabetic
            | Reason::Unreadable => Verdict::Junk,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Reason::ExcludedExtension => "non-text extension",
            Reason::Prose => "has text content",
            Reason::Empty => "empty",
            Reason::ShortSingleLine => "single short line",
            Reason::ShortWithoutPunctuation => "short, no punctuation",
            Reason::NoAlphabetic => "no letters",
            Reason::Unreadable => "unreadable",
        }
    }
}

/// Classify a regular file. Never fails: anything unreadable is junk.
pub fn classify(path: &Path) -> Verdict {
    explain(path).verdict()
}

/// Run the junk heuristic on `path` and report which rule decided it.
pub fn explain(path: &Path) -> Reason {
    if is_excluded_extension(path) {
        return Reason::ExcludedExtension;
    }

    match read_text(path) {
        Ok(text) => assess_text(&text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "failed to read file");
            Reason::Unreadable
        }
    }
}

/// Whether the file's extension marks it as a format we don't inspect.
pub fn is_excluded_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| EXCLUDED_EXTENSIONS.contains(&ext.as_str()))
}

/// Read a file as UTF-8 text, dropping any byte sequences that don't decode.
/// `\r\n` and lone `\r` line endings come back as `\n`.
pub fn read_text(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Ok(normalize_newlines(&text).into_owned())
}

/// Apply the content rules to already-decoded text.
pub fn assess_text(text: &str) -> Reason {
    let text = normalize_newlines(text);
    let content = text.trim_matches(is_space);
    if content.is_empty() {
        return Reason::Empty;
    }

    let mut lines = content
        .split(is_line_break)
        .map(|l| l.trim_matches(is_space))
        .filter(|l| !l.is_empty());
    if let (Some(line), None) = (lines.next(), lines.next()) {
        let words = line.split(is_space).filter(|w| !w.is_empty()).count();
        if words <= MAX_FRAGMENT_WORDS && !has_terminator(line) {
            return Reason::ShortSingleLine;
        }
    }

    if content.chars().count() < MIN_PROSE_CHARS && !has_terminator(content) {
        return Reason::ShortWithoutPunctuation;
    }

    if !content.chars().any(char::is_alphabetic) {
        return Reason::NoAlphabetic;
    }

    Reason::Prose
}

fn has_terminator(s: &str) -> bool {
    s.contains(SENTENCE_TERMINATORS)
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r' || EXTRA_LINE_BREAKS.contains(&c)
}

/// Unicode whitespace plus the ASCII separators U+001C..U+001F.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
