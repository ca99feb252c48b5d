/// Comment marker; everything after it on a line is ignored
pub const COMMENT_CHAR: char = ';';
/// Suffix that turns a bare identifier into a label
pub const LABEL_SUFFIX: char = ':';

/// One physical line of program text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line number inside the text being lexed (1-indexed)
    pub number: usize,
    /// Raw line text without the trailing newline
    pub raw: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Splits text into lines, dropping `\r` from CRLF endings
    pub fn split(source: &'a str) -> Vec<SourceLine<'a>> {
        source
            .lines()
            .enumerate()
            .map(|(idx, raw)| SourceLine {
                number: idx + 1,
                raw: raw.trim_end_matches('\r'),
            })
            .collect()
    }

    /// Line content with the comment removed and surrounding whitespace trimmed
    pub fn code(&self) -> &'a str {
        let uncommented = match self.raw.find(COMMENT_CHAR) {
            Some(pos) => &self.raw[..pos],
            None => self.raw,
        };
        uncommented.trim()
    }

    /// True when nothing but whitespace or a comment is on the line
    pub fn is_blank(&self) -> bool {
        self.code().is_empty()
    }

    /// True when the line opens with one indentation step: `width` spaces or a tab
    pub fn is_indented(&self, width: usize) -> bool {
        opens_indent(self.raw, width)
    }

    /// True for a comment with nothing before it, as opposed to an empty line
    pub fn is_comment_only(&self) -> bool {
        self.raw.trim_start().starts_with(COMMENT_CHAR)
    }

    /// Raw text with one indentation step removed
    pub fn dedent(&self, width: usize) -> &'a str {
        if let Some(rest) = self.raw.strip_prefix('\t') {
            rest
        } else if self.is_indented(width) {
            &self.raw[width..]
        } else {
            self.raw
        }
    }
}

/// True when `text` starts with one indentation step: `width` spaces or a tab
pub fn opens_indent(text: &str, width: usize) -> bool {
    text.starts_with('\t') || (width > 0 && text.starts_with(&" ".repeat(width)))
}

/// Splits `code` into its first whitespace-delimited word and the remainder
pub fn split_head(code: &str) -> (&str, &str) {
    match code.find(char::is_whitespace) {
        Some(pos) => (&code[..pos], code[pos..].trim_start()),
        None => (code, ""),
    }
}

/// Label name for a `name:` token, if the token has that shape
pub fn label_name(token: &str) -> Option<&str> {
    let name = token.strip_suffix(LABEL_SUFFIX)?;
    if name.is_empty() || name.contains(LABEL_SUFFIX) {
        return None;
    }
    Some(name)
}
