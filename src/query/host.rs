//! Text-bearing nodes handed over by document-format adapters.
//!
//! A host node is an immutable value. Rewrites never mutate it in place; they
//! build a new node of the same kind with the new SQL embedded using that
//! kind's own encoding rules.
use crate::*;

/// Marker left on a node when a search condition matched it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchResult {
    pub description: Option<String>,
}

/// Style of a configuration scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Folded,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// A string literal in program source. `source` is the literal as written,
    /// delimiters included; `value` is its decoded content.
    Literal { value: String, source: String },
    /// A scalar value from a configuration document.
    Scalar { value: String, style: ScalarStyle },
    /// A whole plain-text resource such as a `.sql` file.
    PlainText { text: String },
}

/// Delimiter style of a program string literal, derived from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// `"""` multi-line text block.
    TextBlock,
    DoubleQuoted,
    SingleQuoted,
}

const TEXT_BLOCK: &str = "\"\"\"";

impl LiteralStyle {
    pub fn of(source: &str) -> Option<Self> {
        if source.starts_with(TEXT_BLOCK) && source.len() >= 2 * TEXT_BLOCK.len() {
            Some(Self::TextBlock)
        } else if source.starts_with('"') {
            Some(Self::DoubleQuoted)
        } else if source.starts_with('\'') {
            Some(Self::SingleQuoted)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNode {
    pub kind: HostKind,
    pub found: Vec<SearchResult>,
}

impl From<HostKind> for HostNode {
    fn from(kind: HostKind) -> Self {
        Self {
            kind,
            found: Vec::new(),
        }
    }
}

impl HostNode {
    pub fn literal(value: impl Into<String>, source: impl Into<String>) -> Self {
        HostKind::Literal {
            value: value.into(),
            source: source.into(),
        }
        .into()
    }

    /// A double-quoted literal whose source is derived from `value`.
    pub fn quoted(value: impl Into<String>) -> Self {
        let value = value.into();
        let source = format!("\"{}\"", escape(&value, '"'));
        Self::literal(value, source)
    }

    pub fn scalar(value: impl Into<String>, style: ScalarStyle) -> Self {
        HostKind::Scalar {
            value: value.into(),
            style,
        }
        .into()
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        HostKind::PlainText { text: text.into() }.into()
    }

    /// The SQL-bearing text of this node.
    pub fn text(&self) -> &str {
        match &self.kind {
            HostKind::Literal { value, .. } => value,
            HostKind::Scalar { value, .. } => value,
            HostKind::PlainText { text } => text,
        }
    }

    /// Source spelling of a literal, `None` for other kinds.
    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            HostKind::Literal { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn literal_style(&self) -> Option<LiteralStyle> {
        self.source().and_then(LiteralStyle::of)
    }

    pub fn is_text_block(&self) -> bool {
        self.literal_style() == Some(LiteralStyle::TextBlock)
    }

    /// Inner text of a text block, between its delimiters.
    pub fn text_block_body(&self) -> Option<&str> {
        if !self.is_text_block() {
            return None;
        }
        self.source()?
            .strip_prefix(TEXT_BLOCK)?
            .strip_suffix(TEXT_BLOCK)
    }

    /// A new node of the same kind carrying `sql`, encoded the way this kind
    /// encodes its content. Markers are kept.
    pub fn with_sql(&self, sql: &str, style: &IndentStyle) -> HostNode {
        let kind = match &self.kind {
            HostKind::Literal { source, .. } => match LiteralStyle::of(source) {
                Some(LiteralStyle::TextBlock) => {
                    return self.with_text_block(sql, style);
                }
                Some(LiteralStyle::SingleQuoted) => HostKind::Literal {
                    value: sql.to_string(),
                    source: format!("'{}'", escape(sql, '\'')),
                },
                Some(LiteralStyle::DoubleQuoted) | None => HostKind::Literal {
                    value: sql.to_string(),
                    source: format!("\"{}\"", escape(sql, '"')),
                },
            },
            HostKind::Scalar { style, .. } => HostKind::Scalar {
                value: sql.to_string(),
                style: *style,
            },
            HostKind::PlainText { .. } => HostKind::PlainText {
                text: sql.to_string(),
            },
        };
        HostNode {
            kind,
            found: self.found.clone(),
        }
    }

    /// Rebuild a text block around `sql`, indented like the original body.
    pub fn with_text_block(&self, sql: &str, style: &IndentStyle) -> HostNode {
        let body = self.text_block_body().unwrap_or_default();
        let (sql, value) = if ends_with_line_break(body) {
            // The closing delimiter's own line supplies the final line break.
            let sql = sql.strip_suffix('\n').unwrap_or(sql);
            (sql, format!("{sql}\n"))
        } else {
            (sql, sql.to_string())
        };
        let indented = reindent(body, sql, style);
        HostNode {
            kind: HostKind::Literal {
                value,
                source: format!("{TEXT_BLOCK}{indented}{TEXT_BLOCK}"),
            },
            found: self.found.clone(),
        }
    }

    /// Mark this node as matched by a search. Marking twice with the same
    /// description leaves a single marker.
    pub fn mark_found(mut self, description: Option<&str>) -> Self {
        let marker = SearchResult {
            description: description.map(str::to_string),
        };
        if !self.found.contains(&marker) {
            self.found.push(marker);
        }
        self
    }

    pub fn is_found(&self) -> bool {
        !self.found.is_empty()
    }
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
