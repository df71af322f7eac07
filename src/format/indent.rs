//! Re-embedding formatted SQL into a multi-line text block.
//!
//! Text blocks strip the common leading whitespace of their lines, so the
//! formatted query is indented as deep as the shallowest line of the block it
//! replaces. Trailing spaces are written as `\s` and a `\` at the end of a line
//! joins it with the next one.

/// Tabs-and-indents style of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentStyle {
    pub use_tabs: bool,
    pub tab_size: usize,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self {
            use_tabs: false,
            tab_size: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Indent {
    tabs: usize,
    spaces: usize,
}

impl Indent {
    fn width(&self, tab_size: usize) -> usize {
        self.tabs * tab_size + self.spaces
    }

    fn is_empty(&self) -> bool {
        self.tabs == 0 && self.spaces == 0
    }

    fn render(&self, style: &IndentStyle) -> String {
        if style.use_tabs {
            format!("{}{}", "\t".repeat(self.tabs), " ".repeat(self.spaces))
        } else {
            " ".repeat(self.width(style.tab_size))
        }
    }
}

/// Shortest indentation of a line that has content. When no such line exists
/// the whitespace after the last newline is used.
fn shortest_indent(text: &str, tab_size: usize) -> Indent {
    let mut shortest: Option<Indent> = None;
    let mut current = Indent::default();
    let mut after_newline = false;

    for c in text.chars() {
        match c {
            '\n' => {
                after_newline = true;
                current = Indent::default();
            }
            ' ' if after_newline => current.spaces += 1,
            '\t' if after_newline => current.tabs += 1,
            _ => {
                if after_newline
                    && shortest.is_none_or(|s| current.width(tab_size) < s.width(tab_size))
                {
                    shortest = Some(current);
                }
                after_newline = false;
                current = Indent::default();
            }
        }
    }

    match shortest {
        Some(indent) => indent,
        None if after_newline && !current.is_empty() => current,
        None => Indent::default(),
    }
}

/// True when `body` ends with a real line break, optionally followed by
/// spaces or tabs. A line break escaped by a trailing `\` does not count.
pub fn ends_with_line_break(body: &str) -> bool {
    let Some(before) = body.trim_end_matches([' ', '\t']).strip_suffix('\n') else {
        return false;
    };
    let backslashes = before.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 0
}

/// Escapes what a text block would otherwise read as an escape sequence or
/// as its closing delimiter.
fn escape_line(line: &str) -> String {
    line.replace('\\', "\\\\").replace("\"\"\"", "\\\"\"\"")
}

/// Indent `formatted` for a text block whose current inner text is `original`.
///
/// The result is the new inner text: it starts with the line break that
/// must follow the opening delimiter and ends so that the closing delimiter
/// sits on its own line at the computed indentation.
pub fn reindent(original: &str, formatted: &str, style: &IndentStyle) -> String {
    let indentation = shortest_indent(original, style.tab_size).render(style);

    let mut out = String::with_capacity(formatted.len() * 2);
    out.push('\n');
    out.push_str(&indentation);
    let mut lines = formatted.split('\n').peekable();
    while let Some(line) = lines.next() {
        let last = lines.peek().is_none();
        let line = escape_line(line);
        match line.strip_suffix(' ') {
            Some(head) if !last => {
                out.push_str(head);
                out.push_str("\\s");
            }
            _ => out.push_str(&line),
        }
        if !last {
            out.push('\n');
            out.push_str(&indentation);
        }
    }

    if !ends_with_line_break(original) {
        out.push('\\');
    }
    out.push('\n');
    out.push_str(&indentation);
    out
}
