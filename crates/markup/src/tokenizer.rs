//! Character-level tokenizer
//!
//! The tokenizer walks a `&[char]` buffer one construct at a time. Every scan
//! starts by skipping blanks, then tries the recognizers in priority order:
//! heading, emphasis, code, strikethrough. A recognizer that cannot find its
//! closing delimiter restores its checkpoint and the run is emitted as literal
//! text together with the rest of the line, so malformed markup is never an
//! error and never loses input.

use std::ops::Range;

use markup_core::{Element, Node, Options, Span};
use tracing::trace;

const FENCE: [char; 3] = ['`'; 3];
const BACKTICK: [char; 1] = ['`'];
const STRIKE: [char; 2] = ['~'; 2];

/// Saved cursor state to roll back a failed match
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    at_line_start: bool,
}

/// A matched delimiter pair, in buffer-local indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    start: usize,
    end: usize,
    delim_len: usize,
}

impl Pair {
    /// Range between the delimiters
    pub fn inner(&self) -> Range<usize> {
        self.start + self.delim_len..self.end - self.delim_len
    }

    /// Full captured range, both delimiters included
    pub fn outer(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Offset just past the closing delimiter
    pub fn end(&self) -> usize {
        self.end
    }
}

/// Scans a character buffer into markup nodes
pub struct Tokenizer<'a> {
    buf: &'a [char],
    /// Absolute offset of `buf[0]`, non-zero for scoped sub-tokenizers
    base: usize,
    pos: usize,
    at_line_start: bool,
    fence_mode: bool,
    options: &'a Options,
    /// Span of the latest top-level node with the index of the root child owning it
    last: Option<(Span, usize)>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `buf`
    pub fn new(buf: &'a [char], options: &'a Options) -> Self {
        Self {
            buf,
            base: 0,
            pos: 0,
            at_line_start: true,
            fence_mode: false,
            options,
            last: None,
        }
    }

    /// A fresh tokenizer over a slice of this buffer, keeping absolute offsets
    fn scoped(&self, range: Range<usize>) -> Tokenizer<'a> {
        Tokenizer {
            buf: &self.buf[range.start..range.end],
            base: self.base + range.start,
            pos: 0,
            at_line_start: false,
            fence_mode: false,
            options: self.options,
            last: None,
        }
    }

    /// Absolute cursor position
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            at_line_start: self.at_line_start,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.at_line_start = checkpoint.at_line_start;
        self.fence_mode = false;
    }

    /// Build into `root` until the input is exhausted.
    ///
    /// In a container, a node whose span lies inside an earlier node's span is
    /// appended to that node's chain; everything else becomes a new child. The
    /// cursor only moves forward, so only the latest span can enclose a new
    /// node. In an element, every node is appended to the chain in scan order,
    /// together with the blanks skipped before it.
    pub fn scan_into(&mut self, root: &mut Node) {
        match root {
            Node::Container(container) => {
                while let Some(node) = self.scan() {
                    let span = node.span();
                    let owner = self.enclosing(&span).and_then(|index| {
                        container.children[index]
                            .as_element_mut()
                            .map(|element| (index, element))
                    });
                    let index = match owner {
                        Some((index, element)) => {
                            element.append(node);
                            index
                        }
                        None => {
                            container.children.push(node);
                            container.children.len() - 1
                        }
                    };
                    self.last = Some((span, index));
                }
            }
            Node::Element(element) => loop {
                let gap_start = self.pos;
                let Some(node) = self.scan() else {
                    break;
                };
                let gap = self.collect(gap_start..node.offset() - self.base);
                element.append_after(&gap, node);
            },
        }
    }

    fn enclosing(&self, span: &Span) -> Option<usize> {
        self.last
            .filter(|(prev, _)| prev.encloses(span))
            .map(|(_, index)| index)
    }

    /// Produce the next node, or `None` once only blanks remain
    pub fn scan(&mut self) -> Option<Node> {
        self.skip_blank();
        let ch = self.peek()?;
        let start = self.pos;

        let node = match ch {
            '#' if self.at_line_start => Some(self.scan_heading()),
            '*' => self.scan_emphasis(),
            '`' => self.scan_code(),
            '~' => self.scan_strikethrough(),
            _ => None,
        };
        self.at_line_start = false;

        Some(node.unwrap_or_else(|| self.scan_text(start)))
    }

    /// Locate the next `delim` after the cursor, which sits just past the
    /// opening run. Outside fence mode the search stops at the end of the
    /// current line; in fence mode it runs to the end of input.
    pub fn scan_pair(&mut self, delim: &[char]) -> Option<Pair> {
        let start = self.pos.checked_sub(delim.len())?;
        let limit = if self.fence_mode {
            self.buf.len()
        } else {
            self.line_end(self.pos)
        };
        self.fence_mode = false;

        if delim.is_empty() || limit < self.pos {
            return None;
        }
        let found = self.buf[self.pos..limit]
            .windows(delim.len())
            .position(|window| window == delim)?;

        self.pos += found + delim.len();
        Some(Pair {
            start,
            end: self.pos,
            delim_len: delim.len(),
        })
    }

    fn scan_heading(&mut self) -> Node {
        let start = self.pos;
        let level = self.run_len('#');
        self.pos += level;

        let end = self.line_end(self.pos);
        let content_start = (self.pos..end)
            .find(|&i| !is_blank(self.buf[i]))
            .unwrap_or(end);
        self.pos = end;

        trace!(offset = self.base + start, heading_level = level, "heading");
        let heading = Element::new(
            format!("h{level}"),
            self.collect(start..end),
            self.span(start..end),
        );
        self.with_literal(heading, content_start..end).into()
    }

    fn scan_emphasis(&mut self) -> Option<Node> {
        let checkpoint = self.checkpoint();
        let options = self.options;
        let run = self.run_len('*');

        let Some(style) = options.emphasis_style(run) else {
            trace!(offset = self.position(), run, "emphasis run too long, keeping literal");
            return None;
        };
        self.pos += run;

        let delim = vec!['*'; run];
        let Some(pair) = self.scan_pair(&delim) else {
            trace!(offset = self.base + checkpoint.pos, run, "unmatched emphasis, keeping literal");
            self.restore(checkpoint);
            return None;
        };

        trace!(offset = self.base + pair.start, run, "emphasis");
        let mut node = Node::from(
            Element::new("span", self.collect(pair.outer()), self.span(pair.outer()))
                .with_attr("style", style),
        );
        self.scoped(pair.inner()).scan_into(&mut node);
        Some(node)
    }

    fn scan_code(&mut self) -> Option<Node> {
        let checkpoint = self.checkpoint();
        let options = self.options;
        let run = self.run_len('`');
        self.pos += run;

        let pair = match run {
            3 => {
                self.fence_mode = true;
                self.scan_pair(&FENCE)
            }
            1 => self.scan_pair(&BACKTICK),
            _ => None,
        };
        let Some(pair) = pair else {
            trace!(offset = self.base + checkpoint.pos, run, "unmatched code, keeping literal");
            self.restore(checkpoint);
            return None;
        };

        trace!(offset = self.base + pair.start, run, "code");
        let raw = self.collect(pair.outer());
        let span = self.span(pair.outer());
        let node = if run == 3 {
            Element::new("p", raw.clone(), span)
                .with_attr("class", options.code_class.as_str())
                .with_nested(Element::text_node(raw, span))
        } else {
            let code =
                Element::new("span", raw, span).with_attr("class", options.code_class.as_str());
            self.with_literal(code, pair.inner())
        };
        Some(node.into())
    }

    fn scan_strikethrough(&mut self) -> Option<Node> {
        if self.buf.get(self.pos + 1) != Some(&'~') {
            return None;
        }
        let checkpoint = self.checkpoint();
        let options = self.options;
        self.pos += STRIKE.len();

        let Some(pair) = self.scan_pair(&STRIKE) else {
            trace!(offset = self.base + checkpoint.pos, "unmatched strikethrough, keeping literal");
            self.restore(checkpoint);
            return None;
        };

        trace!(offset = self.base + pair.start, "strikethrough");
        let strike = Element::new("span", self.collect(pair.outer()), self.span(pair.outer()))
            .with_attr("style", options.strikethrough_style.as_str());
        Some(self.with_literal(strike, pair.inner()).into())
    }

    /// Everything from `start` to the end of the logical line, verbatim
    fn scan_text(&mut self, start: usize) -> Node {
        let end = self.line_end(start);
        self.pos = end;
        Element::text_node(self.collect(start..end), self.span(start..end)).into()
    }

    /// Nest the characters of `range` as a text node, unless there are none
    fn with_literal(&self, element: Element, range: Range<usize>) -> Element {
        if range.is_empty() {
            return element;
        }
        element.with_nested(Element::text_node(self.collect(range.clone()), self.span(range)))
    }

    fn skip_blank(&mut self) {
        while let Some(ch) = self.peek() {
            if let Some(len) = self.break_len(self.pos) {
                self.pos += len;
                self.at_line_start = true;
            } else if is_blank(ch) || ch == '\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Length of the logical line boundary starting at `i`, if there is one.
    ///
    /// A boundary is a newline, CRLF, or the two-character escape `\n`.
    fn break_len(&self, i: usize) -> Option<usize> {
        match (self.buf.get(i)?, self.buf.get(i + 1)) {
            ('\n', _) => Some(1),
            ('\r', Some('\n')) | ('\\', Some('n')) => Some(2),
            _ => None,
        }
    }

    fn line_end(&self, from: usize) -> usize {
        (from..self.buf.len())
            .find(|&i| self.break_len(i).is_some())
            .unwrap_or(self.buf.len())
    }

    fn run_len(&self, ch: char) -> usize {
        self.buf[self.pos..].iter().take_while(|&&c| c == ch).count()
    }

    fn peek(&self) -> Option<char> {
        self.buf.get(self.pos).copied()
    }

    fn collect(&self, range: Range<usize>) -> String {
        self.buf[range].iter().collect()
    }

    fn span(&self, range: Range<usize>) -> Span {
        Span::new(self.base + range.start, range.len())
    }
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
