//! Word-wrapped text runs with line rectangles and caret placement.
//!
//! A [`TextRun`] owns a logical string and, after [`TextRun::rebuild`], the
//! positioned lines it wraps into. Lines are recomputed from scratch on every
//! rebuild; nothing is cached between layouts.

use crate::geometry::{Point, Rect, Size};
use crate::style::{StyleSpec, TextAlign};

use super::metrics::FontMetrics;

// ---------------------------------------------------------------------------
// TextLine
// ---------------------------------------------------------------------------

/// One visual line of a wrapped run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// The text drawn on this line.
    pub text: String,
    /// Char offset of the line's first character in the logical string.
    pub start: usize,
    /// Absolute rect the line occupies.
    pub rect: Rect,
}

// ---------------------------------------------------------------------------
// TextRun
// ---------------------------------------------------------------------------

/// A logical string plus its wrapped layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    text: String,
    align: TextAlign,
    lines: Vec<TextLine>,
    caret: Option<Rect>,
}

impl TextRun {
    /// Create an un-laid-out run holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// The logical string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the logical string. The layout is stale until the next rebuild.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Number of chars in the logical string.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Alignment used at the last rebuild.
    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Lines produced by the last rebuild.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Caret rect from the last rebuild, if a caret was requested.
    pub fn caret(&self) -> Option<Rect> {
        self.caret
    }

    /// Wrap the text into `rect` using `style`'s font and alignment.
    ///
    /// `caret` is a char offset; when given, the caret rect is computed too.
    pub fn rebuild(&mut self, rect: Rect, style: &StyleSpec, caret: Option<usize>) {
        let font = style.font.as_ref();
        self.align = style.text_align;
        self.lines.clear();
        self.caret = None;

        let caret_size = font.caret_size();
        let mut y = rect.y0;
        for (begin, end) in wrap(&self.text, rect.width(), font) {
            let text = &self.text[begin..end];
            let dim = font.measure(text);
            let height = if dim.height == 0 { caret_size.height } else { dim.height };
            let x = if self.align.is_right() {
                rect.x1 - dim.width
            } else if self.align.is_left() {
                rect.x0
            } else {
                rect.x0 + (rect.width() - dim.width) / 2
            };
            self.lines.push(TextLine {
                text: text.to_owned(),
                start: self.text[..begin].chars().count(),
                rect: Rect::from_origin_size(Point::new(x, y), Size::new(dim.width, height)),
            });
            y += height;
        }

        self.align_vertically(rect);

        if let Some(pos) = caret {
            self.caret = self.caret_rect(pos, font);
        }
    }

    fn align_vertically(&mut self, rect: Rect) {
        if self.align.is_bottom() {
            let mut y = rect.y1;
            for line in self.lines.iter_mut().rev() {
                let height = line.rect.height();
                line.rect.y1 = y;
                y -= height;
                line.rect.y0 = y;
            }
        } else if !self.align.is_top() {
            let (Some(first), Some(last)) = (self.lines.first(), self.lines.last()) else {
                return;
            };
            let text_height = last.rect.y1 - first.rect.y0;
            let offset = (rect.height() - text_height) / 2;
            for line in &mut self.lines {
                line.rect = line.rect.translate(0, offset);
            }
        }
    }

    fn caret_rect(&self, pos: usize, font: &dyn FontMetrics) -> Option<Rect> {
        let pos = pos.min(self.char_len());
        let line = self.lines.iter().rev().find(|line| line.start <= pos)?;
        let begin = byte_offset(&self.text, line.start);
        let end = byte_offset(&self.text, pos);
        let offset = font.measure(&self.text[begin..end]).width;
        Some(Rect::from_origin_size(
            Point::new(line.rect.x0 + offset, line.rect.y0),
            font.caret_size(),
        ))
    }
}

/// Byte offset of char index `index`, or the string length past the end.
pub(crate) fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(b, _)| b)
}

// ---------------------------------------------------------------------------
// Wrapping
// ---------------------------------------------------------------------------

/// Greedy word wrap. Returns the byte range of every line.
fn wrap(text: &str, width: i32, font: &dyn FontMetrics) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut para_begin = 0;
    for paragraph in text.split('\n') {
        let para_end = para_begin + paragraph.len();
        let mut line_begin = para_begin;
        let mut last_word_end: Option<usize> = None;

        for (word_begin, word_end) in words(paragraph) {
            let (word_begin, word_end) = (para_begin + word_begin, para_begin + word_end);
            if let Some(prev_end) = last_word_end {
                if font.measure(&text[line_begin..word_end]).width > width {
                    ranges.push((line_begin, prev_end));
                    line_begin = word_begin;
                }
            }
            last_word_end = Some(word_end);
        }

        // The last line runs to the paragraph end, blanks included.
        ranges.push((line_begin, para_end));
        para_begin = para_end + 1;
    }
    ranges
}

/// Byte ranges of the whitespace-separated words in `paragraph`.
fn words(paragraph: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut start: Option<usize> = None;
    paragraph
        .char_indices()
        .chain(std::iter::once((paragraph.len(), ' ')))
        .filter_map(move |(i, ch)| match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                start = None;
                Some((s, i))
            }
            (false, None) => {
                start = Some(i);
                None
            }
            _ => None,
        })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::testing::MonospaceFont;

    /// 10px wide glyphs, 20px lines.
    fn style(align: TextAlign) -> StyleSpec {
        let mut style = StyleSpec::new(Rc::new(MonospaceFont::new(10, 20)));
        style.text_align = align;
        style
    }

    fn line_texts(run: &TextRun) -> Vec<&str> {
        run.lines().iter().map(|l| l.text.as_str()).collect()
    }

    // ── Wrapping ─────────────────────────────────────────────────────

    #[test]
    fn short_text_is_one_line() {
        let mut run = TextRun::new("hello");
        run.rebuild(Rect::new(0, 0, 200, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["hello"]);
        assert_eq!(run.lines()[0].rect, Rect::new(0, 0, 50, 20));
    }

    #[test]
    fn wraps_between_words() {
        let mut run = TextRun::new("aaa bbb ccc");
        run.rebuild(Rect::new(0, 0, 70, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["aaa bbb", "ccc"]);
        assert_eq!(run.lines()[1].start, 8);
        assert_eq!(run.lines()[1].rect.y0, 20);
    }

    #[test]
    fn wrapped_line_drops_trailing_spaces() {
        let mut run = TextRun::new("aaa   bbb");
        run.rebuild(Rect::new(0, 0, 50, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["aaa", "bbb"]);
        assert_eq!(run.lines()[1].start, 6);
    }

    #[test]
    fn tabs_separate_words() {
        let mut run = TextRun::new("aaa\tbbb");
        run.rebuild(Rect::new(0, 0, 50, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["aaa", "bbb"]);
        assert_eq!(run.lines()[1].start, 4);
    }

    #[test]
    fn never_splits_inside_a_word() {
        let text = "alpha beta gamma delta epsilon";
        let mut run = TextRun::new(text);
        run.rebuild(Rect::new(0, 0, 60, 400), &style(TextAlign::TOP | TextAlign::LEFT), None);
        let words: Vec<&str> = text.split(' ').collect();
        for line in run.lines() {
            for word in line.text.split(' ').filter(|w| !w.is_empty()) {
                assert!(words.contains(&word), "split word {word:?}");
            }
        }
    }

    #[test]
    fn overlong_word_stays_on_its_own_line() {
        let mut run = TextRun::new("a enormousword b");
        run.rebuild(Rect::new(0, 0, 40, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["a", "enormousword", "b"]);
        assert_eq!(run.lines()[1].rect.width(), 120);
    }

    #[test]
    fn newline_forces_break_and_keeps_blanks() {
        let mut run = TextRun::new("one \n\n  two");
        run.rebuild(Rect::new(0, 0, 500, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(line_texts(&run), vec!["one ", "", "  two"]);
        assert_eq!(run.lines()[2].start, 6);
        // Empty line falls back to the caret height.
        assert_eq!(run.lines()[1].rect.height(), 20);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        let mut run = TextRun::new("");
        run.rebuild(Rect::new(0, 0, 100, 100), &style(TextAlign::TOP | TextAlign::LEFT), None);
        assert_eq!(run.lines().len(), 1);
        assert_eq!(run.lines()[0].rect.height(), 20);
    }

    // ── Alignment ────────────────────────────────────────────────────

    #[test]
    fn horizontal_alignment() {
        let rect = Rect::new(10, 0, 110, 100);
        let mut run = TextRun::new("abcd");

        run.rebuild(rect, &style(TextAlign::TOP | TextAlign::RIGHT), None);
        assert_eq!(run.lines()[0].rect.x0, 70);

        run.rebuild(rect, &style(TextAlign::TOP), None);
        assert_eq!(run.lines()[0].rect.x0, 40);
    }

    #[test]
    fn bottom_alignment_stacks_upward() {
        let mut run = TextRun::new("a\nb");
        run.rebuild(Rect::new(0, 0, 100, 100), &style(TextAlign::BOTTOM | TextAlign::LEFT), None);
        assert_eq!(run.lines()[1].rect, Rect::new(0, 80, 10, 100));
        assert_eq!(run.lines()[0].rect, Rect::new(0, 60, 10, 80));
    }

    #[test]
    fn center_alignment_centers_block() {
        let mut run = TextRun::new("a\nb");
        run.rebuild(Rect::new(0, 0, 100, 100), &style(TextAlign::CENTER), None);
        assert_eq!(run.lines()[0].rect.y0, 30);
        assert_eq!(run.lines()[1].rect.y1, 70);
        assert_eq!(run.align(), TextAlign::CENTER);
    }

    // ── Caret ────────────────────────────────────────────────────────

    #[test]
    fn caret_at_start_is_first_line_start() {
        let mut run = TextRun::new("aaa bbb");
        run.rebuild(Rect::new(0, 0, 50, 100), &style(TextAlign::TOP | TextAlign::LEFT), Some(0));
        assert_eq!(run.caret(), Some(Rect::new(0, 0, 10, 20)));
    }

    #[test]
    fn caret_at_end_follows_last_char() {
        let mut run = TextRun::new("aaa bbb");
        run.rebuild(Rect::new(0, 0, 50, 100), &style(TextAlign::TOP | TextAlign::LEFT), Some(7));
        assert_eq!(run.caret(), Some(Rect::new(30, 20, 40, 40)));
    }

    #[test]
    fn caret_after_newline_sits_on_next_line() {
        let mut run = TextRun::new("ab\n");
        run.rebuild(Rect::new(0, 0, 100, 100), &style(TextAlign::TOP | TextAlign::LEFT), Some(3));
        assert_eq!(run.caret(), Some(Rect::new(0, 20, 10, 40)));
    }

    #[test]
    fn no_caret_when_not_requested() {
        let mut run = TextRun::new("abc");
        run.rebuild(Rect::new(0, 0, 100, 100), &style(TextAlign::CENTER), None);
        assert_eq!(run.caret(), None);
    }

    #[test]
    fn multibyte_text_uses_char_offsets() {
        let mut run = TextRun::new("żółw kot");
        run.rebuild(Rect::new(0, 0, 50, 100), &style(TextAlign::TOP | TextAlign::LEFT), Some(6));
        assert_eq!(line_texts(&run), vec!["żółw", "kot"]);
        assert_eq!(run.lines()[1].start, 5);
        assert_eq!(run.caret(), Some(Rect::new(10, 20, 20, 40)));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut run = TextRun::new("some words to wrap around");
        let s = style(TextAlign::CENTER);
        run.rebuild(Rect::new(0, 0, 80, 200), &s, Some(4));
        let first = run.clone();
        run.rebuild(Rect::new(0, 0, 80, 200), &s, Some(4));
        assert_eq!(run, first);
    }
}
