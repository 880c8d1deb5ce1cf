//! Soft-wrap layout: splitting a long line into rows ("chunks").
//!
//! A chunk is identified by its leftedge, the column its first character
//! sits at. Chunks are never stored; every routine here recomputes them from
//! the line bytes, the row width and the [`Flags::AT_BLANKS`] setting.
//!
//! The navigation helpers ([`Engine::chunk_and_edge`] and friends) honour
//! [`Flags::SOFTWRAP`]: with soft-wrap off every line is exactly one chunk.
//! [`Engine::softwrap_breakpoint`] and [`Engine::chunks`] always wrap.

use crate::config::Flags;
use crate::engine::Engine;
use crate::text::document::Document;

/// Where a row ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    /// The column at which the next row starts (or the width of the line
    /// when this is its last row).
    pub column: usize,
    /// Whether this row is the last one of the line.
    pub end_of_line: bool,
}

/// One row of a soft-wrapped line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Column the row starts at.
    pub leftedge: usize,
    /// Byte offset of the first character shown in the row.
    pub start_x: usize,
    /// Column the next row starts at, or the width of the line.
    pub end_column: usize,
    /// Whether this is the line's last row.
    pub end_of_line: bool,
}

/// Scan position carried from one row to the next.
#[derive(Clone, Copy, Debug, Default)]
struct Scan {
    x: usize,
    column: usize,
}

impl Engine {
    /// Find where the row that starts at `leftedge` ends, for rows of `cols`
    /// columns.
    ///
    /// A double-width character is never split: it moves to the next row. A
    /// tab that straddles the edge fills this row and the next row begins
    /// after it. With [`Flags::AT_BLANKS`] the row breaks after the last
    /// blank that fits. A character wider than the whole row gets a row of
    /// its own, so every row makes progress.
    #[must_use]
    pub fn softwrap_breakpoint(&self, text: &[u8], leftedge: usize, cols: usize) -> Breakpoint {
        self.wrap_row(text, &mut Scan::default(), leftedge, cols).1
    }

    /// Lay out one row starting at `leftedge`, continuing from `scan`.
    ///
    /// Returns the byte offset of the row's first character and where the
    /// row ends; `scan` is left at the first character of the next row.
    fn wrap_row(
        &self,
        text: &[u8],
        scan: &mut Scan,
        leftedge: usize,
        cols: usize,
    ) -> (usize, Breakpoint) {
        let cls = self.classifier();
        let goal = leftedge + cols.max(1);

        while scan.x < text.len() && scan.column < leftedge {
            scan.x += self.advance_over(&text[scan.x..], &mut scan.column);
        }
        // Combining marks at the edge belong to the previous row.
        if leftedge > 0 && scan.column == leftedge {
            self.absorb_zero_width(text, scan);
        }

        let at_blanks = self.is_set(Flags::AT_BLANKS);
        let start = *scan;
        let mut farthest_blank: Option<Scan> = None;
        let mut breaking_col = leftedge;
        let mut prev = *scan;

        while scan.x < text.len() && scan.column <= goal {
            let bytes = &text[scan.x..];
            if at_blanks && scan.column < goal && cls.is_blank(bytes) {
                farthest_blank = Some(*scan);
            }
            breaking_col = if bytes[0] == b'\t' { goal } else { scan.column };
            prev = *scan;
            scan.x += self.advance_over(bytes, &mut scan.column);
        }

        if scan.column <= goal {
            let brk = Breakpoint {
                column: scan.column,
                end_of_line: true,
            };
            return (start.x, brk);
        }

        if let Some(mut blank) = farthest_blank {
            blank.x += self.advance_over(&text[blank.x..], &mut blank.column);
            if blank.column <= goal {
                *scan = blank;
                let brk = Breakpoint {
                    column: blank.column,
                    end_of_line: false,
                };
                return (start.x, brk);
            }
        }

        if start.column > goal {
            // The whole row lies inside a tab that started on an earlier row.
            *scan = start;
            let brk = Breakpoint {
                column: goal,
                end_of_line: false,
            };
            return (start.x, brk);
        }

        if breaking_col <= leftedge {
            // Not even one character fits: give it a row of its own.
            let mut forced = start;
            while forced.x < text.len() && forced.column <= leftedge {
                forced.x += self.advance_over(&text[forced.x..], &mut forced.column);
            }
            self.absorb_zero_width(text, &mut forced);
            *scan = forced;
            let brk = Breakpoint {
                column: forced.column,
                end_of_line: forced.x >= text.len(),
            };
            return (start.x, brk);
        }

        // Resume at the first character that starts at or after the break.
        if prev.column >= breaking_col {
            *scan = prev;
        }
        let brk = Breakpoint {
            column: breaking_col,
            end_of_line: false,
        };
        (start.x, brk)
    }

    fn absorb_zero_width(&self, text: &[u8], scan: &mut Scan) {
        while scan.x < text.len() && self.classifier().is_zero_width(&text[scan.x..]) {
            scan.x += self.advance_over(&text[scan.x..], &mut scan.column);
        }
    }

    /// Iterate over the rows of `text` when wrapped at `cols` columns.
    ///
    /// Always yields at least one chunk; the last one has `end_of_line` set.
    #[must_use]
    pub fn chunks<'a>(&'a self, text: &'a [u8], cols: usize) -> Chunks<'a> {
        Chunks {
            engine: self,
            text,
            cols,
            scan: Scan::default(),
            leftedge: 0,
            done: false,
        }
    }

    /// The chunk index that `column` falls in, and that chunk's leftedge.
    #[must_use]
    pub fn chunk_and_edge(&self, text: &[u8], column: usize, cols: usize) -> (usize, usize) {
        if !self.is_set(Flags::SOFTWRAP) {
            return (0, 0);
        }
        let mut last = (0, 0);
        for (idx, chunk) in self.chunks(text, cols).enumerate() {
            last = (idx, chunk.leftedge);
            if column < chunk.end_column || chunk.end_of_line {
                break;
            }
        }
        last
    }

    /// The chunk index that `column` falls in.
    #[must_use]
    pub fn chunk_for(&self, text: &[u8], column: usize, cols: usize) -> usize {
        self.chunk_and_edge(text, column, cols).0
    }

    /// The leftedge of the chunk that `column` falls in.
    #[must_use]
    pub fn leftedge_for(&self, text: &[u8], column: usize, cols: usize) -> usize {
        self.chunk_and_edge(text, column, cols).1
    }

    /// Number of rows beyond the first that `text` occupies.
    #[must_use]
    pub fn extra_chunks_in(&self, text: &[u8], cols: usize) -> usize {
        if !self.is_set(Flags::SOFTWRAP) {
            return 0;
        }
        self.chunks(text, cols).count() - 1
    }

    /// Move `line`/`leftedge` up by `nrows` rows.
    ///
    /// Returns how many rows could not be traversed because the top of the
    /// document was reached.
    pub fn go_back_chunks(
        &self,
        doc: &Document,
        nrows: usize,
        line: &mut usize,
        leftedge: &mut usize,
        cols: usize,
    ) -> usize {
        if !self.is_set(Flags::SOFTWRAP) {
            let moved = nrows.min(*line);
            *line -= moved;
            return nrows - moved;
        }

        let mut remaining = nrows;
        let mut column = *leftedge;
        while remaining > 0 {
            let chunk = self.chunk_for(doc.text(*line), column, cols);
            if chunk >= remaining {
                *leftedge = self.nth_leftedge(doc.text(*line), chunk - remaining, cols);
                return 0;
            }
            if *line == 0 {
                *leftedge = 0;
                return remaining - chunk;
            }
            remaining -= chunk + 1;
            *line -= 1;
            column = usize::MAX;
        }
        *leftedge = self.leftedge_for(doc.text(*line), column, cols);
        0
    }

    /// Move `line`/`leftedge` down by `nrows` rows.
    ///
    /// Returns how many rows could not be traversed because the bottom of
    /// the document was reached. `leftedge` is only changed when at least
    /// one row was traversed.
    pub fn go_forward_chunks(
        &self,
        doc: &Document,
        nrows: usize,
        line: &mut usize,
        leftedge: &mut usize,
        cols: usize,
    ) -> usize {
        if !self.is_set(Flags::SOFTWRAP) {
            let moved = nrows.min(doc.last_line() - (*line).min(doc.last_line()));
            *line += moved;
            return nrows - moved;
        }

        let mut remaining = nrows;
        let mut current = *leftedge;
        let mut scan = Scan::default();
        while remaining > 0 {
            let (_, brk) = self.wrap_row(doc.text(*line), &mut scan, current, cols);
            if !brk.end_of_line {
                current = brk.column;
            } else if *line >= doc.last_line() {
                break;
            } else {
                *line += 1;
                current = 0;
                scan = Scan::default();
            }
            remaining -= 1;
        }
        if remaining < nrows {
            *leftedge = current;
        }
        remaining
    }

    fn nth_leftedge(&self, text: &[u8], n: usize, cols: usize) -> usize {
        self.chunks(text, cols)
            .nth(n)
            .map_or(0, |chunk| chunk.leftedge)
    }
}

/// Iterator over the [`Chunk`]s of a line. See [`Engine::chunks`].
#[derive(Debug)]
pub struct Chunks<'a> {
    engine: &'a Engine,
    text: &'a [u8],
    cols: usize,
    scan: Scan,
    leftedge: usize,
    done: bool,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.done {
            return None;
        }
        let leftedge = self.leftedge;
        let (start_x, brk) = self
            .engine
            .wrap_row(self.text, &mut self.scan, leftedge, self.cols);
        self.leftedge = brk.column;
        self.done = brk.end_of_line;
        Some(Chunk {
            leftedge,
            start_x,
            end_column: brk.column,
            end_of_line: brk.end_of_line,
        })
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;

    fn wrapping(flags: Flags) -> Engine {
        Engine::new(Options::default().with_flags(flags)).unwrap()
    }

    fn layout(engine: &Engine, text: &str, cols: usize) -> Vec<(usize, usize)> {
        engine
            .chunks(text.as_bytes(), cols)
            .map(|chunk| (chunk.leftedge, chunk.start_x))
            .collect()
    }

    #[test]
    fn test_plain_wrapping() {
        let engine = wrapping(Flags::SOFTWRAP);
        assert_eq!(layout(&engine, "abcdefghij", 4), [(0, 0), (4, 4), (8, 8)]);
        assert_eq!(layout(&engine, "abcd", 4), [(0, 0)]);
        assert_eq!(layout(&engine, "", 4), [(0, 0)]);

        let last = engine.chunks(b"abcdefghij", 4).last().unwrap();
        assert!(last.end_of_line);
        assert_eq!(last.end_column, 10);
    }

    #[test]
    fn test_wide_char_moves_to_next_row() {
        let engine = wrapping(Flags::SOFTWRAP);
        assert_eq!(
            engine.softwrap_breakpoint("abc中d".as_bytes(), 0, 4),
            Breakpoint {
                column: 3,
                end_of_line: false
            }
        );
        assert_eq!(layout(&engine, "abc中d", 4), [(0, 0), (3, 3)]);
    }

    #[test]
    fn test_char_wider_than_row_still_progresses() {
        let engine = wrapping(Flags::SOFTWRAP);
        assert_eq!(layout(&engine, "中中", 1), [(0, 0), (2, 3)]);
    }

    #[test]
    fn test_tab_straddling_the_edge() {
        let engine = wrapping(Flags::SOFTWRAP);
        let chunks: Vec<Chunk> = engine.chunks(b"ab\tc", 4).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!((chunks[0].leftedge, chunks[0].end_column), (0, 4));
        // The rest of the tab fills the second row; `c` starts the third.
        assert_eq!((chunks[1].leftedge, chunks[1].start_x), (4, 3));
        assert_eq!((chunks[2].leftedge, chunks[2].end_column), (8, 9));
    }

    #[test]
    fn test_break_at_blanks() {
        let engine = wrapping(Flags::SOFTWRAP | Flags::AT_BLANKS);
        assert_eq!(
            layout(&engine, "hello world foo", 8),
            [(0, 0), (6, 6), (12, 12)]
        );
        let engine = wrapping(Flags::SOFTWRAP);
        assert_eq!(layout(&engine, "hello world foo", 8), [(0, 0), (8, 8)]);
    }

    #[test]
    fn test_combining_mark_stays_on_its_row() {
        let engine = wrapping(Flags::SOFTWRAP);
        let text = "abcd\u{301}ef";
        assert_eq!(layout(&engine, text, 4), [(0, 0), (4, 6)]);
    }

    #[test]
    fn test_chunk_and_edge() {
        let engine = wrapping(Flags::SOFTWRAP);
        let text = b"abcdefghij";
        assert_eq!(engine.chunk_and_edge(text, 0, 4), (0, 0));
        assert_eq!(engine.chunk_and_edge(text, 5, 4), (1, 4));
        assert_eq!(engine.chunk_and_edge(text, 10, 4), (2, 8));
        assert_eq!(engine.chunk_for(text, 99, 4), 2);
        assert_eq!(engine.leftedge_for(text, 7, 4), 4);
        assert_eq!(engine.extra_chunks_in(text, 4), 2);

        let flat = Engine::default();
        assert_eq!(flat.chunk_and_edge(text, 5, 4), (0, 0));
        assert_eq!(flat.extra_chunks_in(text, 4), 0);
    }

    fn three_lines() -> Document {
        Document::from_bytes(b"abcdefghij\nxy\n0123456789")
    }

    #[test]
    fn test_go_back_chunks() {
        let engine = wrapping(Flags::SOFTWRAP);
        let doc = three_lines();

        let (mut line, mut leftedge) = (2, 4);
        assert_eq!(engine.go_back_chunks(&doc, 3, &mut line, &mut leftedge, 4), 0);
        assert_eq!((line, leftedge), (0, 8));

        let (mut line, mut leftedge) = (2, 4);
        assert_eq!(engine.go_back_chunks(&doc, 10, &mut line, &mut leftedge, 4), 5);
        assert_eq!((line, leftedge), (0, 0));

        let (mut line, mut leftedge) = (0, 8);
        assert_eq!(engine.go_back_chunks(&doc, 1, &mut line, &mut leftedge, 4), 0);
        assert_eq!((line, leftedge), (0, 4));
    }

    #[test]
    fn test_go_forward_chunks() {
        let engine = wrapping(Flags::SOFTWRAP);
        let doc = three_lines();

        let (mut line, mut leftedge) = (0, 4);
        assert_eq!(engine.go_forward_chunks(&doc, 4, &mut line, &mut leftedge, 4), 0);
        assert_eq!((line, leftedge), (2, 4));

        let (mut line, mut leftedge) = (0, 4);
        assert_eq!(engine.go_forward_chunks(&doc, 10, &mut line, &mut leftedge, 4), 5);
        assert_eq!((line, leftedge), (2, 8));

        let (mut line, mut leftedge) = (2, 8);
        assert_eq!(engine.go_forward_chunks(&doc, 1, &mut line, &mut leftedge, 4), 1);
        assert_eq!((line, leftedge), (2, 8));
    }

    #[test]
    fn test_chunk_motion_without_softwrap() {
        let engine = Engine::default();
        let doc = three_lines();
        let (mut line, mut leftedge) = (2, 0);
        assert_eq!(engine.go_back_chunks(&doc, 5, &mut line, &mut leftedge, 4), 3);
        assert_eq!(line, 0);
        assert_eq!(engine.go_forward_chunks(&doc, 1, &mut line, &mut leftedge, 4), 0);
        assert_eq!(line, 1);
    }
}
