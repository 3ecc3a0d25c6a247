// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Utility types and functions

use std::ops::Range;

/// The (only) explicit line-break character
pub const LINE_BREAK: char = '\n';
/// Space
pub const SPACE: char = ' ';
/// Horizontal tab
pub const TAB: char = '\t';

/// True if `c` is an explicit line break
///
/// Only `'\n'` is considered; `'\r'` and other Unicode breaks are not.
#[inline]
pub fn is_line_break(c: char) -> bool {
    c == LINE_BREAK
}

/// True if `c` is white-space for the purposes of line wrapping
///
/// This is exactly space, tab and line-break. Other Unicode white-space is
/// treated like any other character (it may only be wrapped mid-word).
#[inline]
pub fn is_wrap_space(c: char) -> bool {
    matches!(c, SPACE | TAB | LINE_BREAK)
}

/// Iterator over lines within the text
///
/// This iterator splits `text[start..end]` into a sequence of lines at
/// explicit line breaks. Yielded ranges exclude the break character itself.
/// A break at the very end of the range does not yield a trailing empty line
/// and an empty range yields nothing.
pub struct LineIterator<'a> {
    text: &'a [char],
    start: usize,
    end: usize,
}

impl<'a> LineIterator<'a> {
    /// Construct
    ///
    /// Requires `start <= end <= text.len()`.
    #[inline]
    pub fn new(text: &'a [char], start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= text.len());
        LineIterator { text, start, end }
    }
}

impl<'a> Iterator for LineIterator<'a> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let start = self.start;
        let slice = &self.text[start..self.end];
        match slice.iter().position(|c| is_line_break(*c)) {
            Some(pos) => {
                self.start = start + pos + 1;
                Some(start..start + pos)
            }
            None => {
                self.start = self.end;
                Some(start..self.end)
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for LineIterator<'a> {}

/// Find the next line break in `text[start..end]`
///
/// Returns the index of the break, or `end` if there is none.
#[inline]
pub fn next_line_break(text: &[char], start: usize, end: usize) -> usize {
    text[start..end]
        .iter()
        .position(|c| is_line_break(*c))
        .map(|pos| start + pos)
        .unwrap_or(end)
}

#[cfg(test)]
mod test {
    use super::*;

    fn lines(s: &str) -> Vec<Range<usize>> {
        let text: Vec<char> = s.chars().collect();
        LineIterator::new(&text, 0, text.len()).collect()
    }

    #[test]
    fn classification() {
        assert!(is_wrap_space(' '));
        assert!(is_wrap_space('\t'));
        assert!(is_wrap_space('\n'));
        assert!(!is_wrap_space('\r'));
        assert!(!is_wrap_space('\u{3000}'));
        assert!(is_line_break('\n'));
        assert!(!is_line_break('\r'));
    }

    #[test]
    fn line_iter() {
        assert_eq!(lines(""), vec![]);
        assert_eq!(lines("abc"), vec![0..3]);
        assert_eq!(lines("a\n"), vec![0..1]);
        assert_eq!(lines("\n"), vec![0..0]);
        assert_eq!(lines("a\n\nb"), vec![0..1, 2..2, 3..4]);
    }

    #[test]
    fn line_break_search() {
        let text: Vec<char> = "ab\ncd".chars().collect();
        assert_eq!(next_line_break(&text, 0, 5), 2);
        assert_eq!(next_line_break(&text, 3, 5), 5);
        assert_eq!(next_line_break(&text, 0, 2), 2);
    }
}
