use core::ops::Range;

use unicode_script::{Script, UnicodeScript};

/// A maximal script-homogeneous span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSegment {
    /// Byte range relative to the segmented slice.
    pub range: Range<usize>,
    pub script: Script,
}

/// Lazily splits a string slice into script segments.
///
/// Common and Inherited characters join the script around them; a slice
/// made only of such characters comes back as a single `Common` segment.
/// A character whose Script_Extensions include the current script does not
/// break the segment either.
#[derive(Debug, Clone)]
pub struct ScriptSegments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> ScriptSegments<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Rewind to the start of the slice.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for ScriptSegments<'_> {
    type Item = ScriptSegment;

    fn next(&mut self) -> Option<ScriptSegment> {
        let start = self.pos;
        if start >= self.text.len() {
            return None;
        }

        let mut script = Script::Common;
        let mut end = self.text.len();
        for (idx, ch) in self.text[start..].char_indices() {
            let ch_script = ch.script();
            if is_neutral(ch_script) || ch_script == script {
                continue;
            }
            if is_neutral(script) {
                script = ch_script;
            } else if !ch.script_extension().contains_script(script) {
                end = start + idx;
                break;
            }
        }

        self.pos = end;
        Some(ScriptSegment {
            range: start..end,
            script,
        })
    }
}

fn is_neutral(script: Script) -> bool {
    matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(text: &str) -> Vec<(&str, Script)> {
        ScriptSegments::new(text)
            .map(|seg| (&text[seg.range], seg.script))
            .collect()
    }

    #[test]
    fn single_script_is_one_segment() {
        assert_eq!(segments("Hello, world"), vec![("Hello, world", Script::Latin)]);
    }

    #[test]
    fn neutral_characters_stick_to_preceding_script() {
        assert_eq!(
            segments("abc αβγ"),
            vec![("abc ", Script::Latin), ("αβγ", Script::Greek)]
        );
    }

    #[test]
    fn leading_neutrals_take_following_script() {
        assert_eq!(segments("123 abc"), vec![("123 abc", Script::Latin)]);
    }

    #[test]
    fn only_neutrals_is_common() {
        assert_eq!(segments("1, 2; 3!"), vec![("1, 2; 3!", Script::Common)]);
    }

    #[test]
    fn n_boundaries_give_n_plus_one_contiguous_segments() {
        let text = "abcαβγабв";
        let segs: Vec<_> = ScriptSegments::new(text).collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].range.start, 0);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
        assert_eq!(segs.last().unwrap().range.end, text.len());
        assert_eq!(
            segs.iter().map(|s| s.script).collect::<Vec<_>>(),
            vec![Script::Latin, Script::Greek, Script::Cyrillic]
        );
    }

    #[test]
    fn combining_marks_stay_with_base() {
        // 'e' + COMBINING ACUTE ACCENT (Inherited)
        assert_eq!(segments("e\u{301}x"), vec![("e\u{301}x", Script::Latin)]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(ScriptSegments::new("").next().is_none());
    }

    #[test]
    fn reset_restarts_iteration() {
        let mut segs = ScriptSegments::new("abc αβγ");
        let first: Vec<_> = segs.by_ref().collect();
        segs.reset();
        let second: Vec<_> = segs.collect();
        assert_eq!(first, second);
    }
}
