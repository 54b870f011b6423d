//! Loop-boundary resolution: pairs every `[` with its matching `]` ahead of
//! execution so loop jumps cost O(1).

use crate::interpreter::{InterpreterError, UnmatchedBracketKind};

/// Bidirectional mapping between loop-open and loop-close positions.
///
/// Built fresh for each run over the exact buffer about to execute. For every
/// matched pair the mapping is symmetric: `partner(open) == Some(close)` and
/// `partner(close) == Some(open)`. Positions holding non-bracket characters
/// have no entry.
#[derive(Debug)]
pub struct BracketMap {
    pairs: Vec<Option<usize>>,
}

impl BracketMap {
    /// Position of the bracket matching the one at `pos`, if `pos` holds a
    /// matched bracket.
    pub fn partner(&self, pos: usize) -> Option<usize> {
        self.pairs.get(pos).copied().flatten()
    }

    /// Number of buffer positions the map covers.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Resolve loop boundaries with a single left-to-right scan.
///
/// A `]` with no open partner fails immediately at its own position; an
/// unclosed `[` is reported after the scan at the position still on top of
/// the stack.
pub fn resolve(code: &[char]) -> Result<BracketMap, InterpreterError> {
    let mut pairs: Vec<Option<usize>> = vec![None; code.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (i, &c) in code.iter().enumerate() {
        if c == '[' {
            stack.push(i);
        } else if c == ']' {
            let Some(open_index) = stack.pop() else {
                return Err(InterpreterError::UnmatchedBracket {
                    ip: i,
                    kind: UnmatchedBracketKind::Close,
                });
            };
            pairs[open_index] = Some(i);
            pairs[i] = Some(open_index);
        }
    }

    if let Some(unmatched_open) = stack.last().copied() {
        return Err(InterpreterError::UnmatchedBracket {
            ip: unmatched_open,
            kind: UnmatchedBracketKind::Open,
        });
    }

    Ok(BracketMap { pairs })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars_of(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn maps_nested_pairs_both_ways() {
        let code = chars_of("+[>[-]<]");
        let map = resolve(&code).expect("balanced");
        assert_eq!(map.partner(1), Some(7));
        assert_eq!(map.partner(7), Some(1));
        assert_eq!(map.partner(3), Some(5));
        assert_eq!(map.partner(5), Some(3));
    }

    #[test]
    fn map_is_an_involution() {
        let code = chars_of("[[][]]++[-]");
        let map = resolve(&code).expect("balanced");
        for pos in 0..code.len() {
            if let Some(partner) = map.partner(pos) {
                assert_eq!(map.partner(partner), Some(pos));
            }
        }
    }

    #[test]
    fn opens_match_later_and_closes_match_earlier() {
        let code = chars_of("[+[--[.]]]");
        let map = resolve(&code).expect("balanced");
        for (pos, &c) in code.iter().enumerate() {
            match c {
                '[' => assert!(map.partner(pos).unwrap() > pos),
                ']' => assert!(map.partner(pos).unwrap() < pos),
                _ => assert_eq!(map.partner(pos), None),
            }
        }
    }

    #[test]
    fn non_bracket_positions_are_absent() {
        let code = chars_of("+-><.,");
        let map = resolve(&code).expect("nothing to match");
        assert_eq!(map.len(), 6);
        for pos in 0..code.len() {
            assert_eq!(map.partner(pos), None);
        }
    }

    #[test]
    fn unmatched_close_reports_its_own_position() {
        let err = resolve(&chars_of("+]")).unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 1, kind: UnmatchedBracketKind::Close }
        ));
    }

    #[test]
    fn unmatched_open_reports_the_stack_top() {
        // Position 1 pairs with position 2; only position 0 stays open.
        let err = resolve(&chars_of("[[]")).unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 0, kind: UnmatchedBracketKind::Open }
        ));
    }

    #[test]
    fn several_unmatched_opens_surface_the_most_recent() {
        let err = resolve(&chars_of("[[")).unwrap_err();
        assert!(matches!(
            err,
            InterpreterError::UnmatchedBracket { ip: 1, kind: UnmatchedBracketKind::Open }
        ));
    }

    #[test]
    fn out_of_range_positions_are_none() {
        let map = resolve(&chars_of("[]")).expect("balanced");
        assert_eq!(map.partner(99), None);
        assert!(!map.is_empty());
    }

    #[test]
    fn empty_buffer_resolves_to_an_empty_map() {
        let map = resolve(&[]).expect("nothing to do");
        assert!(map.is_empty());
    }
}
