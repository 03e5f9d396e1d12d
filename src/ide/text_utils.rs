//! Extracting compound names from raw editor text around a cursor.

use crate::base::{TextRange, TextSize};
use crate::syntax::CompoundName;

fn is_name_char(c: char) -> bool {
    c == '_' || c == '@' || unicode_ident::is_xid_continue(c)
}

fn is_name_or_dot(c: char) -> bool {
    c == '.' || is_name_char(c)
}

/// The dotted name ending at `offset`, possibly with an empty last segment.
///
/// `foo.ba|` gives `foo.ba`, `foo.|` gives `foo.` and whitespace before the
/// cursor gives the empty name. `None` when the text before the cursor is
/// not a well-formed name (`1.x`, `a..b`).
pub fn compound_name_before(text: &str, offset: TextSize) -> Option<(CompoundName, TextRange)> {
    let end = usize::from(offset);
    let head = text.get(..end)?;
    let start = head
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_name_or_dot(c))
        .last()
        .map_or(end, |(index, _)| index);
    let name = CompoundName::parse(&head[start..])?;
    Some((name, TextRange::new(TextSize::from(start as u32), offset)))
}

/// The dotted name under the cursor, up to the end of the segment the
/// cursor is in. In `a.b|c.d` that is `a.bc`.
pub fn compound_name_at(text: &str, offset: TextSize) -> Option<(CompoundName, TextRange)> {
    let tail = text.get(usize::from(offset)..)?;
    let extra = tail
        .char_indices()
        .find(|&(_, c)| !is_name_char(c))
        .map_or(tail.len(), |(index, _)| index);
    let end = offset + TextSize::from(extra as u32);
    let (name, range) = compound_name_before(text, end)?;
    if name.last().is_empty() {
        return None;
    }
    Some((name, range))
}

/// Whether the word before `start` is the `new` keyword.
pub fn is_preceded_by_new(text: &str, start: TextSize) -> bool {
    let Some(head) = text.get(..usize::from(start)) else {
        return false;
    };
    head.trim_end()
        .strip_suffix("new")
        .is_some_and(|rest| !rest.chars().next_back().is_some_and(is_name_or_dot))
}
