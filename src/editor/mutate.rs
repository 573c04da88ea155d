//! Insert and erase, each producing a new [`EditorState`].

use tracing::debug;

use crate::editor::{CommandTemplate, Cursor, EditorState, enclosing_command};

/// Insert `text` at the cursor and advance past it.
///
/// At [`Cursor::BEFORE_START`] the text is prepended and the cursor ends at
/// `len(text) - 1`. The text is never interpreted: braces and backslashes go
/// in verbatim.
pub fn insert(state: &EditorState, text: &str) -> EditorState {
    let cursor = state.cursor();
    let buffer = state.buffer().spliced(cursor.splice_offset(), text);
    EditorState::from_parts(buffer, cursor.advanced(text.chars().count()))
}

/// Insert a whole command with empty blocks, cursor inside the first block.
pub fn insert_command(state: &EditorState, template: &CommandTemplate) -> EditorState {
    let opened = insert(state, &template.head());
    let cursor = opened.cursor();
    let buffer = opened
        .buffer()
        .spliced(cursor.splice_offset(), &template.tail());
    EditorState::from_parts(buffer, cursor)
}

/// Backspace.
///
/// A brace before the cursor removes the entire command that brace belongs
/// to, never a command starting at the cursor. If no command encloses the
/// brace, the brace alone is removed.
pub fn erase(state: &EditorState) -> EditorState {
    let Some(before) = state
        .cursor()
        .offset()
        .and_then(|offset| offset.checked_sub(1))
    else {
        return state.clone();
    };
    let buffer = state.buffer();

    match buffer.char_at(before) {
        None => state.clone(),
        Some('{' | '}') => match enclosing_command(buffer, before) {
            Ok(span) => {
                let start = *span.start();
                debug!(start, end = *span.end(), "erasing command");
                EditorState::from_parts(buffer.without(span), Cursor::at(start))
            }
            Err(err) => {
                debug!(%err, "falling back to single-character erase");
                erase_one(state, before)
            }
        },
        Some(_) => erase_one(state, before),
    }
}

fn erase_one(state: &EditorState, at: usize) -> EditorState {
    EditorState::from_parts(state.buffer().without(at..=at), Cursor::at(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str, cursor: isize) -> EditorState {
        EditorState::from_text(text).with_cursor(cursor).unwrap()
    }

    fn sqrt() -> CommandTemplate {
        CommandTemplate::new("\\sqrt", 1).unwrap()
    }

    // --- insert ---

    #[test]
    fn test_insert_into_empty() {
        let next = insert(&EditorState::new(), "x");
        assert_eq!(next.text(), "x");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_insert_in_middle() {
        let next = insert(&state("ac", 1), "b");
        assert_eq!(next.text(), "abc");
        assert_eq!(next.cursor(), Cursor::at(2));
    }

    #[test]
    fn test_insert_at_sentinel_prepends_and_lags_one() {
        let next = insert(&state("cd", -1), "ab");
        assert_eq!(next.text(), "abcd");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let before = state("abc", 2);
        assert_eq!(insert(&before, ""), before);
    }

    #[test]
    fn test_insert_takes_braces_verbatim() {
        let next = insert(&state("", 0), "\\x{}");
        assert_eq!(next.text(), "\\x{}");
        assert_eq!(next.cursor(), Cursor::at(4));
    }

    #[test]
    fn test_insert_counts_chars() {
        let next = insert(&state("", 0), "αβ");
        assert_eq!(next.cursor(), Cursor::at(2));
    }

    #[test]
    fn test_insert_leaves_input_state_alone() {
        let before = state("ab", 1);
        let _ = insert(&before, "x");
        assert_eq!(before.text(), "ab");
        assert_eq!(before.cursor(), Cursor::at(1));
    }

    // --- insert_command ---

    #[test]
    fn test_insert_sqrt_into_empty() {
        let next = insert_command(&EditorState::new(), &sqrt());
        assert_eq!(next.text(), "\\sqrt{}");
        assert_eq!(next.cursor(), Cursor::at(6));
    }

    #[test]
    fn test_insert_frac_leaves_cursor_in_first_block() {
        let frac = CommandTemplate::new("\\frac", 2).unwrap();
        let next = insert_command(&state("x=", 2), &frac);
        assert_eq!(next.text(), "x=\\frac{}{}");
        assert_eq!(next.cursor(), Cursor::at(8));
    }

    #[test]
    fn test_insert_command_in_middle_keeps_suffix() {
        let next = insert_command(&state("ab", 1), &sqrt());
        assert_eq!(next.text(), "a\\sqrt{}b");
        assert_eq!(next.cursor(), Cursor::at(7));
    }

    #[test]
    fn test_insert_command_inside_block_nests() {
        let outer = insert_command(&EditorState::new(), &sqrt());
        let inner = insert_command(&outer, &sqrt());
        assert_eq!(inner.text(), "\\sqrt{\\sqrt{}}");
        assert_eq!(inner.cursor(), Cursor::at(12));
    }

    // --- erase ---

    #[test]
    fn test_erase_plain_char() {
        let next = erase(&state("abc", 2));
        assert_eq!(next.text(), "ac");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_at_zero_is_noop() {
        let before = state("\\sqrt{2}", 0);
        assert_eq!(erase(&before), before);
    }

    #[test]
    fn test_erase_at_sentinel_is_noop() {
        let before = state("abc", -1);
        assert_eq!(erase(&before), before);
    }

    #[test]
    fn test_erase_empty_buffer_is_noop() {
        assert_eq!(erase(&EditorState::new()), EditorState::new());
    }

    #[test]
    fn test_erase_after_closing_brace_removes_command() {
        let next = erase(&state("\\sqrt{2}", 8));
        assert_eq!(next.text(), "");
        assert_eq!(next.cursor(), Cursor::at(0));
    }

    #[test]
    fn test_erase_in_empty_block_removes_command() {
        let next = erase(&state("a\\sqrt{}b", 7));
        assert_eq!(next.text(), "ab");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_removes_every_block() {
        let next = erase(&state("x\\frac{1}{2}", 12));
        assert_eq!(next.text(), "x");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_backslash_is_plain() {
        let next = erase(&state("a\\", 2));
        assert_eq!(next.text(), "a");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_brace_without_command_falls_back() {
        let next = erase(&state("a}", 2));
        assert_eq!(next.text(), "a");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_before_following_command_keeps_it() {
        let next = erase(&state("\\a{x}\\b{y}", 5));
        assert_eq!(next.text(), "\\b{y}");
        assert_eq!(next.cursor(), Cursor::at(0));

        let next = erase(&state("\\sqrt{2}\\sqrt{3}", 8));
        assert_eq!(next.text(), "\\sqrt{3}");
        assert_eq!(next.cursor(), Cursor::at(0));
    }

    #[test]
    fn test_erase_open_brace_before_nested_command_removes_outer() {
        // `\sqrt{|\frac{}{}}`, where Left lands when leaving the fraction.
        let next = erase(&state("\\sqrt{\\frac{}{}}", 6));
        assert_eq!(next.text(), "");
        assert_eq!(next.cursor(), Cursor::at(0));
    }

    #[test]
    fn test_erase_after_nested_closer_removes_inner_only() {
        let next = erase(&state("\\sqrt{\\frac{}{}}", 15));
        assert_eq!(next.text(), "\\sqrt{}");
        assert_eq!(next.cursor(), Cursor::at(6));
    }

    #[test]
    fn test_erase_counts_bare_groups() {
        let next = erase(&state("a\\sqrt{{x}2}b", 12));
        assert_eq!(next.text(), "ab");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    #[test]
    fn test_erase_after_bare_name_is_plain() {
        let next = erase(&state("\\alpha}", 7));
        assert_eq!(next.text(), "\\alpha");
        assert_eq!(next.cursor(), Cursor::at(6));
    }

    #[test]
    fn test_erase_unterminated_command_removes_to_end() {
        let next = erase(&state("x\\sqrt{2", 7));
        assert_eq!(next.text(), "x");
        assert_eq!(next.cursor(), Cursor::at(1));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_grows_by_text_length(
                base in "[a-z{}\\\\]{0,12}",
                text in "[a-z0-9{}\\\\ ]{0,8}",
                seed in any::<usize>(),
            ) {
                let start = EditorState::from_text(&base);
                let len = start.buffer().len();
                let cursor = isize::try_from(seed % (len + 1)).unwrap();
                let start = start.with_cursor(cursor).unwrap();
                let next = insert(&start, &text);
                let added = text.chars().count();
                prop_assert_eq!(next.buffer().len(), len + added);
                prop_assert_eq!(next.cursor().get(), cursor + isize::try_from(added).unwrap());
            }

            #[test]
            fn erase_undoes_single_insert(
                base in "[a-z{}\\\\]{0,12}",
                ch in "[a-z0-9\\\\+ ]",
                seed in any::<usize>(),
            ) {
                let start = EditorState::from_text(&base);
                let cursor = isize::try_from(seed % (start.buffer().len() + 1)).unwrap();
                let start = start.with_cursor(cursor).unwrap();
                let round_trip = erase(&insert(&start, &ch));
                prop_assert_eq!(round_trip, start);
            }

            #[test]
            fn erase_at_zero_never_changes_anything(base in "[a-z{}\\\\]{0,12}") {
                let start = EditorState::from_text(&base);
                prop_assert_eq!(erase(&start), start);
            }

            #[test]
            fn erase_never_grows_buffer(base in "[a-z{}\\\\]{0,12}", seed in any::<usize>()) {
                let start = EditorState::from_text(&base);
                let cursor = isize::try_from(seed % (start.buffer().len() + 1)).unwrap();
                let start = start.with_cursor(cursor).unwrap();
                let next = erase(&start);
                prop_assert!(next.buffer().len() <= start.buffer().len());
                prop_assert!(next.cursor() <= start.cursor());
            }
        }
    }
}
