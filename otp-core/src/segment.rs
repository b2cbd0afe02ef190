//! Segmented code-input state machine.
//!
//! A code value is a string of at most `length` characters. Each input cell
//! displays one character by position; joining the cells concatenates only
//! the filled ones, so cleared or rejected characters compact left and the
//! value never contains gaps.
//!
//! Every interaction is a pure transition over `(value, length, validator)`
//! returning the new value, an optional caret directive, and the final value
//! when the edit freshly reaches completion. The caller applies the caret
//! directive to its cell handles and owns callback dispatch.

/// Caret directive for the cell at the given index.
///
/// Directives are only produced for in-range indices; a move that would land
/// before the first or past the last cell is reported as `None` by the
/// transition functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// Place the caret in the cell.
    Focus(usize),
    /// Focus the cell and select its content.
    Select(usize),
}

impl FocusMove {
    pub fn index(self) -> usize {
        match self {
            FocusMove::Focus(i) | FocusMove::Select(i) => i,
        }
    }
}

/// Result of a value-changing transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub value: String,
    pub focus: Option<FocusMove>,
    /// `Some(final_value)` when this edit moved the value into the complete
    /// state.
    pub completed: Option<String>,
}

/// Outcome of a backspace press on the cell at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backspace {
    /// The cell was empty: suppress the native edit and move the caret back.
    MoveBack { focus: Option<FocusMove> },
    /// Caret at the start of a filled cell: clear that character.
    Clear { value: String, focus: Option<FocusMove> },
    /// In-cell deletion, left to the native input.
    Native,
}

/// Navigation keys the widget intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Home,
    End,
}

/// Character shown by the cell at `index`, if any.
pub fn cell(value: &str, index: usize) -> Option<char> {
    value.chars().nth(index)
}

/// The value truncated to at most `length` characters.
pub fn clip(value: &str, length: usize) -> String {
    value.chars().take(length).collect()
}

/// A value is complete when its clipped length equals the target length.
pub fn is_complete(value: &str, length: usize) -> bool {
    clip(value, length).chars().count() == length
}

/// `Some(final_value)` when the value is complete.
pub fn completion(value: &str, length: usize) -> Option<String> {
    let final_value = clip(value, length);
    (final_value.chars().count() == length).then_some(final_value)
}

/// Final value and completion flag reported when focus leaves the widget.
pub fn blur(value: &str, length: usize) -> (String, bool) {
    let final_value = clip(value, length);
    let complete = final_value.chars().count() == length;
    (final_value, complete)
}

fn select_at(index: usize, length: usize) -> Option<FocusMove> {
    (index < length).then_some(FocusMove::Select(index))
}

fn select_before(index: usize, length: usize) -> Option<FocusMove> {
    index.checked_sub(1).and_then(|i| select_at(i, length))
}

/// Replace the character of one cell and re-join the filled cells.
fn splice(value: &str, length: usize, index: usize, ch: Option<char>) -> String {
    let mut cells: Vec<Option<char>> = value.chars().map(Some).collect();
    cells.resize(length, None);
    cells.truncate(length);
    if index < length {
        cells[index] = ch;
    }
    cells.into_iter().flatten().collect()
}

/// Caret move after a character lands in the cell at `index`: select the next
/// cell when it is already filled, focus it when empty, stay put at the end.
pub fn advance(value: &str, index: usize, length: usize) -> Option<FocusMove> {
    let next = index + 1;
    if next >= length {
        return None;
    }
    if cell(value, next).is_some() {
        Some(FocusMove::Select(next))
    } else {
        Some(FocusMove::Focus(next))
    }
}

/// Character entry into the cell at `index`.
///
/// A multi-character input landing in the first cell is treated as a bulk
/// autofill (platform SMS or clipboard autofill) and replaces the whole
/// value. Otherwise only the first character counts; a character the
/// validator rejects clears the cell instead.
pub fn insert(
    value: &str,
    length: usize,
    index: usize,
    input: &str,
    validate: impl Fn(char, usize) -> bool,
) -> Edit {
    let mut input_chars = input.chars();
    let initial = input_chars.next();

    if index == 0 && initial.is_some() && input_chars.next().is_some() {
        let final_value = clip(input, length);
        let focus = select_before(final_value.chars().count(), length);
        let completed = completion(&final_value, length);
        return Edit {
            value: final_value,
            focus,
            completed,
        };
    }

    let accepted = initial.filter(|&c| validate(c, index));
    let new_value = splice(value, length, index, accepted);
    let completed = completion(&new_value, length);

    let focus = if accepted.is_some() {
        let new_len = new_value.chars().count();
        if new_len < index + 1 {
            // the character landed past the filled prefix and compacted left
            select_at(new_len, length)
        } else {
            advance(&new_value, index, length)
        }
    } else if initial.is_none() && new_value.chars().count() <= index {
        select_before(index, length)
    } else {
        None
    };

    Edit {
        value: new_value,
        focus,
        completed,
    }
}

/// Backspace on the cell at `index`.
///
/// `caret_at_start` reports whether the selection is collapsed at offset 0
/// of the cell's content.
pub fn backspace(value: &str, length: usize, index: usize, caret_at_start: bool) -> Backspace {
    if cell(value, index).is_none() {
        return Backspace::MoveBack {
            focus: select_before(index, length),
        };
    }

    if caret_at_start {
        let new_value = splice(value, length, index, None);
        let focus = if new_value.chars().count() <= index {
            select_before(index, length)
        } else {
            None
        };
        return Backspace::Clear {
            value: new_value,
            focus,
        };
    }

    Backspace::Native
}

/// Arrow/Home/End navigation from the cell at `index`, clamped at bounds.
pub fn navigate(key: NavKey, index: usize, length: usize) -> Option<FocusMove> {
    match key {
        NavKey::Left => select_before(index, length),
        NavKey::Right => select_at(index + 1, length),
        NavKey::Home => select_at(0, length),
        NavKey::End => select_before(length, length),
    }
}

/// Merge clipboard text into the value.
///
/// The merge starts at the first cell, scanning left to right, that is
/// either empty or the currently focused one — whichever index is smaller
/// wins, so pasting while a filled cell early in the code is focused
/// overwrites from there. Every resulting character is then re-validated by
/// position; rejected characters are dropped and the remainder compacts
/// left.
pub fn paste(
    value: &str,
    length: usize,
    focused: usize,
    pasted: &str,
    validate: impl Fn(char, usize) -> bool,
) -> Edit {
    let mut cells: Vec<Option<char>> = value.chars().map(Some).collect();
    cells.resize(length, None);
    cells.truncate(length);

    let start = cells
        .iter()
        .enumerate()
        .position(|(i, c)| c.is_none() || i == focused)
        .unwrap_or(0);

    for (offset, ch) in pasted.chars().enumerate() {
        let i = start + offset;
        if i >= length {
            break;
        }
        cells[i] = Some(ch);
    }

    let new_value: String = cells
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.filter(|&ch| validate(ch, i)))
        .collect();
    let completed = completion(&new_value, length);

    let focus = if completed.is_some() {
        select_before(length, length)
    } else {
        select_at(new_value.chars().count(), length)
    };

    Edit {
        value: new_value,
        focus,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(_: char, _: usize) -> bool {
        true
    }

    fn digits(c: char, _: usize) -> bool {
        c.is_ascii_digit()
    }

    #[test]
    fn test_insert_advances_to_next_empty_cell() {
        let edit = insert("", 4, 0, "7", any);
        assert_eq!(edit.value, "7");
        assert_eq!(edit.focus, Some(FocusMove::Focus(1)));
        assert_eq!(edit.completed, None);
    }

    #[test]
    fn test_insert_selects_next_filled_cell() {
        let edit = insert("ab", 4, 0, "x", any);
        assert_eq!(edit.value, "xb");
        assert_eq!(edit.focus, Some(FocusMove::Select(1)));
    }

    #[test]
    fn test_insert_into_last_cell_stays_put() {
        let edit = insert("123", 4, 3, "4", any);
        assert_eq!(edit.value, "1234");
        assert_eq!(edit.focus, None);
        assert_eq!(edit.completed.as_deref(), Some("1234"));
    }

    #[test]
    fn test_insert_rejected_char_clears_the_cell() {
        let edit = insert("12", 4, 1, "x", digits);
        assert_eq!(edit.value, "1");
        assert_eq!(edit.focus, None);
        assert_eq!(edit.completed, None);
    }

    #[test]
    fn test_insert_empty_input_moves_back_when_prefix_shrinks() {
        // native deletion emptied cell 1 while cell 0 holds the only char
        let edit = insert("1", 4, 1, "", any);
        assert_eq!(edit.value, "1");
        assert_eq!(edit.focus, Some(FocusMove::Select(0)));
    }

    #[test]
    fn test_insert_empty_input_at_first_cell_is_a_no_op_move() {
        let edit = insert("", 4, 0, "", any);
        assert_eq!(edit.value, "");
        assert_eq!(edit.focus, None);
    }

    #[test]
    fn test_insert_past_filled_prefix_compacts_left() {
        // typing into cell 2 while only cell 0 is filled
        let edit = insert("a", 4, 2, "b", any);
        assert_eq!(edit.value, "ab");
        assert_eq!(edit.focus, Some(FocusMove::Select(2)));
    }

    #[test]
    fn test_bulk_autofill_replaces_whole_value() {
        let edit = insert("", 6, 0, "123456", digits);
        assert_eq!(edit.value, "123456");
        assert_eq!(edit.focus, Some(FocusMove::Select(5)));
        assert_eq!(edit.completed.as_deref(), Some("123456"));
    }

    #[test]
    fn test_bulk_autofill_truncates_to_length() {
        let edit = insert("", 4, 0, "1234567", any);
        assert_eq!(edit.value, "1234");
        assert_eq!(edit.completed.as_deref(), Some("1234"));
    }

    #[test]
    fn test_bulk_autofill_only_applies_to_first_cell() {
        let edit = insert("ab", 4, 1, "xyz", any);
        // only the first character of the input counts
        assert_eq!(edit.value, "ax");
    }

    #[test]
    fn test_value_length_never_exceeds_target() {
        let mut value = String::new();
        for (i, ch) in "98765432".chars().enumerate() {
            let edit = insert(&value, 4, i.min(3), &ch.to_string(), digits);
            value = edit.value;
            assert!(value.chars().count() <= 4);
        }
    }

    #[test]
    fn test_backspace_on_empty_cell_moves_back() {
        assert_eq!(
            backspace("12", 4, 2, true),
            Backspace::MoveBack {
                focus: Some(FocusMove::Select(1))
            }
        );
    }

    #[test]
    fn test_backspace_on_empty_first_cell_is_a_no_op_move() {
        assert_eq!(backspace("", 4, 0, true), Backspace::MoveBack { focus: None });
    }

    #[test]
    fn test_backspace_at_caret_start_clears_cell() {
        let result = backspace("123", 4, 2, true);
        assert_eq!(
            result,
            Backspace::Clear {
                value: "12".to_string(),
                focus: Some(FocusMove::Select(1)),
            }
        );
    }

    #[test]
    fn test_backspace_mid_value_keeps_focus() {
        // clearing cell 0 leaves two filled cells, caret stays
        let result = backspace("123", 4, 0, true);
        assert_eq!(
            result,
            Backspace::Clear {
                value: "23".to_string(),
                focus: None,
            }
        );
    }

    #[test]
    fn test_backspace_with_caret_past_start_is_native() {
        assert_eq!(backspace("123", 4, 1, false), Backspace::Native);
    }

    #[test]
    fn test_navigate_clamps_at_bounds() {
        assert_eq!(navigate(NavKey::Left, 0, 4), None);
        assert_eq!(navigate(NavKey::Right, 3, 4), None);
        assert_eq!(navigate(NavKey::Left, 2, 4), Some(FocusMove::Select(1)));
        assert_eq!(navigate(NavKey::Right, 1, 4), Some(FocusMove::Select(2)));
        assert_eq!(navigate(NavKey::Home, 3, 4), Some(FocusMove::Select(0)));
        assert_eq!(navigate(NavKey::End, 0, 4), Some(FocusMove::Select(3)));
    }

    #[test]
    fn test_advance_skips_nothing_at_last_cell() {
        assert_eq!(advance("1234", 3, 4), None);
        assert_eq!(advance("12", 0, 4), Some(FocusMove::Select(1)));
        assert_eq!(advance("1", 0, 4), Some(FocusMove::Focus(1)));
    }

    #[test]
    fn test_paste_into_empty_widget() {
        let edit = paste("", 6, 0, "123456", digits);
        assert_eq!(edit.value, "123456");
        assert_eq!(edit.focus, Some(FocusMove::Select(5)));
        assert_eq!(edit.completed.as_deref(), Some("123456"));
    }

    #[test]
    fn test_paste_truncates_to_remaining_cells() {
        let edit = paste("12", 4, 2, "34567", digits);
        assert_eq!(edit.value, "1234");
        assert_eq!(edit.completed.as_deref(), Some("1234"));
    }

    #[test]
    fn test_paste_drops_invalid_chars_and_compacts_left() {
        // pins down the merge semantics: 'a' is rejected by position
        // validation and the remainder compacts, no gap is left behind
        let edit = paste("", 6, 0, "12a456", digits);
        assert_eq!(edit.value, "12456");
        assert_eq!(edit.focus, Some(FocusMove::Select(5)));
        assert_eq!(edit.completed, None);
    }

    #[test]
    fn test_paste_of_all_invalid_text_yields_empty_segment() {
        let edit = paste("", 6, 0, "abcdef", digits);
        assert_eq!(edit.value, "");
        assert_eq!(edit.focus, Some(FocusMove::Select(0)));
        assert_eq!(edit.completed, None);
    }

    #[test]
    fn test_paste_starts_at_focused_cell_before_first_empty() {
        // cell 1 is focused and filled; the merge overwrites from there
        let edit = paste("123", 6, 1, "99", digits);
        assert_eq!(edit.value, "199");
        assert_eq!(edit.focus, Some(FocusMove::Select(3)));
    }

    #[test]
    fn test_paste_starts_at_first_empty_cell() {
        // focus sits past the filled prefix, so the first empty cell wins
        let edit = paste("12", 6, 5, "345", digits);
        assert_eq!(edit.value, "12345");
        assert_eq!(edit.focus, Some(FocusMove::Select(5)));
    }

    #[test]
    fn test_paste_overwrites_from_focused_first_cell() {
        // focused cell 0 comes before the first empty cell and wins
        let edit = paste("12", 6, 0, "345", digits);
        assert_eq!(edit.value, "345");
        assert_eq!(edit.focus, Some(FocusMove::Select(3)));
    }

    #[test]
    fn test_completion_requires_full_length() {
        assert!(completion("123", 4).is_none());
        assert_eq!(completion("1234", 4).as_deref(), Some("1234"));
        assert_eq!(completion("12345", 4).as_deref(), Some("1234"));
    }

    #[test]
    fn test_blur_reports_clipped_value_and_state() {
        assert_eq!(blur("123456", 4), ("1234".to_string(), true));
        assert_eq!(blur("12", 4), ("12".to_string(), false));
    }
}
