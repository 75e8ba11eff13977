// SPDX-License-Identifier: GPL-3.0-only

//! On-screen keyboard
//!
//! Three QWERTY letter rows plus an action row (Delete, Space, Enter). The
//! layout is centred in whatever width the keyboard is drawn at; [`key_at`]
//! maps a cell back to the key drawn there.

/// Event emitted by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    Char(char),
    Delete,
    Space,
    Enter,
}

/// Letter rows, top to bottom
pub const LETTER_ROWS: [&[char]; 3] = [
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l'],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm'],
];

/// Width of one letter key in cells
pub const KEY_WIDTH: u16 = 3;

/// Action row: (label, event, relative width)
pub const ACTION_ROW: [(&str, KeyboardEvent, u16); 3] = [
    ("Del", KeyboardEvent::Delete, 1),
    ("Space", KeyboardEvent::Space, 2),
    ("Enter", KeyboardEvent::Enter, 1),
];

/// Number of rows including the action row
pub const ROW_COUNT: usize = LETTER_ROWS.len() + 1;

/// Left offset of a letter row drawn centred in `width` cells
pub fn row_offset(row: usize, width: u16) -> u16 {
    let keys = LETTER_ROWS.get(row).map_or(0, |r| r.len()) as u16;
    width.saturating_sub(keys * KEY_WIDTH) / 2
}

/// Column spans of the action row keys within `width` cells
pub fn action_spans(width: u16) -> [(u16, u16); 3] {
    let total: u16 = ACTION_ROW.iter().map(|(_, _, w)| w).sum();
    let unit = width / total;
    let mut start = 0;
    let mut spans = [(0, 0); 3];
    for (i, (_, _, w)) in ACTION_ROW.iter().enumerate() {
        let end = if i == ACTION_ROW.len() - 1 {
            width
        } else {
            start + unit * w
        };
        spans[i] = (start, end);
        start = end;
    }
    spans
}

/// Key drawn at `column` of `row` when the keyboard is `width` cells wide
pub fn key_at(row: usize, column: u16, width: u16) -> Option<KeyboardEvent> {
    if row == LETTER_ROWS.len() {
        return action_spans(width)
            .iter()
            .zip(ACTION_ROW.iter())
            .find(|((start, end), _)| column >= *start && column < *end)
            .map(|(_, (_, event, _))| *event);
    }

    let letters = LETTER_ROWS.get(row)?;
    let offset = row_offset(row, width);
    let index = column.checked_sub(offset)? / KEY_WIDTH;
    letters.get(index as usize).map(|c| KeyboardEvent::Char(*c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_hit() {
        // 30 cells exactly fit the top row
        assert_eq!(key_at(0, 0, 30), Some(KeyboardEvent::Char('q')));
        assert_eq!(key_at(0, 29, 30), Some(KeyboardEvent::Char('p')));
        assert_eq!(key_at(0, 30, 30), None);
    }

    #[test]
    fn test_short_row_is_centred() {
        // Bottom row: 7 keys * 3 = 21 cells in 30, offset 4
        assert_eq!(key_at(2, 3, 30), None);
        assert_eq!(key_at(2, 4, 30), Some(KeyboardEvent::Char('z')));
    }

    #[test]
    fn test_action_row() {
        assert_eq!(key_at(3, 0, 32), Some(KeyboardEvent::Delete));
        assert_eq!(key_at(3, 12, 32), Some(KeyboardEvent::Space));
        assert_eq!(key_at(3, 31, 32), Some(KeyboardEvent::Enter));
        assert_eq!(key_at(4, 0, 32), None);
    }
}
