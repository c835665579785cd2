//! Layout helpers for the board.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle centred in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Word-wrap a title into at most `max_lines` lines of `width` columns.
pub fn wrap_title(title: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut current_line = String::new();
    let mut lines = Vec::new();

    for word in title.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            if lines.len() >= max_lines {
                break;
            }
            current_line = word.to_string();
        }
    }
    if !current_line.is_empty() && lines.len() < max_lines {
        lines.push(current_line);
    }
    lines
}

/// Card slots laid out row by row in `columns` columns. Only slots that fit
/// completely inside `inner` are returned.
pub fn card_slots(inner: Rect, columns: u16, card_height: u16) -> Vec<Rect> {
    if columns == 0 || card_height == 0 || inner.width < columns {
        return Vec::new();
    }
    let rows = inner.height / card_height;
    let width = inner.width / columns;
    let mut slots = Vec::with_capacity(usize::from(rows * columns));
    for row in 0..rows {
        for col in 0..columns {
            slots.push(Rect {
                x: inner.x + col * width,
                y: inner.y + row * card_height,
                width,
                height: card_height,
            });
        }
    }
    slots
}

/// First visible row so that `selected_row` is on screen.
pub fn scroll_to_show(start_row: usize, selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 || selected_row < start_row {
        selected_row
    } else if selected_row >= start_row + visible_rows {
        selected_row + 1 - visible_rows
    } else {
        start_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_title("Implement the sign in flow", 12, 2);
        assert_eq!(lines, vec!["Implement", "the sign in"]);
    }

    #[test]
    fn keeps_short_title_on_one_line() {
        assert_eq!(wrap_title("Docs", 20, 2), vec!["Docs"]);
        assert!(wrap_title("", 20, 2).is_empty());
    }

    #[test]
    fn slots_fill_rows_then_columns() {
        let slots = card_slots(Rect::new(0, 0, 60, 13), 3, 6);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[1], Rect::new(20, 0, 20, 6));
        assert_eq!(slots[3], Rect::new(0, 6, 20, 6));
    }

    #[test]
    fn no_slots_when_too_small() {
        assert!(card_slots(Rect::new(0, 0, 10, 3), 1, 6).is_empty());
        assert!(card_slots(Rect::new(0, 0, 10, 30), 0, 6).is_empty());
    }

    #[test]
    fn scroll_follows_selection() {
        assert_eq!(scroll_to_show(0, 1, 3), 0);
        assert_eq!(scroll_to_show(0, 5, 3), 3);
        assert_eq!(scroll_to_show(4, 2, 3), 2);
    }

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(80, 80, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.width <= 80);
    }
}
