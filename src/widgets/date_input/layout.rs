//! Cell geometry of a date field and its popup.
//!
//! ```text
//!  x                        right-3
//!  ┌────────────────────────┬───┐
//!  │ 01/02/2022             │[v]│  row y: text area + calendar toggle
//!  └────────────────────────┴───┘
//!  ┌──┬──────────┬─┬──────┬─┬──┐
//!  │ <│ Febrero  │ │ 2022 │ │> │  row y+1: header (always shown when open)
//!  ├──┴──────────┴─┴──────┴─┴──┤
//!  │ Lu Ma Mi Ju Vi Sa Do      │  day view: weekday row + 6 week rows
//!  │ ...                       │  month view: 4 rows of 3, year view: 7 rows of 3
//!  └───────────────────────────┘
//! ```

use chrono::Datelike;

use crate::geometry::Region;

use super::picker::{Picker, PickerView};

/// Width of the calendar toggle at the right end of the field.
pub const TOGGLE_WIDTH: i32 = 3;
pub const POPUP_WIDTH: i32 = 22;
/// Header row, weekday row and six week rows.
pub const POPUP_HEIGHT: i32 = 8;
/// Width of one day cell.
pub const DAY_WIDTH: i32 = 3;
/// Width of one month or year option.
pub const OPTION_WIDTH: i32 = 7;
/// Month and year options per row.
pub const OPTION_COLUMNS: i32 = 3;

const PREV_X: i32 = 0;
const PREV_WIDTH: i32 = 2;
const MONTH_X: i32 = 2;
const MONTH_WIDTH: i32 = 10;
const YEAR_X: i32 = 13;
const YEAR_WIDTH: i32 = 6;
const NEXT_X: i32 = 20;
const NEXT_WIDTH: i32 = 2;

/// An addressable piece of a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    /// The text area.
    Field,
    CalendarToggle,
    /// The popup panel as a whole.
    Popup,
    SelectMonth,
    SelectYear,
    PrevMonth,
    NextMonth,
    /// A month option in the month view, 1-based.
    Month(u32),
    /// A year option in the year view.
    Year(i32),
    /// A day of the viewed month in the day view.
    Day(u32),
}

/// The text area: everything left of the toggle.
pub fn text_area(field: Region) -> Region {
    Region::new(field.x, field.y, (field.width - TOGGLE_WIDTH).max(0), 1)
}

pub fn toggle_area(field: Region) -> Region {
    let width = TOGGLE_WIDTH.min(field.width.max(0));
    Region::new(field.right() - width, field.y, width, 1)
}

/// Where the popup opens: directly below the field.
pub fn popup_area(field: Region) -> Region {
    Region::new(field.x, field.y + 1, POPUP_WIDTH, POPUP_HEIGHT)
}

/// Field row and popup together.
pub fn open_area(field: Region) -> Region {
    Region::new(field.x, field.y, field.width, 1).union(popup_area(field))
}

fn header_cell(popup: Region, x: i32, width: i32) -> Region {
    Region::new(popup.x + x, popup.y, width, 1)
}

/// Cell of the option at `index` in the month or year grid.
pub fn option_cell(popup: Region, index: usize) -> Region {
    let index = index as i32;
    Region::new(
        popup.x + (index % OPTION_COLUMNS) * OPTION_WIDTH,
        popup.y + 1 + index / OPTION_COLUMNS,
        OPTION_WIDTH,
        1,
    )
}

/// Cell of grid position `index` (0..42) in the day view.
pub fn day_cell(popup: Region, index: usize) -> Region {
    let index = index as i32;
    Region::new(
        popup.x + (index % 7) * DAY_WIDTH,
        popup.y + 2 + index / 7,
        DAY_WIDTH,
        1,
    )
}

/// Where `part` is drawn, given the mounted `field` and the picker state.
///
/// Parts that are not currently shown have no region.
pub fn part_region(field: Region, picker: &Picker, part: DatePart) -> Option<Region> {
    if field.is_empty() {
        return None;
    }
    let popup = popup_area(field);
    let view = picker.view();
    match part {
        DatePart::Field => Some(text_area(field)),
        DatePart::CalendarToggle => Some(toggle_area(field)),
        _ if view == PickerView::Closed => None,
        DatePart::Popup => Some(popup),
        DatePart::PrevMonth => Some(header_cell(popup, PREV_X, PREV_WIDTH)),
        DatePart::SelectMonth => Some(header_cell(popup, MONTH_X, MONTH_WIDTH)),
        DatePart::SelectYear => Some(header_cell(popup, YEAR_X, YEAR_WIDTH)),
        DatePart::NextMonth => Some(header_cell(popup, NEXT_X, NEXT_WIDTH)),
        DatePart::Month(month) if view == PickerView::Months && (1..=12).contains(&month) => {
            Some(option_cell(popup, month as usize - 1))
        }
        DatePart::Year(year) if view == PickerView::Years => picker
            .year_options()
            .iter()
            .position(|&y| y == year)
            .map(|i| option_cell(popup, i)),
        DatePart::Day(day) if view == PickerView::Days => picker
            .day_cells()
            .iter()
            .position(|c| c.in_month && c.date.day() == day)
            .map(|i| day_cell(popup, i)),
        DatePart::Month(_) | DatePart::Year(_) | DatePart::Day(_) => None,
    }
}

/// The part under screen cell `(x, y)`, most specific first.
pub fn hit_test(field: Region, picker: &Picker, x: i32, y: i32) -> Option<DatePart> {
    if field.is_empty() {
        return None;
    }
    if toggle_area(field).contains(x, y) {
        return Some(DatePart::CalendarToggle);
    }
    if text_area(field).contains(x, y) {
        return Some(DatePart::Field);
    }
    let popup = popup_area(field);
    if !picker.is_open() || !popup.contains(x, y) {
        return None;
    }
    let header = [
        (DatePart::PrevMonth, header_cell(popup, PREV_X, PREV_WIDTH)),
        (DatePart::SelectMonth, header_cell(popup, MONTH_X, MONTH_WIDTH)),
        (DatePart::SelectYear, header_cell(popup, YEAR_X, YEAR_WIDTH)),
        (DatePart::NextMonth, header_cell(popup, NEXT_X, NEXT_WIDTH)),
    ];
    if let Some((part, _)) = header.iter().find(|(_, r)| r.contains(x, y)) {
        return Some(*part);
    }
    let option = match picker.view() {
        PickerView::Months => (1..=12u32)
            .find(|&m| option_cell(popup, m as usize - 1).contains(x, y))
            .map(DatePart::Month),
        PickerView::Years => picker
            .year_options()
            .into_iter()
            .enumerate()
            .find(|(i, _)| option_cell(popup, *i).contains(x, y))
            .map(|(_, year)| DatePart::Year(year)),
        PickerView::Days => picker
            .day_cells()
            .iter()
            .enumerate()
            .find(|(i, c)| c.in_month && day_cell(popup, *i).contains(x, y))
            .map(|(_, c)| DatePart::Day(c.date.day())),
        PickerView::Closed => None,
    };
    Some(option.unwrap_or(DatePart::Popup))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn field() -> Region {
        Region::new(2, 1, 16, 1)
    }

    fn open_on(seed: NaiveDate) -> Picker {
        let mut picker = Picker::new(ymd(2023, 1, 1));
        picker.open(seed, ymd(2023, 1, 1), open_area(field()));
        picker
    }

    #[test]
    fn field_splits_into_text_and_toggle() {
        assert_eq!(text_area(field()), Region::new(2, 1, 13, 1));
        assert_eq!(toggle_area(field()), Region::new(15, 1, 3, 1));
    }

    #[test]
    fn popup_sits_below_field() {
        assert_eq!(popup_area(field()), Region::new(2, 2, 22, 8));
        assert_eq!(open_area(field()), Region::new(2, 1, 22, 9));
    }

    #[test]
    fn closed_picker_only_exposes_field_parts() {
        let picker = Picker::new(ymd(2023, 1, 1));
        assert!(part_region(field(), &picker, DatePart::Field).is_some());
        assert!(part_region(field(), &picker, DatePart::CalendarToggle).is_some());
        assert_eq!(part_region(field(), &picker, DatePart::Popup), None);
        assert_eq!(part_region(field(), &picker, DatePart::Day(1)), None);
        assert_eq!(hit_test(field(), &picker, 3, 3), None);
    }

    #[test]
    fn unmounted_field_has_no_parts() {
        let picker = Picker::new(ymd(2023, 1, 1));
        assert_eq!(part_region(Region::EMPTY, &picker, DatePart::Field), None);
        assert_eq!(hit_test(Region::EMPTY, &picker, 0, 0), None);
    }

    #[test]
    fn header_controls_hit() {
        let picker = open_on(ymd(2023, 1, 1));
        assert_eq!(hit_test(field(), &picker, 2, 2), Some(DatePart::PrevMonth));
        assert_eq!(hit_test(field(), &picker, 6, 2), Some(DatePart::SelectMonth));
        assert_eq!(hit_test(field(), &picker, 16, 2), Some(DatePart::SelectYear));
        assert_eq!(hit_test(field(), &picker, 23, 2), Some(DatePart::NextMonth));
        // The gap between month and year controls is plain popup.
        assert_eq!(hit_test(field(), &picker, 14, 2), Some(DatePart::Popup));
    }

    #[test]
    fn day_cells_round_trip_through_hit_test() {
        // January 2023 starts on a Sunday: the 1st is the last cell of row 0.
        let picker = open_on(ymd(2023, 1, 1));
        let first = part_region(field(), &picker, DatePart::Day(1)).unwrap();
        assert_eq!(first, Region::new(2 + 6 * DAY_WIDTH, 4, DAY_WIDTH, 1));
        for day in [1, 15, 31] {
            let r = part_region(field(), &picker, DatePart::Day(day)).unwrap();
            assert_eq!(hit_test(field(), &picker, r.x + 1, r.y), Some(DatePart::Day(day)));
        }
        assert_eq!(part_region(field(), &picker, DatePart::Day(32)), None);
    }

    #[test]
    fn spill_over_cells_are_not_days() {
        let picker = open_on(ymd(2023, 1, 1));
        // Row 0, column 0 is 26 December 2022.
        assert_eq!(hit_test(field(), &picker, 2, 4), Some(DatePart::Popup));
    }

    #[test]
    fn month_and_year_options() {
        let mut picker = open_on(ymd(2023, 1, 1));
        picker.toggle_month_select();
        assert_eq!(
            part_region(field(), &picker, DatePart::Month(1)),
            Some(Region::new(2, 3, OPTION_WIDTH, 1))
        );
        assert_eq!(hit_test(field(), &picker, 9, 3), Some(DatePart::Month(2)));
        assert_eq!(hit_test(field(), &picker, 16, 6), Some(DatePart::Month(12)));
        assert_eq!(part_region(field(), &picker, DatePart::Year(2013)), None);

        picker.toggle_year_select();
        assert_eq!(hit_test(field(), &picker, 2, 3), Some(DatePart::Year(2013)));
        assert_eq!(
            part_region(field(), &picker, DatePart::Year(2033)),
            Some(Region::new(16, 9, OPTION_WIDTH, 1))
        );
        assert_eq!(part_region(field(), &picker, DatePart::Year(2040)), None);
    }
}
