//! Drawing a date field and its popup into strips.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::date::{Locale, VisualState};
use crate::geometry::Region;
use crate::render::{CellStyle, Strip};
use crate::theme::Theme;

use super::layout::{
    popup_area, text_area, toggle_area, DAY_WIDTH, OPTION_COLUMNS, OPTION_WIDTH, POPUP_WIDTH,
};
use super::picker::{Picker, PickerView};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// What the field row needs to know.
pub(super) struct FieldView<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub state: VisualState,
    pub focused: bool,
    pub open: bool,
}

pub(super) fn render_field(field: Region, view: &FieldView<'_>, theme: &Theme) -> Strip {
    let mut style = theme.field_style(view.state);
    style.underline = view.focused;
    let text = text_area(field);
    let mut strip = Strip::new(field.y, field.x);
    if view.value.is_empty() {
        strip.push_padded(view.placeholder, text.width as usize, &style.clone().dim());
    } else {
        strip.push_padded(view.value, text.width as usize, &style);
    }
    let toggle = if view.open { "[^]" } else { "[v]" };
    strip.push_padded(toggle, toggle_area(field).width as usize, &style);
    strip
}

/// The popup: a header row, then the body of the current view.
pub(super) fn render_popup(
    field: Region,
    picker: &Picker,
    selected: Option<NaiveDate>,
    locale: Locale,
    theme: &Theme,
) -> Vec<Strip> {
    let popup = popup_area(field);
    let base = theme.popup_style();
    let highlight = theme.selected_style();
    let (year, month) = picker.viewed_month();
    let view = picker.view();

    let pick = |on: bool| if on { &highlight } else { &base };

    let mut header = Strip::new(popup.y, popup.x);
    header.push_padded("<", 2, &base);
    header.push_padded(locale.month_name(month), 10, pick(view == PickerView::Months));
    header.push(' ', base.clone());
    header.push_padded(&format!(" {year}"), 6, pick(view == PickerView::Years));
    header.push(' ', base.clone());
    header.push_padded(" >", 2, &base);

    let mut rows = vec![header];
    rows.extend(match view {
        PickerView::Days => day_rows(popup, picker, selected, locale, theme),
        PickerView::Months => option_rows(
            popup,
            (1..=12).map(|m| (format!(" {}", locale.month_short(m)), m == month)),
            theme,
        ),
        PickerView::Years => option_rows(
            popup,
            picker.year_options().into_iter().map(|y| (format!(" {y}"), y == year)),
            theme,
        ),
        PickerView::Closed => Vec::new(),
    });

    // Pad every row to the panel width, and blank rows below short views.
    for row in &mut rows {
        row.fill(POPUP_WIDTH, base.clone());
    }
    let mut y = popup.y + rows.len() as i32;
    while y < popup.bottom() {
        let mut blank = Strip::new(y, popup.x);
        blank.fill(POPUP_WIDTH, base.clone());
        rows.push(blank);
        y += 1;
    }
    rows
}

fn day_rows(
    popup: Region,
    picker: &Picker,
    selected: Option<NaiveDate>,
    locale: Locale,
    theme: &Theme,
) -> Vec<Strip> {
    let base = theme.popup_style();
    let mut weekdays = Strip::new(popup.y + 1, popup.x);
    for day in WEEK {
        weekdays.push_padded(locale.weekday_short(day), DAY_WIDTH as usize, &base.clone().bold());
    }

    let today = picker.today();
    let mut rows = vec![weekdays];
    for (week, cells) in picker.day_cells().chunks(7).enumerate() {
        let mut strip = Strip::new(popup.y + 2 + week as i32, popup.x);
        for cell in cells {
            let style = if !cell.in_month {
                base.clone().dim()
            } else if Some(cell.date) == selected {
                theme.selected_style()
            } else if cell.date == today {
                base.clone().bold()
            } else {
                base.clone()
            };
            strip.push_padded(&format!("{:>2}", cell.date.day()), DAY_WIDTH as usize, &style);
        }
        rows.push(strip);
    }
    rows
}

fn option_rows(
    popup: Region,
    options: impl Iterator<Item = (String, bool)>,
    theme: &Theme,
) -> Vec<Strip> {
    let base = theme.popup_style();
    let highlight = theme.selected_style();
    let options: Vec<(String, bool)> = options.collect();
    options
        .chunks(OPTION_COLUMNS as usize)
        .enumerate()
        .map(|(row, chunk)| {
            let mut strip = Strip::new(popup.y + 1 + row as i32, popup.x);
            for (label, current) in chunk {
                let style: &CellStyle = if *current { &highlight } else { &base };
                strip.push_padded(label, OPTION_WIDTH as usize, style);
            }
            strip
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::date_input::layout::open_area;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn field() -> Region {
        Region::new(0, 0, 14, 1)
    }

    fn field_view(value: &str) -> FieldView<'_> {
        FieldView {
            value,
            placeholder: "DD/MM/YYYY",
            state: VisualState::Default,
            focused: false,
            open: false,
        }
    }

    fn texts(strips: &[Strip]) -> Vec<String> {
        strips.iter().map(Strip::text).collect()
    }

    #[test]
    fn empty_field_shows_dim_placeholder() {
        let strip = render_field(field(), &field_view(""), &Theme::default());
        assert_eq!(strip.text(), "DD/MM/YYYY [v]");
        assert!(strip.cells[0].style.dim);
        assert!(!strip.cells[11].style.dim);
    }

    #[test]
    fn field_color_follows_state() {
        let mut view = field_view("01/02/2022");
        view.state = VisualState::Error;
        view.open = true;
        let strip = render_field(field(), &view, &Theme::default());
        assert_eq!(strip.text(), "01/02/2022 [^]");
        assert_eq!(strip.cells[0].style.fg.as_deref(), Some("error"));
    }

    #[test]
    fn day_view_layout() {
        let mut picker = Picker::new(ymd(2023, 1, 1));
        picker.open(ymd(2023, 1, 1), ymd(2023, 1, 1), open_area(field()));
        let strips = render_popup(field(), &picker, None, Locale::En, &Theme::default());
        assert_eq!(
            texts(&strips),
            vec![
                "< January     2023   >",
                "Mo Tu We Th Fr Sa Su  ",
                "26 27 28 29 30 31  1  ",
                " 2  3  4  5  6  7  8  ",
                " 9 10 11 12 13 14 15  ",
                "16 17 18 19 20 21 22  ",
                "23 24 25 26 27 28 29  ",
                "30 31  1  2  3  4  5  ",
            ]
        );
    }

    #[test]
    fn selected_day_is_highlighted() {
        let mut picker = Picker::new(ymd(2023, 1, 1));
        picker.open(ymd(2023, 1, 9), ymd(2023, 1, 1), open_area(field()));
        let selected = Some(ymd(2023, 1, 9));
        let strips = render_popup(field(), &picker, selected, Locale::Es, &Theme::default());
        // 9 January is the first cell of the third week row.
        let cell = strips[4].cell_at(1).unwrap();
        assert_eq!(cell.ch, '9');
        assert_eq!(cell.style, Theme::default().selected_style());
    }

    #[test]
    fn year_view_lists_window() {
        let mut picker = Picker::new(ymd(2023, 1, 1));
        picker.open(ymd(2023, 1, 1), ymd(2023, 1, 1), open_area(field()));
        picker.toggle_year_select();
        let strips = render_popup(field(), &picker, None, Locale::Es, &Theme::default());
        assert_eq!(strips.len(), 8);
        assert_eq!(strips[1].text(), " 2013   2014   2015   ");
        assert_eq!(strips[7].text(), " 2031   2032   2033   ");
    }
}
