//! Time and date strings for the text regions.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Clock style for the time readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeStyle {
    /// `"HH:MM"`
    H24,
    /// `"HH:MM AM/PM"`, hours 01–12
    H12,
}

/// Buffer size for [`time_text`], fits `"12:34 PM"`.
pub const TIME_BUF_LEN: usize = 8;
/// Buffer size for [`date_text`], fits `"Wed 23 Sep"`.
pub const DATE_BUF_LEN: usize = 10;

/// Render the time readout into `buf`.
pub fn time_text<'a>(buf: &'a mut [u8], time: &NaiveDateTime, style: TimeStyle) -> &'a str {
    match style {
        TimeStyle::H24 => format_no_std::show(
            buf,
            format_args!("{:02}:{:02}", time.hour(), time.minute()),
        ),
        TimeStyle::H12 => {
            let (pm, hour) = time.hour12();
            format_no_std::show(
                buf,
                format_args!(
                    "{:02}:{:02} {}",
                    hour,
                    time.minute(),
                    if pm { "PM" } else { "AM" }
                ),
            )
        }
    }
    .unwrap()
}

/// Render the date readout into `buf`, e.g. `"Mon 23 Sep"`.
pub fn date_text<'a>(buf: &'a mut [u8], time: &NaiveDateTime) -> &'a str {
    format_no_std::show(
        buf,
        format_args!(
            "{} {:02} {}",
            weekday_abbrev(time.weekday()),
            time.day(),
            month_abbrev(time.month0())
        ),
    )
    .unwrap()
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn month_abbrev(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 23)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn h24_zero_pads() {
        let mut buf = [0u8; TIME_BUF_LEN];
        assert_eq!(time_text(&mut buf, &at(9, 5), TimeStyle::H24), "09:05");
    }

    #[test]
    fn h12_pads_hour_and_marks_afternoon() {
        let mut buf = [0u8; TIME_BUF_LEN];
        assert_eq!(time_text(&mut buf, &at(13, 30), TimeStyle::H12), "01:30 PM");
    }

    #[test]
    fn h12_midnight_is_twelve() {
        let mut buf = [0u8; TIME_BUF_LEN];
        assert_eq!(time_text(&mut buf, &at(0, 15), TimeStyle::H12), "12:15 AM");
    }

    #[test]
    fn h12_noon_is_pm() {
        let mut buf = [0u8; TIME_BUF_LEN];
        assert_eq!(time_text(&mut buf, &at(12, 0), TimeStyle::H12), "12:00 PM");
    }

    #[test]
    fn date_weekday_day_month() {
        // 2024-09-23 is a Monday.
        let mut buf = [0u8; DATE_BUF_LEN];
        assert_eq!(date_text(&mut buf, &at(9, 5)), "Mon 23 Sep");
    }

    #[test]
    fn date_day_zero_padded() {
        let mut buf = [0u8; DATE_BUF_LEN];
        let time = NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(date_text(&mut buf, &time), "Sun 03 Mar");
    }

    #[test]
    fn formatting_is_stable_across_calls() {
        let mut first = [0u8; TIME_BUF_LEN];
        let mut second = [0u8; TIME_BUF_LEN];
        assert_eq!(
            time_text(&mut first, &at(9, 5), TimeStyle::H24),
            time_text(&mut second, &at(9, 5), TimeStyle::H24),
        );
    }
}
