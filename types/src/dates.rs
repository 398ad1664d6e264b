//! Korean-locale date formatting for the date demo screen.
//!
//! Everything works on local wall-clock time ([`NaiveDateTime`]). Functions
//! that depend on the current moment take `now` explicitly so callers decide
//! where the clock comes from.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Relative labels switch to an absolute date past this many days.
const RELATIVE_MAX_DAYS: i64 = 30;
/// Board dates within this many calendar days show the weekday.
const BOARD_WEEKDAY_DAYS: i64 = 7;

/// The fixed-format styles the demo shows side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Default,
    Korean,
    KoreanWithDay,
    KoreanTime,
    KoreanDateTime,
    KoreanDateTimeWithDay,
    Time,
    TimeWithPeriod,
    MonthDay,
    YearMonth,
}

impl DateStyle {
    pub const ALL: [DateStyle; 10] = [
        DateStyle::Default,
        DateStyle::Korean,
        DateStyle::KoreanWithDay,
        DateStyle::KoreanTime,
        DateStyle::KoreanDateTime,
        DateStyle::KoreanDateTimeWithDay,
        DateStyle::Time,
        DateStyle::TimeWithPeriod,
        DateStyle::MonthDay,
        DateStyle::YearMonth,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DateStyle::Default => "Default",
            DateStyle::Korean => "Korean date",
            DateStyle::KoreanWithDay => "Korean date + weekday",
            DateStyle::KoreanTime => "AM/PM time",
            DateStyle::KoreanDateTime => "Date + AM/PM time",
            DateStyle::KoreanDateTimeWithDay => "Date + weekday + time",
            DateStyle::Time => "24h time",
            DateStyle::TimeWithPeriod => "AM/PM time (short)",
            DateStyle::MonthDay => "Month and day",
            DateStyle::YearMonth => "Year and month",
        }
    }

    /// The layout this style produces, in dayjs-like notation.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            DateStyle::Default => "YYYY-MM-DD",
            DateStyle::Korean => "YYYY년 M월 D일",
            DateStyle::KoreanWithDay => "YYYY년 M월 D일 dddd",
            DateStyle::KoreanTime => "오전/오후 h시 mm분",
            DateStyle::KoreanDateTime => "YYYY년 M월 D일 오전/오후 h시 mm분",
            DateStyle::KoreanDateTimeWithDay => "YYYY년 M월 D일 dddd 오전/오후 h시 mm분",
            DateStyle::Time => "HH:mm",
            DateStyle::TimeWithPeriod => "오전/오후 h:mm",
            DateStyle::MonthDay => "M월 D일",
            DateStyle::YearMonth => "YYYY년 M월",
        }
    }

    #[must_use]
    pub fn format(self, at: NaiveDateTime) -> String {
        match self {
            DateStyle::Default => at.format("%Y-%m-%d").to_string(),
            DateStyle::Korean => korean_date(at),
            DateStyle::KoreanWithDay => {
                format!("{} {}", korean_date(at), weekday_name(at.weekday()))
            }
            DateStyle::KoreanTime => korean_time(at),
            DateStyle::KoreanDateTime => format!("{} {}", korean_date(at), korean_time(at)),
            DateStyle::KoreanDateTimeWithDay => format!(
                "{} {} {}",
                korean_date(at),
                weekday_name(at.weekday()),
                korean_time(at)
            ),
            DateStyle::Time => at.format("%H:%M").to_string(),
            DateStyle::TimeWithPeriod => {
                let (pm, hour) = at.hour12();
                format!("{} {hour}:{:02}", period(pm), at.minute())
            }
            DateStyle::MonthDay => format!("{}월 {}일", at.month(), at.day()),
            DateStyle::YearMonth => format!("{}년 {}월", at.year(), at.month()),
        }
    }
}

fn korean_date(at: NaiveDateTime) -> String {
    format!("{}년 {}월 {}일", at.year(), at.month(), at.day())
}

fn korean_time(at: NaiveDateTime) -> String {
    let (pm, hour) = at.hour12();
    format!("{} {hour}시 {:02}분", period(pm), at.minute())
}

fn period(pm: bool) -> &'static str {
    if pm { "오후" } else { "오전" }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// Elapsed time from `at` to `now` in words: "30초 전", "5분 전", "어제".
///
/// Moments in the future read as "방금 전". Anything a month or older shows
/// the absolute Korean date instead.
#[must_use]
pub fn format_relative(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - at).num_seconds().max(0);
    match secs {
        0 => "방금 전".to_string(),
        s if s < MINUTE => format!("{s}초 전"),
        s if s < HOUR => format!("{}분 전", s / MINUTE),
        s if s < DAY => format!("{}시간 전", s / HOUR),
        s if s < 2 * DAY => "어제".to_string(),
        s if s / DAY < RELATIVE_MAX_DAYS => format!("{}일 전", s / DAY),
        _ => korean_date(at),
    }
}

/// Compact list-row date: the time for today, "어제", the weekday within the
/// last week, then month and day (with the year once it differs from `now`).
#[must_use]
pub fn format_board(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (now.date() - at.date()).num_days();
    match days {
        ..=0 => DateStyle::Time.format(at),
        1 => "어제".to_string(),
        d if d < BOARD_WEEKDAY_DAYS => weekday_name(at.weekday()).to_string(),
        _ if at.year() == now.year() => DateStyle::MonthDay.format(at),
        _ => at.format("%Y.%m.%d").to_string(),
    }
}

/// `start ~ end` in the default style.
#[must_use]
pub fn format_date_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!(
        "{} ~ {}",
        DateStyle::Default.format(start),
        DateStyle::Default.format(end)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::{DateStyle, format_board, format_date_range, format_relative};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    // Tuesday afternoon.
    fn now() -> NaiveDateTime {
        at(2024, 3, 5, 15, 7, 30)
    }

    #[test]
    fn fixed_styles() {
        let t = now();
        let cases = [
            (DateStyle::Default, "2024-03-05"),
            (DateStyle::Korean, "2024년 3월 5일"),
            (DateStyle::KoreanWithDay, "2024년 3월 5일 화요일"),
            (DateStyle::KoreanTime, "오후 3시 07분"),
            (DateStyle::KoreanDateTime, "2024년 3월 5일 오후 3시 07분"),
            (
                DateStyle::KoreanDateTimeWithDay,
                "2024년 3월 5일 화요일 오후 3시 07분",
            ),
            (DateStyle::Time, "15:07"),
            (DateStyle::TimeWithPeriod, "오후 3:07"),
            (DateStyle::MonthDay, "3월 5일"),
            (DateStyle::YearMonth, "2024년 3월"),
        ];
        for (style, expected) in cases {
            assert_eq!(style.format(t), expected, "{style:?}");
        }
    }

    #[test]
    fn midnight_and_noon_use_twelve() {
        assert_eq!(DateStyle::TimeWithPeriod.format(at(2024, 1, 1, 0, 5, 0)), "오전 12:05");
        assert_eq!(DateStyle::TimeWithPeriod.format(at(2024, 1, 1, 12, 0, 0)), "오후 12:00");
        assert_eq!(DateStyle::Time.format(at(2024, 1, 1, 0, 5, 0)), "00:05");
    }

    #[test]
    fn relative_steps() {
        let now = now();
        let ago = |secs: i64| now - TimeDelta::seconds(secs);
        assert_eq!(format_relative(now, now), "방금 전");
        assert_eq!(format_relative(ago(30), now), "30초 전");
        assert_eq!(format_relative(ago(5 * 60), now), "5분 전");
        assert_eq!(format_relative(ago(3 * 3600), now), "3시간 전");
        assert_eq!(format_relative(ago(24 * 3600), now), "어제");
        assert_eq!(format_relative(ago(3 * 86_400), now), "3일 전");
        assert_eq!(format_relative(ago(10 * 86_400), now), "10일 전");
        assert_eq!(format_relative(ago(45 * 86_400), now), "2024년 1월 20일");
    }

    #[test]
    fn relative_future_reads_as_just_now() {
        let now = now();
        assert_eq!(format_relative(now + TimeDelta::minutes(2), now), "방금 전");
    }

    #[test]
    fn board_styles() {
        let now = now();
        let days_ago = |d: i64| now - TimeDelta::days(d);
        assert_eq!(format_board(now, now), "15:07");
        assert_eq!(format_board(at(2024, 3, 5, 0, 1, 0), now), "00:01");
        assert_eq!(format_board(days_ago(1), now), "어제");
        assert_eq!(format_board(days_ago(3), now), "토요일");
        assert_eq!(format_board(days_ago(10), now), "2월 24일");
        assert_eq!(format_board(at(2023, 12, 24, 9, 0, 0), now), "2023.12.24");
    }

    #[test]
    fn board_uses_calendar_days() {
        // Late last night is "yesterday" even if fewer than 24 hours ago.
        let now = at(2024, 3, 5, 0, 30, 0);
        assert_eq!(format_board(at(2024, 3, 4, 23, 50, 0), now), "어제");
    }

    #[test]
    fn date_range() {
        let now = now();
        assert_eq!(
            format_date_range(now - TimeDelta::days(7), now),
            "2024-02-27 ~ 2024-03-05"
        );
    }

    #[test]
    fn every_style_has_label_and_pattern() {
        for style in DateStyle::ALL {
            assert!(!style.label().is_empty());
            assert!(!style.pattern().is_empty());
        }
    }
}
