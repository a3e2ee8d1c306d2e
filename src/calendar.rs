//! Solar Hijri dates for history entries.

use crate::digits::to_persian_digits;
use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike};

const MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for JalaliDate {
    fn from(date: NaiveDate) -> Self {
        const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        let gy = i64::from(date.year());
        let gm = date.month() as usize;
        let gd = i64::from(date.day());
        let gy2 = if gm > 2 { gy + 1 } else { gy };

        let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
            + gd
            + DAYS_BEFORE_MONTH[gm - 1];
        let mut year = -1595 + 33 * (days / 12_053);
        days %= 12_053;
        year += 4 * (days / 1461);
        days %= 1461;
        if days > 365 {
            year += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let (month, day) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year,
            month: month as u32,
            day: day as u32,
        }
    }
}

impl JalaliDate {
    pub fn month_name(&self) -> &'static str {
        MONTHS[(self.month as usize).saturating_sub(1).min(11)]
    }
}

/// Renders a timestamp the way the history panel shows it,
/// e.g. `۲۵ مهر ۱۴۰۵، ساعت ۱۴:۳۰`.
pub fn display_date(at: &DateTime<Local>) -> String {
    let date = JalaliDate::from(at.date_naive());
    to_persian_digits(format!(
        "{} {} {}، ساعت {:02}:{:02}",
        date.day,
        date.month_name(),
        date.year,
        at.hour(),
        at.minute()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jalali(y: i32, m: u32, d: u32) -> JalaliDate {
        JalaliDate::from(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn converts_known_dates() {
        assert_eq!(jalali(2024, 3, 20), JalaliDate { year: 1403, month: 1, day: 1 });
        assert_eq!(jalali(2025, 3, 20), JalaliDate { year: 1403, month: 12, day: 30 });
        assert_eq!(jalali(2025, 3, 21), JalaliDate { year: 1404, month: 1, day: 1 });
        assert_eq!(jalali(2026, 10, 17), JalaliDate { year: 1405, month: 7, day: 25 });
    }

    #[test]
    fn display_uses_month_name_and_persian_digits() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 14, 5, 0).unwrap();
        assert_eq!(display_date(&at), "۲۵ مهر ۱۴۰۵، ساعت ۱۴:۰۵");
    }
}
