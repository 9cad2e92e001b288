use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

/// Current time in whole seconds since the Unix epoch.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Calendar difference between two instants, as an ISO 8601 duration
/// (`PnYnMnDTnHnMnS`). Argument order does not matter.
pub fn iso8601_between(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    let (from, to) = if a <= b { (a, b) } else { (b, a) };

    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;
    let mut days = to.day() as i32 - from.day() as i32;
    let mut hours = to.hour() as i32 - from.hour() as i32;
    let mut minutes = to.minute() as i32 - from.minute() as i32;
    let mut seconds = to.second() as i32 - from.second() as i32;

    if seconds < 0 {
        seconds += 60;
        minutes -= 1;
    }
    if minutes < 0 {
        minutes += 60;
        hours -= 1;
    }
    if hours < 0 {
        hours += 24;
        days -= 1;
    }
    if days < 0 {
        days += days_in_month(from.year(), from.month()) as i32;
        months -= 1;
    }
    if months < 0 {
        months += 12;
        years -= 1;
    }

    format!(
        "P{}Y{}M{}DT{}H{}M{}S",
        years, months, days, hours, minutes, seconds
    )
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}
