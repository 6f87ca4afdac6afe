//! Relative time windows used by modification-time grouping.

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::entry::KeyedEntry;

/// A named `(begins, ends]` interval of epoch milliseconds and its members.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    name: String,
    begins: i64,
    ends: i64,
    items: Vec<KeyedEntry>,
}

impl TimeWindow {
    /// Creates an empty window.
    pub fn new(name: impl Into<String>, begins: i64, ends: i64) -> Self {
        Self {
            name: name.into(),
            begins,
            ends,
            items: Vec::new(),
        }
    }

    /// Creates the window covering the calendar month of `millis` in `tz`,
    /// named like `"March 2024"`.
    pub fn month_of<Tz: TimeZone>(millis: i64, tz: &Tz) -> Self {
        let local = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .with_timezone(tz);
        let date = local.date_naive();
        let (first, next) = month_bounds(date).unwrap_or((date, date));
        let month = u8::try_from(date.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name());
        Self::new(
            format!("{month} {}", date.year()),
            start_of_day(first, tz) - 1,
            start_of_day(next, tz) - 1,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exclusive lower bound, epoch milliseconds.
    pub fn begins(&self) -> i64 {
        self.begins
    }

    /// Inclusive upper bound, epoch milliseconds.
    pub fn ends(&self) -> i64 {
        self.ends
    }

    pub fn items(&self) -> &[KeyedEntry] {
        &self.items
    }

    /// Returns `true` if `millis` lies in `(begins, ends]`.
    pub fn contains(&self, millis: i64) -> bool {
        millis > self.begins && millis <= self.ends
    }

    /// Folder key for this window: lower-cased name, spaces as `_`, trailing `/`.
    pub fn key(&self) -> String {
        format!("{}/", self.name.to_lowercase().replace(' ', "_"))
    }

    pub(crate) fn push(&mut self, entry: KeyedEntry) {
        self.items.push(entry);
    }

    pub(crate) fn into_items(self) -> Vec<KeyedEntry> {
        self.items
    }
}

/// Builds the fixed relative windows for the moment `now`.
///
/// The windows are, in order: Today, Yesterday, Earlier this Week, Last
/// Week, and Earlier this Month when last week began in the current month.
/// Weeks start on Sunday. Later windows may overlap earlier ones; entries
/// go to the first window that contains them.
pub fn relative_time_windows<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<TimeWindow> {
    let tz = now.timezone();
    let today = now.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    let week_start =
        today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let last_week_start = week_start - Duration::days(7);

    let mut windows = vec![
        day_window("Today", today, &tz),
        day_window("Yesterday", yesterday, &tz),
        span_window("Earlier this Week", week_start, week_start + Duration::days(7), &tz),
        span_window("Last Week", last_week_start, week_start, &tz),
    ];

    if last_week_start.month() == today.month() {
        if let Some((first, next)) = month_bounds(today) {
            windows.push(span_window("Earlier this Month", first, next, &tz));
        }
    }

    windows
}

fn day_window<Tz: TimeZone>(name: &str, day: NaiveDate, tz: &Tz) -> TimeWindow {
    span_window(name, day, day + Duration::days(1), tz)
}

/// Window from local midnight of `first` through the last millisecond
/// before `next`. The exclusive lower bound sits one millisecond before
/// midnight so that midnight itself belongs to the window.
fn span_window<Tz: TimeZone>(name: &str, first: NaiveDate, next: NaiveDate, tz: &Tz) -> TimeWindow {
    TimeWindow::new(name, start_of_day(first, tz) - 1, start_of_day(next, tz) - 1)
}

/// First day of the month containing `date` and first day of the next month.
fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((first, next))
}

/// Local midnight of `day` in epoch milliseconds.
///
/// When midnight does not exist locally (a DST gap), the earliest valid
/// mapping is used, falling back to UTC midnight.
fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> i64 {
    let midnight = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn names(windows: &[TimeWindow]) -> Vec<&str> {
        windows.iter().map(TimeWindow::name).collect()
    }

    #[test]
    fn fixed_windows_mid_month() {
        // Thursday 2024-05-23: last week began Sunday 2024-05-12, same month.
        let now = utc(2024, 5, 23, 15);
        let windows = relative_time_windows(&now);
        assert_eq!(
            names(&windows),
            vec![
                "Today",
                "Yesterday",
                "Earlier this Week",
                "Last Week",
                "Earlier this Month"
            ]
        );
    }

    #[test]
    fn earlier_this_month_skipped_early_in_month() {
        // Monday 2024-07-01: last week began Sunday 2024-06-23.
        let now = utc(2024, 7, 1, 9);
        let windows = relative_time_windows(&now);
        assert_eq!(windows.len(), 4);
    }

    #[test]
    fn today_bounds_are_half_open() {
        let now = utc(2024, 5, 23, 15);
        let today = &relative_time_windows(&now)[0];
        let midnight = utc(2024, 5, 23, 0).timestamp_millis();
        assert_eq!(today.begins(), midnight - 1);
        assert_eq!(today.ends(), utc(2024, 5, 24, 0).timestamp_millis() - 1);
        assert!(!today.contains(midnight - 1));
        assert!(today.contains(midnight));
        assert!(today.contains(today.ends()));
        assert!(!today.contains(today.ends() + 1));
    }

    #[test]
    fn week_starts_on_sunday() {
        let now = utc(2024, 5, 23, 15);
        let windows = relative_time_windows(&now);
        assert_eq!(windows[2].begins(), utc(2024, 5, 19, 0).timestamp_millis() - 1);
        assert_eq!(windows[3].begins(), utc(2024, 5, 12, 0).timestamp_millis() - 1);
        assert_eq!(windows[3].ends(), windows[2].begins());
    }

    #[test]
    fn month_window_covers_calendar_month() {
        let millis = utc(2024, 2, 10, 12).timestamp_millis();
        let window = TimeWindow::month_of(millis, &Utc);
        assert_eq!(window.name(), "February 2024");
        assert_eq!(window.begins(), utc(2024, 2, 1, 0).timestamp_millis() - 1);
        assert_eq!(window.ends(), utc(2024, 3, 1, 0).timestamp_millis() - 1);
        assert!(window.contains(millis));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let millis = utc(2023, 12, 31, 23).timestamp_millis();
        let window = TimeWindow::month_of(millis, &Utc);
        assert_eq!(window.name(), "December 2023");
        assert_eq!(window.ends(), utc(2024, 1, 1, 0).timestamp_millis() - 1);
    }

    #[test]
    fn month_window_contains_its_first_millisecond() {
        let epoch = TimeWindow::month_of(0, &Utc);
        assert_eq!(epoch.name(), "January 1970");
        assert!(epoch.contains(0));

        let first = utc(2024, 3, 1, 0).timestamp_millis();
        assert!(TimeWindow::month_of(first, &Utc).contains(first));
    }

    #[test]
    fn key_normalizes_every_space() {
        let window = TimeWindow::new("Earlier this Week", 0, 1);
        assert_eq!(window.key(), "earlier_this_week/");
    }
}
