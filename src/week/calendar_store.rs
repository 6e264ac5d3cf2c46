use super::day_map::{DayMap, WeekTable, week_days};
use crate::config::SettingsSource;
use crate::error::RemoteError;
use crate::remote::{BlobTransport, HttpTransport, RemoteBlob};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use log::{debug, info, warn};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// One day of a projected week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub text: String,
}

/// Owner of the weekly planner table
///
/// Weeks are keyed by the date of their first day, which depends on the
/// configured first day of the week at the time of the call. There is no
/// change observer on this store.
#[derive(Debug)]
pub struct CalendarStore<T = HttpTransport> {
    weeks: WeekTable,
    first_day: Weekday,
    remote: RemoteBlob<T>,
}

impl CalendarStore<HttpTransport> {
    /// Empty table starting weeks on Monday, synchronized over HTTP with settings from the environment
    pub fn new() -> Self {
        Self::with_remote(RemoteBlob::http(SettingsSource::week_env()))
    }
}

impl Default for CalendarStore<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BlobTransport> CalendarStore<T> {
    pub fn with_remote(remote: RemoteBlob<T>) -> Self {
        Self {
            weeks: WeekTable::new(),
            first_day: Weekday::Mon,
            remote,
        }
    }

    pub fn weeks(&self) -> &WeekTable {
        &self.weeks
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day
    }

    /// Affects every later week key and day ordering
    pub fn set_first_day_of_week(&mut self, day: Weekday) {
        self.first_day = day;
    }

    /// Days elapsed since the configured first day, 0..=6
    fn days_into_week(&self, date: NaiveDate) -> i64 {
        i64::from(
            (date.weekday().num_days_from_sunday() + 7 - self.first_day.num_days_from_sunday()) % 7,
        )
    }

    /// Most recent configured first day on or before `date`
    ///
    /// Clamped to [`NaiveDate::MIN`] when that day precedes the supported range.
    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        date.checked_sub_signed(Duration::days(self.days_into_week(date)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// `YYYY-MM-DD` key of the week containing `date`
    pub fn week_key(&self, date: NaiveDate) -> String {
        self.week_start(date).format("%Y-%m-%d").to_string()
    }

    /// Stored record for the week containing `date`, if any
    pub fn week(&self, date: NaiveDate) -> Option<&DayMap> {
        self.weeks.get(&self.week_key(date))
    }

    /// The seven days of the week containing `date`, in configured order
    ///
    /// Read-only: a week with no stored record projects as empty text and
    /// is not added to the table.
    ///
    /// Days falling outside the supported date range are left out, so the
    /// first and last weeks of the range yield fewer than seven entries.
    pub fn week_of(&self, date: NaiveDate) -> Vec<DayEntry> {
        let offset = self.days_into_week(date);
        let empty = DayMap::default();
        let week = self.week(date).unwrap_or(&empty);

        week_days(self.first_day)
            .into_iter()
            .zip(0i64..)
            .filter_map(|(weekday, i)| {
                let day = date.checked_add_signed(Duration::days(i - offset))?;
                Some(DayEntry {
                    date: day,
                    weekday,
                    text: week.get(weekday).to_string(),
                })
            })
            .collect()
    }

    /// [`week_of`](Self::week_of) for today's local date
    pub fn current_week(&self) -> Vec<DayEntry> {
        self.week_of(local_date_today())
    }

    /// Set the text of `day` in the week containing `date` (today when `None`)
    ///
    /// Materializes an all-empty record for that week on first write.
    pub fn set_day_text(&mut self, day: Weekday, text: impl Into<String>, date: Option<NaiveDate>) {
        let key = self.week_key(date.unwrap_or_else(local_date_today));
        let text = text.into();
        debug!(
            "event=day_text_set module=week week={} day={} len={}",
            key,
            day,
            text.len()
        );
        self.weeks.entry(key).or_default().set(day, text);
    }

    /// Replace the whole table with the remote record
    pub async fn load_from_remote(&mut self) -> Result<(), RemoteError> {
        match self.remote.fetch::<WeekTable>().await {
            Ok(weeks) => {
                info!(
                    "event=weeks_loaded module=remote status=ok weeks={}",
                    weeks.len()
                );
                self.weeks = weeks;
                Ok(())
            }
            Err(err) => {
                warn!("event=weeks_load_failed module=remote status=error error={}", err);
                Err(err)
            }
        }
    }

    /// Replace the remote record with the whole local table
    pub async fn save_to_remote(&self) -> Result<(), RemoteError> {
        match self.remote.replace(&self.weeks).await {
            Ok(()) => {
                info!(
                    "event=weeks_saved module=remote status=ok weeks={}",
                    self.weeks.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=weeks_save_failed module=remote status=error error={}", err);
                Err(err)
            }
        }
    }
}
