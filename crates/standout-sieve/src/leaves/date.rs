//! Date and time conditions over `chrono::NaiveDateTime` fields.
//!
//! Relative checks (`future_date`, `is_today`, `in_last_days`, ...) read the
//! clock from the filter's [`SieveConfig`](crate::SieveConfig) each time the
//! predicate runs, not when the condition is added. A predicate built today
//! and tested tomorrow uses tomorrow's date.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::condition::Condition;
use crate::error::Result;
use crate::filter::Filter;
use crate::validation;

impl<T: ?Sized + 'static> Filter<T> {
    fn add_moment<F, C>(&mut self, accessor: F, check: C) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
        C: Fn(NaiveDateTime) -> bool + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |dt: &NaiveDateTime| check(*dt)))
    }

    /// Later than now.
    pub fn future_date<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| dt > clock.now())
    }

    /// Earlier than now.
    pub fn past_date<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| dt < clock.now())
    }

    /// On a calendar day from `start` to `end`, both inclusive.
    ///
    /// The time of day is ignored. Fails with
    /// [`SieveError::InvalidArgument`](crate::SieveError::InvalidArgument)
    /// when `start` is after `end`.
    pub fn between_dates<F>(&mut self, accessor: F, start: NaiveDate, end: NaiveDate) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        validation::ensure_ordered(start, end)?;
        self.add_moment(accessor, move |dt| (start..=end).contains(&dt.date()))
    }

    /// Between two other date fields of the same item, both inclusive.
    pub fn between_date_fields<F, S, E>(&mut self, accessor: F, start: S, end: E) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
        S: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
        E: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add(Condition::new(move |item: &T| {
            let dt = accessor(item);
            dt >= start(item) && dt <= end(item)
        }))
    }

    /// On the calendar day `date`.
    pub fn exact_date<F>(&mut self, accessor: F, date: NaiveDate) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, move |dt| dt.date() == date)
    }

    /// Strictly before `moment`.
    pub fn before_date<F>(&mut self, accessor: F, moment: NaiveDateTime) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, move |dt| dt < moment)
    }

    /// Strictly after `moment`.
    pub fn after_date<F>(&mut self, accessor: F, moment: NaiveDateTime) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, move |dt| dt > moment)
    }

    /// On today's date.
    pub fn is_today<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| dt.date() == clock.today())
    }

    /// On yesterday's date.
    pub fn is_yesterday<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| {
            clock.today().checked_sub_days(Days::new(1)) == Some(dt.date())
        })
    }

    /// On tomorrow's date.
    pub fn is_tomorrow<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| {
            clock.today().checked_add_days(Days::new(1)) == Some(dt.date())
        })
    }

    /// On or after the date `days` days ago.
    ///
    /// Later dates, including future ones, also match. Fails with
    /// [`SieveError::OutOfRange`](crate::SieveError::OutOfRange) unless
    /// `days` is positive.
    pub fn in_last_days<F>(&mut self, accessor: F, days: i64) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let span = positive_days(days)?;
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| {
            clock
                .today()
                .checked_sub_days(span)
                .map_or(true, |from| dt.date() >= from)
        })
    }

    /// On or before the date `days` days from now.
    ///
    /// Earlier dates, including past ones, also match. Fails with
    /// [`SieveError::OutOfRange`](crate::SieveError::OutOfRange) unless
    /// `days` is positive.
    pub fn in_next_days<F>(&mut self, accessor: F, days: i64) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        let span = positive_days(days)?;
        let clock = self.config().clock;
        self.add_moment(accessor, move |dt| {
            clock
                .today()
                .checked_add_days(span)
                .map_or(true, |until| dt.date() <= until)
        })
    }

    /// On a Saturday or Sunday.
    pub fn is_weekend<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, |dt| matches!(dt.weekday(), Weekday::Sat | Weekday::Sun))
    }

    /// On a Monday through Friday.
    pub fn is_weekday<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, |dt| !matches!(dt.weekday(), Weekday::Sat | Weekday::Sun))
    }

    /// In a leap year.
    pub fn is_leap_year<F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, |dt| NaiveDate::from_ymd_opt(dt.year(), 2, 29).is_some())
    }

    /// In the same year and month as `date`.
    pub fn same_month_as<F>(&mut self, accessor: F, date: NaiveDate) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, move |dt| {
            dt.year() == date.year() && dt.month() == date.month()
        })
    }

    /// In the same year as `date`.
    pub fn same_year_as<F>(&mut self, accessor: F, date: NaiveDate) -> Result<&mut Self>
    where
        F: for<'a> Fn(&'a T) -> &'a NaiveDateTime + Send + Sync + 'static,
    {
        self.add_moment(accessor, move |dt| dt.year() == date.year())
    }
}

fn positive_days(days: i64) -> Result<Days> {
    validation::ensure_positive("days", days)?;
    Ok(Days::new(days.unsigned_abs()))
}
