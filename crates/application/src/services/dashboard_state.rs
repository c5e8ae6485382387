//! Dashboard session state
//!
//! All mutable session state lives here and only changes through named
//! transitions. Every transition that needs fresh data issues a
//! [`RefreshTicket`] carrying a monotonically increasing sequence number;
//! results are committed only for the latest ticket, so a slow response for
//! an older city or unit system can never overwrite a newer one.

use domain::{Calendar, City, CurrentConditions, DailySummary, DomainError, Units};
use tracing::{debug, info, warn};

use crate::error::ApplicationError;
use crate::services::forecast_aggregator::AggregatedForecast;
use crate::services::hourly_selector::HourlySelector;

/// Message shown whenever a refresh cycle fails
pub const DATA_UNAVAILABLE_MESSAGE: &str =
    "Could not load weather. Try another city or check your API key.";

/// Permission to commit the result of one refresh cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    /// Sequence number, increasing with every issued ticket
    pub sequence: u64,
    /// City to fetch
    pub city: City,
    /// Unit system to fetch in
    pub units: Units,
}

/// Everything one successful refresh cycle produced
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedWeather {
    /// Current conditions snapshot
    pub current: CurrentConditions,
    /// Daily summaries and today's hourly samples
    pub forecast: AggregatedForecast,
    /// Calendar the forecast was bucketed with
    pub calendar: Calendar,
}

/// What happened to a fetch result handed to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Data committed
    Committed,
    /// Failure committed: data cleared, error message set
    Failed,
    /// A newer ticket exists; the result was discarded
    Stale,
}

/// Session state of one dashboard
#[derive(Debug, Clone)]
pub struct DashboardState {
    city: City,
    units: Units,
    data_units: Units,
    current: Option<CurrentConditions>,
    days: Vec<DailySummary>,
    hourly: HourlySelector,
    calendar: Calendar,
    loading: bool,
    error: Option<String>,
    sequence: u64,
}

impl DashboardState {
    /// Fresh state with no data and no refresh issued yet
    #[must_use]
    pub fn new(city: City, units: Units) -> Self {
        Self {
            city,
            units,
            data_units: units,
            current: None,
            days: Vec::new(),
            hourly: HourlySelector::default(),
            calendar: Calendar::default(),
            loading: false,
            error: None,
            sequence: 0,
        }
    }

    /// Start a refresh cycle for the current city and units
    ///
    /// Supersedes any cycle still in flight.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.sequence += 1;
        self.loading = true;
        self.error = None;

        debug!(
            sequence = self.sequence,
            city = %self.city,
            units = %self.units,
            "Refresh cycle started"
        );

        RefreshTicket {
            sequence: self.sequence,
            city: self.city.clone(),
            units: self.units,
        }
    }

    /// Search for a city
    ///
    /// Resubmitting the current city still refreshes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCity` for blank input; the state is left
    /// untouched and no refresh starts.
    pub fn set_city(&mut self, input: &str) -> Result<RefreshTicket, DomainError> {
        let city = City::parse(input)?;
        info!(from = %self.city, to = %city, "City changed");
        self.city = city;
        Ok(self.begin_refresh())
    }

    /// Switch unit system; `None` when it is already active
    pub fn set_units(&mut self, units: Units) -> Option<RefreshTicket> {
        if self.units == units {
            return None;
        }
        info!(from = %self.units, to = %units, "Units changed");
        self.units = units;
        Some(self.begin_refresh())
    }

    /// Flip between metric and imperial
    pub fn toggle_units(&mut self) -> RefreshTicket {
        let next = self.units.toggled();
        info!(from = %self.units, to = %next, "Units toggled");
        self.units = next;
        self.begin_refresh()
    }

    /// Select an hourly sample; out-of-range values are clamped
    ///
    /// Does not trigger a refresh.
    pub fn set_cursor(&mut self, index: usize) -> usize {
        self.hourly.set_cursor(index)
    }

    /// Whether a ticket is the latest one issued
    #[must_use]
    pub const fn is_latest(&self, ticket: &RefreshTicket) -> bool {
        ticket.sequence == self.sequence
    }

    /// Commit the outcome of a refresh cycle
    ///
    /// Success replaces current conditions, summaries and the hourly bucket
    /// together and resets the cursor. Failure of either fetch clears all
    /// three and sets [`DATA_UNAVAILABLE_MESSAGE`]. Outcomes for superseded
    /// tickets are dropped.
    pub fn apply_fetch_result(
        &mut self,
        ticket: &RefreshTicket,
        outcome: Result<FetchedWeather, ApplicationError>,
    ) -> ApplyOutcome {
        if !self.is_latest(ticket) {
            debug!(
                ticket = ticket.sequence,
                latest = self.sequence,
                "Discarding stale refresh result"
            );
            return ApplyOutcome::Stale;
        }

        self.loading = false;

        match outcome {
            Ok(fetched) => {
                info!(
                    sequence = ticket.sequence,
                    city = %ticket.city,
                    days = fetched.forecast.days.len(),
                    hours = fetched.forecast.today.len(),
                    "Refresh committed"
                );
                self.data_units = ticket.units;
                self.current = Some(fetched.current);
                self.days = fetched.forecast.days;
                self.hourly.install(fetched.forecast.today);
                self.calendar = fetched.calendar;
                self.error = None;
                ApplyOutcome::Committed
            },
            Err(e) => {
                warn!(
                    sequence = ticket.sequence,
                    city = %ticket.city,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Refresh failed"
                );
                self.current = None;
                self.days.clear();
                self.hourly.clear();
                self.error = Some(DATA_UNAVAILABLE_MESSAGE.to_string());
                ApplyOutcome::Failed
            },
        }
    }

    /// Searched city
    #[must_use]
    pub const fn city(&self) -> &City {
        &self.city
    }

    /// Active unit system
    #[must_use]
    pub const fn units(&self) -> Units {
        self.units
    }

    /// Unit system the held temperatures were fetched in
    ///
    /// Lags behind [`Self::units`] while a refresh for new units is in flight.
    #[must_use]
    pub const fn data_units(&self) -> Units {
        self.data_units
    }

    /// Latest current conditions
    #[must_use]
    pub const fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    /// Daily summaries, soonest first
    #[must_use]
    pub fn days(&self) -> &[DailySummary] {
        &self.days
    }

    /// Today's hourly samples and cursor
    #[must_use]
    pub const fn hourly(&self) -> &HourlySelector {
        &self.hourly
    }

    /// Calendar of the committed forecast
    #[must_use]
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Whether a refresh is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing error message of the last cycle
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Latest issued sequence number
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}
