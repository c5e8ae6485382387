//! Dashboard controller
//!
//! Drives a [`DashboardState`] through refresh cycles: both upstream fetches
//! run concurrently, the forecast is aggregated against the injected clock,
//! and the joined result is committed in one step. The state lock is only
//! taken between awaits.

use std::sync::Arc;

use domain::{City, DayBoundary, DomainError, Units};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{ClockPort, WeatherPort};
use crate::services::dashboard_state::{
    ApplyOutcome, DashboardState, FetchedWeather, RefreshTicket,
};
use crate::services::dashboard_view::DashboardView;
use crate::services::forecast_aggregator::{DEFAULT_FORECAST_DAYS, ForecastAggregator};

/// Dashboard behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// City shown on startup
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Unit system on startup
    #[serde(default)]
    pub default_units: Units,

    /// Number of upcoming days summarised
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,

    /// Calendar used for day keys and "today"
    #[serde(default)]
    pub day_boundary: DayBoundary,
}

fn default_city() -> String {
    "Austin".to_string()
}

const fn default_forecast_days() -> usize {
    DEFAULT_FORECAST_DAYS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            default_units: Units::default(),
            forecast_days: default_forecast_days(),
            day_boundary: DayBoundary::default(),
        }
    }
}

/// Controller owning one dashboard session
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    clock: Arc<dyn ClockPort>,
    aggregator: ForecastAggregator,
    day_boundary: DayBoundary,
    state: Mutex<DashboardState>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("weather", &"<WeatherPort>")
            .field("clock", &"<ClockPort>")
            .field("aggregator", &self.aggregator)
            .field("day_boundary", &self.day_boundary)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl DashboardService {
    /// Create a controller for the configured default city and units
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default city is blank.
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        clock: Arc<dyn ClockPort>,
        config: &DashboardConfig,
    ) -> Result<Self, ApplicationError> {
        let city = City::parse(&config.default_city)?;
        Ok(Self {
            weather,
            clock,
            aggregator: ForecastAggregator::new(config.forecast_days),
            day_boundary: config.day_boundary,
            state: Mutex::new(DashboardState::new(city, config.default_units)),
        })
    }

    /// Refresh the current city and units
    pub async fn refresh(&self) -> ApplyOutcome {
        let ticket = self.state.lock().begin_refresh();
        self.run(ticket).await
    }

    /// Search for a city and refresh
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCity` for blank input; nothing is fetched.
    pub async fn set_city(&self, input: &str) -> Result<ApplyOutcome, DomainError> {
        let ticket = self.state.lock().set_city(input)?;
        Ok(self.run(ticket).await)
    }

    /// Switch unit system; `None` when it is already active
    pub async fn set_units(&self, units: Units) -> Option<ApplyOutcome> {
        let ticket = self.state.lock().set_units(units)?;
        Some(self.run(ticket).await)
    }

    /// Flip between metric and imperial and refresh
    pub async fn toggle_units(&self) -> ApplyOutcome {
        let ticket = self.state.lock().toggle_units();
        self.run(ticket).await
    }

    /// Select an hourly sample; returns the applied cursor
    pub fn set_cursor(&self, index: usize) -> usize {
        self.state.lock().set_cursor(index)
    }

    /// Copy of the current session state
    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    /// Display-ready view of the session
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let now = self.clock.now();
        DashboardView::build(&self.state.lock(), now)
    }

    /// Fetch for a ticket and commit the outcome
    #[instrument(
        skip(self, ticket),
        fields(sequence = ticket.sequence, city = %ticket.city, units = %ticket.units)
    )]
    async fn run(&self, ticket: RefreshTicket) -> ApplyOutcome {
        let outcome = self.fetch(&ticket).await;
        self.state.lock().apply_fetch_result(&ticket, outcome)
    }

    /// Run both fetches and aggregate; either failure fails the cycle
    async fn fetch(&self, ticket: &RefreshTicket) -> Result<FetchedWeather, ApplicationError> {
        let (current, series) = tokio::try_join!(
            self.weather.fetch_current_conditions(&ticket.city, ticket.units),
            self.weather.fetch_forecast_series(&ticket.city, ticket.units),
        )?;

        let calendar = self.day_boundary.resolve(series.utc_offset_seconds);
        let today = calendar.today(self.clock.now());
        debug!(%calendar, %today, samples = series.samples.len(), "Fetched forecast series");

        let forecast = self.aggregator.aggregate(&series, &calendar, today);
        Ok(FetchedWeather {
            current,
            forecast,
            calendar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockClockPort, MockWeatherPort};
    use crate::services::dashboard_state::DATA_UNAVAILABLE_MESSAGE;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use domain::{CurrentConditions, ForecastSeries, Sample};
    use tokio::sync::Notify;

    // 2024-01-15T09:00:00Z
    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    fn clock() -> Arc<dyn ClockPort> {
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(morning);
        Arc::new(clock)
    }

    fn current(name: &str, temp: f64) -> CurrentConditions {
        CurrentConditions::new(name, Sample::new(morning().timestamp(), temp, "Clear", "clear sky"))
    }

    /// Five days of 3-hour samples from 2024-01-15 00:00 UTC
    fn series() -> ForecastSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap().timestamp();
        let samples = (0..40)
            .map(|i| Sample::new(start + i * 10_800, 5.5, "Rain", "light rain"))
            .collect();
        ForecastSeries::new(samples).with_utc_offset(0)
    }

    fn service(weather: MockWeatherPort) -> DashboardService {
        DashboardService::new(Arc::new(weather), clock(), &DashboardConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn refresh_commits_both_results() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .returning(|_, _| Ok(current("Austin", 21.5)));
        weather
            .expect_fetch_forecast_series()
            .returning(|_, _| Ok(series()));

        let service = service(weather);
        assert_eq!(service.refresh().await, ApplyOutcome::Committed);

        let state = service.snapshot();
        assert_eq!(state.current().unwrap().location_name, "Austin");
        assert_eq!(state.days().len(), 3);
        assert_eq!(state.hourly().len(), 8);
        assert_eq!(state.hourly().cursor(), 0);
        assert!(state.days().iter().all(|d| d.temperature == 6));
    }

    #[tokio::test]
    async fn forecast_failure_fails_whole_cycle() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .returning(|_, _| Ok(current("Austin", 20.0)));
        weather
            .expect_fetch_forecast_series()
            .returning(|_, _| Err(ApplicationError::ExternalService("HTTP 502".into())));

        let service = service(weather);
        assert_eq!(service.refresh().await, ApplyOutcome::Failed);

        let state = service.snapshot();
        assert!(state.current().is_none());
        assert!(state.days().is_empty());
        assert!(state.hourly().is_empty());
        assert_eq!(state.error(), Some(DATA_UNAVAILABLE_MESSAGE));
    }

    #[tokio::test]
    async fn current_failure_fails_whole_cycle() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .returning(|_, _| Err(ApplicationError::NotFound("Atlantis".into())));
        weather
            .expect_fetch_forecast_series()
            .returning(|_, _| Ok(series()));

        let service = service(weather);
        assert_eq!(
            service.set_city("Atlantis").await.unwrap(),
            ApplyOutcome::Failed
        );
        assert_eq!(service.snapshot().city().as_str(), "Atlantis");
    }

    #[tokio::test]
    async fn empty_forecast_is_not_an_error() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .returning(|_, _| Ok(current("Austin", 20.0)));
        weather
            .expect_fetch_forecast_series()
            .returning(|_, _| Ok(ForecastSeries::default()));

        let service = service(weather);
        assert_eq!(service.refresh().await, ApplyOutcome::Committed);

        let state = service.snapshot();
        assert!(state.error().is_none());
        assert!(state.days().is_empty());
        assert!(state.hourly().is_empty());
        assert!(state.current().is_some());
    }

    #[tokio::test]
    async fn toggle_units_fetches_once_with_new_units() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .withf(|city, units| city.as_str() == "Austin" && *units == Units::Imperial)
            .times(1)
            .returning(|_, _| Ok(current("Austin", 70.0)));
        weather
            .expect_fetch_forecast_series()
            .withf(|city, units| city.as_str() == "Austin" && *units == Units::Imperial)
            .times(1)
            .returning(|_, _| Ok(series()));

        let service = service(weather);
        assert_eq!(service.toggle_units().await, ApplyOutcome::Committed);
        assert_eq!(service.snapshot().units(), Units::Imperial);
    }

    #[tokio::test]
    async fn set_units_to_active_units_does_nothing() {
        let service = service(MockWeatherPort::new());
        assert!(service.set_units(Units::Metric).await.is_none());
    }

    #[tokio::test]
    async fn blank_city_fetches_nothing() {
        let service = service(MockWeatherPort::new());
        assert!(service.set_city("  ").await.is_err());
        assert_eq!(service.snapshot().sequence(), 0);
    }

    #[tokio::test]
    async fn set_cursor_clamps_to_bucket() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_current_conditions()
            .returning(|_, _| Ok(current("Austin", 20.0)));
        weather
            .expect_fetch_forecast_series()
            .returning(|_, _| Ok(series()));

        let service = service(weather);
        service.refresh().await;
        assert_eq!(service.set_cursor(4), 4);
        assert_eq!(service.set_cursor(100), 7);
    }

    /// Weather source whose current-conditions call for "Slowtown" blocks
    /// until released
    struct GatedWeather {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl WeatherPort for GatedWeather {
        async fn fetch_current_conditions(
            &self,
            city: &City,
            _units: Units,
        ) -> Result<CurrentConditions, ApplicationError> {
            if city.as_str() == "Slowtown" {
                self.gate.notified().await;
            }
            Ok(current(city.as_str(), 1.0))
        }

        async fn fetch_forecast_series(
            &self,
            _city: &City,
            _units: Units,
        ) -> Result<ForecastSeries, ApplicationError> {
            Ok(series())
        }
    }

    #[tokio::test]
    async fn out_of_order_response_does_not_overwrite_newer_city() {
        let gate = Arc::new(Notify::new());
        let weather = GatedWeather {
            gate: Arc::clone(&gate),
        };
        let service =
            DashboardService::new(Arc::new(weather), clock(), &DashboardConfig::default())
                .unwrap();

        let (slow, fast) = tokio::join!(service.set_city("Slowtown"), async {
            tokio::task::yield_now().await;
            let outcome = service.set_city("Oslo").await;
            gate.notify_one();
            outcome
        });

        assert_eq!(fast.unwrap(), ApplyOutcome::Committed);
        assert_eq!(slow.unwrap(), ApplyOutcome::Stale);

        let state = service.snapshot();
        assert_eq!(state.city().as_str(), "Oslo");
        assert_eq!(state.current().unwrap().location_name, "Oslo");
    }

    #[test]
    fn blank_default_city_is_rejected() {
        let config = DashboardConfig {
            default_city: " ".to_string(),
            ..Default::default()
        };
        let result = DashboardService::new(Arc::new(MockWeatherPort::new()), clock(), &config);
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.default_city, "Austin");
        assert_eq!(config.default_units, Units::Metric);
        assert_eq!(config.forecast_days, 3);
        assert_eq!(config.day_boundary, DayBoundary::Location);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"default_units":"imperial","day_boundary":"Europe/Oslo"}"#)
                .unwrap();
        assert_eq!(config.default_city, "Austin");
        assert_eq!(config.default_units, Units::Imperial);
        assert_eq!(config.day_boundary.to_string(), "Europe/Oslo");
    }
}
