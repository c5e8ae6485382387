//! Display-ready dashboard view
//!
//! Flattens a [`DashboardState`] into strings and asset ids so presentation
//! layers only have to lay things out.

use chrono::{DateTime, Timelike, Utc};
use domain::{Calendar, ConditionAsset, Sample, Units, format_rounded, format_temperature};
use serde::Serialize;

use crate::services::dashboard_state::DashboardState;

/// Local hours in `[DAY_START_HOUR, DAY_END_HOUR)` use the day theme
const DAY_START_HOUR: u32 = 6;
const DAY_END_HOUR: u32 = 18;

/// Background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    /// Theme for a local hour of day
    #[must_use]
    pub fn for_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
            Self::Day
        } else {
            Self::Night
        }
    }
}

/// Condition block shared by current and hourly views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionsView {
    pub temperature: String,
    pub condition: String,
    pub description: String,
    pub asset: ConditionAsset,
    pub asset_file: &'static str,
}

impl ConditionsView {
    fn from_sample(sample: &Sample, units: Units) -> Self {
        let asset = sample.asset();
        Self {
            temperature: format_temperature(Some(sample.temperature), units),
            condition: sample.condition.clone(),
            description: sample.description.clone(),
            asset,
            asset_file: asset.file_name(),
        }
    }
}

/// Selected hour block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourView {
    /// Local `HH:MM`, empty when falling back to current conditions
    pub time: String,
    pub cursor: usize,
    /// Largest valid cursor; `None` without hourly data
    pub max_index: Option<usize>,
    pub conditions: ConditionsView,
}

/// One row of the daily forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    /// Short weekday, e.g. `Tue`
    pub weekday: String,
    pub date: String,
    pub temperature: String,
    pub condition: String,
    pub asset: ConditionAsset,
    pub asset_file: &'static str,
}

/// Everything a dashboard renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub city: String,
    pub units: Units,
    /// e.g. `Monday, January 15, 2024`
    pub date: String,
    pub theme: Theme,
    pub loading: bool,
    pub error: Option<String>,
    pub location_name: Option<String>,
    pub current: Option<ConditionsView>,
    pub selected_hour: Option<HourView>,
    pub days: Vec<DayView>,
}

impl DashboardView {
    /// Build the view for the instant `now`
    ///
    /// Dates and hours use the calendar of the last committed forecast, and
    /// temperatures the units it was fetched in.
    #[must_use]
    pub fn build(state: &DashboardState, now: DateTime<Utc>) -> Self {
        let calendar = state.calendar();
        let data_units = state.data_units();
        let local_now = calendar.local_time(now);

        let current_sample = state.current().map(|c| &c.sample);

        Self {
            city: state.city().to_string(),
            units: state.units(),
            date: local_now.format("%A, %B %-d, %Y").to_string(),
            theme: Theme::for_hour(local_now.hour()),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            location_name: state.current().map(|c| c.location_name.clone()),
            current: current_sample.map(|s| ConditionsView::from_sample(s, data_units)),
            selected_hour: selected_hour(state, calendar, current_sample),
            days: state
                .days()
                .iter()
                .map(|day| {
                    let asset = day.asset();
                    DayView {
                        weekday: day.date.format("%a").to_string(),
                        date: day.date.to_string(),
                        temperature: format_rounded(day.temperature, data_units),
                        condition: day.condition.clone(),
                        asset,
                        asset_file: asset.file_name(),
                    }
                })
                .collect(),
        }
    }
}

fn selected_hour(
    state: &DashboardState,
    calendar: &Calendar,
    current: Option<&Sample>,
) -> Option<HourView> {
    let hourly = state.hourly();
    let sample = hourly.selected_or(current)?;
    let time = if hourly.is_empty() {
        String::new()
    } else {
        calendar
            .local_timestamp(sample.timestamp)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    };

    Some(HourView {
        time,
        cursor: hourly.cursor(),
        max_index: hourly.max_index(),
        conditions: ConditionsView::from_sample(sample, state.data_units()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard_state::{DATA_UNAVAILABLE_MESSAGE, FetchedWeather};
    use crate::services::forecast_aggregator::AggregatedForecast;
    use crate::ApplicationError;
    use chrono::{NaiveDate, TimeZone};
    use domain::{City, CurrentConditions, DailySummary};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn loaded_state(hours: usize) -> DashboardState {
        let mut state = DashboardState::new(City::parse("Austin").unwrap(), Units::Metric);
        let ticket = state.begin_refresh();
        let today = (0..hours)
            .map(|i| {
                #[allow(clippy::cast_possible_wrap)]
                let ts = at(0).timestamp() + i as i64 * 10_800;
                Sample::new(ts, 12.4, "Clouds", "broken clouds")
            })
            .collect();
        let days = vec![DailySummary {
            date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            temperature: -3,
            condition: "Snow".to_string(),
            description: "light snow".to_string(),
        }];
        state.apply_fetch_result(
            &ticket,
            Ok(FetchedWeather {
                current: CurrentConditions::new(
                    "Austin",
                    Sample::new(at(9).timestamp(), 21.5, "Clear", "clear sky"),
                ),
                forecast: AggregatedForecast { days, today },
                calendar: Calendar::utc(),
            }),
        );
        state
    }

    #[test]
    fn theme_boundaries() {
        assert_eq!(Theme::for_hour(5), Theme::Night);
        assert_eq!(Theme::for_hour(6), Theme::Day);
        assert_eq!(Theme::for_hour(17), Theme::Day);
        assert_eq!(Theme::for_hour(18), Theme::Night);
        assert_eq!(Theme::for_hour(0), Theme::Night);
    }

    #[test]
    fn header_and_current_block() {
        let view = DashboardView::build(&loaded_state(8), at(9));
        assert_eq!(view.date, "Monday, January 15, 2024");
        assert_eq!(view.theme, Theme::Day);
        assert_eq!(view.location_name.as_deref(), Some("Austin"));

        let current = view.current.unwrap();
        assert_eq!(current.temperature, "22°C");
        assert_eq!(current.asset, ConditionAsset::Sunny);
        assert_eq!(current.asset_file, "bunny_sunny.png");
    }

    #[test]
    fn daily_rows() {
        let view = DashboardView::build(&loaded_state(8), at(20));
        assert_eq!(view.theme, Theme::Night);
        assert_eq!(view.days.len(), 1);
        assert_eq!(view.days[0].weekday, "Tue");
        assert_eq!(view.days[0].temperature, "-3°C");
        assert_eq!(view.days[0].asset, ConditionAsset::Snowy);
    }

    #[test]
    fn selected_hour_follows_cursor() {
        let mut state = loaded_state(8);
        state.set_cursor(3);
        let hour = DashboardView::build(&state, at(9)).selected_hour.unwrap();
        assert_eq!(hour.time, "09:00");
        assert_eq!(hour.cursor, 3);
        assert_eq!(hour.max_index, Some(7));
        assert_eq!(hour.conditions.temperature, "12°C");
        assert_eq!(hour.conditions.asset, ConditionAsset::Cloudy);
    }

    #[test]
    fn selected_hour_falls_back_to_current() {
        let hour = DashboardView::build(&loaded_state(0), at(9))
            .selected_hour
            .unwrap();
        assert_eq!(hour.time, "");
        assert_eq!(hour.max_index, None);
        assert_eq!(hour.conditions.temperature, "22°C");
    }

    #[test]
    fn held_data_keeps_its_units_while_loading() {
        let mut state = loaded_state(8);
        let ticket = state.toggle_units();

        let view = DashboardView::build(&state, at(9));
        assert!(view.loading);
        assert_eq!(view.units, Units::Imperial);
        assert_eq!(view.current.unwrap().temperature, "22°C");
        assert_eq!(view.days[0].temperature, "-3°C");
        assert_eq!(view.selected_hour.unwrap().conditions.temperature, "12°C");

        state.apply_fetch_result(
            &ticket,
            Ok(FetchedWeather {
                current: CurrentConditions::new(
                    "Austin",
                    Sample::new(at(9).timestamp(), 70.7, "Clear", "clear sky"),
                ),
                forecast: AggregatedForecast::default(),
                calendar: Calendar::utc(),
            }),
        );
        let view = DashboardView::build(&state, at(9));
        assert_eq!(view.current.unwrap().temperature, "71°F");
    }

    #[test]
    fn failed_state_has_no_blocks() {
        let mut state = loaded_state(8);
        let ticket = state.begin_refresh();
        state.apply_fetch_result(&ticket, Err(ApplicationError::RateLimited));

        let view = DashboardView::build(&state, at(9));
        assert!(view.current.is_none());
        assert!(view.selected_hour.is_none());
        assert!(view.days.is_empty());
        assert_eq!(view.error.as_deref(), Some(DATA_UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn serializes_to_json() {
        let view = DashboardView::build(&loaded_state(2), at(9));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["theme"], "day");
        assert_eq!(json["units"], "metric");
        assert_eq!(json["current"]["asset"], "sunny");
    }
}
