//! Application services - Use case implementations

mod dashboard_service;
mod dashboard_state;
mod dashboard_view;
mod forecast_aggregator;
mod hourly_selector;

pub use dashboard_service::{DashboardConfig, DashboardService};
pub use dashboard_state::{
    ApplyOutcome, DATA_UNAVAILABLE_MESSAGE, DashboardState, FetchedWeather, RefreshTicket,
};
pub use dashboard_view::{ConditionsView, DashboardView, DayView, HourView, Theme};
pub use forecast_aggregator::{
    AggregatedForecast, DEFAULT_FORECAST_DAYS, ForecastAggregator, group_by_day, representative,
    summarize_day,
};
pub use hourly_selector::HourlySelector;
