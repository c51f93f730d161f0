use std::cell::{
    Ref,
    RefCell
};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use chrono::Weekday;
use serde::Deserialize;
use tracing::info;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::planner::leaveoptimizer::OptimizerOptions;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidaycalendarmanager::HolidayCalendarManager;
use crate::time::weekendmask::WeekendMask;

/// Calendar definitions shipped with the crate.
pub const BUILTIN_CALENDARS: &str = include_str!("../json/holidaycalendars.json");

fn default_weekends() -> HashSet<Weekday> {
    HashSet::from([Weekday::Sat, Weekday::Sun])
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct PlannerJsonProp {
    #[serde(default = "default_weekends")]
    weekends: HashSet<Weekday>,
    #[serde(default)]
    max_bridge_length: Option<usize>,
    #[serde(default = "default_true")]
    extend_streaks: bool,
    #[serde(default)]
    preferred_months: Vec<u32>
}

impl PlannerJsonProp {
    fn to_options(&self) -> OptimizerOptions {
        OptimizerOptions::new()
            .with_weekends(WeekendMask::new(&self.weekends))
            .with_max_bridge_length(self.max_bridge_length)
            .with_extend_streaks(self.extend_streaks)
            .with_preferred_months(self.preferred_months.iter().copied())
    }
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    holiday_calendar: Vec<serde_json::Value>,
    #[serde(default)]
    planner: Option<PlannerJsonProp>
}

pub struct Configuration {
    holiday_calendar_manager: Manager<Arc<dyn HolidayCalendar>>,
    optimizer_options_cell: RefCell<OptimizerOptions>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            holiday_calendar_manager: HolidayCalendarManager::new(),
            optimizer_options_cell: RefCell::new(OptimizerOptions::new())
        }
    }

    /// A configuration holding the built-in country calendars.
    pub fn builtin() -> Result<Configuration, ManagerError> {
        let config = Configuration::new();
        config.from_json_str(BUILTIN_CALENDARS)?;
        Ok(config)
    }

    pub fn holiday_calendar_manager(&self) -> &Manager<Arc<dyn HolidayCalendar>> {
        &self.holiday_calendar_manager
    }

    pub fn holiday_calendar(&self, name: &str) -> Result<Arc<dyn HolidayCalendar>, ManagerError> {
        self.holiday_calendar_manager.get(name)
    }

    pub fn optimizer_options(&self) -> Ref<'_, OptimizerOptions> {
        self.optimizer_options_cell.borrow()
    }

    /// Loads a JSON configuration file. Calendars are added to (or replace
    /// same-named entries in) the registry; a `planner` section replaces
    /// the optimizer options.
    pub fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.load(json_prop)?;
        info!(path = %file_path.display(), "configuration loaded");
        Ok(())
    }

    pub fn from_json_str(&self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        self.holiday_calendar_manager.insert_obj_from_json_vec(&json_prop.holiday_calendar)?;
        if let Some(planner) = json_prop.planner {
            *self.optimizer_options_cell.borrow_mut() = planner.to_options();
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builtin_calendars_load() {
        let config = Configuration::builtin().unwrap();
        let names = config.holiday_calendar_manager().names();
        assert_eq!(names, vec!["AU", "CA", "DE", "FR", "GB", "IN", "JP", "US"]);
        assert!(config.optimizer_options().extend_streaks());
        assert_eq!(config.optimizer_options().max_bridge_length(), None);
    }

    #[test]
    fn user_file_overrides_planner_section() {
        let config = Configuration::builtin().unwrap();
        config.from_json_str(r#"{
            "holiday_calendar": [
                {"name": "ACME", "weekends": ["Fri", "Sat"], "additional_holidays": ["2026-03-02"]}
            ],
            "planner": {"max_bridge_length": 4, "extend_streaks": false, "preferred_months": [7, 8, 13]}
        }"#).unwrap();

        let acme = config.holiday_calendar("ACME").unwrap();
        assert!(acme.is_public_holiday(ymd(2026, 3, 2)));
        assert!(acme.is_weekend(ymd(2026, 3, 6)));

        let options = config.optimizer_options();
        assert_eq!(options.max_bridge_length(), Some(4));
        assert!(!options.extend_streaks());
        assert_eq!(options.preferred_months().iter().copied().collect::<Vec<_>>(), vec![7, 8]);
        // built-in entries survive
        assert!(config.holiday_calendar("GB").is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = Configuration::new();
        let result = config.from_reader(Path::new("/nonexistent/leaveplanner.json"));
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
