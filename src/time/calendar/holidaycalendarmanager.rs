use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::simplecalendar::{
    NamedRecurringHoliday,
    SimpleCalendar
};
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;
use crate::time::recurringholiday::weekendadjustment::WeekendAdjustment;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::nthweekdayholiday::NthWeekdayHoliday;
use crate::time::recurringholiday::lastweekdayholiday::LastWeekdayHoliday;
use crate::time::recurringholiday::weekdayonorbeforeholiday::WeekdayOnOrBeforeHoliday;
use crate::time::recurringholiday::easterrelatedholiday::{
    EasterType,
    EasterRelatedHoliday
};
use crate::time::recurringholiday::equinoxholiday::{
    EquinoxType,
    EquinoxHoliday
};

#[derive(Deserialize)]
struct EasterRelatedHolidayJsonProp {
    easter_type: EasterType,
    shift_days: i32
}

fn easter_related_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EasterRelatedHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    let holiday = EasterRelatedHoliday::new(json_prop.easter_type, json_prop.shift_days)
        .ok_or_else(|| ManagerError::invalid_rule("EasterRelated", format!("shift_days {}", json_prop.shift_days)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct NthWeekdayHolidayJsonProp {
    month: u32,
    n: u8,
    weekday: Weekday,
}

fn nth_weekday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: NthWeekdayHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    let holiday = NthWeekdayHoliday::new(json_prop.month, json_prop.n, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_rule("NthWeekday", format!("month {} n {}", json_prop.month, json_prop.n)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct LastWeekdayHolidayJsonProp {
    month: u32,
    weekday: Weekday,
}

fn last_weekday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: LastWeekdayHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    let holiday = LastWeekdayHoliday::new(json_prop.month, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_rule("LastWeekday", format!("month {}", json_prop.month)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct WeekdayOnOrBeforeHolidayJsonProp {
    month: u32,
    day: u32,
    weekday: Weekday,
}

fn weekday_on_or_before_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: WeekdayOnOrBeforeHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    let holiday = WeekdayOnOrBeforeHoliday::new(json_prop.month, json_prop.day, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_rule("WeekdayOnOrBefore", format!("month {} day {}", json_prop.month, json_prop.day)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    month: u32,
    day: u32,
    #[serde(default)]
    weekend_adjustment_map: HashMap<Weekday, WeekendAdjustment>
}

fn fixed_date_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: FixedDateHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    let holiday = FixedDateHoliday::new(json_prop.month, json_prop.day, &json_prop.weekend_adjustment_map)
        .ok_or_else(|| ManagerError::invalid_rule("FixedDate", format!("month {} day {}", json_prop.month, json_prop.day)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct EquinoxHolidayJsonProp {
    equinox_type: EquinoxType
}

fn equinox_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EquinoxHolidayJsonProp = ManagerError::from_json_or_json_parse_error(json)?;
    Ok(Arc::new(EquinoxHoliday::new(json_prop.equinox_type)))
}

#[derive(Deserialize, Debug, Clone, Copy)]
enum HolidayType {
    EasterRelated,
    Equinox,
    FixedDate,
    NthWeekday,
    LastWeekday,
    WeekdayOnOrBefore
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType,
    #[serde(default)]
    name: Option<String>
}

fn get_recurring_holiday_from_json(json: serde_json::Value) -> Result<NamedRecurringHoliday, ManagerError> {
    let holiday_type_obj: HolidayTypedObject = ManagerError::from_json_or_json_parse_error(json.clone())?;
    let rule = match holiday_type_obj.holiday_type {
        HolidayType::EasterRelated     => easter_related_holiday_from_json(json),
        HolidayType::Equinox           => equinox_holiday_from_json(json),
        HolidayType::FixedDate         => fixed_date_holiday_from_json(json),
        HolidayType::LastWeekday       => last_weekday_from_json(json),
        HolidayType::NthWeekday        => nth_weekday_from_json(json),
        HolidayType::WeekdayOnOrBefore => weekday_on_or_before_from_json(json)
    }?;
    let name = holiday_type_obj
        .name
        .unwrap_or_else(|| format!("{:?} holiday", holiday_type_obj.holiday_type));
    Ok(NamedRecurringHoliday::new(name, rule))
}

fn default_weekends() -> HashSet<Weekday> {
    HashSet::from([Weekday::Sat, Weekday::Sun])
}

#[derive(Deserialize)]
struct SimpleCalendarJsonProp {
    #[serde(default = "default_weekends")]
    weekends: HashSet<Weekday>,
    #[serde(default)]
    recurring_holidays: Vec<serde_json::Value>,
    #[serde(default)]
    additional_holidays: Vec<NaiveDate>,
    #[serde(default)]
    additional_business_days: Vec<NaiveDate>
}

pub fn get_simple_calendar_from_json(json_value: serde_json::Value) -> Result<Arc<dyn HolidayCalendar>, ManagerError> {
    let holiday_calendar_json: SimpleCalendarJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let recurring_holidays = holiday_calendar_json
        .recurring_holidays
        .into_iter()
        .map(get_recurring_holiday_from_json)
        .collect::<Result<Vec<_>, _>>()?;

    let simple_calendar = SimpleCalendar::new(
        holiday_calendar_json.weekends,
        recurring_holidays,
        holiday_calendar_json.additional_holidays,
        holiday_calendar_json.additional_business_days
    );

    Ok(Arc::new(simple_calendar))
}

pub struct HolidayCalendarManager;

impl HolidayCalendarManager {
    pub fn new() -> Manager<Arc<dyn HolidayCalendar>> {
        Manager::new(get_simple_calendar_from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::manager::IManager;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_calendar_with_every_rule_kind() {
        let manager = HolidayCalendarManager::new();
        let json = serde_json::json!({
            "name": "Test",
            "weekends": ["Sat", "Sun"],
            "recurring_holidays": [
                {"holiday_type": "FixedDate", "name": "Independence Day", "month": 7, "day": 4,
                 "weekend_adjustment_map": {"Sat": "PreviousWeekday", "Sun": "NextWeekday"}},
                {"holiday_type": "NthWeekday", "name": "Thanksgiving", "month": 11, "n": 4, "weekday": "Thu"},
                {"holiday_type": "LastWeekday", "name": "Memorial Day", "month": 5, "weekday": "Mon"},
                {"holiday_type": "WeekdayOnOrBefore", "name": "Victoria Day", "month": 5, "day": 24, "weekday": "Mon"},
                {"holiday_type": "EasterRelated", "name": "Good Friday", "easter_type": "Western", "shift_days": -2},
                {"holiday_type": "Equinox", "name": "Vernal Equinox Day", "equinox_type": "Vernal"}
            ],
            "additional_holidays": ["2026-12-24"]
        });
        manager.insert_obj_from_json(json).unwrap();
        let calendar = manager.get("Test").unwrap();
        let holidays = calendar.get_holiday_set(2026);
        assert!(holidays.contains(&ymd(2026, 7, 3)));
        assert!(holidays.contains(&ymd(2026, 11, 26)));
        assert!(holidays.contains(&ymd(2026, 5, 25)));
        assert!(holidays.contains(&ymd(2026, 5, 18)));
        assert!(holidays.contains(&ymd(2026, 4, 3)));
        assert!(holidays.contains(&ymd(2026, 3, 20)));
        assert!(holidays.contains(&ymd(2026, 12, 24)));
        assert_eq!(holidays.len(), 7);
    }

    #[test]
    fn unnamed_rule_gets_a_default_name() {
        let manager = HolidayCalendarManager::new();
        let json = serde_json::json!({
            "name": "Plain",
            "recurring_holidays": [{"holiday_type": "FixedDate", "month": 5, "day": 1}]
        });
        manager.insert_obj_from_json(json).unwrap();
        let named = manager.get("Plain").unwrap().get_named_holidays(2025);
        assert_eq!(named.get(&ymd(2025, 5, 1)).map(String::as_str), Some("FixedDate holiday"));
    }

    #[test]
    fn invalid_rule_parameters_are_rejected() {
        let manager = HolidayCalendarManager::new();
        let json = serde_json::json!({
            "name": "Broken",
            "recurring_holidays": [{"holiday_type": "NthWeekday", "month": 13, "n": 1, "weekday": "Mon"}]
        });
        let result = manager.insert_obj_from_json(json);
        assert!(matches!(result, Err(ManagerError::InvalidRuleError { kind: "NthWeekday", .. })));
    }

    #[test]
    fn unknown_holiday_type_is_a_parse_error() {
        let manager = HolidayCalendarManager::new();
        let json = serde_json::json!({
            "name": "Broken",
            "recurring_holidays": [{"holiday_type": "Lunar", "month": 1}]
        });
        assert!(matches!(manager.insert_obj_from_json(json), Err(ManagerError::JsonParseError(_))));
    }
}
