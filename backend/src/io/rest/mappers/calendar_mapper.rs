use chrono::{Datelike, NaiveDate};
use shared::{CalendarFocusDate, CurrentDateResponse};

use crate::domain::view_month::{month_name, ViewMonth};

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn focus_date_to_dto(view_month: ViewMonth) -> CalendarFocusDate {
        CalendarFocusDate {
            month: view_month.month(),
            year: view_month.year(),
        }
    }

    pub fn current_date_to_dto(date: NaiveDate) -> CurrentDateResponse {
        CurrentDateResponse {
            month: date.month(),
            year: date.year(),
            day: date.day(),
            formatted_date: format!("{} {}, {}", month_name(date.month()), date.day(), date.year()),
            iso_date: date.format("%Y-%m-%d").to_string(),
        }
    }
}
