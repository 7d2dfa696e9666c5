use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// First show day; submissions are blocked before it.
    pub start_date: Option<NaiveDate>,
}
