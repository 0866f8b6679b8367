use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single corporate-registry entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub cin: String,
    pub status: String,
    pub company_class: String,
    pub category: String,
    pub sub_category: String,
    pub principal_business_activity: String,
    #[serde(default)]
    pub date_of_registration: Option<NaiveDate>,
}

impl Company {
    pub fn registration_year(&self) -> Option<i32> {
        self.date_of_registration.map(|date| date.year())
    }
}

/// String-valued attributes a frequency table can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Status,
    Class,
    Category,
    SubCategory,
    PrincipalBusinessActivity,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Status,
        Field::Class,
        Field::Category,
        Field::SubCategory,
        Field::PrincipalBusinessActivity,
    ];

    /// Always `Some`; the `Option` lets it plug straight into `count_by`.
    pub fn select<'a>(self, company: &'a Company) -> Option<&'a str> {
        let value = match self {
            Field::Status => &company.status,
            Field::Class => &company.company_class,
            Field::Category => &company.category,
            Field::SubCategory => &company.sub_category,
            Field::PrincipalBusinessActivity => &company.principal_business_activity,
        };
        Some(value.as_str())
    }

    pub fn slug(self) -> &'static str {
        match self {
            Field::Status => "status",
            Field::Class => "class",
            Field::Category => "category",
            Field::SubCategory => "sub_category",
            Field::PrincipalBusinessActivity => "principal_business_activity",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Field::Status => "Company Status",
            Field::Class => "Company Class",
            Field::Category => "Company Category",
            Field::SubCategory => "Company Sub-Category",
            Field::PrincipalBusinessActivity => "Principal Business Activity",
        }
    }
}
