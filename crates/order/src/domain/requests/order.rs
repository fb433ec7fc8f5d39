use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::utils::parse_date;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";

/// `?id=` on `/order`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct FindByIdOrder {
    /// Order id used as the state store key.
    pub id: Option<String>,
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct FindAllOrder {
    /// 1-based page number, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub per_page: Option<String>,
    /// Field to sort by, default `id`.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct FilterOrderByDate {
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
pub struct SearchOrderById {
    /// Case-sensitive substring of the order id.
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Listing parameters after defaults and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ListOrders {
    #[validate(range(min = 1))]
    pub page: u32,

    #[validate(range(min = 1))]
    pub per_page: u32,

    #[validate(length(min = 1))]
    pub sort_by: String,

    pub sort_order: SortOrder,
}

impl Default for ListOrders {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListOrders {
    /// Start offset of the requested page within the full sorted list.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }
}

impl TryFrom<&FindAllOrder> for ListOrders {
    type Error = String;

    fn try_from(req: &FindAllOrder) -> Result<Self, Self::Error> {
        fn number(value: &Option<String>, default: u32, name: &str) -> Result<u32, String> {
            match value.as_deref().map(str::trim) {
                None | Some("") => Ok(default),
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| format!("{name} must be a positive integer, got '{raw}'")),
            }
        }

        let page = number(&req.page, DEFAULT_PAGE, "page")?;
        let per_page = number(&req.per_page, DEFAULT_PER_PAGE, "per_page")?;

        let sort_by = match req.sort_by.as_deref() {
            None | Some("") => DEFAULT_SORT_BY.to_string(),
            Some(field) => field.to_string(),
        };

        let sort_order = match req.sort_order.as_deref() {
            None | Some("") => SortOrder::Asc,
            Some(raw) => SortOrder::parse(raw)
                .ok_or_else(|| format!("sort_order must be 'asc' or 'desc', got '{raw}'"))?,
        };

        Ok(Self {
            page,
            per_page,
            sort_by,
            sort_order,
        })
    }
}

/// Inclusive date window for `/orders/filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl TryFrom<&FilterOrderByDate> for DateRange {
    type Error = ();

    fn try_from(req: &FilterOrderByDate) -> Result<Self, Self::Error> {
        let start = req.start_date.as_deref().and_then(parse_date).ok_or(())?;
        let end = req.end_date.as_deref().and_then(parse_date).ok_or(())?;
        Ok(Self { start, end })
    }
}

/// Returns the value when present and non-empty.
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
