//! In-memory selection over a full fetch of the store: sorting, paging,
//! date filtering and id search.

use crate::{
    domain::requests::order::{DateRange, ListOrders, SortOrder},
    model::Order,
};
use serde_json::Value;
use std::cmp::Ordering;

static EMPTY: Value = Value::String(String::new());

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x.cmp(&y)
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x.cmp(&y)
            } else {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(_), Value::Object(_)) => Ordering::Equal,
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Orders two field values; a missing or `null` field sorts as `""`.
pub fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null()).unwrap_or(&EMPTY);
    let b = b.filter(|v| !v.is_null()).unwrap_or(&EMPTY);
    compare_values(a, b)
}

/// Stable sort by `field`. Equal elements keep their relative order in both
/// directions.
pub fn sort_orders(orders: &mut [Order], field: &str, sort_order: SortOrder) {
    orders.sort_by(|a, b| {
        let ordering = compare_field(a.field(field), b.field(field));
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Sorts the full list, then returns the requested page.
pub fn sort_and_paginate(mut orders: Vec<Order>, req: &ListOrders) -> Vec<Order> {
    sort_orders(&mut orders, &req.sort_by, req.sort_order);

    orders
        .into_iter()
        .skip(req.offset())
        .take(req.per_page as usize)
        .collect()
}

/// Keeps orders whose `date` parses and falls inside `range`.
pub fn filter_by_date(orders: Vec<Order>, range: &DateRange) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| order.date().is_some_and(|date| range.contains(date)))
        .collect()
}

/// Keeps orders whose string `id` contains `needle` (case-sensitive).
pub fn search_by_id(orders: Vec<Order>, needle: &str) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| order.id().is_some_and(|id| id.contains(needle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn order(value: Value) -> Order {
        Order::from_value(value).unwrap()
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id().unwrap_or("-")).collect()
    }

    fn list(page: u32, per_page: u32, sort_by: &str, sort_order: SortOrder) -> ListOrders {
        ListOrders {
            page,
            per_page,
            sort_by: sort_by.to_string(),
            sort_order,
        }
    }

    #[test]
    fn missing_field_sorts_as_empty_string() {
        assert_eq!(
            compare_field(None, Some(&json!("a"))),
            Ordering::Less
        );
        assert_eq!(
            compare_field(Some(&Value::Null), Some(&json!(""))),
            Ordering::Equal
        );
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            compare_field(Some(&json!(9)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            compare_field(Some(&json!(2.5)), Some(&json!(2))),
            Ordering::Greater
        );
    }

    #[test]
    fn mixed_kinds_order_by_kind() {
        assert_eq!(
            compare_field(Some(&json!(100)), Some(&json!("1"))),
            Ordering::Less
        );
        assert_eq!(
            compare_field(Some(&json!(true)), Some(&json!(0))),
            Ordering::Less
        );
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let orders = vec![
            order(json!({"id": "A", "total": 2})),
            order(json!({"id": "B", "total": 1})),
            order(json!({"id": "C", "total": 2})),
            order(json!({"id": "D"})),
        ];

        let mut asc = orders.clone();
        sort_orders(&mut asc, "total", SortOrder::Asc);
        assert_eq!(ids(&asc), vec!["B", "A", "C", "D"]);

        let mut desc = orders;
        sort_orders(&mut desc, "total", SortOrder::Desc);
        assert_eq!(ids(&desc), vec!["D", "A", "C", "B"]);
    }

    #[test]
    fn paginates_the_sorted_list() {
        let orders: Vec<Order> = ["E", "C", "A", "D", "B"]
            .iter()
            .map(|id| order(json!({ "id": id })))
            .collect();

        let page = sort_and_paginate(orders.clone(), &list(1, 2, "id", SortOrder::Asc));
        assert_eq!(ids(&page), vec!["A", "B"]);

        let page = sort_and_paginate(orders.clone(), &list(3, 2, "id", SortOrder::Asc));
        assert_eq!(ids(&page), vec!["E"]);

        let page = sort_and_paginate(orders.clone(), &list(2, 2, "id", SortOrder::Desc));
        assert_eq!(ids(&page), vec!["C", "B"]);

        let page = sort_and_paginate(orders, &list(4, 2, "id", SortOrder::Asc));
        assert!(page.is_empty());
    }

    #[test]
    fn filter_is_inclusive_and_skips_bad_dates() {
        let orders = vec![
            order(json!({"id": "A1", "date": "2022-03-01"})),
            order(json!({"id": "B2", "date": "2022-06-15"})),
            order(json!({"id": "C3", "date": "2022-01-01"})),
            order(json!({"id": "D4", "date": "not a date"})),
            order(json!({"id": "E5"})),
        ];
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
        };

        assert_eq!(ids(&filter_by_date(orders, &range)), vec!["A1", "C3"]);
    }

    #[test]
    fn search_is_case_sensitive_substring() {
        let orders = vec![
            order(json!({"id": "A1"})),
            order(json!({"id": "B2"})),
            order(json!({"id": "a12"})),
            order(json!({"id": 1})),
        ];

        assert_eq!(ids(&search_by_id(orders.clone(), "1")), vec!["A1", "a12"]);
        assert_eq!(ids(&search_by_id(orders, "A")), vec!["A1"]);
    }
}
