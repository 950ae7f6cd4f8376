use std::collections::BTreeMap;

use crate::models::{Booking, ClientSummary, RecentEvent};

/// Sentinel group for bookings recorded without a phone number. All such
/// bookings merge into one client; a known limitation carried over as-is.
pub const NO_PHONE: &str = "No Phone";

const RECENT_EVENT_LIMIT: usize = 3;

/// Fold the booking set into per-client summaries keyed by phone.
///
/// The first booking seen for a phone supplies the display name. An
/// optional search filters by case-insensitive substring on name or phone
/// before the descending sort by total contracted amount.
pub fn aggregate(bookings: &[Booking], search: Option<&str>) -> Vec<ClientSummary> {
    let mut groups: BTreeMap<String, ClientSummary> = BTreeMap::new();

    for booking in bookings {
        let phone = if booking.phone.trim().is_empty() {
            NO_PHONE.to_string()
        } else {
            booking.phone.clone()
        };

        let summary = groups.entry(phone.clone()).or_insert_with(|| ClientSummary {
            name: booking.client_name.clone(),
            phone,
            total_bookings: 0,
            total_spent: 0,
            last_booking_date: booking.event_date,
            recent_events: Vec::new(),
        });

        summary.total_bookings += 1;
        summary.total_spent += booking.total_amount;
        if booking.event_date > summary.last_booking_date {
            summary.last_booking_date = booking.event_date;
        }
        if summary.recent_events.len() < RECENT_EVENT_LIMIT {
            summary.recent_events.push(RecentEvent {
                event_type: booking.event_type.clone(),
                event_date: booking.event_date,
            });
        }
    }

    let mut clients: Vec<ClientSummary> = groups
        .into_values()
        .filter(|client| matches_search(client, search))
        .collect();
    clients.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    clients
}

fn matches_search(client: &ClientSummary, search: Option<&str>) -> bool {
    let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };
    let q = q.to_lowercase();
    client.name.to_lowercase().contains(&q) || client.phone.to_lowercase().contains(&q)
}

/// Mean contracted amount per client across the whole booking set, rounded
/// to the nearest currency unit.
pub fn average_contract_value(bookings: &[Booking], client_count: usize) -> i64 {
    if client_count == 0 {
        return 0;
    }
    let gross: i64 = bookings.iter().map(|b| b.total_amount).sum();
    let count = client_count as f64;
    (gross as f64 / count).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::{
        domain::lifecycle::settle,
        models::{EventSlot, PaymentStatus},
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(name: &str, phone: &str, event_date: &str, total_amount: i64) -> Booking {
        let (balance, status) = settle(total_amount, 0);
        Booking {
            id: Uuid::new_v4(),
            client_name: name.into(),
            phone: phone.into(),
            event_type: "Wedding".into(),
            events: vec![EventSlot {
                date: date(event_date),
                time: String::new(),
                location: String::new(),
                function_name: String::new(),
            }],
            event_date: date(event_date),
            event_time: String::new(),
            location: String::new(),
            total_amount,
            advance_paid: 0,
            balance,
            payment_history: vec![],
            status,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn same_phone_merges_into_one_client() {
        let bookings = vec![
            booking("Asha Verma", "+919812345678", "2025-06-10", 10000),
            booking("Asha Verma", "+919812345678", "2025-07-01", 15000),
        ];
        let clients = aggregate(&bookings, None);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].total_spent, 25000);
        assert_eq!(clients[0].total_bookings, 2);
        assert_eq!(clients[0].last_booking_date, date("2025-07-01"));
    }

    #[test]
    fn total_spent_is_contracted_not_collected() {
        let mut b = booking("Ravi", "+911111111111", "2025-06-10", 40000);
        b.advance_paid = 5000;
        let (balance, status) = settle(b.total_amount, b.advance_paid);
        b.balance = balance;
        b.status = status;
        assert_eq!(b.status, PaymentStatus::Advance);

        let clients = aggregate(&[b], None);
        assert_eq!(clients[0].total_spent, 40000);
    }

    #[test]
    fn missing_phone_groups_under_sentinel() {
        let bookings = vec![
            booking("Walk-in A", "", "2025-06-10", 5000),
            booking("Walk-in B", "  ", "2025-06-12", 7000),
        ];
        let clients = aggregate(&bookings, None);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].phone, NO_PHONE);
        assert_eq!(clients[0].name, "Walk-in A");
        assert_eq!(clients[0].total_spent, 12000);
    }

    #[test]
    fn sorted_descending_by_total_spent() {
        let bookings = vec![
            booking("Small", "+911", "2025-06-10", 1000),
            booking("Big", "+912", "2025-06-10", 90000),
            booking("Mid", "+913", "2025-06-10", 30000),
        ];
        let names: Vec<String> = aggregate(&bookings, None)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Big", "Mid", "Small"]);
    }

    #[test]
    fn search_matches_name_or_phone_case_insensitively() {
        let bookings = vec![
            booking("Asha Verma", "+919812345678", "2025-06-10", 10000),
            booking("Ravi Kumar", "+917000000000", "2025-06-11", 20000),
        ];
        let hits = aggregate(&bookings, Some("asha"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Asha Verma");

        let hits = aggregate(&bookings, Some("7000"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ravi Kumar");

        assert!(aggregate(&bookings, Some("zzz")).is_empty());
        assert_eq!(aggregate(&bookings, Some("  ")).len(), 2);
    }

    #[test]
    fn average_value_rounds_to_nearest_unit() {
        let bookings = vec![
            booking("A", "+911", "2025-06-10", 10000),
            booking("B", "+912", "2025-06-10", 15001),
        ];
        assert_eq!(average_contract_value(&bookings, 2), 12501);
        assert_eq!(average_contract_value(&bookings, 0), 0);
    }
}
