use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Booking, Transaction};

/// Count and gross amount over a (possibly filtered) transaction set.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct LedgerSummary {
    pub count: usize,
    pub total_collected: i64,
}

/// Flatten every booking's payment history into a global ledger, newest
/// payment first. Each row is tagged with the owning booking's client name.
pub fn extract(bookings: &[Booking]) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = bookings
        .iter()
        .flat_map(|booking| {
            booking.payment_history.iter().map(|payment| Transaction {
                id: format!("{}-{}-{}", booking.id, payment.date, payment.amount),
                client_name: booking.client_name.clone(),
                amount: payment.amount,
                date: payment.date,
                mode: payment.mode,
            })
        })
        .collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// Case-insensitive substring filter against client name or payment mode.
pub fn filter(transactions: &[Transaction], search: Option<&str>) -> Vec<Transaction> {
    let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) else {
        return transactions.to_vec();
    };
    let q = q.to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            t.client_name.to_lowercase().contains(&q)
                || t.mode.as_str().to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}

pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    LedgerSummary {
        count: transactions.len(),
        total_collected: transactions.iter().map(|t| t.amount).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::{
        domain::lifecycle::settle,
        models::{EventSlot, PaymentMode, PaymentRecord},
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking(name: &str, total_amount: i64, payments: Vec<(i64, &str, PaymentMode)>) -> Booking {
        let advance_paid: i64 = payments.iter().map(|(amount, _, _)| amount).sum();
        let (balance, status) = settle(total_amount, advance_paid);
        Booking {
            id: Uuid::new_v4(),
            client_name: name.into(),
            phone: "+919812345678".into(),
            event_type: "Wedding".into(),
            events: vec![EventSlot {
                date: date("2025-06-20"),
                time: String::new(),
                location: String::new(),
                function_name: String::new(),
            }],
            event_date: date("2025-06-20"),
            event_time: String::new(),
            location: String::new(),
            total_amount,
            advance_paid,
            balance,
            payment_history: payments
                .into_iter()
                .map(|(amount, d, mode)| PaymentRecord {
                    amount,
                    date: date(d),
                    mode,
                })
                .collect(),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn extraction_conserves_total_collected() {
        let bookings = vec![
            booking(
                "Asha",
                50000,
                vec![
                    (20000, "2025-06-01", PaymentMode::Cash),
                    (10000, "2025-06-05", PaymentMode::Upi),
                ],
            ),
            booking("Ravi", 30000, vec![(5000, "2025-06-03", PaymentMode::Card)]),
            booking("Meera", 10000, vec![]),
        ];
        let transactions = extract(&bookings);
        assert_eq!(transactions.len(), 3);

        let extracted: i64 = transactions.iter().map(|t| t.amount).sum();
        let recorded: i64 = bookings
            .iter()
            .flat_map(|b| b.payment_history.iter())
            .map(|p| p.amount)
            .sum();
        assert_eq!(extracted, recorded);
        assert_eq!(summarize(&transactions).total_collected, 35000);
    }

    #[test]
    fn sorted_newest_payment_first() {
        let bookings = vec![booking(
            "Asha",
            50000,
            vec![
                (20000, "2025-06-01", PaymentMode::Cash),
                (10000, "2025-06-05", PaymentMode::Upi),
                (5000, "2025-06-03", PaymentMode::Card),
            ],
        )];
        let dates: Vec<NaiveDate> = extract(&bookings).into_iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            [date("2025-06-05"), date("2025-06-03"), date("2025-06-01")]
        );
    }

    #[test]
    fn filter_matches_client_or_mode_and_summary_follows_filter() {
        let bookings = vec![
            booking("Asha", 50000, vec![(20000, "2025-06-01", PaymentMode::Cash)]),
            booking("Ravi", 30000, vec![(5000, "2025-06-03", PaymentMode::Upi)]),
        ];
        let all = extract(&bookings);

        let by_mode = filter(&all, Some("upi"));
        assert_eq!(by_mode.len(), 1);
        assert_eq!(by_mode[0].client_name, "Ravi");
        assert_eq!(summarize(&by_mode).total_collected, 5000);

        let by_name = filter(&all, Some("ASHA"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(summarize(&by_name).total_collected, 20000);

        assert_eq!(filter(&all, None).len(), 2);
    }

    #[test]
    fn identical_same_day_payments_share_an_id() {
        // Documented collision in the synthesized identity; the ledger
        // still carries both rows.
        let bookings = vec![booking(
            "Asha",
            50000,
            vec![
                (5000, "2025-06-01", PaymentMode::Cash),
                (5000, "2025-06-01", PaymentMode::Upi),
            ],
        )];
        let transactions = extract(&bookings);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, transactions[1].id);
    }
}
