use chrono::NaiveDate;

use crate::models::{Booking, Invoice};

/// Fresh timestamp-derived invoice number, unique per generation.
pub fn invoice_number(unix_millis: i64) -> String {
    format!("INV-{unix_millis}")
}

/// Deterministic artifact filename: whitespace runs in the client name
/// collapse to single underscores.
pub fn artifact_file_name(client_name: &str, invoice_no: &str) -> String {
    let name = client_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Invoice_{name}_{invoice_no}.pdf")
}

/// WhatsApp deep link from the phone's digits only; None when the phone
/// has no digits to dial.
pub fn whatsapp_link(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{digits}"))
    }
}

/// Map a booking into the invoice view-model for the rendering collaborator.
///
/// Paid amount, balance, and status are copied from the booking as-is: the
/// assembler trusts the lifecycle invariant and performs no recomputation.
pub fn assemble(
    booking: &Booking,
    studio_name: &str,
    business_details: &str,
    invoice_no: String,
    invoice_date: NaiveDate,
) -> Invoice {
    let event_label = if booking.event_type.trim().is_empty() {
        "Event"
    } else {
        booking.event_type.as_str()
    };
    let file_name = artifact_file_name(&booking.client_name, &invoice_no);
    Invoice {
        studio_name: studio_name.to_string(),
        business_details: business_details.to_string(),
        client_name: booking.client_name.clone(),
        client_phone: booking.phone.clone(),
        description: format!("{event_label} Photography"),
        event_date: booking.event_date,
        total_amount: booking.total_amount,
        paid_amount: booking.advance_paid,
        balance: booking.balance,
        status: booking.status,
        events: booking.events.clone(),
        payment_history: booking.payment_history.clone(),
        invoice_no,
        invoice_date,
        file_name,
        whatsapp_link: whatsapp_link(&booking.phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::{
        domain::lifecycle::settle,
        models::{EventSlot, PaymentStatus},
    };

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn booking() -> Booking {
        let (balance, status) = settle(50000, 20000);
        Booking {
            id: Uuid::new_v4(),
            client_name: "Asha  Verma".into(),
            phone: "+91 98123-45678".into(),
            event_type: "Wedding".into(),
            events: vec![EventSlot {
                date: date("2025-06-20"),
                time: "10:00".into(),
                location: "Indore".into(),
                function_name: "Reception".into(),
            }],
            event_date: date("2025-06-20"),
            event_time: "10:00".into(),
            location: "Indore".into(),
            total_amount: 50000,
            advance_paid: 20000,
            balance,
            payment_history: vec![],
            status,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(
            artifact_file_name("Asha  Verma", "INV-1718000000000"),
            "Invoice_Asha_Verma_INV-1718000000000.pdf"
        );
    }

    #[test]
    fn whatsapp_link_strips_non_digits() {
        assert_eq!(
            whatsapp_link("+91 98123-45678").as_deref(),
            Some("https://wa.me/919812345678")
        );
        assert_eq!(whatsapp_link("n/a"), None);
    }

    #[test]
    fn assembled_invoice_copies_derived_fields_verbatim() {
        let mut b = booking();
        // Deliberately stale derived fields: the assembler must copy, not fix.
        b.balance = 12345;
        b.status = PaymentStatus::Pending;

        let invoice = assemble(
            &b,
            "Taj Studio",
            "Badwani & Indore",
            invoice_number(1718000000000),
            date("2025-06-10"),
        );
        assert_eq!(invoice.invoice_no, "INV-1718000000000");
        assert_eq!(invoice.balance, 12345);
        assert_eq!(invoice.status, PaymentStatus::Pending);
        assert_eq!(invoice.paid_amount, 20000);
        assert_eq!(invoice.description, "Wedding Photography");
        assert_eq!(invoice.file_name, "Invoice_Asha_Verma_INV-1718000000000.pdf");
        assert_eq!(
            invoice.whatsapp_link.as_deref(),
            Some("https://wa.me/919812345678")
        );
    }
}
