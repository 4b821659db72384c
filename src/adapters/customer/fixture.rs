use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Customer, Transaction};

/// Built-in sample customers, used when no customers file is configured
///
/// The amounts cover every tier: below $50, between $50 and $100, and above $100.
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::new(
            1,
            "Ashok",
            vec![
                tx(2024, 3, 1, 120),
                tx(2025, 3, 10, 220),
                tx(2025, 4, 5, 75),
                tx(2025, 5, 15, 200),
            ],
        ),
        Customer::new(
            2,
            "Kumar",
            vec![
                tx(2025, 3, 10, 60),
                tx(2025, 4, 20, 110),
                tx(2025, 4, 21, 90),
                tx(2025, 6, 29, 190),
            ],
        ),
        Customer::new(
            3,
            "Ram",
            vec![
                tx(2024, 4, 10, 60),
                tx(2024, 5, 20, 110),
                tx(2025, 6, 21, 90),
                tx(2025, 9, 29, 190),
            ],
        ),
        Customer::new(
            4,
            "Leela",
            vec![
                tx(2024, 2, 11, 60),
                tx(2025, 5, 21, 110),
                tx(2025, 8, 26, 90),
                tx(2025, 9, 28, 190),
            ],
        ),
        Customer::new(
            5,
            "Chinta",
            vec![
                tx(2025, 5, 10, 45),
                tx(2025, 5, 15, 50),
                tx(2025, 5, 20, 51),
            ],
        ),
    ]
}

fn tx(year: i32, month: u32, day: u32, amount: u32) -> Transaction {
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date");
    Transaction::new(date, Decimal::from(amount))
}
