use tally_core::{Account, Direction, Money};

pub fn total(account: &Account, direction: Direction) -> Money {
    account.ledger.total(direction)
}

/// Credits minus debits.
pub fn net_balance(account: &Account) -> Money {
    account.ledger.net_balance()
}

pub fn category_total(account: &Account, name: &str, direction: Direction) -> Money {
    account.ledger.category_total(name, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn account() -> Account {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut a = Account::new("checking");
        a.record(d, "payroll", "Salary", Money::from_units(3000), Direction::Credit).unwrap();
        a.record(d, "rent", "Rent", Money::from_units(1200), Direction::Debit).unwrap();
        a.record(d, "market", "Groceries", Money::from_cents(8050), Direction::Debit).unwrap();
        a.record(d, "refund", "Groceries", Money::from_units(10), Direction::Credit).unwrap();
        a
    }

    #[test]
    fn totals_by_direction() {
        let a = account();
        assert_eq!(total(&a, Direction::Debit), Money::from_cents(128_050));
        assert_eq!(total(&a, Direction::Credit), Money::from_units(3010));
        assert_eq!(net_balance(&a), Money::from_cents(172_950));
    }

    #[test]
    fn category_total_respects_direction() {
        let a = account();
        assert_eq!(category_total(&a, "Groceries", Direction::Debit), Money::from_cents(8050));
        assert_eq!(category_total(&a, "Groceries", Direction::Credit), Money::from_units(10));
        assert_eq!(category_total(&a, "Travel", Direction::Debit), Money::zero());
    }

    #[test]
    fn empty_account_nets_to_zero() {
        assert_eq!(net_balance(&Account::new("empty")), Money::zero());
    }
}
