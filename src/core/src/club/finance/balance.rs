use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubFinances {
    pub balance: ClubFinancialBalance,
    pub salary_cap: i64,
    /// Sum of roster wages. Derived; refreshed by the owning club after every roster change.
    pub wage_bill: i64,
}

impl ClubFinances {
    pub fn new(cash: i64, salary_cap: i64) -> Self {
        ClubFinances {
            balance: ClubFinancialBalance::new(cash),
            salary_cap,
            wage_bill: 0,
        }
    }

    pub fn cash(&self) -> i64 {
        self.balance.balance
    }

    pub fn season_revenue(&self) -> i64 {
        self.balance.income
    }

    pub fn push_revenue(&mut self, club_name: &str, amount: i64) {
        debug!("club: {}, finance: revenue, amount = {}", club_name, amount);

        self.balance.push_income(amount);
    }

    pub fn push_salary(&mut self, club_name: &str, amount: i64) {
        debug!("club: {}, finance: push salary, amount = {}", club_name, amount);

        self.balance.push_outcome(amount);
    }

    /// Transfer fees and compensation move cash without touching the season revenue line.
    pub fn receive_fee(&mut self, amount: i64) {
        self.balance.balance += amount;
    }

    pub fn pay_fee(&mut self, amount: i64) -> bool {
        if self.balance.balance < amount {
            return false;
        }

        self.balance.balance -= amount;
        true
    }

    pub fn can_afford(&self, amount: i64) -> bool {
        self.balance.balance >= amount
    }

    pub fn fits_under_cap(&self, extra_wage: i64) -> bool {
        self.wage_bill + extra_wage <= self.salary_cap
    }

    pub fn cap_room(&self) -> i64 {
        self.salary_cap - self.wage_bill
    }

    pub fn start_new_season(&mut self) {
        self.balance.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubFinancialBalance {
    pub balance: i64,
    pub income: i64,
    pub outcome: i64,
}

impl ClubFinancialBalance {
    pub fn new(balance: i64) -> Self {
        ClubFinancialBalance {
            balance,
            income: 0,
            outcome: 0,
        }
    }

    pub fn push_income(&mut self, amount: i64) {
        self.balance += amount;
        self.income += amount;
    }

    pub fn push_outcome(&mut self, amount: i64) {
        self.balance -= amount;
        self.outcome += amount;
    }

    pub fn clear(&mut self) {
        self.income = 0;
        self.outcome = 0;
    }
}
