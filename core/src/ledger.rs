//! Account ledger simulator — the four-account state machine.
//!
//! PERIOD PIPELINE, EXECUTION ORDER (fixed, documented, never reordered):
//!   1. interest   — annual crediting, each account at its own rate
//!   2. contribute — one month's wage contribution while under the cutoff
//!   3. events     — age-triggered one-way transitions (55, 65)
//!   4. withdraw   — due directives, floored at zero
//!   5. cap        — medisave overflow redirection
//!
//! RULES:
//!   - Balances never go negative. Every debit clamps to what is there.
//!   - Stage transitions are one-way and fire exactly once, at the first
//!     period where the age threshold is crossed.
//!   - Interest is credited before the stage events in the same period.
//!   - No operation raises. Malformed directive ages default to the
//!     simulation's current age at construction time.

use crate::clock::AgeClock;
use crate::config::{PlanConfig, RateAssumptions};
use crate::contribution::monthly_contribution;
use crate::event::PlanEvent;
use crate::types::{clamp_money, Age};
use serde::{Deserialize, Serialize};

/// The special account closes and its balance reallocates at this age.
pub const SPECIAL_CLOSURE_AGE: Age = 55;

/// The retirement balance annuitizes at this age.
pub const ANNUITY_START_AGE: Age = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Ordinary,
    Special,
    Medisave,
    Retirement,
}

/// The four scheme balances. All non-negative at every period boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountState {
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub ordinary: f64,
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub special: f64,
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub medisave: f64,
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub retirement: f64,
}

impl AccountState {
    pub fn total(&self) -> f64 {
        self.ordinary + self.special + self.medisave + self.retirement
    }

    pub fn balance(&self, kind: AccountKind) -> f64 {
        match kind {
            AccountKind::Ordinary => self.ordinary,
            AccountKind::Special => self.special,
            AccountKind::Medisave => self.medisave,
            AccountKind::Retirement => self.retirement,
        }
    }

    fn balance_mut(&mut self, kind: AccountKind) -> &mut f64 {
        match kind {
            AccountKind::Ordinary => &mut self.ordinary,
            AccountKind::Special => &mut self.special,
            AccountKind::Medisave => &mut self.medisave,
            AccountKind::Retirement => &mut self.retirement,
        }
    }

    /// Debit up to `amount` from `kind`. Returns what was actually
    /// debited — withdrawals never drive an account negative.
    fn debit_clamped(&mut self, kind: AccountKind, amount: f64) -> f64 {
        let balance = self.balance_mut(kind);
        let debited = clamp_money(amount).min(*balance);
        *balance -= debited;
        debited
    }

    fn sanitized(mut self) -> Self {
        self.ordinary = clamp_money(self.ordinary);
        self.special = clamp_money(self.special);
        self.medisave = clamp_money(self.medisave);
        self.retirement = clamp_money(self.retirement);
        self
    }
}

/// One-way, age-triggered life stages of the account set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    Accumulating,
    PreAnnuity,
    Annuitized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    OneTime,
    Monthly,
    Yearly,
}

/// A planned withdrawal against one named account.
///
/// One-time directives ignore `end_age`. Recurring directives without an
/// `end_age` run to the simulation horizon. Yearly directives debit on the
/// first period of each simulated year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawalDirective {
    pub label: String,
    pub source: AccountKind,
    #[serde(deserialize_with = "crate::types::lenient_f64")]
    pub amount: f64,
    pub schedule: Schedule,
    #[serde(deserialize_with = "crate::types::lenient_age")]
    pub start_age: Age,
    pub end_age: Option<Age>,
}

impl Default for WithdrawalDirective {
    fn default() -> Self {
        Self {
            label: String::new(),
            source: AccountKind::Ordinary,
            amount: 0.0,
            schedule: Schedule::OneTime,
            start_age: 0,
            end_age: None,
        }
    }
}

impl WithdrawalDirective {
    /// Repair malformed fields: amounts clamp non-negative, an absent or
    /// unparseable start age becomes the simulation's current age, and an
    /// end age before the start age is dropped.
    fn sanitized(mut self, current_age: Age) -> Self {
        self.amount = clamp_money(self.amount);
        if self.start_age == 0 {
            self.start_age = current_age;
        }
        if let Some(end) = self.end_age {
            if end < self.start_age {
                self.end_age = None;
            }
        }
        self
    }
}

/// The ledger state machine. Owns its clock, balances, stage, and the
/// event log for one projection run.
pub struct LedgerSimulator {
    config: PlanConfig,
    rates: RateAssumptions,
    clock: AgeClock,
    accounts: AccountState,
    stage: LifeStage,
    annuity_monthly: f64,
    medisave_cap: f64,
    gross_monthly_income: f64,
    directives: Vec<WithdrawalDirective>,
    fired_one_time: Vec<bool>,
    events: Vec<PlanEvent>,
    /// Medisave overflow accrued this year, reported once at year end.
    overflow_accrued: f64,
    overflow_target: AccountKind,
}

impl LedgerSimulator {
    pub fn new(
        start_age: Age,
        accounts: AccountState,
        gross_monthly_income: f64,
        directives: Vec<WithdrawalDirective>,
        rates: RateAssumptions,
        config: &PlanConfig,
    ) -> Self {
        let directives: Vec<WithdrawalDirective> = directives
            .into_iter()
            .map(|d| d.sanitized(start_age))
            .collect();
        let fired_one_time = vec![false; directives.len()];
        Self {
            config: config.clone(),
            rates,
            clock: AgeClock::new(start_age),
            accounts: accounts.sanitized(),
            stage: LifeStage::Accumulating,
            annuity_monthly: 0.0,
            medisave_cap: config.medisave_cap_base.max(0.0),
            gross_monthly_income: clamp_money(gross_monthly_income),
            directives,
            fired_one_time,
            events: Vec::new(),
            overflow_accrued: 0.0,
            overflow_target: AccountKind::Special,
        }
    }

    pub fn accounts(&self) -> &AccountState {
        &self.accounts
    }

    pub fn stage(&self) -> LifeStage {
        self.stage
    }

    /// Monthly annuity payout rate. Zero until the age-65 event fires.
    pub fn annuity_monthly(&self) -> f64 {
        self.annuity_monthly
    }

    pub fn age(&self) -> Age {
        self.clock.age()
    }

    pub fn medisave_cap(&self) -> f64 {
        self.medisave_cap
    }

    /// Take the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlanEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one period through the five pipeline steps, then move the
    /// clock forward.
    pub fn step_month(&mut self) {
        let age = self.clock.age();

        // 1. interest
        if self.clock.is_year_start() {
            self.credit_interest();
        }

        // 2. contribute
        if age < self.config.contribution_cutoff_age {
            self.apply_contribution(age);
        }

        // 3. events
        self.fire_stage_events(age);

        // 4. withdraw
        self.apply_withdrawals(age);

        // 5. cap
        self.enforce_medisave_cap(age);

        self.clock.advance();
    }

    /// Run `n` consecutive periods.
    pub fn run_months(&mut self, n: u32) {
        for _ in 0..n {
            self.step_month();
        }
    }

    fn credit_interest(&mut self) {
        self.accounts.ordinary *= 1.0 + self.rates.ordinary;
        self.accounts.special *= 1.0 + self.rates.savings;
        self.accounts.medisave *= 1.0 + self.rates.savings;
        self.accounts.retirement *= 1.0 + self.rates.savings;
    }

    fn apply_contribution(&mut self, age: Age) {
        let c = monthly_contribution(self.gross_monthly_income, age, &self.config);
        self.accounts.ordinary += c.ordinary;
        self.accounts.medisave += c.medisave;
        // The special account stops receiving money once it has closed;
        // its share routes to the retirement account instead.
        if self.stage == LifeStage::Accumulating {
            self.accounts.special += c.special;
        } else {
            self.accounts.retirement += c.special;
        }
    }

    fn fire_stage_events(&mut self, age: Age) {
        if self.stage == LifeStage::Accumulating && age >= SPECIAL_CLOSURE_AGE {
            self.close_special_account(age);
            self.stage = LifeStage::PreAnnuity;
        }
        if self.stage == LifeStage::PreAnnuity && age >= ANNUITY_START_AGE {
            self.activate_annuity(age);
            self.stage = LifeStage::Annuitized;
        }
    }

    /// Age-55 event. Sets aside the retirement-sum target from special
    /// first, returns any special remainder to ordinary, then pulls the
    /// residual target from ordinary, clamped to what ordinary holds.
    fn close_special_account(&mut self, age: Age) {
        let years_to_event = SPECIAL_CLOSURE_AGE.saturating_sub(self.clock.start_age);
        let target = self.config.retirement_sum_base
            * (1.0 + self.config.retirement_sum_growth).powi(years_to_event as i32);

        let from_special = self.accounts.special.min(target);
        let returned_to_ordinary = self.accounts.special - from_special;
        self.accounts.retirement += from_special;
        self.accounts.ordinary += returned_to_ordinary;
        self.accounts.special = 0.0;

        let shortfall = (target - from_special).max(0.0);
        let from_ordinary = self.accounts.debit_clamped(AccountKind::Ordinary, shortfall);
        self.accounts.retirement += from_ordinary;

        log::debug!(
            "age={age} retirement sum set aside: target={target:.2} \
             from_special={from_special:.2} from_ordinary={from_ordinary:.2}"
        );
        self.events.push(PlanEvent::RetirementSumSetAside {
            age,
            target,
            from_special,
            from_ordinary,
            returned_to_ordinary,
        });
    }

    /// Age-65 event. Converts the retirement balance to a monthly payout
    /// rate and zeroes the account.
    fn activate_annuity(&mut self, age: Age) {
        let converted_balance = self.accounts.retirement;
        self.annuity_monthly = converted_balance * self.config.annuity_payout_per_dollar;
        self.accounts.retirement = 0.0;

        log::debug!(
            "age={age} annuitized: balance={converted_balance:.2} \
             payout={:.2}/month",
            self.annuity_monthly
        );
        self.events.push(PlanEvent::AnnuityActivated {
            age,
            converted_balance,
            monthly_payout: self.annuity_monthly,
        });
    }

    fn apply_withdrawals(&mut self, age: Age) {
        for i in 0..self.directives.len() {
            let d = &self.directives[i];
            let within_window =
                age >= d.start_age && d.end_age.map_or(true, |end| age <= end);
            let due = match d.schedule {
                Schedule::OneTime => !self.fired_one_time[i] && age >= d.start_age,
                Schedule::Monthly => within_window,
                Schedule::Yearly => within_window && self.clock.is_yearly_due(),
            };
            if !due {
                continue;
            }
            let (source, amount, one_time) =
                (d.source, d.amount, d.schedule == Schedule::OneTime);
            if one_time {
                self.fired_one_time[i] = true;
            }
            self.accounts.debit_clamped(source, amount);
        }
    }

    /// Grow the cap on year boundaries until the freeze age, then push
    /// any balance above it into special (before 55) or retirement.
    /// Overflows recur monthly once medisave rides the cap, so they are
    /// accrued and reported as one event per simulated year.
    fn enforce_medisave_cap(&mut self, age: Age) {
        if self.clock.is_year_start() && age < self.config.medisave_cap_freeze_age {
            self.medisave_cap *= 1.0 + self.config.medisave_cap_growth;
        }

        let overflow = self.accounts.medisave - self.medisave_cap;
        if overflow > 0.0 {
            self.accounts.medisave = self.medisave_cap;
            let redirected_to = if age < SPECIAL_CLOSURE_AGE {
                AccountKind::Special
            } else {
                AccountKind::Retirement
            };
            *self.accounts.balance_mut(redirected_to) += overflow;
            self.overflow_accrued += overflow;
            self.overflow_target = redirected_to;
        }

        if self.clock.is_year_end() && self.overflow_accrued > 0.0 {
            self.events.push(PlanEvent::MedisaveOverflow {
                age,
                amount: self.overflow_accrued,
                redirected_to: self.overflow_target,
            });
            self.overflow_accrued = 0.0;
        }
    }
}
