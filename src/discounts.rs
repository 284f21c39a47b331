//! Discounts

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorClass;

/// Prefix of every generated discount code.
pub const CODE_PREFIX: &str = "SAVE";

const CODE_SUFFIX_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const MAX_GENERATE_ATTEMPTS: usize = 16;

/// Policy knobs for the loyalty programme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountPolicy {
    /// Every Nth completed order issues a new code.
    pub order_interval: u64,

    /// Fraction taken off the cart total when a code is applied.
    pub percent_off: Percentage,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy {
            order_interval: 3,
            percent_off: Percentage::from(0.1),
        }
    }
}

impl DiscountPolicy {
    /// The discount as percent points for display (e.g. 10).
    pub fn percent_points(&self) -> Decimal {
        ((self.percent_off * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
    }
}

/// A single-use discount code.
///
/// `used_at` is set iff `is_used`; a code transitions unused to used exactly
/// once and the transition is never reversed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// The code itself, e.g. `SAVE7G2XQ1`
    pub code: String,

    /// Whether the code has been consumed
    pub is_used: bool,

    /// When the code was issued
    pub created_at: Timestamp,

    /// When the code was consumed, if it has been
    pub used_at: Option<Timestamp>,
}

/// Successful validation answer: the code, the amount it takes off the given
/// cart total, and the policy's percent points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    /// The validated code
    pub code: String,

    /// Amount taken off the cart total
    pub amount: Decimal,

    /// Percent points of the discount (e.g. 10)
    pub percentage: Decimal,
}

/// Business-rule rejections when validating a code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountRejection {
    /// The code was never issued.
    #[error("Invalid discount code")]
    UnknownCode,

    /// The code has been consumed already.
    #[error("Discount code has already been used")]
    AlreadyUsed,
}

impl DiscountRejection {
    /// Caller-visible classification for this rejection.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::BusinessRule
    }
}

/// Errors specific to code generation.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// The generator kept colliding with already-issued codes.
    #[error("Exhausted attempts to generate a unique discount code")]
    CodeSpaceExhausted,
}

impl DiscountError {
    /// Caller-visible classification for this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Unexpected
    }
}

/// Generates, stores and validates single-use discount codes.
///
/// Issuance is gated by order-count milestones; the milestone helpers take
/// the order count as a parameter since the order ledger owns it.
#[derive(Debug, Default)]
pub struct DiscountLedger {
    policy: DiscountPolicy,
    codes: Vec<DiscountCode>,
    index: FxHashMap<String, usize>,
}

impl DiscountLedger {
    /// Create an empty ledger with the default policy (every 3rd order, 10% off).
    pub fn new() -> Self {
        DiscountLedger::default()
    }

    /// Create an empty ledger with a custom policy.
    pub fn with_policy(policy: DiscountPolicy) -> Self {
        DiscountLedger {
            policy,
            ..DiscountLedger::default()
        }
    }

    /// The ledger's policy.
    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// Generate, store and return a new unused code.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::CodeSpaceExhausted`]: every attempt collided with
    ///   an already-issued code.
    pub fn generate(&mut self) -> Result<String, DiscountError> {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate with a caller-supplied RNG.
    ///
    /// This is the seam deterministic tests use to drive collisions.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::CodeSpaceExhausted`]: every attempt collided with
    ///   an already-issued code.
    pub fn generate_with(&mut self, rng: &mut impl Rng) -> Result<String, DiscountError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = random_code(rng);

            if self.index.contains_key(&code) {
                continue;
            }

            self.index.insert(code.clone(), self.codes.len());

            self.codes.push(DiscountCode {
                code: code.clone(),
                is_used: false,
                created_at: Timestamp::now(),
                used_at: None,
            });

            return Ok(code);
        }

        Err(DiscountError::CodeSpaceExhausted)
    }

    /// Validate a code against a cart total and quote the discount amount.
    ///
    /// Never mutates state. `cart_total >= 0` is a caller precondition,
    /// enforced at the request boundary.
    ///
    /// # Errors
    ///
    /// - [`DiscountRejection::UnknownCode`]: the code was never issued.
    /// - [`DiscountRejection::AlreadyUsed`]: the code has been consumed.
    pub fn validate(&self, code: &str, cart_total: Decimal) -> Result<Decimal, DiscountRejection> {
        let found = self.find(code).ok_or(DiscountRejection::UnknownCode)?;

        if found.is_used {
            return Err(DiscountRejection::AlreadyUsed);
        }

        Ok(self.discount_amount(cart_total))
    }

    /// Amount the policy takes off a cart total, rounded to two decimal
    /// places, midpoints away from zero.
    pub fn discount_amount(&self, cart_total: Decimal) -> Decimal {
        (self.policy.percent_off * cart_total)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Consume a code: mark it used and stamp `used_at`.
    ///
    /// Returns `true` exactly once per code; an absent or already-used code
    /// returns `false` with no state change.
    pub fn use_code(&mut self, code: &str) -> bool {
        let Some(&slot) = self.index.get(code) else {
            return false;
        };

        let Some(found) = self.codes.get_mut(slot) else {
            return false;
        };

        if found.is_used {
            return false;
        }

        found.is_used = true;
        found.used_at = Some(Timestamp::now());

        true
    }

    /// All issued codes, in issuance order.
    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    /// Codes that have not been consumed yet.
    pub fn available(&self) -> Vec<&DiscountCode> {
        self.codes.iter().filter(|code| !code.is_used).collect()
    }

    /// Codes that have been consumed.
    pub fn used(&self) -> Vec<&DiscountCode> {
        self.codes.iter().filter(|code| code.is_used).collect()
    }

    /// True when the given completed-order count lands on a milestone.
    pub fn should_generate(&self, order_count: u64) -> bool {
        self.order_qualifies(order_count)
    }

    /// True when the given order number is a positive multiple of the interval.
    pub fn order_qualifies(&self, order_number: u64) -> bool {
        order_number > 0 && order_number % self.policy.order_interval == 0
    }

    /// The next order number that will trigger code issuance.
    pub fn next_discount_order_number(&self, order_count: u64) -> u64 {
        let remainder = order_count % self.policy.order_interval;

        if remainder == 0 {
            order_count + self.policy.order_interval
        } else {
            order_count + (self.policy.order_interval - remainder)
        }
    }

    /// Test-harness reset: drops all issued codes.
    pub fn reset(&mut self) {
        self.codes.clear();
        self.index.clear();
    }

    fn find(&self, code: &str) -> Option<&DiscountCode> {
        self.index.get(code).and_then(|&slot| self.codes.get(slot))
    }
}

/// Draw a `SAVE`-prefixed code of six uppercase alphanumerics.
fn random_code(rng: &mut impl Rng) -> String {
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            char::from(CODE_ALPHABET.get(idx).copied().unwrap_or(b'A'))
        })
        .collect();

    format!("{CODE_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn generated_codes_match_the_expected_shape() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;

        assert_eq!(code.len(), CODE_PREFIX.len() + CODE_SUFFIX_LEN);
        assert!(code.starts_with(CODE_PREFIX), "got {code}");
        assert!(
            code.bytes().skip(CODE_PREFIX.len()).all(|b| CODE_ALPHABET.contains(&b)),
            "suffix must draw from the 36-symbol alphabet, got {code}"
        );

        Ok(())
    }

    #[test]
    fn generate_stores_codes_as_unused() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;

        assert_eq!(ledger.codes().len(), 1);
        assert_eq!(ledger.available().len(), 1);
        assert!(ledger.used().is_empty());

        let stored = ledger.codes().first();

        assert_eq!(stored.map(|c| c.code.as_str()), Some(code.as_str()));
        assert_eq!(stored.map(|c| c.is_used), Some(false));
        assert_eq!(stored.and_then(|c| c.used_at), None);

        Ok(())
    }

    #[test]
    fn generate_retries_until_attempts_are_exhausted() -> TestResult {
        // A zero-increment StepRng draws the same code every time, so the
        // second generation can never find a fresh one.
        let mut rng = StepRng::new(0, 0);
        let mut ledger = DiscountLedger::new();

        ledger.generate_with(&mut rng)?;
        let result = ledger.generate_with(&mut rng);

        assert!(
            matches!(result, Err(DiscountError::CodeSpaceExhausted)),
            "expected CodeSpaceExhausted, got {result:?}"
        );
        assert_eq!(ledger.codes().len(), 1);
        assert_eq!(DiscountError::CodeSpaceExhausted.class(), ErrorClass::Unexpected);

        Ok(())
    }

    #[test]
    fn validate_unknown_code_is_rejected() {
        let ledger = DiscountLedger::new();

        let result = ledger.validate("SAVEZZZZZZ", Decimal::TEN);

        assert!(
            matches!(result, Err(DiscountRejection::UnknownCode)),
            "expected UnknownCode, got {result:?}"
        );
        assert_eq!(
            DiscountRejection::UnknownCode.to_string(),
            "Invalid discount code"
        );
    }

    #[test]
    fn validate_used_code_is_rejected() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;
        ledger.use_code(&code);

        let result = ledger.validate(&code, Decimal::TEN);

        assert!(
            matches!(result, Err(DiscountRejection::AlreadyUsed)),
            "expected AlreadyUsed, got {result:?}"
        );
        assert_eq!(
            DiscountRejection::AlreadyUsed.to_string(),
            "Discount code has already been used"
        );

        Ok(())
    }

    #[test]
    fn validate_quotes_ten_percent_of_the_total() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;
        let amount = ledger.validate(&code, Decimal::new(1000, 2))?;

        assert_eq!(amount, Decimal::new(100, 2));

        // Validation never mutates state.
        assert_eq!(ledger.available().len(), 1);

        Ok(())
    }

    #[test]
    fn discount_amount_rounds_midpoints_away_from_zero() {
        let ledger = DiscountLedger::new();

        // 10% of 99.99 is 9.999, which rounds up to 10.00.
        assert_eq!(
            ledger.discount_amount(Decimal::new(9999, 2)),
            Decimal::new(1000, 2)
        );
        assert_eq!(ledger.discount_amount(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn use_code_succeeds_exactly_once() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;

        assert!(ledger.use_code(&code));
        assert!(!ledger.use_code(&code));
        assert!(!ledger.use_code("SAVEZZZZZZ"));

        let stored = ledger.codes().first();

        assert_eq!(stored.map(|c| c.is_used), Some(true));
        assert!(
            stored.and_then(|c| c.used_at).is_some(),
            "used_at must be stamped when a code is consumed"
        );

        Ok(())
    }

    #[test]
    fn codes_are_partitioned_by_usage() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let first = ledger.generate()?;
        let second = ledger.generate()?;
        ledger.use_code(&first);

        let available: Vec<&str> = ledger.available().iter().map(|c| c.code.as_str()).collect();
        let used: Vec<&str> = ledger.used().iter().map(|c| c.code.as_str()).collect();

        assert_eq!(available, [second.as_str()]);
        assert_eq!(used, [first.as_str()]);
        assert_eq!(ledger.codes().len(), 2);

        Ok(())
    }

    #[test]
    fn milestones_are_positive_multiples_of_the_interval() {
        let ledger = DiscountLedger::new();

        assert!(!ledger.should_generate(0));
        assert!(!ledger.should_generate(1));
        assert!(!ledger.should_generate(2));
        assert!(ledger.should_generate(3));
        assert!(!ledger.should_generate(4));
        assert!(ledger.should_generate(6));

        assert!(ledger.order_qualifies(3));
        assert!(!ledger.order_qualifies(0));
    }

    #[test]
    fn next_discount_order_number_rounds_up_to_the_next_milestone() {
        let ledger = DiscountLedger::new();

        assert_eq!(ledger.next_discount_order_number(0), 3);
        assert_eq!(ledger.next_discount_order_number(1), 3);
        assert_eq!(ledger.next_discount_order_number(2), 3);
        assert_eq!(ledger.next_discount_order_number(3), 6);
        assert_eq!(ledger.next_discount_order_number(4), 6);
    }

    #[test]
    fn custom_policies_change_interval_and_rate() -> TestResult {
        let mut ledger = DiscountLedger::with_policy(DiscountPolicy {
            order_interval: 5,
            percent_off: Percentage::from(0.25),
        });

        assert!(ledger.should_generate(5));
        assert!(!ledger.should_generate(3));
        assert_eq!(ledger.next_discount_order_number(0), 5);
        assert_eq!(ledger.policy().percent_points(), Decimal::new(25, 0));

        let code = ledger.generate()?;
        let amount = ledger.validate(&code, Decimal::ONE_HUNDRED)?;

        assert_eq!(amount, Decimal::new(2500, 2));

        Ok(())
    }

    #[test]
    fn reset_drops_all_codes() -> TestResult {
        let mut ledger = DiscountLedger::new();

        let code = ledger.generate()?;
        ledger.reset();

        assert!(ledger.codes().is_empty());
        assert!(
            matches!(
                ledger.validate(&code, Decimal::TEN),
                Err(DiscountRejection::UnknownCode)
            ),
            "a reset ledger must not recognise old codes"
        );

        Ok(())
    }
}
