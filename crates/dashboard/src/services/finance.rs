//! Credit score and microloan decisions.
//!
//! The credit score is fixed. Loan decisions follow simple tiers on the
//! overall score:
//!
//! | Score   | Max amount | Interest |
//! |---------|-----------:|---------:|
//! | > 80    | 50 000     | 12 %     |
//! | 61 - 80 | 25 000     | 15 %     |
//! | <= 60   | 10 000     | 15 %     |

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use msme_core::{LoanId, LoanStatus, Price};

use crate::db::{RepositoryError, Store};
use crate::models::{CreditFactors, CreditScore, LoanRequest, MicroloanApplication};

/// The business credit score as of `now`.
#[must_use]
pub fn credit_score(now: DateTime<Utc>) -> CreditScore {
    CreditScore {
        overall: 85,
        business_performance: 90,
        payment_history: 80,
        credit_utilization: 75,
        factors: CreditFactors {
            positive: vec![
                "Consistent revenue growth".to_string(),
                "Good payment history".to_string(),
                "Strong customer base".to_string(),
            ],
            negative: vec![
                "High credit utilization".to_string(),
                "Limited business history".to_string(),
            ],
        },
        recommendations: vec![
            "Reduce credit utilization below 50%".to_string(),
            "Maintain consistent payment patterns".to_string(),
            "Expand customer base".to_string(),
        ],
        last_updated: now,
    }
}

/// Largest amount approved for `score`.
#[must_use]
pub fn max_loan_amount(score: u8) -> Price {
    let max = match score {
        81.. => 50_000,
        61..=80 => 25_000,
        _ => 10_000,
    };
    Price::new(Decimal::from(max))
}

/// Annual interest in percent for `score`.
#[must_use]
pub fn interest_rate(score: u8) -> Decimal {
    if score > 80 {
        Decimal::from(12)
    } else {
        Decimal::from(15)
    }
}

/// Form-level checks on a loan request.
///
/// # Errors
///
/// Returns a message if the term is zero, the amount is not positive or the
/// purpose is blank.
pub fn validate_request(request: &LoanRequest) -> Result<(), String> {
    if request.term == 0 {
        return Err("loan term must be at least one month".to_string());
    }
    if request.amount <= Price::ZERO {
        return Err("loan amount must be positive".to_string());
    }
    if request.purpose.trim().is_empty() {
        return Err("loan purpose cannot be empty".to_string());
    }
    Ok(())
}

/// Decide a validated `request` for `score`.
///
/// Approved iff the amount is within the score's limit. The monthly payment
/// is `amount * (1 + rate / 100) / term`.
#[must_use]
pub fn evaluate(
    id: LoanId,
    request: LoanRequest,
    score: u8,
    now: DateTime<Utc>,
) -> MicroloanApplication {
    let approved = request.amount <= max_loan_amount(score);
    let (status, approved_amount, rate, monthly_payment) = if approved {
        let rate = interest_rate(score);
        let factor = Decimal::ONE + rate / Decimal::ONE_HUNDRED;
        let term = Decimal::from(request.term.max(1));
        let monthly = Price::new((request.amount.amount() * factor / term).round_dp(2));
        (LoanStatus::Approved, Some(request.amount), Some(rate), Some(monthly))
    } else {
        (LoanStatus::Rejected, None, None, None)
    };

    MicroloanApplication {
        id,
        amount: request.amount,
        purpose: request.purpose,
        term: request.term,
        status,
        credit_score: score,
        approved_amount,
        interest_rate: rate,
        monthly_payment,
        applied_at: now,
    }
}

/// Credit and loan operations.
pub struct FinanceService<'a> {
    store: &'a Store,
}

impl<'a> FinanceService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Fetch the current credit score.
    pub async fn credit_score(&self) -> CreditScore {
        self.store.latency().simulate_write().await;
        credit_score(Utc::now())
    }

    /// Decide and record a microloan application.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Invalid` if the request fails validation;
    /// nothing is recorded in that case.
    /// Returns `RepositoryError::Storage` if the application cannot be stored.
    #[instrument(skip(self, request), fields(amount = %request.amount, term = request.term))]
    pub async fn apply_for_loan(
        &self,
        request: LoanRequest,
    ) -> Result<MicroloanApplication, RepositoryError> {
        validate_request(&request).map_err(RepositoryError::Invalid)?;
        self.store.latency().simulate_processing().await;

        let now = Utc::now();
        let score = credit_score(now).overall;
        self.store
            .microloans()
            .record(|id| evaluate(id, request, score, now))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::Latency;
    use crate::storage::MemoryStorage;

    fn request(amount: i64, term: u32) -> LoanRequest {
        LoanRequest {
            amount: Price::new(Decimal::from(amount)),
            purpose: "Inventory expansion".to_string(),
            term,
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(max_loan_amount(85), Price::new(Decimal::from(50_000)));
        assert_eq!(max_loan_amount(80), Price::new(Decimal::from(25_000)));
        assert_eq!(max_loan_amount(60), Price::new(Decimal::from(10_000)));
        assert_eq!(interest_rate(81), Decimal::from(12));
        assert_eq!(interest_rate(80), Decimal::from(15));
    }

    #[test]
    fn test_evaluate_approves_within_limit() {
        let loan = evaluate(LoanId::new("loan-x"), request(25_000, 12), 85, Utc::now());
        assert_eq!(loan.status, LoanStatus::Approved);
        assert_eq!(loan.interest_rate, Some(Decimal::from(12)));
        assert_eq!(loan.monthly_payment, Some(Price::from_minor(233_333)));
    }

    #[test]
    fn test_evaluate_rejects_over_limit() {
        let loan = evaluate(LoanId::new("loan-x"), request(60_000, 12), 85, Utc::now());
        assert_eq!(loan.status, LoanStatus::Rejected);
        assert!(loan.approved_amount.is_none());
        assert!(loan.monthly_payment.is_none());
    }

    #[test]
    fn test_zero_term_is_invalid() {
        assert!(validate_request(&request(1_000, 0)).is_err());
        assert!(validate_request(&request(0, 6)).is_err());
        assert!(validate_request(&request(1_000, 6)).is_ok());
    }

    #[tokio::test]
    async fn test_apply_records_application() {
        let store = Store::new(Arc::new(MemoryStorage::new()), Latency::none());
        let loan = FinanceService::new(&store)
            .apply_for_loan(request(10_000, 10))
            .await
            .unwrap();

        assert_eq!(loan.id.as_str(), "loan-002");
        assert_eq!(loan.monthly_payment, Some(Price::new(Decimal::from(1120))));
        assert_eq!(store.microloans().list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_application_not_recorded() {
        let store = Store::new(Arc::new(MemoryStorage::new()), Latency::none());
        let err = FinanceService::new(&store)
            .apply_for_loan(request(10_000, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Invalid(_)));
        assert_eq!(store.microloans().list().await.unwrap().len(), 1);
    }
}
