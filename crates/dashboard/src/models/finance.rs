//! Mobile-money payment methods, credit score and microloan types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use msme_core::{LoanId, LoanStatus, PaymentMethodId, PaymentMethodStatus, PaymentMethodType, Price};

/// A connected mobile-money account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub phone_number: String,
    pub account_name: String,
    pub is_default: bool,
    pub status: PaymentMethodStatus,
}

/// Request to connect a payment method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub phone_number: String,
    pub account_name: String,
}

/// Business credit score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    pub overall: u8,
    pub business_performance: u8,
    pub payment_history: u8,
    pub credit_utilization: u8,
    pub factors: CreditFactors,
    pub recommendations: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Factors raising and lowering a credit score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditFactors {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Microloan request as submitted by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub amount: Price,
    pub purpose: String,
    /// Repayment term in months.
    pub term: u32,
}

/// A decided microloan application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroloanApplication {
    pub id: LoanId,
    pub amount: Price,
    pub purpose: String,
    pub term: u32,
    pub status: LoanStatus,
    pub credit_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<Price>,
    /// Annual percentage, e.g. `12`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Price>,
    pub applied_at: DateTime<Utc>,
}
