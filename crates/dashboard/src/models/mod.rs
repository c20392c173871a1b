//! Domain models for the dashboard.
//!
//! Field names serialize in camelCase so persisted documents keep the same
//! shape as the browser storage layout the dashboard grew out of.

pub mod business;
pub mod customer;
pub mod finance;
pub mod order;
pub mod product;
pub mod user;

pub use business::{BUSINESS_TYPES, BusinessType};
pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use finance::{
    CreditFactors, CreditScore, LoanRequest, MicroloanApplication, NewPaymentMethod,
    PaymentMethod,
};
pub use order::{NewOrder, Order, OrderItem, OrderPatch};
pub use product::{NewProduct, Product, ProductPatch, ProductVariant};
pub use user::{AuthResponse, User, UserPatch};
