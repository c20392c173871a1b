//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `auth` - Mock login/registration against demo accounts
//! - `session` - Current user and token in the storage port
//! - `chat` - Canned AI assistant replies
//! - `insights` - Dashboard stats, forecasts, demand and pricing suggestions
//! - `finance` - Credit score and microloan decisions

pub mod auth;
pub mod chat;
pub mod finance;
pub mod insights;
pub mod session;

pub use auth::{AuthError, AuthService, generate_token};
pub use chat::{ChatReply, ChatRequest, ChatService};
pub use finance::FinanceService;
pub use insights::{DashboardStats, Insights};
pub use session::SessionStore;
