use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A purchasable plan. `features` is a JSON array stored as text.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MembershipPlan {
    pub id: String,
    pub plan_name: String,
    pub duration_months: i32,
    pub cost: i64,
    pub features: String,
    pub created_at: DateTime<Utc>,
}

impl MembershipPlan {
    pub fn new(plan_name: String, duration_months: i32, cost: i64, features: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plan_name,
            duration_months,
            cost,
            features,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: String,
    pub member_id: String,
    pub plan_id: String,
    pub amount: i64,
    pub payment_mode: String,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(member_id: String, plan_id: String, amount: i64, payment_mode: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            member_id,
            plan_id,
            amount,
            payment_mode,
            paid_at: Utc::now(),
        }
    }
}

/// Payment joined with its plan name, for history views.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct PaymentWithPlan {
    pub id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub amount: i64,
    pub payment_mode: String,
    pub paid_at: DateTime<Utc>,
}

/// Payment joined with member and plan identity, for the admin ledger.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct PaymentDetail {
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub member_email: String,
    pub plan_name: String,
    pub amount: i64,
    pub payment_mode: String,
    pub paid_at: DateTime<Utc>,
}

/// Active-membership count per plan.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct PlanActiveCount {
    pub plan_id: String,
    pub plan_name: String,
    pub active_count: i64,
}
