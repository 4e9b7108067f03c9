#![deny(unsafe_code)]

mod builtin;
pub mod catalog;
pub mod error;

pub use crate::catalog::FieldCatalog;
pub use crate::error::CatalogError;

/// Fields every catalog shipped with the engine must define.
pub const REQUIRED_FIELDS: &[&str] = &[
    "customer_name",
    "customer_email",
    "company",
    "mrr",
    "churn_risk",
    "last_activity",
    "support_tickets",
    "feature_usage",
    "industry",
    "company_size",
    "contract_value",
    "renewal_date",
];
