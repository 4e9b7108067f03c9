//! Compiled-in field definitions.
//!
//! Declaration order matters: arbitration breaks confidence ties in favor of
//! the field declared first.

use colmap_model::{ContentHint, FieldDefinition};

pub(crate) fn builtin_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("customer_name", "Customer name")
            .with_keywords(&["customer", "client", "name"])
            .with_examples(&[
                "customer_name",
                "client_name",
                "customer",
                "client",
                "full_name",
                "name",
            ])
            // "app_name", "company_name" and friends carry "name" too.
            .with_exclude_patterns(&[
                "app",
                "application",
                "product",
                "feature",
                "company",
                "business",
                "email",
                "mail",
                "industry",
                "file",
                "plan",
                "_id",
            ])
            .with_content_hints(&[ContentHint::Text]),
        FieldDefinition::new("customer_email", "Customer email")
            .with_keywords(&["email", "e-mail", "mail"])
            .with_examples(&[
                "email",
                "customer_email",
                "email_address",
                "e-mail",
                "client_email",
                "user_email",
            ])
            .with_exclude_patterns(&["opt_in", "unsubscribe"])
            .with_content_hints(&[ContentHint::Email]),
        FieldDefinition::new("company", "Company")
            .with_keywords(&[
                "company",
                "organization",
                "organisation",
                "business",
                "firm",
                "account",
            ])
            .with_examples(&[
                "company",
                "company_name",
                "organization",
                "organisation",
                "business_name",
                "account",
                "employer",
            ])
            .with_exclude_patterns(&["size", "employees", "headcount", "industry", "sector"])
            .with_content_hints(&[ContentHint::Text]),
        FieldDefinition::new("mrr", "Monthly recurring revenue")
            .with_keywords(&["mrr", "revenue", "recurring", "subscription", "monthly"])
            .with_examples(&[
                "mrr",
                "monthly_revenue",
                "monthly_recurring_revenue",
                "recurring_revenue",
            ])
            .with_exclude_patterns(&["contract"])
            .with_content_hints(&[ContentHint::Number]),
        FieldDefinition::new("churn_risk", "Churn risk")
            .with_keywords(&["churn", "risk", "health"])
            .with_examples(&[
                "churn_risk",
                "churn_score",
                "risk_score",
                "health_score",
                "churn_probability",
            ])
            .with_content_hints(&[ContentHint::Number, ContentHint::Text]),
        FieldDefinition::new("last_activity", "Last activity")
            .with_keywords(&["last", "activity", "login", "seen", "active"])
            .with_examples(&[
                "last_activity",
                "last_login",
                "last_seen",
                "last_active",
                "last_activity_date",
            ])
            .with_exclude_patterns(&["renewal", "contract"])
            .with_content_hints(&[ContentHint::Date]),
        FieldDefinition::new("support_tickets", "Support tickets")
            .with_keywords(&["ticket", "support", "case", "issue", "incident"])
            .with_examples(&[
                "support_tickets",
                "tickets",
                "ticket_count",
                "open_tickets",
                "support_cases",
            ])
            .with_content_hints(&[ContentHint::Number]),
        FieldDefinition::new("feature_usage", "Feature usage")
            .with_keywords(&["feature", "usage", "adoption", "module"])
            .with_examples(&[
                "feature_usage",
                "features_used",
                "usage",
                "app_name",
                "application_name",
                "product_usage",
                "feature",
            ])
            .with_content_hints(&[ContentHint::Text, ContentHint::Number]),
        FieldDefinition::new("industry", "Industry")
            .with_keywords(&["industry", "sector", "vertical", "segment"])
            .with_examples(&["industry", "sector", "vertical", "industry_type"])
            .with_content_hints(&[ContentHint::Text]),
        FieldDefinition::new("company_size", "Company size")
            .with_keywords(&["employees", "headcount", "size", "seats"])
            .with_examples(&[
                "company_size",
                "employee_count",
                "employees",
                "headcount",
                "num_employees",
                "team_size",
            ])
            .with_content_hints(&[ContentHint::Number, ContentHint::Text]),
        FieldDefinition::new("contract_value", "Contract value")
            .with_keywords(&["contract", "acv", "tcv", "deal", "value", "amount"])
            .with_examples(&[
                "contract_value",
                "acv",
                "annual_contract_value",
                "deal_value",
                "total_contract_value",
                "contract_amount",
            ])
            .with_exclude_patterns(&["date", "renewal"])
            .with_content_hints(&[ContentHint::Number]),
        FieldDefinition::new("renewal_date", "Renewal date")
            .with_keywords(&["renewal", "renew", "expiry", "expiration", "end_date"])
            .with_examples(&[
                "renewal_date",
                "renewal",
                "contract_end",
                "contract_end_date",
                "expiration_date",
                "expiry_date",
            ])
            .with_content_hints(&[ContentHint::Date]),
    ]
}
