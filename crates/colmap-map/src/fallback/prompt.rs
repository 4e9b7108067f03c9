//! Prompt construction for the fallback classifier.

use colmap_catalog::FieldCatalog;
use colmap_model::{DEFAULT_SAMPLE_LIMIT, UNMAPPED};

use crate::classifiers::LiteralOverrides;

/// Builds the deterministic prompt sent to the completion service.
///
/// The prompt lists the header, up to ten sample values, every header of the
/// file, the catalog fields with their keywords and examples, and notes
/// mirroring the literal overrides so the model agrees with them.
pub fn build_prompt(
    header: &str,
    all_headers: &[String],
    sample_values: &[String],
    catalog: &FieldCatalog,
    overrides: &LiteralOverrides,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You map columns of an uploaded customer dataset to canonical fields.\n\n",
    );

    prompt.push_str(&format!("Column to classify: \"{header}\"\n"));
    if sample_values.is_empty() {
        prompt.push_str("Sample values: (none)\n");
    } else {
        let samples = sample_values
            .iter()
            .take(DEFAULT_SAMPLE_LIMIT)
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("Sample values: {samples}\n"));
    }
    prompt.push_str(&format!("All columns in the file: {}\n", all_headers.join(", ")));

    prompt.push_str("\nAvailable fields:\n");
    for field in catalog.fields() {
        let label = if field.label.is_empty() {
            String::new()
        } else {
            format!(" ({})", field.label)
        };
        prompt.push_str(&format!(
            "- {}{label}: keywords [{}]; examples [{}]\n",
            field.canonical_name,
            field.keywords.join(", "),
            field.examples.join(", ")
        ));
    }

    prompt.push_str("\nDisambiguation notes:\n");
    for rule in overrides.rules() {
        if catalog.contains(rule.field) {
            prompt.push_str(&format!("- \"{}\" always means {}\n", rule.header, rule.field));
        }
    }
    prompt.push_str(&format!("- If no field fits, answer \"{UNMAPPED}\" with a low confidence.\n"));

    prompt.push_str(
        "\nRespond with JSON only, no other text:\n\
         {\"field\": \"<field name or unmapped>\", \"confidence\": <number between 0 and 1>, \
         \"reasoning\": \"<one short sentence>\"}\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn prompt_contains_context() {
        let catalog = FieldCatalog::builtin();
        let prompt = build_prompt(
            "acct_mgr",
            &strings(&["acct_mgr", "email"]),
            &strings(&["Ann", "Bob"]),
            &catalog,
            &LiteralOverrides::default(),
        );
        assert!(prompt.contains("Column to classify: \"acct_mgr\""));
        assert!(prompt.contains("Sample values: \"Ann\", \"Bob\""));
        assert!(prompt.contains("All columns in the file: acct_mgr, email"));
        assert!(prompt.contains("- customer_email (Customer email): keywords [email, e-mail, mail]"));
        assert!(prompt.contains("- \"cli_name\" always means customer_name"));
        assert!(prompt.contains("- \"app_name\" always means feature_usage"));
        assert!(prompt.contains("\"confidence\""));
    }

    #[test]
    fn prompt_is_deterministic_and_caps_samples() {
        let catalog = FieldCatalog::builtin();
        let values: Vec<String> = (0..15).map(|i| format!("v{i}")).collect();
        let headers = strings(&["x"]);
        let overrides = LiteralOverrides::default();
        let first = build_prompt("x", &headers, &values, &catalog, &overrides);
        let second = build_prompt("x", &headers, &values, &catalog, &overrides);
        assert_eq!(first, second);
        assert!(first.contains("\"v9\""));
        assert!(!first.contains("\"v10\""));
    }

    #[test]
    fn prompt_marks_missing_samples() {
        let catalog = FieldCatalog::builtin();
        let prompt = build_prompt("x", &[], &[], &catalog, &LiteralOverrides::default());
        assert!(prompt.contains("Sample values: (none)"));
    }
}
