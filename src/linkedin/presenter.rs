// src/linkedin/presenter.rs
use super::types::SearchResults;

const HEAVY_RULE: usize = 80;
const LIGHT_RULE: usize = 50;
const PREVIEW_COUNT: usize = 3;

/// Keep the first and last character, star out the rest. Short names become `***`.
pub fn mask_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return "***".to_string();
    }

    let mut masked = String::with_capacity(name.len());
    masked.push(chars[0]);
    masked.push_str(&"*".repeat(chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked
}

/// Text preview of the first results as they would appear logged in or logged out.
pub fn render_mockup(results: &SearchResults, user_logged_in: bool) -> String {
    let heavy = "=".repeat(HEAVY_RULE);
    let mut lines = vec![
        heavy.clone(),
        "LINKEDIN COMPANY CONNECTION SEARCH RESULTS".to_string(),
        heavy.clone(),
        format!("Search: Employees at {}", results.company),
        format!("Results: {} matches found", results.total_found),
        String::new(),
    ];

    if user_logged_in {
        lines.push("🔓 LOGGED IN STATE".to_string());
    } else {
        lines.push("🔒 LOGGED OUT STATE".to_string());
    }
    lines.push("-".repeat(LIGHT_RULE));

    for employee in results.employees.iter().take(PREVIEW_COUNT) {
        if user_logged_in {
            lines.push(format!("👤 {} (showing)", employee.name));
        } else {
            lines.push(format!("👤 {} (hidden)", mask_name(&employee.name)));
        }
        lines.push(format!("   {}", employee.title_company));
        lines.push(format!("   📍 {}", employee.location));
        lines.push(format!(
            "   🤝 {} connections at {}",
            employee.mutual_connections, results.company
        ));

        if employee.is_verified_account_manager {
            lines.push("   ✅ Account Connections Verified Manager".to_string());
        }

        if user_logged_in {
            let connect = if employee.can_connect { "[Connect]" } else { "[Connected]" };
            let message = if employee.can_message { "[Message]" } else { "[Message*]" };
            lines.push(format!("   {} {} *active", connect, message));
        } else {
            lines.push("   [Connect] [Message] *prompted to login".to_string());
        }
        lines.push(String::new());
    }

    lines.push(heavy.clone());
    lines.push("FEATURES:".to_string());
    lines.push("• Logged out: Names hidden, buttons prompt login".to_string());
    lines.push("• Logged in: Full names shown, active buttons".to_string());
    lines.push("• Verified Account Managers show special badge".to_string());
    lines.push("• Results prioritized by mutual connections".to_string());
    lines.push("• Connection/Message availability based on degree".to_string());
    lines.push(heavy);

    lines.join("\n")
}
