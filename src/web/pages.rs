// src/web/pages.rs
//! Server-rendered pages for the session flow.

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn login_page(error: Option<&str>) -> String {
    let error_block = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Account Connections - Sign in</title>
</head>
<body>
  <h1>Sign in with LinkedIn</h1>
  {error_block}
  <form method="post" action="/login">
    <label>Email <input type="email" name="email" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Sign in</button>
  </form>
</body>
</html>"#
    )
}

pub fn dashboard_page(email: &str, user_company: &str) -> String {
    let email = escape_html(email);
    let user_company = escape_html(user_company);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Account Connections - Dashboard</title>
</head>
<body>
  <header>
    <p>Signed in as <strong>{email}</strong> ({user_company})</p>
    <a href="/logout">Log out</a>
  </header>
  <form id="search">
    <input name="company_name" placeholder="Company name" required>
    <input name="limit" type="number" min="1" max="150" value="50">
    <button type="submit">Search</button>
  </form>
  <h2>Logged out view</h2>
  <pre id="logged-out"></pre>
  <h2>Logged in view</h2>
  <pre id="logged-in"></pre>
  <script>
    document.getElementById("search").addEventListener("submit", async (event) => {{
      event.preventDefault();
      const form = new FormData(event.target);
      const response = await fetch("/search", {{
        method: "POST",
        headers: {{ "Content-Type": "application/json" }},
        body: JSON.stringify({{
          company_name: form.get("company_name"),
          limit: Number(form.get("limit")),
        }}),
      }});
      const data = await response.json();
      if (!response.ok) {{
        document.getElementById("logged-out").textContent = data.error;
        return;
      }}
      document.getElementById("logged-out").textContent = data.logged_out_ui;
      document.getElementById("logged-in").textContent = data.logged_in_ui;
    }});
  </script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_error() {
        assert!(!login_page(None).contains("class=\"error\""));
        assert!(login_page(Some("Invalid LinkedIn credentials"))
            .contains("<p class=\"error\">Invalid LinkedIn credentials</p>"));
    }

    #[test]
    fn test_dashboard_escapes_user_input() {
        let page = dashboard_page("<script>@x.com", "Acme & Co");
        assert!(page.contains("&lt;script&gt;@x.com"));
        assert!(page.contains("Acme &amp; Co"));
    }
}
