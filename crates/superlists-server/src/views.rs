//! HTML rendering.
//!
//! Rendering is a pure function of its inputs: the same list and error
//! always produce byte-identical markup.

use std::fmt::Write;

use superlists_core::TodoList;

/// Placeholder of the new-item input box.
pub const NEW_ITEM_PLACEHOLDER: &str = "작업 아이템 입력";

/// Message shown when a blank item is submitted.
pub const EMPTY_ITEM_ERROR: &str = "빈 작업 아이템은 입력할 수 없습니다";

const STYLE: &str = "
        body { margin: 0; font-family: sans-serif; }
        .container { max-width: 720px; margin: 0 auto; padding: 0 16px; }
        .jumbotron { text-align: center; padding: 48px 0 24px; }
        .form-control { display: block; box-sizing: border-box; width: 100%; margin: 0 auto; padding: 10px 16px; font-size: 18px; }
        .has-error .help-block { color: #a94442; }
        .table { width: 100%; border-collapse: collapse; }
        .table td { padding: 8px; border-top: 1px solid #ddd; }
";

/// Renders the home page, from which a new list is started.
#[must_use]
pub fn home_page(error: Option<&str>) -> String {
    layout("작업 목록 시작", "/lists/new", error, "")
}

/// Renders a list page with its items numbered from 1.
#[must_use]
pub fn list_page(list: &TodoList, error: Option<&str>) -> String {
    let mut table = String::from("        <table id=\"id_list_table\" class=\"table\">\n");
    for (n, item) in list.numbered() {
        let _ = writeln!(
            table,
            "            <tr><td>{n}: {}</td></tr>",
            escape(&item.text)
        );
    }
    table.push_str("        </table>\n");

    let action = format!("{}add_item", list.id.url());
    layout("작업 목록", &action, error, &table)
}

/// Renders a bare error page.
#[must_use]
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!("        <p>{}</p>\n", escape(message));
    document(title, &body)
}

fn layout(header: &str, action: &str, error: Option<&str>, table: &str) -> String {
    let mut body = String::new();
    body.push_str("        <div class=\"jumbotron\">\n");
    let _ = writeln!(body, "            <h1>{}</h1>", escape(header));
    let _ = writeln!(body, "            <form method=\"POST\" action=\"{}\">", escape(action));
    let _ = writeln!(
        body,
        "                <input name=\"item_text\" id=\"id_new_item\" class=\"form-control input-lg\" placeholder=\"{NEW_ITEM_PLACEHOLDER}\" autofocus />"
    );
    if let Some(error) = error {
        body.push_str("                <div class=\"form-group has-error\">\n");
        let _ = writeln!(
            body,
            "                    <span class=\"help-block\">{}</span>",
            escape(error)
        );
        body.push_str("                </div>\n");
    }
    body.push_str("            </form>\n");
    body.push_str("        </div>\n");
    body.push_str(table);

    document("To-Do lists", &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"ko\">
<head>
    <meta charset=\"utf-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
    <title>{title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class=\"container\">
{body}    </div>
</body>
</html>
",
        title = escape(title),
    )
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
