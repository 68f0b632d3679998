//! Server-rendered HTML pages.
//!
//! Plain string building, no template engine. Every user-derived value
//! goes through [`html_escape`] before landing in markup.

use makan_core::models::FoodHistoryEntry;
use makan_core::recommend::Recommendation;

pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} - makan</title>\n</head>\n<body>\n<nav><a href=\"/\">BMR</a> | <a href=\"/upload\">Upload</a> | <a href=\"/history\">History</a> | <a href=\"/recommendation\">Recommendation</a></nav>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn flash_block(flash: Option<&str>) -> String {
    match flash {
        Some(msg) => format!("<p class=\"flash\">{}</p>\n", html_escape(msg)),
        None => String::new(),
    }
}

pub fn index_form(flash: Option<&str>) -> String {
    let body = format!(
        "{}<form method=\"post\" action=\"/\">\n<label>Weight (kg): <input name=\"weight\"></label><br>\n<label>Height (cm): <input name=\"height\"></label><br>\n<label>Age (years): <input name=\"age\"></label><br>\n<button type=\"submit\">Calculate</button>\n</form>",
        flash_block(flash)
    );
    layout("Daily Calorie Calculator", &body)
}

pub fn bmr_result(bmr: i64) -> String {
    let body =
        format!("<p>Your estimated basal metabolic rate is <strong>{bmr}</strong> kcal/day.</p>");
    layout("Your BMR", &body)
}

pub fn upload_form(flash: Option<&str>) -> String {
    let body = format!(
        "{}<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n<input type=\"file\" name=\"file\">\n<button type=\"submit\">Upload</button>\n</form>",
        flash_block(flash)
    );
    layout("Upload a Food Photo", &body)
}

pub fn upload_result(food_name: &str, calories: i64) -> String {
    let body = format!(
        "<p>Detected food: <strong>{}</strong></p>\n<p>Estimated calories: <strong>{calories}</strong></p>",
        html_escape(food_name)
    );
    layout("Classification Result", &body)
}

pub fn history_page(entries: &[FoodHistoryEntry]) -> String {
    let body = if entries.is_empty() {
        "<p>No entries yet.</p>".to_string()
    } else {
        let mut rows = String::new();
        for entry in entries {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&entry.food_name),
                entry.calories,
                html_escape(&entry.created_at)
            ));
        }
        format!(
            "<table>\n<tr><th>Food</th><th>Calories</th><th>Date</th></tr>\n{rows}</table>"
        )
    };
    layout("Food History", &body)
}

pub fn recommendation_page(rec: &Recommendation) -> String {
    let average = rec.average_calories as i64; // truncate for display
    let body = format!(
        "<p>Average calories per entry: <strong>{average}</strong></p>\n<p>{}</p>",
        html_escape(rec.message)
    );
    layout("Dietary Recommendation", &body)
}

pub fn error_page() -> String {
    layout("Something went wrong", "<p>Internal server error.</p>")
}
