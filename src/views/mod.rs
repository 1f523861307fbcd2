//! Server-rendered HTML pages.
//!
//! Every user-supplied string goes through [`escape`] before it reaches markup.

use std::fmt::Write;

use axum::{http::StatusCode, response::Html};

use crate::database::FeedbackEntity;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, flashes: &[String], body: &str) -> Html<String> {
    let mut notices = String::new();
    if !flashes.is_empty() {
        notices.push_str("<ul class=\"flashes\">");
        for message in flashes {
            let _ = write!(notices, "<li>{}</li>", escape(message));
        }
        notices.push_str("</ul>");
    }

    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n\
         <nav><a href=\"/\">Submit feedback</a> | <a href=\"/view_feedback\">View feedback</a> | <a href=\"/staff/login\">Staff</a></nav>\n\
         <h1>{title}</h1>\n{notices}\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

pub fn index(flashes: &[String]) -> Html<String> {
    layout(
        "Submit Feedback",
        flashes,
        r#"<form method="post" action="/submit">
<label>Name <input name="name"></label>
<label>Department <input name="department"></label>
<label>Level <input name="level"></label>
<label>Feedback <textarea name="content"></textarea></label>
<button type="submit">Submit</button>
</form>"#,
    )
}

fn feedback_table(records: &[FeedbackEntity], with_reply_form: bool) -> String {
    if records.is_empty() {
        return "<p>No feedback yet.</p>".to_string();
    }

    let mut rows = String::from(
        "<table>\n<tr><th>#</th><th>Name</th><th>Department</th><th>Level</th><th>Feedback</th><th>Reply</th></tr>\n",
    );
    for record in records {
        let reply = match (&record.reply, with_reply_form) {
            (reply, true) => format!(
                "{}<form method=\"post\" action=\"/reply/{}\"><textarea name=\"reply\"></textarea><button type=\"submit\">Reply</button></form>",
                reply.as_deref().map(escape).unwrap_or_default(),
                record.id
            ),
            (Some(reply), false) => escape(reply),
            (None, false) => "<em>No reply yet</em>".to_string(),
        };
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.id,
            escape(&record.name),
            escape(&record.department),
            escape(&record.level),
            escape(&record.content),
            reply
        );
    }
    rows.push_str("</table>");
    rows
}

pub fn view_feedback(flashes: &[String], records: &[FeedbackEntity]) -> Html<String> {
    layout("All Feedback", flashes, &feedback_table(records, false))
}

pub fn staff_dashboard(flashes: &[String], records: &[FeedbackEntity]) -> Html<String> {
    let body = format!(
        "<p><a href=\"/staff/logout\">Log out</a></p>\n{}",
        feedback_table(records, true)
    );
    layout("Staff Dashboard", flashes, &body)
}

pub fn staff_login(flashes: &[String]) -> Html<String> {
    layout(
        "Staff Login",
        flashes,
        r#"<form method="post" action="/staff/login">
<label>Username <input name="username"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log in</button>
</form>
<p><a href="/staff/register">Register</a></p>"#,
    )
}

pub fn staff_register(flashes: &[String]) -> Html<String> {
    layout(
        "Staff Registration",
        flashes,
        r#"<form method="post" action="/staff/register">
<label>Username <input name="username"></label>
<label>Password <input type="password" name="password"></label>
<label>Confirm password <input type="password" name="confirm"></label>
<button type="submit">Register</button>
</form>"#,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(title, &[], &format!("<p>{}</p>", escape(message)))
}
