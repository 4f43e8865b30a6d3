//! Text rendering of the list, the detail view and toasts.
//!
//! ```text
//!   ID  Name            Email              Phone
//!   1   Leanne Graham   Sincere@april.biz  1-770-736-8031 x56442
//! ```

use crate::detail::DetailView;
use crate::model::UserRecord;
use crate::notify::{Toast, ToastKind};

const MAX_COLUMN: usize = 30;

/// Format the visible rows, or the spinner line while loading.
pub fn format_user_table(users: &[&UserRecord], loading: bool) -> String {
    if loading {
        return "⏳ Loading users...".to_string();
    }
    if users.is_empty() {
        return "  (no users)".to_string();
    }

    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|u| {
            [
                u.id.to_string(),
                truncate_str(&u.profile.name, MAX_COLUMN),
                truncate_str(&u.profile.email, MAX_COLUMN),
                truncate_str(&u.profile.phone, MAX_COLUMN),
            ]
        })
        .collect();

    let header = ["ID", "Name", "Email", "Phone"].map(String::from);
    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(format_row(&header, &widths));
    for row in &rows {
        out.push(format_row(row, &widths));
    }
    out.join("\n")
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    format!("  {}", parts.join("  ").trim_end())
}

pub fn format_detail(view: &DetailView) -> String {
    match view {
        DetailView::NotFound => "User not found".to_string(),
        DetailView::Found(_) => {
            let mut out = vec!["User Details".to_string()];
            for (label, value) in view.rows() {
                out.push(format!("  {:<9} {}", format!("{}:", label), value));
            }
            out.join("\n")
        }
    }
}

pub fn format_toast(toast: &Toast) -> String {
    let symbol = match toast.kind {
        ToastKind::Success => "✓",
        ToastKind::Error => "✗",
    };
    format!("{} {}", symbol, toast.message)
}

/// Truncate to `max_len` characters with an ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
