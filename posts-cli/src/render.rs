use std::fmt::Write as _;

use posts_client::Post;
use posts_manager::{DELETE_PROMPT, Dialog, Draft, PostsScreen, RESET_PROMPT, toggle_prompt};

const HEADERS: [&str; 6] = ["#", "id", "title", "image", "created_at", "status"];

fn row_cells(index: usize, post: &Post) -> [String; 6] {
    [
        (index + 1).to_string(),
        post.id.to_string(),
        post.title.clone(),
        post.image.clone(),
        post.created_at.to_string(),
        post.status.label().to_string(),
    ]
}

/// Таблица постов с порядковым номером строки, начиная с 1.
pub(crate) fn render_table(posts: &[Post]) -> String {
    let rows: Vec<[String; 6]> = posts
        .iter()
        .enumerate()
        .map(|(index, post)| row_cells(index, post))
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", separator.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(постов нет)\n");
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

fn render_draft(out: &mut String, draft: &Draft) {
    let created_at = draft
        .created_at
        .map(|date| date.to_string())
        .unwrap_or_default();
    let _ = writeln!(out, "  title:      {}", draft.title);
    let _ = writeln!(out, "  image:      {}", draft.image);
    let _ = writeln!(out, "  created_at: {created_at}");
}

/// Открытый диалог, если он есть.
pub(crate) fn render_dialog(screen: &PostsScreen) -> Option<String> {
    let mut out = String::new();
    match screen.dialog() {
        Dialog::None => return None,
        Dialog::ConfirmToggle(post) => {
            let _ = writeln!(out, "Подтверждение [{}] {}", post.id, post.title);
            let _ = writeln!(out, "{} (yes/no)", toggle_prompt(post.status));
        }
        Dialog::ConfirmDelete(post) => {
            let _ = writeln!(out, "Подтверждение [{}] {}", post.id, post.title);
            let _ = writeln!(out, "{DELETE_PROMPT} (yes/no)");
        }
        Dialog::AddForm => {
            out.push_str("Новый пост\n");
            render_draft(&mut out, screen.draft());
            if let Some(err) = screen.form_error() {
                let _ = writeln!(out, "  ! {err}");
            }
            out.push_str("  (title|image|date <значение>, publish, reset, close)\n");
        }
        Dialog::ConfirmReset => {
            render_draft(&mut out, screen.draft());
            let _ = writeln!(out, "{RESET_PROMPT} (yes/no)");
        }
    }
    Some(out)
}

/// Полный экран: поиск, ошибка последнего запроса, таблица и диалог.
pub(crate) fn render_screen(screen: &PostsScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Поиск: \"{}\"", screen.search());
    if let Some(notice) = screen.notice() {
        let _ = writeln!(out, "Ошибка: {notice}");
    }
    out.push_str(&render_table(screen.posts()));
    if let Some(dialog) = render_dialog(screen) {
        out.push('\n');
        out.push_str(&dialog);
    }
    out
}
