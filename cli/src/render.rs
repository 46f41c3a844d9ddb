//! Plain-text views of the todo list.

use std::fmt::Write;

use todo_core::{Notice, Operation, Todo, TodoListState};

const HEADERS: [&str; 3] = ["ID", "Title", "Description"];

/// The list as an aligned table with a `Total` footer.
pub fn table(state: &TodoListState) -> String {
    let rows: Vec<[String; 3]> = state
        .todos()
        .iter()
        .map(|t| [t.id.to_string(), t.title.clone(), t.description.clone()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = writeln!(out, "Total: {} task(s)", state.len());
    out
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Single-item view: title on the first line, description below.
pub fn detail(todo: &Todo) -> String {
    if todo.description.is_empty() {
        format!("#{} {}\n", todo.id, todo.title)
    } else {
        format!("#{} {}\n\n{}\n", todo.id, todo.title, todo.description)
    }
}

pub fn notice(notice: &Notice) -> String {
    let what = match notice.operation {
        Operation::Load => "could not load todos".to_string(),
        Operation::Create => "could not create todo".to_string(),
        Operation::Delete(id) => format!("could not delete todo {id}"),
    };
    format!("{what}: {}", notice.message)
}
