use crate::db::pool::DbPool;
use crate::db::queries::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI color for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51),
        "generate" => Colour::Green,
        "verify" => Colour::Blue,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| op.len() + target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(60);

        println!("📜 Internal log:\n");

        for (id, raw_date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            // padding on the visible text, before coloring
            let (visible_len, op_target) = if target.is_empty() {
                (
                    operation.len(),
                    color_for_operation(&operation).paint(operation.as_str()).to_string(),
                )
            } else {
                (
                    operation.len() + target.len() + 3,
                    format!(
                        "{} ({})",
                        color_for_operation(&operation).paint(operation.as_str()),
                        target
                    ),
                )
            };
            let padding = " ".repeat(op_w.saturating_sub(visible_len));

            println!(
                "{:>id_w$}: {} | {}{} => {}",
                id,
                date,
                op_target,
                padding,
                message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
