use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::errors::AppResult;
use ansi_term::Colour;

use super::open_pool;

/// Colour by operation name
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "edit" => Colour::Yellow,
        "calc" | "resolve" => Colour::Cyan,
        "submit" => Colour::Blue,
        "export" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = open_pool(cfg)?;
        let rows = load_log(&pool.conn)?;

        let width = rows
            .iter()
            .map(|r| r.operation.len() + r.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(40);

        for r in rows {
            let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(r.date);

            let op_target = if r.target.is_empty() {
                r.operation.clone()
            } else {
                format!("{} ({})", r.operation, r.target)
            };

            println!(
                "{:>4}  {}  {}  {}",
                r.id,
                date,
                color_for_operation(&r.operation).paint(format!("{:<width$}", op_target)),
                r.message
            );
        }
    }
    Ok(())
}
