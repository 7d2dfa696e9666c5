pub mod add;
pub mod audit;
pub mod calc;
pub mod config;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod project;
pub mod resolve;
pub mod submit;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::calculation::CalculationResult;
use crate::ui::messages::{bullet, success, warning};
use crate::utils::formatting::{mins2readable, money};
use crate::utils::time::format_hours;

/// Open the configured database, bringing its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Human-readable rendering of an engine result.
pub(crate) fn print_calculation(id: i64, result: &CalculationResult, currency: &str) {
    let line = format!(
        "Timecard #{}: {} h ({} worked), break {} min, pay {}",
        id,
        format_hours(result.total_hours),
        mins2readable((result.total_hours * 60.0).round() as i64, false, true),
        result.break_duration,
        money(result.total_pay, currency)
    );

    if result.is_valid {
        success(line);
    } else {
        warning(format!("Timecard #{} has validation errors:", id));
        for e in &result.validation_errors {
            bullet(e);
        }
    }
}
