#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rtimecard::models::timecard::{TimecardDay, TimecardStatus};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rtc() -> Command {
    cargo_bin_cmd!("rtimecard")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimecard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a test DB through the CLI
pub fn init_db(db_path: &str) {
    rtc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// `HH:MM` on the reference day 2025-09-01
pub fn at(hhmm: &str) -> NaiveDateTime {
    let t = NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid time");
    day(2025, 9, 1).and_time(t)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Draft on 2025-09-01 with the given shift and optional break.
pub fn draft(
    id: i64,
    check_in: &str,
    check_out: &str,
    brk: Option<(&str, &str)>,
    rate: f64,
) -> TimecardDay {
    let mut tc = TimecardDay::new_draft("talent-1", "proj-1", day(2025, 9, 1), rate)
        .with_shift(Some(at(check_in)), Some(at(check_out)));
    if let Some((s, e)) = brk {
        tc = tc.with_break(Some(at(s)), Some(at(e)));
    }
    tc.id = id;
    tc
}

/// Draft whose totals have already been computed, as stored after `add`.
pub fn computed(id: i64, hours: f64, break_minutes: i64, rate: f64) -> TimecardDay {
    let mut tc = TimecardDay::new_draft("talent-1", "proj-1", day(2025, 9, 1), rate);
    tc.id = id;
    tc.total_hours = hours;
    tc.break_duration = break_minutes;
    tc.total_pay = hours * rate;
    tc
}

pub fn with_status(mut tc: TimecardDay, status: TimecardStatus) -> TimecardDay {
    tc.status = status;
    tc
}
