//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `metas_core` linkage and store bootstrap outside Flutter.
//! - Keep output deterministic for quick local sanity checks.

use metas_core::db::migrations::{current_user_version, latest_version};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("metas_core ping={}", metas_core::ping());
    println!("metas_core version={}", metas_core::core_version());

    match metas_core::open_db_in_memory().and_then(|conn| current_user_version(&conn)) {
        Ok(version) => {
            println!("metas_core schema_version={version}/{}", latest_version());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("metas_core store bootstrap failed: {err}");
            ExitCode::FAILURE
        }
    }
}
