//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasknest_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasknest_core::db::open_cache_db_in_memory;
use tasknest_core::{
    completion_rate, LocalCacheRepository, Priority, TaskDraft, TaskService,
};

fn main() {
    match smoke() {
        Ok((count, rate)) => {
            println!("tasknest_core version={}", tasknest_core::core_version());
            println!("tasknest_core tasks={count} completion_rate={rate}");
        }
        Err(err) => {
            eprintln!("tasknest_core smoke failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Runs one create/complete cycle against an in-memory cache.
fn smoke() -> Result<(usize, u32), Box<dyn std::error::Error>> {
    let conn = open_cache_db_in_memory()?;
    let repo = LocalCacheRepository::new(&conn);
    let mut service = TaskService::new(repo)?;

    let task = service.create(TaskDraft::new("smoke probe", Priority::Medium))?;
    service.set_completed(&task.identifier, true)?;

    Ok((service.list().len(), completion_rate(service.list())))
}
