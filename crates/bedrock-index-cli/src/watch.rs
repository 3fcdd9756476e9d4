//! Watch mode: keep the index current as files change on disk

use bedrock_index_core::{DiskWorkspace, FileIndex, FileType, IndexConfig, Workspace};
use colored::*;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// What a file event did to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Refreshed,
    Removed,
    ConfigReloaded,
    Ignored,
}

/// Populate `file_types`, then apply debounced file events until Ctrl-C
pub fn watch_index(
    runtime: &Runtime,
    index: &FileIndex,
    workspace: &DiskWorkspace,
    file_types: &[FileType],
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    println!(
        "{} {}\n",
        "Watching:".cyan().bold(),
        workspace.root().display()
    );
    populate(runtime, index, file_types)?;

    let (tx, rx) = channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(workspace.root(), RecursiveMode::Recursive)?;

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(Ok(events)) => {
                let mut reload = false;
                for event in &events {
                    match apply_event(index, workspace, config_path, &event.path) {
                        Ok(Change::Refreshed) => {
                            println!("{} {}", "updated".green(), event.path.display())
                        }
                        Ok(Change::Removed) => {
                            println!("{} {}", "removed".yellow(), event.path.display())
                        }
                        Ok(Change::ConfigReloaded) => reload = true,
                        Ok(Change::Ignored) => {}
                        Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                    }
                }
                if reload {
                    println!("{}", "Configuration changed, re-indexing".cyan());
                    populate(runtime, index, file_types)?;
                }
            }
            Ok(Err(e)) => {
                eprintln!("{} {:?}", "Watch error:".red().bold(), e);
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    println!("\n{}", "Stopped watching".dimmed());
    Ok(())
}

fn populate(runtime: &Runtime, index: &FileIndex, file_types: &[FileType]) -> anyhow::Result<()> {
    for &file_type in file_types {
        let ids = runtime.block_on(index.get_identifiers_by_file_type(file_type))?;
        println!("  {:<22} {}", file_type.to_string().bold(), ids.len());
    }
    println!();
    Ok(())
}

/// Apply one changed path to the index.
///
/// Files still on disk are re-extracted, vanished files are dropped. Files
/// the index never cached are left alone; they are picked up by the next
/// full population of their type.
pub fn apply_event(
    index: &FileIndex,
    workspace: &DiskWorkspace,
    config_path: Option<&Path>,
    path: &Path,
) -> anyhow::Result<Change> {
    if config_path.is_some_and(|config| same_file(config, path)) {
        let config = IndexConfig::load(path)?;
        workspace.reconfigure(&config)?;
        index.set_config(config);
        return Ok(Change::ConfigReloaded);
    }

    let Ok(relative) = path.strip_prefix(workspace.root()) else {
        return Ok(Change::Ignored);
    };
    if FileType::detect(relative).is_none() {
        return Ok(Change::Ignored);
    }

    if workspace.exists(path) {
        if index.refresh_cache_for_file(path)? {
            return Ok(Change::Refreshed);
        }
        tracing::debug!("{} is not indexed yet", path.display());
        Ok(Change::Ignored)
    } else if index.delete_file_from_cache(path) {
        Ok(Change::Removed)
    } else {
        Ok(Change::Ignored)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
