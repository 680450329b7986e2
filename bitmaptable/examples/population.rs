use std::sync::Arc;
use std::thread;

use bitmaptable::{BitTable, Bitmaptable, SyncBitmaptable, TableError};
use tracing_subscriber::EnvFilter;

const SUBSCRIBED: usize = 0;
const BANNED: usize = 1;

fn main() -> Result<(), TableError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Bitmap Table Examples ===\n");

    example_flags()?;
    example_bulk_copy()?;
    example_shared()?;

    Ok(())
}

fn example_flags() -> Result<(), TableError> {
    println!("Example 1: Two flags for a million users");

    let users = bitmaptable::new(1_000_000, 2)?;
    users.set(42, SUBSCRIBED, true)?;
    users.set(42, BANNED, false)?;
    users.set(999_999, BANNED, true)?;

    println!("  user 42 subscribed: {}", users.get(42, SUBSCRIBED)?);
    println!("  user 999999 banned: {}", users.get(999_999, BANNED)?);
    println!("  memory: {} bytes", users.data(false).len());

    match users.get(1_000_000, SUBSCRIBED) {
        Err(e) => println!("  lookup past the end: {e}"),
        Ok(v) => println!("  unexpected value {v}"),
    }
    println!();

    Ok(())
}

fn example_bulk_copy() -> Result<(), TableError> {
    println!("Example 2: Dump and reload");

    let table = bitmaptable::new(16, 4)?;
    fill_diagonal(table.as_ref())?;

    let dump = table.data(true).into_vec();
    let restored = Bitmaptable::from_bytes(16, 4, dump)?;
    println!("  restored {} set cells", restored.count_ones());
    println!();

    Ok(())
}

fn example_shared() -> Result<(), TableError> {
    println!("Example 3: Shared between threads");

    let table: Arc<dyn BitTable + Send + Sync> = Arc::from(bitmaptable::new_ts(10_000, 4)?);
    let handles: Vec<_> = (0..4)
        .map(|column| {
            let table = Arc::clone(&table);
            thread::spawn(move || -> Result<(), TableError> {
                for row in (column..10_000).step_by(4) {
                    table.set(row, column, true)?;
                }
                Ok(())
            })
        })
        .collect();

    for h in handles {
        h.join().expect("worker panicked")?;
    }
    let set_cells: u32 = table.data(true).iter().map(u8::count_ones).sum();
    println!("  set cells: {set_cells}");

    let shared = SyncBitmaptable::from(Bitmaptable::from_bytes(10_000, 4, table.data(true).into_vec())?);
    println!("  reloaded into a shared table: {} set cells", shared.count_ones());

    Ok(())
}

fn fill_diagonal(table: &dyn BitTable) -> Result<(), TableError> {
    for row in 0..table.rows() {
        table.set(row, row % table.columns(), true)?;
    }
    Ok(())
}
