use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

use tessera_core::WindowHandle;

#[derive(Args)]
pub struct ListArgs {
    /// Include windows that would not be tracked
    #[arg(long)]
    pub all: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One enumerated window.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub handle: WindowHandle,
    pub title: String,
    pub class: String,
    pub manageable: bool,
}

#[cfg(windows)]
pub fn execute(args: &ListArgs) {
    let rows = match collect(args.all) {
        Ok(rows) => rows,
        Err(e) => super::fail(e),
    };
    print(&rows, args);
}

#[cfg(not(windows))]
pub fn execute(_args: &ListArgs) {
    super::unsupported("list");
}

#[cfg(windows)]
fn collect(all: bool) -> tessera_core::Result<Vec<Row>> {
    use tessera_core::{WindowSystem, is_manageable};
    use tessera_windows::{Win32System, Window};

    let system = Win32System::new(false);
    let rows = system
        .enumerate_top_level_windows()?
        .into_iter()
        .map(|handle| (handle, is_manageable(&system, handle)))
        .filter(|(_, manageable)| all || *manageable)
        .map(|(handle, manageable)| {
            let window = Window::from_handle(handle);
            Row {
                handle,
                title: window.title(),
                class: window.class(),
                manageable,
            }
        })
        .collect();
    Ok(rows)
}

#[cfg_attr(not(windows), allow(dead_code))]
fn print(rows: &[Row], args: &ListArgs) {
    if args.json {
        match render_json(rows) {
            Ok(json) => println!("{json}"),
            Err(e) => super::fail(e),
        }
        return;
    }

    println!("{}", render_table(rows, args.all));
    let tracked = rows.iter().filter(|r| r.manageable).count();
    println!("\n{tracked} of {} windows would be tracked", rows.len());
}

fn render_json(rows: &[Row]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

fn render_table(rows: &[Row], with_eligibility: bool) -> Table {
    let mut header = vec![Cell::new("Handle"), Cell::new("Title"), Cell::new("Class")];
    if with_eligibility {
        header.push(Cell::new("Tracked"));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for row in rows {
        let mut cells = vec![
            Cell::new(row.handle),
            Cell::new(&row.title),
            Cell::new(&row.class),
        ];
        if with_eligibility {
            cells.push(Cell::new(if row.manageable { "yes" } else { "no" }));
        }
        table.add_row(cells);
    }
    table
}
