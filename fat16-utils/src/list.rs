use chrono::NaiveDateTime;
use fat16::{to_naive, Kind, ListOptions, Listing, Volume};

use crate::filepath::{open, Node};
use crate::CliError;

fn print(row: &Listing) {
    let kind = if row.kind == Kind::Directory { "d" } else { "-" };
    let datetime: Option<NaiveDateTime> = to_naive(row.modified_date, row.modified_time);
    let modified = match datetime {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("{} {}", row.modified_date, row.modified_time),
    };
    match row.kind {
        Kind::Directory => println!("{} {:>10} {} {}/", kind, "<DIR>", modified, row.name),
        Kind::File => println!("{} {:>10} {} {}", kind, row.size, modified, row.name),
    }
}

pub fn list(volume: &Volume, path: &str, all: bool) -> Result<(), CliError> {
    let walk = open(volume, path)?;
    let region = match walk.node {
        Node::Directory(region, _) => region,
        Node::File(entry) => {
            print(&Listing::from(entry));
            return Ok(());
        }
    };
    println!("Directory of {}", walk.display_path());
    let options = ListOptions { hide_dot_entries: !all };
    let mut count = 0;
    for row in volume.list_directory(region, options) {
        print(&row);
        count += 1;
    }
    log::debug!("{} entries listed", count);
    Ok(())
}
