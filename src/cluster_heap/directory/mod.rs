mod entry_iter;

use core::fmt::{Display, Formatter, Result};

use super::context::Context;
use crate::error::OperationError;
use crate::region::data::datetime::{Date, Time};
use crate::region::data::entry::DirectoryEntry;
use crate::region::data::name::{matches, ShortName};
use crate::types::ClusterID;
pub use entry_iter::EntryIter;

/// Where a directory's slots live
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Region {
    /// Fixed-size root area between the FATs and the data region
    #[default]
    Root,
    /// Cluster chain of a subdirectory, starting at this cluster
    Chain(ClusterID),
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ListOptions {
    /// Leave out `.` and `..`, as display callers want
    pub hide_dot_entries: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    File,
    Directory,
}

/// One formatted row of a directory listing
#[derive(Clone, Debug)]
pub struct Listing {
    pub name: ShortName,
    pub kind: Kind,
    pub size: u32,
    pub modified_date: Date,
    pub modified_time: Time,
}

impl From<DirectoryEntry<'_>> for Listing {
    fn from(entry: DirectoryEntry<'_>) -> Self {
        let kind = if entry.is_directory() { Kind::Directory } else { Kind::File };
        Self {
            name: entry.name(),
            kind,
            size: entry.file_size(),
            modified_date: entry.modified_date(),
            modified_time: entry.modified_time(),
        }
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:<12} ", self.name.as_str())?;
        match self.kind {
            Kind::Directory => write!(f, "{:>10}", "<DIR>")?,
            Kind::File => write!(f, "{:>10}", self.size)?,
        }
        write!(f, " {} {}", self.modified_date, self.modified_time)
    }
}

fn is_dot_entry(entry: &DirectoryEntry) -> bool {
    entry.raw_name()[0] == b'.'
}

/// Slots that stand for an actual file or directory
fn is_listable(entry: &DirectoryEntry, options: ListOptions) -> bool {
    if entry.is_deleted() || entry.is_long_name() || entry.is_volume_label() {
        return false;
    }
    !(options.hide_dot_entries && is_dot_entry(entry))
}

pub(crate) fn iterate(context: Context<'_>, region: Region) -> EntryIter<'_> {
    EntryIter::new(context, region)
}

pub(crate) fn list(
    context: Context<'_>,
    region: Region,
    options: ListOptions,
) -> impl Iterator<Item = Listing> + '_ {
    iterate(context, region).filter(move |entry| is_listable(entry, options)).map(Listing::from)
}

/// Case-insensitive lookup of a formatted 8.3 name
pub(crate) fn find<'a>(
    context: Context<'a>,
    region: Region,
    name: &str,
    options: ListOptions,
) -> Option<DirectoryEntry<'a>> {
    let mut iter = iterate(context, region).filter(|entry| is_listable(entry, options));
    let option = iter.find(|entry| matches(&entry.name(), name));
    trace!("Lookup {} in {:?}: {:?}", name, region, option);
    option
}

/// Region of a directory entry's contents.
/// First cluster 0 maps to the root region, as writers record for `..` of a
/// first-level directory; `.` entries carrying 0 are treated the same way.
pub(crate) fn enter(entry: &DirectoryEntry) -> core::result::Result<Region, OperationError> {
    if !entry.is_directory() {
        return Err(OperationError::NotADirectory);
    }
    let cluster_id = entry.first_cluster();
    match u16::from(cluster_id) {
        0 => Ok(Region::Root),
        _ => Ok(Region::Chain(cluster_id)),
    }
}
