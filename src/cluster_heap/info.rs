use core::fmt::{Display, Formatter, Result};

use crate::fat::{Chain, ChainEnd, ClusterMap};
use crate::region::data::datetime::{Date, Time};
use crate::region::data::entry::{Attributes, DirectoryEntry};
use crate::region::data::name::ShortName;
use crate::types::ClusterID;

/// Everything a directory entry records, plus its resolved cluster chain
#[derive(Clone, Debug)]
pub struct FileInfo {
    pub name: ShortName,
    pub attributes: Attributes,
    pub size: u32,
    pub creation_time_tenths: u8,
    pub created: (Date, Time),
    pub accessed: Date,
    pub modified: (Date, Time),
    pub first_cluster: ClusterID,
    pub chain: Chain,
}

impl FileInfo {
    pub(crate) fn new(entry: &DirectoryEntry, fat: &ClusterMap) -> Self {
        Self {
            name: entry.name(),
            attributes: entry.attributes(),
            size: entry.file_size(),
            creation_time_tenths: entry.creation_time_tenths(),
            created: (entry.creation_date(), entry.creation_time()),
            accessed: entry.access_date(),
            modified: (entry.modified_date(), entry.modified_time()),
            first_cluster: entry.first_cluster(),
            chain: fat.chain(entry.first_cluster()),
        }
    }
}

fn flag(f: &mut Formatter<'_>, name: &str, set: bool) -> Result {
    writeln!(f, "  {}: {}", name, if set { "yes" } else { "no" })
}

impl Display for FileInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Name: {}", self.name.as_str())?;
        writeln!(f, "Attributes: 0x{:02x}", u8::from(self.attributes))?;
        flag(f, "Read only", self.attributes.read_only())?;
        flag(f, "Hidden", self.attributes.hidden())?;
        flag(f, "System", self.attributes.system())?;
        flag(f, "Volume label", self.attributes.volume_label())?;
        flag(f, "Directory", self.attributes.directory())?;
        flag(f, "Archive", self.attributes.archive())?;
        writeln!(f, "Size: {}", self.size)?;
        let (date, time) = self.created;
        let tenths = self.creation_time_tenths;
        writeln!(f, "Created: {} {} (+{} ms)", date, time, tenths as u32 * 10)?;
        writeln!(f, "Accessed: {}", self.accessed)?;
        writeln!(f, "Modified: {} {}", self.modified.0, self.modified.1)?;
        writeln!(f, "First cluster: {}", self.first_cluster)?;
        write!(f, "Clusters:")?;
        for cluster_id in self.chain.clusters.iter() {
            write!(f, " {}", cluster_id)?;
        }
        match self.chain.end {
            ChainEnd::End => writeln!(f),
            ChainEnd::Corrupted => writeln!(f, " [bad cluster]"),
            ChainEnd::Free => writeln!(f, " [free cluster]"),
            ChainEnd::Invalid(value) => writeln!(f, " [invalid 0x{:04x}]", value),
            ChainEnd::Cycle => writeln!(f, " [loop]"),
        }
    }
}
