#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(all(feature = "async", feature = "std", not(any(feature = "smol", feature = "tokio"))))]
compile_error!("Either smol or tokio must be selected");

extern crate alloc;

#[macro_use]
extern crate hex_literal;
extern crate heapless;
#[macro_use]
extern crate log;

mod cluster_heap;
mod endian;
pub mod error;
mod fat;
pub mod io;
mod region;
#[cfg(test)]
mod test_image;
pub mod types;

use alloc::vec::Vec;
use core::fmt::Debug;

use cluster_heap::context::Context;
use cluster_heap::{directory, merge};
pub use cluster_heap::directory::{EntryIter, Kind, ListOptions, Listing, Region};
pub use cluster_heap::file::Chunks;
pub use cluster_heap::info::FileInfo;
use error::{AllocationError, Error, OperationError};
pub use fat::{Chain, ChainEnd, ClusterMap};
use io::Wrap;
pub use region::boot::BootRecord;
use region::boot::BOOT_SECTOR_SIZE;
#[cfg(feature = "chrono")]
pub use region::data::datetime::to_naive;
pub use region::data::datetime::{Date, Time};
pub use region::data::entry::{Attributes, DirectoryEntry};
use region::data::name;
pub use region::data::name::ShortName;
pub use region::fat::ClusterLink;

/// A FAT16 image loaded into memory. Nothing is read from the image after load.
pub struct Volume {
    boot: BootRecord,
    fat: ClusterMap,
    root: Vec<u8>,
    data: Vec<u8>,
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl Volume {
    /// Read boot record, FAT, root directory and data region.
    /// Any failure drops whatever was already loaded.
    pub async fn load<E: Debug, IO: io::IO<Error = E>>(io: IO) -> Result<Self, Error<E>> {
        let mut io = io.wrap();
        let mut sector = [0u8; BOOT_SECTOR_SIZE];
        io.read(0, &mut sector).await?;
        let boot = BootRecord::parse(&sector)?;
        debug!(
            "{} bytes per sector, {} sectors per cluster, {} FATs of {} sectors, {} root entries",
            boot.bytes_per_sector,
            boot.sectors_per_cluster,
            boot.number_of_fats,
            boot.fat_size,
            boot.max_root_entries
        );
        let fat = ClusterMap::load(&mut io, &boot).await?;

        let mut root = fat::allocate(boot.root_region_size() as usize)?;
        io.read(boot.root_region_offset(), &mut root).await?;
        debug!("Root directory at offset {}", boot.root_region_offset());

        let size = boot.data_region_size();
        let size = usize::try_from(size).map_err(|_| AllocationError::OutOfMemory(usize::MAX))?;
        let mut data = fat::allocate(size)?;
        io.read(boot.data_region_offset(), &mut data).await?;
        let offset = boot.data_region_offset();
        debug!("Data region of {} clusters at offset {}", boot.cluster_count(), offset);
        Ok(Self { boot, fat, root, data })
    }
}

#[cfg(feature = "std")]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl Volume {
    pub async fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error<std::io::Error>> {
        let io = io::std::FileIO::open(path).await.map_err(Error::IO)?;
        Self::load(io).await
    }
}

impl Volume {
    pub(crate) fn context(&self) -> Context<'_> {
        Context { boot: &self.boot, fat: &self.fat, root: &self.root, data: &self.data }
    }

    pub fn boot_record(&self) -> &BootRecord {
        &self.boot
    }

    pub fn cluster_map(&self) -> &ClusterMap {
        &self.fat
    }

    pub fn free_clusters(&self) -> u32 {
        self.fat.free_clusters(self.boot.cluster_count())
    }

    /// Label from the root directory's volume-label entry, else from the boot record
    pub fn volume_label(&self) -> ShortName {
        let option = self.iterate(Region::Root).find(|e| e.in_use() && e.is_volume_label());
        match option {
            Some(entry) => name::label(&entry.raw_name()),
            None => name::label(&self.boot.volume_label),
        }
    }

    /// Every slot of a directory up to its end, deleted and long name slots included
    pub fn iterate(&self, region: Region) -> EntryIter<'_> {
        directory::iterate(self.context(), region)
    }

    pub fn list_directory(
        &self,
        region: Region,
        options: ListOptions,
    ) -> impl Iterator<Item = Listing> + '_ {
        directory::list(self.context(), region, options)
    }

    pub fn find(
        &self,
        region: Region,
        name: &str,
        options: ListOptions,
    ) -> Option<DirectoryEntry<'_>> {
        directory::find(self.context(), region, name, options)
    }

    pub fn resolve(
        &self,
        region: Region,
        name: &str,
    ) -> Result<DirectoryEntry<'_>, OperationError> {
        self.find(region, name, ListOptions::default()).ok_or(OperationError::NotFound)
    }

    pub fn enter(&self, entry: &DirectoryEntry) -> Result<Region, OperationError> {
        directory::enter(entry)
    }

    fn check_file(entry: &DirectoryEntry) -> Result<(), OperationError> {
        if !entry.in_use() || entry.is_long_name() {
            return Err(OperationError::InvalidEntry);
        }
        if entry.is_directory() {
            return Err(OperationError::IsADirectory);
        }
        Ok(())
    }

    /// Content of a file as cluster-sized chunks.
    /// An unassigned first cluster reads as an empty file.
    pub fn read_file(&self, entry: &DirectoryEntry) -> Result<Chunks<'_>, OperationError> {
        Self::check_file(entry)?;
        Ok(Chunks::new(self.context(), entry.first_cluster(), entry.file_size()))
    }

    /// Stream a file into `sink`, returning the number of bytes written.
    /// Chunks passed to `sink` before a failure stay written.
    pub fn stream_file<E, F>(&self, entry: &DirectoryEntry, mut sink: F) -> Result<u64, Error<E>>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let mut written = 0;
        for chunk in self.read_file(entry)? {
            let chunk = chunk?;
            sink(chunk).map_err(Error::IO)?;
            written += chunk.len() as u64;
        }
        Ok(written)
    }

    fn merge_sources(
        &self,
        a: &DirectoryEntry,
        b: &DirectoryEntry,
    ) -> Result<Option<(Chunks<'_>, Chunks<'_>)>, OperationError> {
        let (chunks_a, chunks_b) = (self.read_file(a)?, self.read_file(b)?);
        if !a.first_cluster().valid() || !b.first_cluster().valid() {
            debug!("Merge source without a valid first cluster, nothing to do");
            return Ok(None);
        }
        Ok(Some((chunks_a, chunks_b)))
    }

    /// Interleave lines of `a` and `b` into `sink`.
    /// Returns false without touching `sink` when either file has no valid first cluster.
    pub fn merge<E, F>(
        &self,
        a: &DirectoryEntry,
        b: &DirectoryEntry,
        sink: F,
    ) -> Result<bool, Error<E>>
    where
        F: FnMut(&[u8]) -> Result<(), E>,
    {
        let (a, b) = match self.merge_sources(a, b)? {
            Some(sources) => sources,
            None => return Ok(false),
        };
        merge::merge(a, b, sink)?;
        Ok(true)
    }

    pub fn file_info(&self, entry: &DirectoryEntry) -> FileInfo {
        FileInfo::new(entry, &self.fat)
    }

    /// Release the loaded buffers
    pub fn close(self) {
        let Self { root, data, fat, .. } = self;
        debug!("Close volume, release {} bytes", root.len() + data.len() + fat.len() * 2);
    }
}

#[cfg(feature = "std")]
impl Volume {
    /// Copy a file to `path` on the host. A failed export leaves the bytes written so far.
    pub fn export_file<P: AsRef<std::path::Path>>(
        &self,
        entry: &DirectoryEntry,
        path: P,
    ) -> Result<u64, Error<std::io::Error>> {
        use std::io::Write;

        let chunks = self.read_file(entry)?;
        let mut file = std::fs::File::create(path).map_err(Error::IO)?;
        let mut written = 0;
        for chunk in chunks {
            let chunk = chunk?;
            file.write_all(chunk).map_err(Error::IO)?;
            written += chunk.len() as u64;
        }
        Ok(written)
    }

    /// Interleave lines of `a` and `b` into a new file at `path`.
    /// No file is created when either source has no valid first cluster.
    pub fn merge_files<P: AsRef<std::path::Path>>(
        &self,
        a: &DirectoryEntry,
        b: &DirectoryEntry,
        path: P,
    ) -> Result<bool, Error<std::io::Error>> {
        use std::io::Write;

        let (a, b) = match self.merge_sources(a, b)? {
            Some(sources) => sources,
            None => return Ok(false),
        };
        let mut file = std::fs::File::create(path).map_err(Error::IO)?;
        merge::merge(a, b, |bytes| file.write_all(bytes))?;
        Ok(true)
    }
}
