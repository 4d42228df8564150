// Hand-built FAT16 images for unit tests.
// Layout: boot sector, two 1-sector FATs, root directory, 32 data clusters.
// The constants describe the default geometry: 512-byte sectors, 1 sector per cluster, 16 root
// entries.

use crate::io::memory::MemoryIO;
use crate::region::data::entry::{RawEntry, ENTRY_SIZE};
use crate::Volume;

pub(crate) const SECTOR_SIZE: usize = 512;
pub(crate) const CLUSTER_SIZE: usize = SECTOR_SIZE;
pub(crate) const FAT0: usize = SECTOR_SIZE;
pub(crate) const FAT1: usize = 2 * SECTOR_SIZE;
pub(crate) const ROOT: usize = 3 * SECTOR_SIZE;
pub(crate) const DATA: usize = 4 * SECTOR_SIZE;

const DATA_CLUSTERS: usize = 32;

#[derive(Copy, Clone, Debug)]
pub(crate) struct Geometry {
    pub bytes_per_sector: usize,
    pub sectors_per_cluster: usize,
    pub root_entries: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Self { bytes_per_sector: SECTOR_SIZE, sectors_per_cluster: 1, root_entries: 16 }
    }
}

impl Geometry {
    pub fn cluster_size(&self) -> usize {
        self.bytes_per_sector * self.sectors_per_cluster
    }

    pub fn fat_offset(&self, copy: usize) -> usize {
        (1 + copy) * self.bytes_per_sector
    }

    pub fn root_offset(&self) -> usize {
        self.fat_offset(2)
    }

    /// Right after the last root entry, not rounded up to a sector
    pub fn data_offset(&self) -> usize {
        self.root_offset() + self.root_entries * ENTRY_SIZE
    }

    pub fn total_sectors(&self) -> usize {
        let root_sectors = (self.root_entries * ENTRY_SIZE).div_ceil(self.bytes_per_sector);
        3 + root_sectors + DATA_CLUSTERS * self.sectors_per_cluster
    }
}

pub(crate) fn entry(name: &[u8; 11], attributes: u8, cluster: u16, size: u32) -> RawEntry {
    let mut raw = [0u8; ENTRY_SIZE];
    raw[..11].copy_from_slice(name);
    raw[11] = attributes;
    raw[26..28].copy_from_slice(&cluster.to_le_bytes());
    raw[28..32].copy_from_slice(&size.to_le_bytes());
    raw
}

pub(crate) struct ImageBuilder {
    image: Vec<u8>,
    geometry: Geometry,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::with_geometry(Geometry::default())
    }

    pub fn with_geometry(geometry: Geometry) -> Self {
        let total_sectors = geometry.total_sectors();
        let mut image = vec![0u8; total_sectors * geometry.bytes_per_sector];
        image[0..3].copy_from_slice(&hex!("EB 3C 90"));
        image[3..11].copy_from_slice(b"MSWIN4.1");
        image[11..13].copy_from_slice(&(geometry.bytes_per_sector as u16).to_le_bytes());
        image[13] = geometry.sectors_per_cluster as u8;
        image[14..16].copy_from_slice(&1u16.to_le_bytes());
        image[16] = 2; // FAT copies
        image[17..19].copy_from_slice(&(geometry.root_entries as u16).to_le_bytes());
        image[19..21].copy_from_slice(&(total_sectors as u16).to_le_bytes());
        image[21] = 0xF8;
        image[22..24].copy_from_slice(&1u16.to_le_bytes());
        image[24..26].copy_from_slice(&32u16.to_le_bytes());
        image[26..28].copy_from_slice(&2u16.to_le_bytes());
        image[36] = 0x80;
        image[38] = 0x29;
        image[39..43].copy_from_slice(&0x1234ABCDu32.to_le_bytes());
        image[43..54].copy_from_slice(b"TESTVOLUME ");
        image[54..62].copy_from_slice(b"FAT16   ");
        image[510..512].copy_from_slice(&hex!("55 AA"));
        Self { image, geometry }.fat(0, 0xFFF8).fat(1, 0xFFFF)
    }

    /// Set a FAT entry in both copies
    pub fn fat(mut self, cluster: u16, value: u16) -> Self {
        for copy in 0..2 {
            let offset = self.geometry.fat_offset(copy) + cluster as usize * 2;
            self.image[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        }
        self
    }

    /// Link clusters in the given order, the last one ending the chain
    pub fn chain(mut self, clusters: &[u16]) -> Self {
        for pair in clusters.windows(2) {
            self = self.fat(pair[0], pair[1]);
        }
        match clusters.last() {
            Some(&last) => self.fat(last, 0xFFFF),
            None => self,
        }
    }

    pub fn root(mut self, slot: usize, raw: RawEntry) -> Self {
        let offset = self.geometry.root_offset() + slot * ENTRY_SIZE;
        self.image[offset..offset + ENTRY_SIZE].copy_from_slice(&raw);
        self
    }

    /// Directory slot within a data cluster
    pub fn slot(mut self, cluster: u16, slot: usize, raw: RawEntry) -> Self {
        let offset = self.cluster_offset(cluster) + slot * ENTRY_SIZE;
        self.image[offset..offset + ENTRY_SIZE].copy_from_slice(&raw);
        self
    }

    pub fn cluster(mut self, cluster: u16, bytes: &[u8]) -> Self {
        let offset = self.cluster_offset(cluster);
        self.image[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Write `content` cluster by cluster into `clusters`
    pub fn spread(mut self, clusters: &[u16], content: &[u8]) -> Self {
        let cluster_size = self.geometry.cluster_size();
        for (&cluster, chunk) in clusters.iter().zip(content.chunks(cluster_size)) {
            self = self.cluster(cluster, chunk);
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.image
    }

    fn cluster_offset(&self, cluster: u16) -> usize {
        self.geometry.data_offset() + (cluster as usize - 2) * self.geometry.cluster_size()
    }
}

pub(crate) fn volume(image: Vec<u8>) -> Volume {
    match Volume::load(MemoryIO(image)) {
        Ok(volume) => volume,
        Err(error) => panic!("test image does not load: {:?}", error),
    }
}
