// Boot sector, volume geometry parameters

use core::fmt::{self, Display, Formatter};

use crate::endian::{array_at, u16_at, u32_at};
use crate::error::LayoutError;
use crate::region::data::entry::ENTRY_SIZE;
use crate::types::ClusterID;

pub const BOOT_SECTOR_SIZE: usize = 512;

const SIGNATURE: [u8; 2] = hex!("55 AA");
const EXTENDED_BOOT_SIGNATURE: u8 = 0x29;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BootRecord {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub max_root_entries: u16,
    pub sectors_in_fs: u16, // 0 when the 32-bit count is used
    pub media_type: u8,
    pub fat_size: u16, // unit sector
    pub sectors_per_track: u16,
    pub heads: u16,
    pub sectors_before_start: u32,
    pub sectors_in_fs_large: u32,
    pub drive_number: u8,
    pub boot_signature: u8,
    pub volume_serial_number: u32,
    pub volume_label: [u8; 11],
    pub fs_type: [u8; 8],
    pub signature: [u8; 2],
}

impl BootRecord {
    pub fn parse(bytes: &[u8]) -> Result<Self, LayoutError> {
        if bytes.len() < BOOT_SECTOR_SIZE {
            return Err(LayoutError::Truncated(bytes.len()));
        }
        let record = Self {
            jump_boot: array_at(bytes, 0),
            oem_name: array_at(bytes, 3),
            bytes_per_sector: u16_at(bytes, 11),
            sectors_per_cluster: bytes[13],
            reserved_sectors: u16_at(bytes, 14),
            number_of_fats: bytes[16],
            max_root_entries: u16_at(bytes, 17),
            sectors_in_fs: u16_at(bytes, 19),
            media_type: bytes[21],
            fat_size: u16_at(bytes, 22),
            sectors_per_track: u16_at(bytes, 24),
            heads: u16_at(bytes, 26),
            sectors_before_start: u32_at(bytes, 28),
            sectors_in_fs_large: u32_at(bytes, 32),
            drive_number: bytes[36],
            boot_signature: bytes[38],
            volume_serial_number: u32_at(bytes, 39),
            volume_label: array_at(bytes, 43),
            fs_type: array_at(bytes, 54),
            signature: array_at(bytes, 510),
        };
        record.validate()?;
        if !record.is_signed() {
            warn!("Boot sector signature {:02X?} is not 55 AA", record.signature);
        }
        Ok(record)
    }

    fn validate(&self) -> Result<(), LayoutError> {
        if self.bytes_per_sector == 0 {
            return Err(LayoutError::ZeroBytesPerSector);
        }
        if self.sectors_per_cluster == 0 {
            return Err(LayoutError::ZeroSectorsPerCluster);
        }
        if self.number_of_fats == 0 {
            return Err(LayoutError::NoFAT);
        }
        if self.fat_size == 0 {
            return Err(LayoutError::ZeroFATSize);
        }
        if self.metadata_sectors() > self.total_sectors() as u64 {
            return Err(LayoutError::Overlap(self.total_sectors()));
        }
        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.signature == SIGNATURE
    }

    /// Volume label and fs type fields are only meaningful with the extended signature
    pub fn has_extended_fields(&self) -> bool {
        self.boot_signature == EXTENDED_BOOT_SIGNATURE
    }

    pub fn total_sectors(&self) -> u32 {
        core::cmp::max(self.sectors_in_fs as u32, self.sectors_in_fs_large)
    }

    pub fn cluster_size(&self) -> u32 {
        self.sectors_per_cluster as u32 * self.bytes_per_sector as u32
    }

    pub fn fat_size_bytes(&self) -> u32 {
        self.fat_size as u32 * self.bytes_per_sector as u32
    }

    pub fn fat_region_offset(&self, copy_index: u8) -> u64 {
        let reserved = self.reserved_sectors as u64 * self.bytes_per_sector as u64;
        reserved + copy_index as u64 * self.fat_size_bytes() as u64
    }

    pub fn root_region_offset(&self) -> u64 {
        self.fat_region_offset(0) + self.number_of_fats as u64 * self.fat_size_bytes() as u64
    }

    pub fn root_region_size(&self) -> u32 {
        self.max_root_entries as u32 * ENTRY_SIZE as u32
    }

    pub fn data_region_offset(&self) -> u64 {
        self.root_region_offset() + self.root_region_size() as u64
    }

    /// Byte offset of a cluster within the image, `None` for cluster numbers below 2
    pub fn cluster_offset(&self, cluster_id: ClusterID) -> Option<u64> {
        let index = cluster_id.offset()?;
        Some(self.data_region_offset() + index as u64 * self.cluster_size() as u64)
    }

    fn root_sectors(&self) -> u32 {
        self.root_region_size().div_ceil(self.bytes_per_sector as u32)
    }

    fn metadata_sectors(&self) -> u64 {
        let fats = self.number_of_fats as u64 * self.fat_size as u64;
        self.reserved_sectors as u64 + fats + self.root_sectors() as u64
    }

    pub fn data_sector_count(&self) -> u32 {
        (self.total_sectors() as u64).saturating_sub(self.metadata_sectors()) as u32
    }

    pub fn data_region_size(&self) -> u64 {
        self.data_sector_count() as u64 * self.bytes_per_sector as u64
    }

    pub fn cluster_count(&self) -> u32 {
        self.data_sector_count() / self.sectors_per_cluster as u32
    }

    pub fn volume_label(&self) -> &str {
        trimmed(&self.volume_label)
    }

    pub fn fs_type(&self) -> &str {
        trimmed(&self.fs_type)
    }

    pub fn oem_name(&self) -> &str {
        trimmed(&self.oem_name)
    }
}

fn trimmed(bytes: &[u8]) -> &str {
    let end = bytes.iter().rposition(|&b| b != b' ' && b != 0).map_or(0, |i| i + 1);
    core::str::from_utf8(&bytes[..end]).unwrap_or("")
}

impl Display for BootRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [j0, j1, j2] = self.jump_boot;
        writeln!(f, "Assembly code: {:02x} {:02x} {:02x}", j0, j1, j2)?;
        writeln!(f, "OEM: {}", self.oem_name())?;
        writeln!(f, "Bytes per sector: {}", self.bytes_per_sector)?;
        writeln!(f, "Sectors per cluster: {}", self.sectors_per_cluster)?;
        writeln!(f, "Reserved area size: {}", self.reserved_sectors)?;
        writeln!(f, "Number of FATs: {}", self.number_of_fats)?;
        writeln!(f, "Max files in root: {}", self.max_root_entries)?;
        writeln!(f, "Sectors in FS: {}", self.sectors_in_fs)?;
        writeln!(f, "Media type: 0x{:02x}", self.media_type)?;
        writeln!(f, "Size of FAT: {}", self.fat_size)?;
        writeln!(f, "Sectors per track: {}", self.sectors_per_track)?;
        writeln!(f, "Heads: {}", self.heads)?;
        writeln!(f, "Sectors before start: {}", self.sectors_before_start)?;
        writeln!(f, "Sectors in FS (large): {}", self.sectors_in_fs_large)?;
        writeln!(f, "Drive number: 0x{:02x}", self.drive_number)?;
        writeln!(f, "Boot signature: 0x{:02x}", self.boot_signature)?;
        writeln!(f, "Volume serial number: {}", self.volume_serial_number)?;
        writeln!(f, "Volume label: {}", self.volume_label())?;
        writeln!(f, "FS type label: {}", self.fs_type())?;
        write!(f, "Signature value: 0x{:02x}{:02x}", self.signature[1], self.signature[0])
    }
}
