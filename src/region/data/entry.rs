use bitfield::bitfield;
use derive_more::{From, Into};

use super::datetime::{Date, Time};
use super::name::{format83, RawName, ShortName};
use crate::endian::{array_at, u16_at, u32_at};
use crate::types::ClusterID;

pub const ENTRY_SIZE: usize = 32;
pub type RawEntry = [u8; ENTRY_SIZE];

const END_OF_DIRECTORY: u8 = 0x00;
const DELETED: u8 = 0xE5;
const LONG_NAME: u8 = 0x0F;
const LONG_NAME_MASK: u8 = 0x3F;

bitfield! {
    #[derive(Copy, Clone, Default, From, Into, PartialEq, Eq)]
    pub struct Attributes(u8);
    impl Debug;
    pub read_only, _: 0;
    pub hidden, _: 1;
    pub system, _: 2;
    pub volume_label, _: 3;
    pub directory, _: 4;
    pub archive, _: 5;
}

impl Attributes {
    /// Long name continuation slots set read-only, hidden, system and volume-label together
    pub fn long_name(&self) -> bool {
        self.0 & LONG_NAME_MASK == LONG_NAME
    }
}

/// A 32-byte directory slot, borrowed from the loaded root or data region
#[derive(Copy, Clone)]
pub struct DirectoryEntry<'a> {
    bytes: &'a RawEntry,
}

impl<'a> DirectoryEntry<'a> {
    pub(crate) fn new(bytes: &'a RawEntry) -> Self {
        Self { bytes }
    }

    pub fn raw_name(&self) -> RawName {
        array_at(self.bytes, 0)
    }

    pub fn name(&self) -> ShortName {
        format83(&self.raw_name())
    }

    pub fn is_end_of_directory(&self) -> bool {
        self.bytes[0] == END_OF_DIRECTORY
    }

    pub fn is_deleted(&self) -> bool {
        self.bytes[0] == DELETED
    }

    /// Neither the end sentinel nor a deleted slot
    pub fn in_use(&self) -> bool {
        !self.is_end_of_directory() && !self.is_deleted()
    }

    pub fn attributes(&self) -> Attributes {
        Attributes(self.bytes[11])
    }

    pub fn is_long_name(&self) -> bool {
        self.attributes().long_name()
    }

    pub fn is_directory(&self) -> bool {
        !self.is_long_name() && self.attributes().directory()
    }

    pub fn is_volume_label(&self) -> bool {
        !self.is_long_name() && self.attributes().volume_label()
    }

    pub fn creation_time_tenths(&self) -> u8 {
        self.bytes[13]
    }

    pub fn creation_time(&self) -> Time {
        Time::from(u16_at(self.bytes, 14))
    }

    pub fn creation_date(&self) -> Date {
        Date::from(u16_at(self.bytes, 16))
    }

    pub fn access_date(&self) -> Date {
        Date::from(u16_at(self.bytes, 18))
    }

    /// Always zero on FAT16
    pub fn first_cluster_high(&self) -> u16 {
        u16_at(self.bytes, 20)
    }

    pub fn modified_time(&self) -> Time {
        Time::from(u16_at(self.bytes, 22))
    }

    pub fn modified_date(&self) -> Date {
        Date::from(u16_at(self.bytes, 24))
    }

    pub fn first_cluster(&self) -> ClusterID {
        ClusterID::from(u16_at(self.bytes, 26))
    }

    /// Zero for directories
    pub fn file_size(&self) -> u32 {
        u32_at(self.bytes, 28)
    }

    pub fn as_bytes(&self) -> &'a RawEntry {
        self.bytes
    }
}

impl core::fmt::Debug for DirectoryEntry<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("name", &self.name())
            .field("attributes", &self.attributes())
            .field("first_cluster", &self.first_cluster())
            .field("file_size", &self.file_size())
            .finish()
    }
}
