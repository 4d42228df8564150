/// Boot sector, volume geometry parameters
/// `reserved_sectors` sectors starting at sector 0
pub mod boot;

/// FAT region, `number_of_fats` identical tables of 16-bit cluster links
/// ([`fat_size`][link] * [`number_of_fats`][link]) sectors
///
/// [link]: boot::BootRecord
pub mod fat;

/// Root directory and data region entries
pub mod data;
