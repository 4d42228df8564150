use core::fmt::{Display, Formatter, Result};

use displaydoc::Display as DisplayDoc;
use thiserror::Error as ThisError;

use crate::types::ClusterID;

/// Boot sector can not describe a FAT16 layout
#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum LayoutError {
    /// Boot sector truncated to {0} bytes
    Truncated(usize),
    /// Bytes per sector is zero
    ZeroBytesPerSector,
    /// Sectors per cluster is zero
    ZeroSectorsPerCluster,
    /// No FAT copy declared
    NoFAT,
    /// FAT size is zero
    ZeroFATSize,
    /// Metadata regions exceed total sector count {0}
    Overlap(u32),
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum DataError {
    /// FAT copy {0} differs from the first FAT
    FATMismatch(u8),
    /// Cluster {0} is marked bad in the FAT
    CorruptedChain(ClusterID),
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum OperationError {
    /// No such file or directory
    NotFound,
    /// Not a directory
    NotADirectory,
    /// Is a directory
    IsADirectory,
    /// Entry is deleted or unallocated
    InvalidEntry,
}

#[derive(Copy, Clone, Debug, DisplayDoc, ThisError, PartialEq, Eq)]
pub enum AllocationError {
    /// Unable to allocate {0} bytes
    OutOfMemory(usize),
}

/// `E` is the error type of the image reader or of the output sink
#[derive(Debug)]
pub enum Error<E> {
    IO(E),
    Layout(LayoutError),
    Data(DataError),
    Operation(OperationError),
    Allocation(AllocationError),
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::IO(e) => write!(f, "IO({})", e),
            Self::Layout(e) => write!(f, "Layout({})", e),
            Self::Data(e) => write!(f, "Data({})", e),
            Self::Operation(e) => write!(f, "Operation({})", e),
            Self::Allocation(e) => write!(f, "Allocation({})", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug + Display> std::error::Error for Error<E> {}

impl<E> From<LayoutError> for Error<E> {
    fn from(error: LayoutError) -> Self {
        Self::Layout(error)
    }
}

impl<E> From<DataError> for Error<E> {
    fn from(error: DataError) -> Self {
        Self::Data(error)
    }
}

impl<E> From<OperationError> for Error<E> {
    fn from(error: OperationError) -> Self {
        Self::Operation(error)
    }
}

impl<E> From<AllocationError> for Error<E> {
    fn from(error: AllocationError) -> Self {
        Self::Allocation(error)
    }
}
