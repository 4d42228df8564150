use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::endian::u16_at;
use crate::error::{AllocationError, DataError, Error};
use crate::io::{self, Wrapper};
use crate::region::boot::BootRecord;
use crate::region::fat::ClusterLink;
use crate::types::ClusterID;

/// Why a cluster chain walk stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainEnd {
    /// End-of-chain marker
    End,
    /// Bad cluster marker 0xFFF7
    Corrupted,
    /// Chain points to a free cluster
    Free,
    /// Chain points to a reserved cluster or outside the table
    Invalid(u16),
    /// Chain revisits a cluster
    Cycle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub clusters: Vec<ClusterID>,
    pub end: ChainEnd,
}

/// The first FAT, verified identical to every redundant copy
#[derive(Clone, Debug)]
pub struct ClusterMap {
    entries: Vec<u16>,
}

pub(crate) fn allocate(size: usize) -> Result<Vec<u8>, AllocationError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(size).map_err(|_| AllocationError::OutOfMemory(size))?;
    buffer.resize(size, 0);
    Ok(buffer)
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl ClusterMap {
    pub(crate) async fn load<E: Debug, IO: io::IO<Error = E>>(
        io: &mut Wrapper<IO>,
        boot: &BootRecord,
    ) -> Result<Self, Error<E>> {
        let size = boot.fat_size_bytes() as usize;
        let mut first = allocate(size)?;
        io.read(boot.fat_region_offset(0), &mut first).await?;
        if boot.number_of_fats > 1 {
            let mut copy = allocate(size)?;
            for index in 1..boot.number_of_fats {
                io.read(boot.fat_region_offset(index), &mut copy).await?;
                if copy != first {
                    warn!("FAT copy {} differs from the first FAT", index);
                    return Err(DataError::FATMismatch(index).into());
                }
            }
        }
        debug!("{} FAT copies of {} bytes agree", boot.number_of_fats, size);
        Self::from_bytes(&first).map_err(Error::Allocation)
    }
}

impl ClusterMap {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, AllocationError> {
        let length = bytes.len() / 2;
        let mut entries = Vec::new();
        entries.try_reserve_exact(length).map_err(|_| AllocationError::OutOfMemory(length * 2))?;
        entries.extend((0..length).map(|i| u16_at(bytes, i * 2)));
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Successor of `cluster_id`.
    /// `None` means the caller passed a cluster number outside the table, which no on-disk
    /// link state produces; walkers stop there instead of panicking.
    pub fn next(&self, cluster_id: ClusterID) -> Option<ClusterLink> {
        let index = u16::from(cluster_id) as usize;
        self.entries.get(index).map(|&value| ClusterLink::from(value))
    }

    /// Number of free entries among addressable clusters
    pub fn free_clusters(&self, cluster_count: u32) -> u32 {
        let last = core::cmp::min(self.entries.len(), cluster_count as usize + 2);
        let entries = self.entries.get(2..last).unwrap_or(&[]);
        entries.iter().filter(|&&value| value == crate::region::fat::FREE).count() as u32
    }

    /// Walk a chain from `start`, stopping at its terminator, a break or a revisited cluster
    pub fn chain(&self, start: ClusterID) -> Chain {
        let mut clusters = Vec::new();
        if !start.valid() {
            return Chain { clusters, end: ChainEnd::Invalid(start.into()) };
        }
        let mut visited = vec![false; self.entries.len()];
        let mut cluster_id = start;
        let end = loop {
            let index = u16::from(cluster_id) as usize;
            match visited.get_mut(index) {
                Some(true) => break ChainEnd::Cycle,
                Some(seen) => *seen = true,
                None => break ChainEnd::Invalid(cluster_id.into()),
            }
            clusters.push(cluster_id);
            match self.next(cluster_id) {
                Some(ClusterLink::Next(next)) => cluster_id = next,
                Some(ClusterLink::End) => break ChainEnd::End,
                Some(ClusterLink::Corrupted) => break ChainEnd::Corrupted,
                Some(ClusterLink::Free) => break ChainEnd::Free,
                Some(ClusterLink::Reserved) => break ChainEnd::Invalid(0x0001),
                None => break ChainEnd::Invalid(cluster_id.into()),
            }
        };
        trace!("Chain from cluster {} has {} clusters, {:?}", start, clusters.len(), end);
        Chain { clusters, end }
    }
}

#[cfg(test)]
mod test {
    use super::{ChainEnd, ClusterMap};
    use crate::error::{DataError, Error};
    use crate::io::{memory::MemoryIO, Wrap};
    use crate::region::boot::BootRecord;
    use crate::region::fat::ClusterLink;
    use crate::test_image::{ImageBuilder, FAT1};
    use crate::types::ClusterID;

    fn map(values: &[u16]) -> ClusterMap {
        let bytes: Vec<u8> = values.iter().flat_map(|value| value.to_le_bytes()).collect();
        ClusterMap::from_bytes(&bytes).unwrap()
    }

    fn id(value: u16) -> ClusterID {
        ClusterID::from(value)
    }

    #[test]
    fn test_next() {
        let map = map(&[0xFFF8, 0xFFFF, 3, 0xFFFF, 0xFFF7, 0]);
        assert_eq!(map.len(), 6);
        assert_eq!(map.next(id(2)), Some(ClusterLink::Next(id(3))));
        assert_eq!(map.next(id(3)), Some(ClusterLink::End));
        assert_eq!(map.next(id(4)), Some(ClusterLink::Corrupted));
        assert_eq!(map.next(id(5)), Some(ClusterLink::Free));
        assert_eq!(map.next(id(6)), None);
    }

    #[test]
    fn test_chain() {
        let map = map(&[0xFFF8, 0xFFFF, 4, 0, 5, 0xFFF8, 7, 0xFFF7, 2, 1, 0x00F0]);
        let chain = map.chain(id(2));
        assert_eq!(chain.clusters, vec![id(2), id(4), id(5)]);
        assert_eq!(chain.end, ChainEnd::End);
        assert_eq!(map.chain(id(6)).end, ChainEnd::Corrupted);
        assert_eq!(map.chain(id(6)).clusters, vec![id(6), id(7)]);
        assert_eq!(map.chain(id(3)).end, ChainEnd::Free);
        assert_eq!(map.chain(id(9)).end, ChainEnd::Invalid(1));
        assert_eq!(map.chain(id(10)).end, ChainEnd::Invalid(0x00F0));
        assert_eq!(map.chain(id(0)).end, ChainEnd::Invalid(0));
        assert!(map.chain(id(0)).clusters.is_empty());
    }

    #[test]
    fn test_chain_cycle() {
        let map = map(&[0xFFF8, 0xFFFF, 3, 4, 2]);
        let chain = map.chain(id(2));
        assert_eq!(chain.clusters, vec![id(2), id(3), id(4)]);
        assert_eq!(chain.end, ChainEnd::Cycle);
    }

    #[test]
    fn test_free_clusters() {
        let map = map(&[0xFFF8, 0xFFFF, 0xFFFF, 0, 0, 3, 0]);
        assert_eq!(map.free_clusters(5), 3);
        assert_eq!(map.free_clusters(3), 2);
        assert_eq!(map.free_clusters(100), 3);
    }

    #[test]
    fn test_load() {
        let image = ImageBuilder::new().fat(2, 0xFFFF).build();
        let boot = BootRecord::parse(&image[..512]).unwrap();
        let map = ClusterMap::load(&mut MemoryIO(&image[..]).wrap(), &boot).unwrap();
        assert_eq!(map.len(), 256);
        assert_eq!(map.next(id(2)), Some(ClusterLink::End));
        assert_eq!(map.next(id(3)), Some(ClusterLink::Free));
    }

    #[test]
    fn test_load_mismatch() {
        let mut image = ImageBuilder::new().fat(2, 0xFFFF).build();
        image[FAT1 + 4] = 0x03;
        let boot = BootRecord::parse(&image[..512]).unwrap();
        let result = ClusterMap::load(&mut MemoryIO(&image[..]).wrap(), &boot);
        assert!(matches!(result, Err(Error::Data(DataError::FATMismatch(1)))));
    }
}
