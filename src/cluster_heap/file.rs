use core::cmp::min;

use super::context::Context;
use crate::error::DataError;
use crate::region::fat::ClusterLink;
use crate::types::ClusterID;

/// Cluster-sized pieces of a file's content, in chain order.
/// Never yields more than the declared file size in total.
pub struct Chunks<'a> {
    context: Context<'a>,
    cluster_id: Option<ClusterID>,
    remaining: u32,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(context: Context<'a>, first_cluster: ClusterID, size: u32) -> Self {
        let cluster_id = match first_cluster.valid() {
            true => Some(first_cluster),
            false => None,
        };
        Self { context, cluster_id, remaining: size }
    }

    /// Bytes not yet emitted out of the declared size
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<&'a [u8], DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cluster_id = self.cluster_id.take()?;
        if self.remaining == 0 {
            return None;
        }
        let link = self.context.fat.next(cluster_id);
        if link == Some(ClusterLink::Corrupted) {
            warn!("Cluster {} is marked bad, {} bytes unread", cluster_id, self.remaining);
            return Some(Err(DataError::CorruptedChain(cluster_id)));
        }
        let bytes = self.context.cluster(cluster_id)?;
        let length = min(self.remaining as usize, bytes.len());
        self.remaining -= length as u32;
        match link {
            Some(ClusterLink::Next(next)) => self.cluster_id = Some(next),
            Some(ClusterLink::End) => (),
            _ if self.remaining == 0 => (),
            link => warn!("Chain breaks after cluster {} ({:?}), file truncated", cluster_id, link),
        }
        trace!("Read {} bytes from cluster {}", length, cluster_id);
        Some(Ok(&bytes[..length]))
    }
}

#[cfg(test)]
mod test {
    use super::Chunks;
    use crate::error::DataError;
    use crate::test_image::{volume, ImageBuilder, CLUSTER_SIZE};
    use crate::types::ClusterID;

    fn pattern(length: usize) -> Vec<u8> {
        (0..length).map(|i| (i % 251) as u8).collect()
    }

    fn collect(chunks: Chunks) -> Result<Vec<u8>, DataError> {
        let mut bytes = Vec::new();
        for chunk in chunks {
            bytes.extend_from_slice(chunk?);
        }
        Ok(bytes)
    }

    #[test]
    fn test_single_cluster() {
        let image = ImageBuilder::new().fat(2, 0xFFFF).cluster(2, b"hello\n").build();
        let volume = volume(image);
        let mut chunks = Chunks::new(volume.context(), ClusterID::from(2), 6);
        assert_eq!(chunks.next(), Some(Ok(&b"hello\n"[..])));
        assert_eq!(chunks.remaining(), 0);
        assert_eq!(chunks.next(), None);
    }

    #[test]
    fn test_chunk_sizes() {
        let content = pattern(CLUSTER_SIZE * 2 + 100);
        let image = ImageBuilder::new().chain(&[3, 7, 5]).spread(&[3, 7, 5], &content).build();
        let volume = volume(image);
        let chunks = Chunks::new(volume.context(), ClusterID::from(3), content.len() as u32);
        let sizes: Vec<usize> = chunks.map(|chunk| chunk.unwrap().len()).collect();
        assert_eq!(sizes, vec![CLUSTER_SIZE, CLUSTER_SIZE, 100]);
        let chunks = Chunks::new(volume.context(), ClusterID::from(3), content.len() as u32);
        assert_eq!(collect(chunks).unwrap(), content);
    }

    #[test]
    fn test_size_limits_chain() {
        // Chain longer than the declared size
        let content = pattern(CLUSTER_SIZE * 2);
        let image = ImageBuilder::new().chain(&[2, 3]).spread(&[2, 3], &content).build();
        let volume = volume(image);
        let bytes = collect(Chunks::new(volume.context(), ClusterID::from(2), 10)).unwrap();
        assert_eq!(bytes, content[..10]);
    }

    #[test]
    fn test_invalid_start() {
        let volume = volume(ImageBuilder::new().build());
        assert_eq!(Chunks::new(volume.context(), ClusterID::from(0), 100).count(), 0);
        assert_eq!(Chunks::new(volume.context(), ClusterID::from(1), 100).count(), 0);
        assert_eq!(Chunks::new(volume.context(), ClusterID::from(0xFFF7), 100).count(), 0);
    }

    #[test]
    fn test_truncated_chain() {
        let content = pattern(CLUSTER_SIZE * 3);
        let image = ImageBuilder::new().fat(2, 3).fat(3, 0x0000).spread(&[2, 3, 4], &content);
        let volume = volume(image.build());
        let bytes = collect(Chunks::new(volume.context(), ClusterID::from(2), 1500)).unwrap();
        assert_eq!(bytes, content[..CLUSTER_SIZE * 2]);

        // Premature end of chain marker
        let image = ImageBuilder::new().fat(2, 0xFFFF).spread(&[2, 3], &content);
        let volume = crate::test_image::volume(image.build());
        let bytes = collect(Chunks::new(volume.context(), ClusterID::from(2), 1000)).unwrap();
        assert_eq!(bytes.len(), CLUSTER_SIZE);
    }

    #[test]
    fn test_outside_data_region() {
        let image = ImageBuilder::new().fat(2, 0x00F0).cluster(2, &[0xAA; 512]).build();
        let volume = volume(image);
        let bytes = collect(Chunks::new(volume.context(), ClusterID::from(2), 1024)).unwrap();
        assert_eq!(bytes.len(), CLUSTER_SIZE);
    }

    #[test]
    fn test_corrupted() {
        let content = pattern(CLUSTER_SIZE * 2);
        let image = ImageBuilder::new().fat(2, 3).fat(3, 0xFFF7).spread(&[2, 3], &content);
        let volume = volume(image.build());
        let mut chunks = Chunks::new(volume.context(), ClusterID::from(2), 1024);
        assert_eq!(chunks.next(), Some(Ok(&content[..CLUSTER_SIZE])));
        assert_eq!(chunks.next(), Some(Err(DataError::CorruptedChain(ClusterID::from(3)))));
        assert_eq!(chunks.next(), None);

        // Bad marker on the only cluster
        let image = ImageBuilder::new().fat(2, 0xFFF7).cluster(2, b"lost").build();
        let volume = crate::test_image::volume(image);
        let result = collect(Chunks::new(volume.context(), ClusterID::from(2), 4));
        assert_eq!(result, Err(DataError::CorruptedChain(ClusterID::from(2))));
    }

    #[test]
    fn test_looping_chain_bounded_by_size() {
        let image = ImageBuilder::new().fat(2, 2).cluster(2, &[7; 512]).build();
        let volume = volume(image);
        let bytes = collect(Chunks::new(volume.context(), ClusterID::from(2), 1300)).unwrap();
        assert_eq!(bytes.len(), 1300);
        assert!(bytes.iter().all(|&b| b == 7));
    }
}
