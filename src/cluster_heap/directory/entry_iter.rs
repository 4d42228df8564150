use crate::cluster_heap::context::Context;
use crate::region::data::entry::{DirectoryEntry, RawEntry, ENTRY_SIZE};
use crate::region::fat::ClusterLink;
use crate::types::ClusterID;

use super::Region;

/// Walks the 32-byte slots of a directory region up to the end sentinel.
/// Yields deleted and long name slots as well, callers filter.
pub struct EntryIter<'a> {
    context: Context<'a>,
    slots: &'a [u8],
    cluster_id: Option<ClusterID>,
    index: usize,
    hops: usize,
    done: bool,
}

impl<'a> EntryIter<'a> {
    pub(crate) fn new(context: Context<'a>, region: Region) -> Self {
        let (slots, cluster_id) = match region {
            Region::Root => (context.root, None),
            Region::Chain(cluster_id) => {
                (context.cluster(cluster_id).unwrap_or(&[]), Some(cluster_id))
            }
        };
        Self { context, slots, cluster_id, index: 0, hops: 0, done: false }
    }

    /// Move to the next cluster of a subdirectory, false at chain end or break
    fn advance(&mut self) -> bool {
        let cluster_id = match self.cluster_id {
            Some(cluster_id) => cluster_id,
            None => return false,
        };
        // A chain visiting more clusters than the table holds is looping
        if self.hops >= self.context.fat.len() {
            warn!("Directory chain starting at cluster {} loops", cluster_id);
            return false;
        }
        let next = match self.context.fat.next(cluster_id) {
            Some(ClusterLink::Next(next)) => next,
            Some(ClusterLink::End) => return false,
            link => {
                warn!("Directory chain breaks after cluster {}: {:?}", cluster_id, link);
                return false;
            }
        };
        trace!("Directory continues from cluster {} to {}", cluster_id, next);
        match self.context.cluster(next) {
            Some(slots) => self.slots = slots,
            None => return false,
        }
        self.cluster_id = Some(next);
        self.index = 0;
        self.hops += 1;
        true
    }
}

impl<'a> Iterator for EntryIter<'a> {
    type Item = DirectoryEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.index * ENTRY_SIZE;
        if offset + ENTRY_SIZE > self.slots.len() && !self.advance() {
            self.done = true;
            return None;
        }
        let offset = self.index * ENTRY_SIZE;
        let slots: &'a [u8] = self.slots;
        let bytes: Option<&'a RawEntry> =
            slots.get(offset..offset + ENTRY_SIZE).and_then(|slot| slot.try_into().ok());
        let entry = match bytes {
            Some(bytes) => DirectoryEntry::new(bytes),
            None => {
                self.done = true;
                return None;
            }
        };
        self.index += 1;
        if entry.is_end_of_directory() {
            self.done = true;
            return None;
        }
        Some(entry)
    }
}
