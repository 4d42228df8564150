use crate::fat::ClusterMap;
use crate::region::boot::BootRecord;
use crate::types::ClusterID;

/// Borrowed view over a loaded volume, shared by directory walks and file reads
#[derive(Copy, Clone)]
pub(crate) struct Context<'a> {
    pub boot: &'a BootRecord,
    pub fat: &'a ClusterMap,
    pub root: &'a [u8],
    pub data: &'a [u8],
}

impl<'a> Context<'a> {
    pub fn cluster_size(&self) -> usize {
        self.boot.cluster_size() as usize
    }

    /// Bytes of one cluster, `None` for reserved numbers or clusters past the loaded data region
    pub fn cluster(&self, cluster_id: ClusterID) -> Option<&'a [u8]> {
        if !cluster_id.valid() {
            return None;
        }
        let size = self.cluster_size();
        let start = (cluster_id.offset()? as usize).checked_mul(size)?;
        let option = self.data.get(start..start.checked_add(size)?);
        if option.is_none() {
            warn!("Cluster {} is outside the data region", cluster_id);
        }
        option
    }
}
