use derive_more::{Display, From, Into};

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u16);

impl ClusterID {
    pub const FIRST: Self = Self(2);
    pub const LAST: Self = Self(0xFFF6);

    /// Whether this cluster number may address the data region
    pub fn valid(&self) -> bool {
        (Self::FIRST.0..=Self::LAST.0).contains(&self.0)
    }

    /// Index of this cluster within the data region, `None` for reserved numbers
    pub(crate) fn offset(self) -> Option<u32> {
        self.0.checked_sub(Self::FIRST.0).map(u32::from)
    }
}
