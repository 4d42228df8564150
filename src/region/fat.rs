use crate::types::ClusterID;

pub const FREE: u16 = 0x0000;
pub const BAD_CLUSTER: u16 = 0xFFF7;
pub const END_OF_CHAIN: u16 = 0xFFF8;

/// Decoded FAT16 entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClusterLink {
    Free,
    Next(ClusterID),
    Corrupted,
    End,
    /// 0x0001, never a valid successor
    Reserved,
}

impl From<u16> for ClusterLink {
    fn from(value: u16) -> Self {
        match value {
            FREE => Self::Free,
            0x0001 => Self::Reserved,
            0x0002..=0xFFF6 => Self::Next(value.into()),
            BAD_CLUSTER => Self::Corrupted,
            END_OF_CHAIN..=0xFFFF => Self::End,
        }
    }
}

#[cfg(test)]
mod test {
    use super::ClusterLink;
    use crate::types::ClusterID;

    #[test]
    fn test_decode() {
        assert_eq!(ClusterLink::from(0x0000), ClusterLink::Free);
        assert_eq!(ClusterLink::from(0x0001), ClusterLink::Reserved);
        assert_eq!(ClusterLink::from(0x0002), ClusterLink::Next(ClusterID::from(2)));
        assert_eq!(ClusterLink::from(0xFFF6), ClusterLink::Next(ClusterID::from(0xFFF6)));
        assert_eq!(ClusterLink::from(0xFFF7), ClusterLink::Corrupted);
        assert_eq!(ClusterLink::from(0xFFF8), ClusterLink::End);
        assert_eq!(ClusterLink::from(0xFFFF), ClusterLink::End);
    }
}
