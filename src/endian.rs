// Little endian field decoding at fixed byte offsets

macro_rules! define {
    ($type:ty, $name:ident) => {
        /// Caller guarantees `offset + size_of::<T>() <= bytes.len()`
        #[inline]
        pub(crate) fn $name(bytes: &[u8], offset: usize) -> $type {
            const SIZE: usize = core::mem::size_of::<$type>();
            let mut array = [0u8; SIZE];
            array.copy_from_slice(&bytes[offset..offset + SIZE]);
            <$type>::from_le_bytes(array)
        }
    };
}

define!(u16, u16_at);
define!(u32, u32_at);

#[inline]
pub(crate) fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(&bytes[offset..offset + N]);
    array
}
