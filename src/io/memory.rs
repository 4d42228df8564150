// In-memory image, e.g. a RAM disk or a test fixture

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;

#[cfg(feature = "async")]
use async_trait::async_trait;
use displaydoc::Display;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
/// Read of {length} bytes at offset {offset} is past the end of the image
pub struct OutOfBounds {
    pub offset: u64,
    pub length: usize,
}

#[derive(Clone, Debug)]
pub struct MemoryIO<T>(pub T);

#[cfg_attr(feature = "async", async_trait)]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<T: AsRef<[u8]> + Send> super::IO for MemoryIO<T> {
    type Error = OutOfBounds;

    async fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        let image = self.0.as_ref();
        let error = OutOfBounds { offset, length: buf.len() };
        let start = usize::try_from(offset).map_err(|_| error)?;
        let end = start.checked_add(buf.len()).ok_or(error)?;
        let bytes = image.get(start..end).ok_or(error)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }
}
