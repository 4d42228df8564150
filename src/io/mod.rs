#[cfg(feature = "std")]
pub mod std;

pub mod memory;

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
use core::fmt::Debug;

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::error::Error;

#[cfg_attr(feature = "async", async_trait)]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub trait IO {
    type Error: Debug;

    /// Fill `buf` with image bytes starting at byte `offset`
    async fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Error>;
}

pub(crate) struct Wrapper<IO>(IO);

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<E: Debug, T: IO<Error = E>> Wrapper<T> {
    pub async fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error<E>> {
        trace!("Read {} bytes at offset {}", buf.len(), offset);
        self.0.read(offset, buf).await.map_err(|e| Error::IO(e))
    }
}

pub(crate) trait Wrap {
    type Output;
    fn wrap(self) -> Self::Output;
}

impl<E: Debug, T: IO<Error = E>> Wrap for T {
    type Output = Wrapper<T>;
    fn wrap(self) -> Self::Output {
        Wrapper(self)
    }
}
