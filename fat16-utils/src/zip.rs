use fat16::Volume;

use crate::filepath::open_file;
use crate::CliError;

/// Interleave the lines of two files into a host file
pub fn zip(volume: &Volume, first: &str, second: &str, destination: &str) -> Result<(), CliError> {
    let a = open_file(volume, first)?;
    let b = open_file(volume, second)?;
    match volume.merge_files(&a, &b, destination)? {
        true => log::info!("{} and {} merged into {}", a.name(), b.name(), destination),
        false => log::warn!("{} or {} has no content, nothing written", a.name(), b.name()),
    }
    Ok(())
}
