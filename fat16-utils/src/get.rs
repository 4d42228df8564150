use fat16::Volume;

use crate::filepath::open_file;
use crate::CliError;

pub fn get(volume: &Volume, path: &str, destination: &str) -> Result<(), CliError> {
    let entry = open_file(volume, path)?;
    let size = volume.export_file(&entry, destination)?;
    log::info!("{} bytes written to {}", size, destination);
    Ok(())
}
