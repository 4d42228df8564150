use std::io::{self, Write};

use fat16::Volume;
use pretty_hex::pretty_hex;

use crate::filepath::open_file;
use crate::CliError;

pub fn cat(volume: &Volume, path: &str, hex: bool) -> Result<(), CliError> {
    let entry = open_file(volume, path)?;
    if !hex {
        let mut stdout = io::stdout().lock();
        volume.stream_file(&entry, |chunk| stdout.write_all(chunk))?;
        return stdout.flush().map_err(CliError::Output);
    }
    // Grows with the chunks actually read, the declared size is untrusted
    let mut bytes = Vec::new();
    volume.stream_file(&entry, |chunk| -> io::Result<()> {
        bytes.extend_from_slice(chunk);
        Ok(())
    })?;
    println!("{}", pretty_hex(&bytes));
    Ok(())
}
