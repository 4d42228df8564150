use fat16::error::OperationError;
use fat16::Volume;

use crate::filepath::{open, Node};
use crate::CliError;

pub fn stat(volume: &Volume, path: &str) -> Result<(), CliError> {
    let walk = open(volume, path)?;
    let entry = match walk.node {
        Node::File(entry) => entry,
        Node::Directory(_, Some(entry)) => entry,
        // The root directory has no entry of its own
        Node::Directory(_, None) => return Err(OperationError::InvalidEntry.into()),
    };
    print!("{}", volume.file_info(&entry));
    Ok(())
}
