use fat16::error::OperationError;
use fat16::{DirectoryEntry, Region, Volume};

pub enum Node<'a> {
    /// Directory region, with the entry that led there unless it is the root
    Directory(Region, Option<DirectoryEntry<'a>>),
    File(DirectoryEntry<'a>),
}

pub struct Walk<'a> {
    pub node: Node<'a>,
    /// Names of the directories entered, for display only
    pub history: Vec<String>,
}

impl<'a> Walk<'a> {
    pub fn display_path(&self) -> String {
        format!("/{}", self.history.join("/"))
    }
}

/// Resolve a `/` separated path from the root directory, one component at a time
pub fn open<'a>(volume: &'a Volume, path: &str) -> Result<Walk<'a>, OperationError> {
    let mut region = Region::Root;
    let mut history = Vec::new();
    let mut last = None;
    let mut names = path.split('/').filter(|name| !name.is_empty()).peekable();
    while let Some(name) = names.next() {
        let entry = volume.resolve(region, name)?;
        if !entry.is_directory() {
            if names.peek().is_some() {
                return Err(OperationError::NotADirectory);
            }
            return Ok(Walk { node: Node::File(entry), history });
        }
        region = volume.enter(&entry)?;
        match name {
            "." => (),
            ".." => {
                history.pop();
            }
            _ => history.push(entry.name().as_str().to_string()),
        }
        last = Some(entry);
    }
    if region == Region::Root {
        last = None;
        history.clear();
    }
    Ok(Walk { node: Node::Directory(region, last), history })
}

pub fn open_file<'a>(volume: &'a Volume, path: &str) -> Result<DirectoryEntry<'a>, OperationError> {
    match open(volume, path)?.node {
        Node::File(entry) => Ok(entry),
        Node::Directory(..) => Err(OperationError::IsADirectory),
    }
}
