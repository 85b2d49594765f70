use std::fs::{create_dir_all, write};
use std::io::Error as IoError;
use std::path::PathBuf;

use ipnetwork::Ipv4Network;
use thiserror::Error;

// Comments start at column 18; wider address texts still get one space.
const COMMENT_COLUMN: usize = 17;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error happened: {0}")]
    IOError(IoError),
}

/// Flat-file store for the two run artifacts: the raw snapshot of the
/// downloaded list and the collapsed output.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: &str) -> Result<Store, StoreError> {
        let path = PathBuf::from(data_dir);

        match create_dir_all(&path) {
            Ok(_) => Ok(Store { data_dir: path }),
            Err(err) => Err(StoreError::IOError(err)),
        }
    }

    pub fn write_snapshot(&self, filename: &str, body: &str) -> Result<(), StoreError> {
        write(self.data_dir.join(filename), body).map_err(StoreError::IOError)
    }

    /// Write the collapsed list: comment lines first, verbatim and in
    /// order, then one formatted line per block. Callers only invoke this
    /// once the whole collapse computation has succeeded.
    pub fn write_collapsed(
        &self,
        filename: &str,
        comments: &[String],
        entries: &[(Ipv4Network, String)],
    ) -> Result<(), StoreError> {
        let mut out = String::new();

        for comment in comments {
            out.push_str(comment);
            out.push('\n');
        }
        for (network, comment) in entries {
            out.push_str(&render_line(network, comment));
            out.push('\n');
        }

        write(self.data_dir.join(filename), out).map_err(StoreError::IOError)
    }
}

/// A /32 renders as the bare address, everything else in CIDR notation.
pub fn render_address(network: &Ipv4Network) -> String {
    if network.prefix() == 32 {
        network.ip().to_string()
    } else {
        network.to_string()
    }
}

pub fn render_line(network: &Ipv4Network, comment: &str) -> String {
    let address = render_address(network);
    let padding = COMMENT_COLUMN.saturating_sub(address.len()).max(1);

    format!("{}{}{}", address, " ".repeat(padding), comment)
}
