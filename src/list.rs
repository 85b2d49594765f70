use std::collections::HashMap;
use std::net::Ipv4Addr;

use ipnetwork::{IpNetwork, IpNetworkError, Ipv4Network};
use thiserror::Error;

const COMMENT_MARKER: char = '#';

/// Parsed form of the downloaded list: the verbatim comment lines in input
/// order, and one annotation per distinct IPv4 prefix.
#[derive(Debug)]
pub struct BlockList {
  pub comments: Vec<String>,
  pub annotations: HashMap<Ipv4Network, String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
  #[error("line {0}: no annotation after address in {1:?}")]
  MissingAnnotation(usize, String),

  #[error("line {0}: {1}")]
  BadNetwork(usize, IpNetworkError),

  #[error("line {0}: network address of {1} should be {2}")]
  HostBitsSet(usize, Ipv4Network, Ipv4Addr),
}

/// Parse the raw list text.
///
/// Lines starting with `#` are kept verbatim as comments, blank lines are
/// skipped, and every other line must be `<cidr> <annotation>`. A bare
/// address counts as a /32. IPv6 entries are dropped; a prefix with host
/// bits set, an unparseable address, or a missing annotation fails the
/// whole run. A repeated prefix keeps the last annotation seen.
pub fn parse(text: &str) -> Result<BlockList, ParseError> {
  let mut comments = Vec::new();
  let mut annotations = HashMap::new();

  for (index, line) in text.lines().enumerate() {
    let number = index + 1;

    if line.starts_with(COMMENT_MARKER) {
      comments.push(line.to_owned());
      continue;
    }
    if line.trim().is_empty() {
      continue;
    }

    // Leading whitespace before the address is tolerated; comment
    // classification above still looks at the raw line.
    let mut parts = line.trim_start().splitn(2, char::is_whitespace);
    let address = parts.next().unwrap_or_default();
    let annotation = parts.next().map(str::trim).unwrap_or_default();

    if annotation.is_empty() {
      return Err(ParseError::MissingAnnotation(number, line.to_owned()));
    }

    let network: IpNetwork = address
      .parse()
      .map_err(|err| ParseError::BadNetwork(number, err))?;

    let network = match network {
      IpNetwork::V4(network) => network,
      IpNetwork::V6(_) => continue,
    };

    if network.ip() != network.network() {
      return Err(ParseError::HostBitsSet(number, network, network.network()));
    }

    annotations.insert(network, annotation.to_owned());
  }

  Ok(BlockList {
    comments,
    annotations,
  })
}
