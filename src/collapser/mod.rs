pub mod span;

use std::collections::HashMap;

use ipnetwork::Ipv4Network;

use span::Span;

/// Comment attached to output blocks that were synthesized by merging and
/// match no input prefix exactly.
pub const MERGED_COMMENT: &str = "# MERGED";

/// Collapse a set of IPv4 networks into the minimal equivalent set of CIDR
/// blocks, sorted ascending by address.
///
/// The result covers exactly the union of the inputs, no two blocks
/// overlap, and no two adjacent blocks can be joined into one block of the
/// next larger size.
pub fn collapse<I>(networks: I) -> Vec<Ipv4Network>
where
  I: IntoIterator<Item = Ipv4Network>,
{
  let spans: Vec<Span> = networks.into_iter().map(Span::from_network).collect();

  span::merge(spans)
    .into_iter()
    .flat_map(Span::into_cidrs)
    .collect()
}

/// Comment for a collapsed block: the original annotation when the block
/// matches an input prefix exactly, [`MERGED_COMMENT`] otherwise.
pub fn comment_for<'a>(
  block: &Ipv4Network,
  annotations: &'a HashMap<Ipv4Network, String>,
) -> &'a str {
  annotations
    .get(block)
    .map(String::as_str)
    .unwrap_or(MERGED_COMMENT)
}

#[cfg(test)]
mod tests {
  use super::*;
  use quickcheck_macros::quickcheck;
  use std::net::Ipv4Addr;

  fn net(s: &str) -> Ipv4Network {
    s.parse().unwrap()
  }

  fn nets(list: &[&str]) -> Vec<Ipv4Network> {
    list.iter().map(|s| net(s)).collect()
  }

  // Quickcheck inputs arrive as raw (address, prefix) pairs; mask the host
  // bits so every generated value is a valid network address.
  fn arbitrary_networks(raw: Vec<(u32, u8)>) -> Vec<Ipv4Network> {
    raw
      .into_iter()
      .map(|(addr, p)| {
        let prefix = p % 33;
        let masked = if prefix == 0 {
          0
        } else {
          addr & (u32::MAX << (32 - prefix))
        };
        Ipv4Network::new(Ipv4Addr::from(masked), prefix).unwrap()
      })
      .collect()
  }

  #[test]
  fn adjacent_blocks_merge_into_supernet() {
    let collapsed = collapse(nets(&["10.0.0.0/24", "10.0.1.0/24"]));
    assert_eq!(collapsed, vec![net("10.0.0.0/23")]);
  }

  #[test]
  fn merged_block_gets_placeholder_comment() {
    let mut annotations = HashMap::new();
    annotations.insert(net("10.0.0.0/24"), "# a".to_owned());
    annotations.insert(net("10.0.1.0/24"), "# b".to_owned());

    let collapsed = collapse(annotations.keys().copied());
    assert_eq!(collapsed, vec![net("10.0.0.0/23")]);
    assert_eq!(comment_for(&collapsed[0], &annotations), MERGED_COMMENT);
  }

  #[test]
  fn lone_block_passes_through_with_comment() {
    let mut annotations = HashMap::new();
    annotations.insert(net("192.168.1.5/32"), "# host".to_owned());

    let collapsed = collapse(annotations.keys().copied());
    assert_eq!(collapsed, vec![net("192.168.1.5/32")]);
    assert_eq!(comment_for(&collapsed[0], &annotations), "# host");
  }

  #[test]
  fn empty_input_collapses_to_nothing() {
    assert_eq!(collapse(Vec::new()), Vec::new());
  }

  #[test]
  fn subnet_is_absorbed_by_supernet() {
    let collapsed = collapse(nets(&["10.1.0.0/16", "10.1.200.0/24"]));
    assert_eq!(collapsed, vec![net("10.1.0.0/16")]);
  }

  #[test]
  fn contiguous_but_misaligned_blocks_stay_apart() {
    let collapsed = collapse(nets(&["10.0.1.0/24", "10.0.2.0/24"]));
    assert_eq!(collapsed, nets(&["10.0.1.0/24", "10.0.2.0/24"]));
  }

  #[test]
  fn duplicates_collapse_to_one() {
    let collapsed = collapse(nets(&["10.0.0.0/24", "10.0.0.0/24"]));
    assert_eq!(collapsed, vec![net("10.0.0.0/24")]);
  }

  #[test]
  fn output_is_sorted_ascending() {
    let collapsed = collapse(nets(&["200.0.0.0/8", "1.2.3.4/32", "100.64.0.0/10"]));
    assert_eq!(
      collapsed,
      nets(&["1.2.3.4/32", "100.64.0.0/10", "200.0.0.0/8"])
    );
  }

  #[quickcheck]
  fn collapse_is_idempotent(raw: Vec<(u32, u8)>) -> bool {
    let once = collapse(arbitrary_networks(raw));
    let twice = collapse(once.clone());
    once == twice
  }

  #[quickcheck]
  fn collapse_preserves_coverage(raw: Vec<(u32, u8)>) -> bool {
    let networks = arbitrary_networks(raw);

    let input_union = span::merge(networks.iter().copied().map(Span::from_network).collect());
    let output_union = span::merge(
      collapse(networks)
        .into_iter()
        .map(Span::from_network)
        .collect(),
    );

    input_union == output_union
  }

  #[quickcheck]
  fn collapsed_blocks_are_sorted_and_disjoint(raw: Vec<(u32, u8)>) -> bool {
    let spans: Vec<Span> = collapse(arbitrary_networks(raw))
      .into_iter()
      .map(Span::from_network)
      .collect();

    spans.windows(2).all(|pair| pair[0].end <= pair[1].start)
  }

  #[quickcheck]
  fn no_two_adjacent_blocks_are_mergeable(raw: Vec<(u32, u8)>) -> bool {
    let spans: Vec<Span> = collapse(arbitrary_networks(raw))
      .into_iter()
      .map(Span::from_network)
      .collect();

    spans.windows(2).all(|pair| {
      let size = pair[0].end - pair[0].start;
      let sibling = pair[0].end == pair[1].start
        && size == pair[1].end - pair[1].start
        && pair[0].start % (size * 2) == 0;
      !sibling
    })
  }
}
