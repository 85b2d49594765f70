use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;

/// Half-open range of IPv4 address values.
///
/// `end` is one past the last covered address, so a range reaching the top
/// of the address space ends at 2^32. Both bounds are u64 for that reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
  pub start: u64,
  pub end: u64,
}

impl Span {
  pub fn from_network(network: Ipv4Network) -> Span {
    let start = u64::from(u32::from(network.network()));
    let size = 1u64 << (32 - network.prefix());

    Span {
      start,
      end: start + size,
    }
  }

  /// Decompose the span into the fewest CIDR-aligned blocks covering it
  /// exactly, in ascending address order.
  ///
  /// At each position the block emitted is the largest power of two that
  /// both fits in the remaining length and is aligned to its own size.
  pub fn into_cidrs(self) -> Vec<Ipv4Network> {
    let mut blocks = Vec::new();
    let mut position = self.start;

    while position < self.end {
      let aligned = if position == 0 {
        1u64 << 32
      } else {
        1u64 << position.trailing_zeros().min(32)
      };

      let remaining = self.end - position;
      let fitting = 1u64 << (63 - remaining.leading_zeros());
      let size = aligned.min(fitting);

      let prefix = (32 - size.trailing_zeros()) as u8;
      // UNWRAP: size is a power of two in 1..=2^32, so prefix is in 0..=32
      blocks.push(Ipv4Network::new(Ipv4Addr::from(position as u32), prefix).unwrap());

      position += size;
    }

    blocks
  }
}

/// Merge overlapping and contiguous spans into maximal runs.
///
/// Returns the runs sorted ascending by start address; a span joins the
/// current run when its start does not pass the run's end.
pub fn merge(mut spans: Vec<Span>) -> Vec<Span> {
  spans.sort_by_key(|span| (span.start, span.end));

  let mut merged: Vec<Span> = Vec::new();
  for span in spans {
    match merged.last_mut() {
      Some(run) if span.start <= run.end => {
        if span.end > run.end {
          run.end = span.end;
        }
      }
      _ => merged.push(span),
    }
  }

  merged
}
