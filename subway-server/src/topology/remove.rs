//! Station removal.

use crate::domain::{Line, Section, StationId, TopologyError};

/// Remove `target` and its incident sections from the line's chain.
///
/// A terminus takes its single section with it. An interior station's two
/// sections `(P -> target)` and `(target -> N)` are merged into one
/// `(P -> N)` carrying the summed distance.
///
/// The last remaining section can never be removed.
pub fn remove(line: &Line, target: StationId) -> Result<Line, TopologyError> {
    let position = line
        .position(target)
        .ok_or(TopologyError::StationNotInLine(target))?;

    let sections = line.sections();
    if sections.len() <= 1 {
        return Err(TopologyError::MinimumSectionViolation);
    }

    let last = sections.len();
    let chain = if position == 0 {
        sections[1..].to_vec()
    } else if position == last {
        sections[..last - 1].to_vec()
    } else {
        let before = sections[position - 1];
        let after = sections[position];
        let merged = merge(&before, &after)?;

        let mut chain = Vec::with_capacity(last - 1);
        chain.extend_from_slice(&sections[..position - 1]);
        chain.push(merged);
        chain.extend_from_slice(&sections[position + 1..]);
        chain
    };

    Ok(line.with_sections(chain))
}

/// Join two adjacent sections across their shared station.
fn merge(before: &Section, after: &Section) -> Result<Section, TopologyError> {
    let distance = before
        .distance()
        .checked_add(after.distance())
        .ok_or(TopologyError::DistanceOverflow {
            first: before.distance(),
            second: after.distance(),
        })?;
    Section::new(before.up(), after.down(), distance)
}
