//! Section insertion.

use crate::domain::{Distance, Line, Section, TopologyError};

/// Where a proposed section attaches to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// New last section after the downstream terminus.
    Append,
    /// New first section before the upstream terminus.
    Prepend,
    /// Split the section at this index, keeping its upstream station.
    SplitAfterUp(usize),
    /// Split the section at this index, keeping its downstream station.
    SplitBeforeDown(usize),
}

/// Insert `proposed` into the line's chain.
///
/// Returns the new line, or the reason the section was rejected. The
/// input line is never modified; the caller swaps in the result.
///
/// Exactly one endpoint of `proposed` must already be on the line:
///
/// - its up station is the downstream terminus: the section is appended
/// - its down station is the upstream terminus: the section is prepended
/// - its up station is interior (or the upstream terminus): the section
///   leaving that station is split in two, `(S -> new)` then `(new -> X)`
/// - its down station is interior (or the downstream terminus): the section
///   entering that station is split, `(Y -> new)` then `(new -> S)`
///
/// A split requires the proposed distance to be strictly shorter than the
/// section being split.
pub fn insert(line: &Line, proposed: Section) -> Result<Line, TopologyError> {
    let placement = place(line, &proposed)?;
    let sections = line.sections();
    let mut chain = Vec::with_capacity(sections.len() + 1);

    match placement {
        Placement::Append => {
            chain.extend_from_slice(sections);
            chain.push(proposed);
        }
        Placement::Prepend => {
            chain.push(proposed);
            chain.extend_from_slice(sections);
        }
        Placement::SplitAfterUp(index) => {
            let old = sections[index];
            let rest = shorten(&old, &proposed)?;
            let tail = Section::new(proposed.down(), old.down(), rest)?;
            chain.extend_from_slice(&sections[..index]);
            chain.push(proposed);
            chain.push(tail);
            chain.extend_from_slice(&sections[index + 1..]);
        }
        Placement::SplitBeforeDown(index) => {
            let old = sections[index];
            let rest = shorten(&old, &proposed)?;
            let head = Section::new(old.up(), proposed.up(), rest)?;
            chain.extend_from_slice(&sections[..index]);
            chain.push(head);
            chain.push(proposed);
            chain.extend_from_slice(&sections[index + 1..]);
        }
    }

    Ok(line.with_sections(chain))
}

/// Classify the proposed section against the current chain.
fn place(line: &Line, proposed: &Section) -> Result<Placement, TopologyError> {
    let (up, down) = (proposed.up(), proposed.down());
    let last = line.sections().len();

    match (line.position(up), line.position(down)) {
        (Some(i), Some(j)) if j == i + 1 => Err(TopologyError::DuplicateSection { up, down }),
        (Some(_), Some(_)) => Err(TopologyError::InvalidTopology { up, down }),
        (None, None) => Err(TopologyError::DisconnectedSection { up, down }),
        (Some(i), None) if i == last => Ok(Placement::Append),
        (Some(i), None) => Ok(Placement::SplitAfterUp(i)),
        (None, Some(0)) => Ok(Placement::Prepend),
        (None, Some(j)) => Ok(Placement::SplitBeforeDown(j - 1)),
    }
}

/// Distance left over when `proposed` is carved out of `old`.
fn shorten(old: &Section, proposed: &Section) -> Result<Distance, TopologyError> {
    old.distance()
        .checked_sub(proposed.distance())
        .ok_or(TopologyError::DistanceTooLong {
            requested: proposed.distance(),
            existing: old.distance(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, NewLine, StationId};

    fn st(id: u64) -> StationId {
        StationId(id)
    }

    fn sec(up: u64, down: u64, distance: i64) -> Section {
        Section::from_raw(st(up), st(down), distance).unwrap()
    }

    /// Build a line from a chain of (up, down, distance) triples.
    fn line(chain: &[(u64, u64, i64)]) -> Line {
        let (up, down, distance) = chain[0];
        let mut line = NewLine::new("Line 2", "green", st(up), st(down), distance)
            .unwrap()
            .into_line(LineId(1));
        for &(up, down, distance) in &chain[1..] {
            line = insert(&line, sec(up, down, distance)).unwrap();
        }
        line
    }

    fn chain(line: &Line) -> Vec<(u64, u64, u32)> {
        line.sections()
            .iter()
            .map(|s| (s.up().0, s.down().0, s.distance().get()))
            .collect()
    }

    #[test]
    fn append_at_downstream_terminus() {
        let l = line(&[(1, 2, 5), (2, 3, 3)]);
        let out = insert(&l, sec(3, 4, 7)).unwrap();
        assert_eq!(chain(&out), vec![(1, 2, 5), (2, 3, 3), (3, 4, 7)]);
        assert_eq!(out.down_terminus(), Some(st(4)));
    }

    #[test]
    fn append_allows_any_positive_distance() {
        let l = line(&[(1, 2, 5)]);
        let out = insert(&l, sec(2, 3, 500)).unwrap();
        assert_eq!(chain(&out), vec![(1, 2, 5), (2, 3, 500)]);
    }

    #[test]
    fn prepend_at_upstream_terminus() {
        let l = line(&[(1, 2, 5), (2, 3, 3)]);
        let out = insert(&l, sec(0, 1, 9)).unwrap();
        assert_eq!(chain(&out), vec![(0, 1, 9), (1, 2, 5), (2, 3, 3)]);
        assert_eq!(out.up_terminus(), Some(st(0)));
    }

    #[test]
    fn split_after_existing_up_station() {
        let l = line(&[(1, 2, 10), (2, 3, 3)]);
        let out = insert(&l, sec(1, 7, 4)).unwrap();
        assert_eq!(chain(&out), vec![(1, 7, 4), (7, 2, 6), (2, 3, 3)]);
    }

    #[test]
    fn split_after_interior_station() {
        let l = line(&[(1, 2, 5), (2, 3, 10), (3, 4, 2)]);
        let out = insert(&l, sec(2, 8, 4)).unwrap();
        assert_eq!(
            chain(&out),
            vec![(1, 2, 5), (2, 8, 4), (8, 3, 6), (3, 4, 2)]
        );
    }

    #[test]
    fn split_before_existing_down_station() {
        let l = line(&[(1, 2, 5), (2, 3, 10)]);
        let out = insert(&l, sec(9, 3, 4)).unwrap();
        assert_eq!(chain(&out), vec![(1, 2, 5), (2, 9, 6), (9, 3, 4)]);
    }

    #[test]
    fn split_before_interior_station() {
        let l = line(&[(1, 2, 10), (2, 3, 3)]);
        let out = insert(&l, sec(9, 2, 1)).unwrap();
        assert_eq!(chain(&out), vec![(1, 9, 9), (9, 2, 1), (2, 3, 3)]);
    }

    #[test]
    fn split_keeps_total_distance() {
        let l = line(&[(1, 2, 10), (2, 3, 3)]);
        let out = insert(&l, sec(1, 7, 4)).unwrap();
        assert_eq!(out.total_distance(), l.total_distance());
    }

    #[test]
    fn split_rejects_equal_or_longer_distance() {
        let l = line(&[(1, 2, 10)]);

        let err = insert(&l, sec(1, 7, 10)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DistanceTooLong {
                requested: Distance::new(10).unwrap(),
                existing: Distance::new(10).unwrap(),
            }
        );

        let err = insert(&l, sec(1, 7, 11)).unwrap_err();
        assert!(matches!(err, TopologyError::DistanceTooLong { .. }));

        let err = insert(&l, sec(7, 2, 10)).unwrap_err();
        assert!(matches!(err, TopologyError::DistanceTooLong { .. }));
    }

    #[test]
    fn rejects_disconnected_section() {
        let l = line(&[(1, 2, 5)]);
        let err = insert(&l, sec(5, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DisconnectedSection {
                up: st(5),
                down: st(6)
            }
        );
    }

    #[test]
    fn rejects_duplicate_regardless_of_distance() {
        let l = line(&[(1, 2, 5), (2, 3, 3)]);
        for d in [1, 3, 5, 100] {
            let err = insert(&l, sec(2, 3, d)).unwrap_err();
            assert_eq!(
                err,
                TopologyError::DuplicateSection {
                    up: st(2),
                    down: st(3)
                }
            );
        }
    }

    #[test]
    fn rejects_both_present_non_adjacent() {
        let l = line(&[(1, 2, 5), (2, 3, 3)]);
        // Shortcut across an interior station
        assert!(matches!(
            insert(&l, sec(1, 3, 2)),
            Err(TopologyError::InvalidTopology { .. })
        ));
        // Reversed edge closes a cycle
        assert!(matches!(
            insert(&l, sec(2, 1, 2)),
            Err(TopologyError::InvalidTopology { .. })
        ));
        // Terminus to terminus
        assert!(matches!(
            insert(&l, sec(3, 1, 2)),
            Err(TopologyError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn failed_insert_leaves_line_untouched() {
        let l = line(&[(1, 2, 10)]);
        let before = l.clone();
        let _ = insert(&l, sec(1, 7, 10));
        assert_eq!(l, before);
    }

    #[test]
    fn result_is_valid_chain() {
        let l = line(&[(1, 2, 10), (2, 3, 10), (0, 1, 4), (2, 5, 3), (6, 3, 1)]);
        assert!(l.check_chain().is_ok());
        assert_eq!(
            l.stations(),
            vec![st(0), st(1), st(2), st(5), st(6), st(3)]
        );
    }
}
