//! Granule timing for every product type.
//!
//! A product type is described by a [`Schedule`]: a coverage window placed
//! at a fixed offset from the reference instant, optionally tiled into
//! fixed-length granules, and a dump plan telling which downlink each
//! granule references. The four product families (two-part split, single
//! granule, pure tiling, tiling with dump split) are all instances of the
//! same walk in [`Schedule::granules`].

use chrono::{Duration, NaiveDateTime};

pub mod granule;
pub use granule::{Granule, GranulePosition};

/// Length of the receive window, in seconds.
pub const RECEIVE_DURATION: i64 = 89;

/// Which dump event a granule references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dump {
    /// A single dump at the start of the coverage window.
    AtWindowStart,
    /// A first dump `lead` seconds before the reference and a second one `at`
    /// seconds after it. Granules are split at the second dump.
    Split { lead: i64, at: i64 },
}

/// Fixed offset table of one product type. All values are seconds relative
/// to the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub offset: i64,
    pub window: i64,
    /// Granule length; `None` covers each dump segment with a single granule.
    pub tile: Option<i64>,
    pub dump: Dump,
    pub receive_offset: i64,
}

impl Schedule {
    pub fn window_start(&self, reference: NaiveDateTime) -> NaiveDateTime {
        reference + Duration::seconds(self.offset)
    }

    pub fn window_end(&self, reference: NaiveDateTime) -> NaiveDateTime {
        self.window_start(reference) + Duration::seconds(self.window)
    }

    /// Earliest and latest offsets, in seconds, of any instant this schedule
    /// derives from the reference.
    pub fn extent(&self) -> (i64, i64) {
        let mut earliest = self.offset.min(self.receive_offset);
        if let Dump::Split { lead, at } = self.dump {
            earliest = earliest.min(-lead).min(at);
        }
        let latest = (self.offset + self.window).max(self.receive_offset + RECEIVE_DURATION);
        (earliest, latest)
    }

    /// Walks the coverage window and returns its granules in ascending order.
    ///
    /// The last granule is truncated so that it stops exactly at the window
    /// end. With a split dump, the granule crossing the second dump is
    /// clamped to it and tagged `LAST`, and the following one starts there
    /// tagged `FIRST`. Untiled granules always carry number 1. An empty window
    /// or a non-positive tile yields no granules.
    pub fn granules(&self, reference: NaiveDateTime) -> Vec<Granule> {
        if self.window <= 0 || self.tile.is_some_and(|tile| tile <= 0) {
            return Vec::new();
        }

        let window_start = self.window_start(reference);
        let window_end = self.window_end(reference);
        let receive_start = reference + Duration::seconds(self.receive_offset);
        let receive_stop = receive_start + Duration::seconds(RECEIVE_DURATION);

        let dumps = match self.dump {
            Dump::AtWindowStart => None,
            Dump::Split { lead, at } => Some((
                reference - Duration::seconds(lead),
                reference + Duration::seconds(at),
            )),
        };

        let mut granules = Vec::new();
        let mut start = window_start;
        let mut number = 1;

        while start < window_end {
            let mut stop = match self.tile {
                Some(tile) => (start + Duration::seconds(tile)).min(window_end),
                None => window_end,
            };

            let (dump_start, position) = match dumps {
                None => (
                    window_start,
                    GranulePosition::from_edges(start == window_start, stop == window_end),
                ),
                Some((first_dump, split)) if start < split => {
                    if stop >= split {
                        stop = split;
                        (first_dump, GranulePosition::Last)
                    } else {
                        (first_dump, GranulePosition::None)
                    }
                }
                Some((_, split)) if start == split => (split, GranulePosition::First),
                Some((_, split)) => (split, GranulePosition::None),
            };

            granules.push(Granule {
                start,
                stop,
                receive_start,
                receive_stop,
                dump_start,
                number: if self.tile.is_some() { number } else { 1 },
                position,
            });

            number += 1;
            start = stop;
        }

        granules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_type::ProductType;
    use chrono::NaiveDate;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn count(granules: &[Granule], position: GranulePosition) -> usize {
        granules.iter().filter(|g| g.position == position).count()
    }

    #[test]
    fn test_dop_two_part_split() {
        let granules = ProductType::DoDop.schedule().granules(reference());

        assert_eq!(granules.len(), 2);

        let first = &granules[0];
        assert_eq!((first.start, first.stop), (at(0, 0, 0), at(0, 26, 23)));
        assert_eq!(first.position, GranulePosition::Last);
        assert_eq!(first.dump_start, reference() - Duration::seconds(4477));
        assert_eq!(first.number, 1);

        let second = &granules[1];
        assert_eq!((second.start, second.stop), (at(0, 26, 23), at(1, 42, 35)));
        assert_eq!(second.position, GranulePosition::First);
        assert_eq!(second.dump_start, at(0, 26, 23));
        assert_eq!(second.number, 1);

        for granule in &granules {
            assert_eq!(granule.receive_start, at(1, 42, 35));
            assert_eq!(granule.receive_stop, at(1, 44, 4));
        }
    }

    #[test]
    fn test_two_part_family_shares_split_point() {
        let split_types = [
            (ProductType::DoDop, 6155),
            (ProductType::DoNav, 6150),
            (ProductType::GnGns, 6155),
            (ProductType::MwMwr, 6155),
            (ProductType::TmHkm, 6155),
            (ProductType::TmHkm2, 6155),
            (ProductType::TmNat, 6142),
        ];

        for (product_type, window) in split_types {
            let granules = product_type.schedule().granules(reference());
            let end = reference() + Duration::seconds(window);

            assert_eq!(granules.len(), 2, "{product_type}");
            assert_eq!(granules[0].stop, reference() + Duration::seconds(1583));
            assert_eq!(granules[0].stop, granules[1].start);
            assert_eq!(granules[1].stop, end, "{product_type}");
            assert_eq!(granules[1].receive_start, end, "{product_type}");
            assert_eq!(
                granules[1].receive_stop,
                end + Duration::seconds(RECEIVE_DURATION)
            );
        }
    }

    #[test]
    fn test_cr_single_granule() {
        let granules = ProductType::OlCr.schedule().granules(reference());

        assert_eq!(granules.len(), 1);
        let granule = &granules[0];
        assert_eq!(granule.start, at(0, 10, 54));
        assert_eq!(granule.stop, at(0, 54, 50));
        assert_eq!(granule.position, GranulePosition::Both);
        assert_eq!(granule.dump_start, granule.start);
        assert_eq!(granule.receive_start, at(1, 42, 35));
        assert_eq!(granule.receive_stop, at(1, 44, 4));
    }

    #[test]
    fn test_efr_tiling() {
        let granules = ProductType::OlEfr.schedule().granules(reference());

        // 21 full tiles of 120 s and a 116 s remainder
        assert_eq!(granules.len(), 22);

        let first = granules.first().unwrap();
        assert_eq!(first.start, at(0, 10, 54));
        assert_eq!(first.number, 1);
        assert_eq!(first.position, GranulePosition::First);

        let last = granules.last().unwrap();
        assert_eq!(last.stop, at(0, 54, 50));
        assert_eq!(last.duration(), Duration::seconds(116));
        assert_eq!(last.number, 22);
        assert_eq!(last.position, GranulePosition::Last);

        assert_eq!(count(&granules, GranulePosition::None), 20);
        assert!(granules.iter().all(|g| g.dump_start == at(0, 10, 54)));
        for (index, granule) in granules.iter().enumerate() {
            assert_eq!(granule.number as usize, index + 1);
        }
    }

    #[test]
    fn test_tiling_covers_window_exactly() {
        for product_type in [ProductType::OlEfr, ProductType::SlSlt, ProductType::SrSra] {
            let schedule = product_type.schedule();
            let granules = schedule.granules(reference());

            let total: Duration = granules.iter().map(Granule::duration).sum();
            assert_eq!(total, Duration::seconds(schedule.window), "{product_type}");

            assert_eq!(granules[0].start, schedule.window_start(reference()));
            assert_eq!(
                granules.last().unwrap().stop,
                schedule.window_end(reference())
            );
            for pair in granules.windows(2) {
                assert_eq!(pair[0].stop, pair[1].start, "{product_type}");
            }
        }
    }

    #[test]
    fn test_slt_splits_at_second_dump() {
        let granules = ProductType::SlSlt.schedule().granules(reference());
        let split = reference() + Duration::seconds(1583);

        assert_eq!(count(&granules, GranulePosition::Last), 1);
        assert_eq!(count(&granules, GranulePosition::First), 1);
        assert_eq!(
            count(&granules, GranulePosition::None),
            granules.len() - 2
        );

        let last = granules
            .iter()
            .position(|g| g.position == GranulePosition::Last)
            .unwrap();
        assert_eq!(granules[last].start, reference() + Duration::seconds(1500));
        assert_eq!(granules[last].stop, split);
        assert_eq!(granules[last + 1].start, split);
        assert_eq!(granules[last + 1].position, GranulePosition::First);
        assert_eq!(granules[last + 1].duration(), Duration::seconds(300));

        for granule in &granules[..=last] {
            assert_eq!(granule.dump_start, reference() - Duration::seconds(4477));
        }
        for granule in &granules[last + 1..] {
            assert_eq!(granule.dump_start, split);
        }

        assert_eq!(granules.len(), 22);
        assert_eq!(granules.last().unwrap().number, 22);
    }

    #[test]
    fn test_sra_splits_at_second_dump() {
        let granules = ProductType::SrSra.schedule().granules(reference());
        let split = reference() + Duration::seconds(1583);

        assert_eq!(granules.len(), 11);
        assert_eq!(granules[2].stop, split);
        assert_eq!(granules[2].position, GranulePosition::Last);
        assert_eq!(granules[3].start, split);
        assert_eq!(granules[3].position, GranulePosition::First);
        assert_eq!(granules[0].position, GranulePosition::None);
        assert_eq!(
            granules.last().unwrap().stop,
            reference() + Duration::seconds(6155)
        );
        assert_eq!(granules.last().unwrap().position, GranulePosition::None);
    }

    #[test]
    fn test_single_tile_window_is_both() {
        let schedule = Schedule {
            offset: 10,
            window: 60,
            tile: Some(120),
            dump: Dump::AtWindowStart,
            receive_offset: 100,
        };

        let granules = schedule.granules(reference());
        assert_eq!(granules.len(), 1);
        assert_eq!(granules[0].position, GranulePosition::Both);
        assert_eq!(granules[0].duration(), Duration::seconds(60));
    }

    #[test]
    fn test_tile_landing_on_split_is_last() {
        let schedule = Schedule {
            offset: 0,
            window: 400,
            tile: Some(100),
            dump: Dump::Split { lead: 50, at: 200 },
            receive_offset: 400,
        };

        let granules = schedule.granules(reference());
        let positions: Vec<GranulePosition> = granules.iter().map(|g| g.position).collect();

        assert_eq!(
            positions,
            vec![
                GranulePosition::None,
                GranulePosition::Last,
                GranulePosition::First,
                GranulePosition::None,
            ]
        );
    }

    #[test]
    fn test_non_positive_tile_yields_nothing() {
        for tile in [0, -120] {
            let schedule = Schedule {
                tile: Some(tile),
                ..ProductType::OlEfr.schedule()
            };
            assert!(schedule.granules(reference()).is_empty());
        }

        let empty = Schedule {
            window: 0,
            ..ProductType::OlCr.schedule()
        };
        assert!(empty.granules(reference()).is_empty());
    }

    #[test]
    fn test_extent_spans_dump_and_receive_window() {
        assert_eq!(ProductType::DoDop.schedule().extent(), (-4477, 6155 + 89));
        assert_eq!(ProductType::OlEfr.schedule().extent(), (654, 6155 + 89));
        assert_eq!(ProductType::TmNat.schedule().extent(), (-4477, 6142 + 89));
    }
}
