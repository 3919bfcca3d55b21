//! Fleet-keyed competitor roster.

use indexmap::IndexMap;

use crate::competitor::Competitor;

/// Competitors grouped by fleet name.
///
/// Fleets keep insertion order (first competitor seen for a fleet creates
/// it), so output files come out in the order fleets appear in the source.
/// Competitor order within a fleet is set by [`FleetRoster::sort_by_sail_number`],
/// not by insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetRoster {
    fleets: IndexMap<String, Vec<Competitor>>,
}

impl FleetRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a competitor to its fleet, creating the fleet on first sight.
    pub fn add(&mut self, fleet: impl Into<String>, competitor: Competitor) {
        self.fleets.entry(fleet.into()).or_default().push(competitor);
    }

    /// Number of fleets.
    pub fn fleet_count(&self) -> usize {
        self.fleets.len()
    }

    /// Total number of competitors across all fleets.
    pub fn competitor_count(&self) -> usize {
        self.fleets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fleets.is_empty()
    }

    /// Competitors for one fleet, if present.
    pub fn fleet(&self, name: &str) -> Option<&[Competitor]> {
        self.fleets.get(name).map(Vec::as_slice)
    }

    /// Iterate fleets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Competitor])> {
        self.fleets.iter().map(|(name, comps)| (name.as_str(), comps.as_slice()))
    }

    /// Sort every fleet's competitors by the normalized sail-number key.
    pub fn sort_by_sail_number(&mut self) {
        for competitors in self.fleets.values_mut() {
            competitors.sort_by_key(Competitor::sort_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comp(sail: &str) -> Competitor {
        Competitor::new("Helm", "Boat", sail, "")
    }

    #[test]
    fn grouping_preserves_fleet_membership() {
        let mut roster = FleetRoster::new();
        roster.add("Laser", comp("841"));
        roster.add("Catalina 22", comp("15"));
        roster.add("Laser", comp("9"));

        assert_eq!(roster.fleet_count(), 2);
        assert_eq!(roster.competitor_count(), 3);
        assert_eq!(roster.fleet("Laser").unwrap().len(), 2);
        assert_eq!(roster.fleet("Catalina 22").unwrap().len(), 1);
    }

    #[test]
    fn fleets_keep_insertion_order() {
        let mut roster = FleetRoster::new();
        roster.add("Zebra", comp("1"));
        roster.add("Alpha", comp("2"));
        let names: Vec<&str> = roster.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn sort_orders_each_fleet_by_sail_key() {
        let mut roster = FleetRoster::new();
        for sail in ["1841", "9", "B302", "841"] {
            roster.add("Laser", comp(sail));
        }
        roster.sort_by_sail_number();
        let sails: Vec<&str> =
            roster.fleet("Laser").unwrap().iter().map(|c| c.sail_no.as_str()).collect();
        assert_eq!(sails, vec!["9", "841", "1841", "B302"]);
    }

    proptest! {
        #[test]
        fn grouping_is_total(
            entries in prop::collection::vec(("[A-C]", "[0-9]{1,4}"), 0..40)
        ) {
            let mut roster = FleetRoster::new();
            for (fleet, sail) in &entries {
                roster.add(fleet.clone(), comp(sail));
            }
            roster.sort_by_sail_number();

            // No competitor dropped or duplicated by grouping or sorting.
            prop_assert_eq!(roster.competitor_count(), entries.len());
            let mut input: Vec<String> = entries.iter().map(|(_, s)| s.clone()).collect();
            let mut output: Vec<String> = roster
                .iter()
                .flat_map(|(_, comps)| comps.iter().map(|c| c.sail_no.clone()))
                .collect();
            input.sort();
            output.sort();
            prop_assert_eq!(input, output);
        }
    }
}
