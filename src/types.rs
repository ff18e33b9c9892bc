//src/types.rs

use std::fmt;

/// One of the seven taxonomic levels used in MPA-style classification strings.
///
/// The declaration order is the canonical order (Kingdom first, Species last),
/// so `Ord` and `Rank::ALL` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// All ranks in canonical order.
    pub const ALL: [Rank; 7] = [
        Rank::Kingdom,
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Single-letter code as it appears before `__` in a segment.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Kingdom => "k",
            Rank::Phylum => "p",
            Rank::Class => "c",
            Rank::Order => "o",
            Rank::Family => "f",
            Rank::Genus => "g",
            Rank::Species => "s",
        }
    }

    /// Exact, case-sensitive lookup of a rank code.
    pub fn from_code(code: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Kingdom => "Kingdom",
            Rank::Phylum => "Phylum",
            Rank::Class => "Class",
            Rank::Order => "Order",
            Rank::Family => "Family",
            Rank::Genus => "Genus",
            Rank::Species => "Species",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A name for every rank; an empty string means the rank is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineage {
    names: [String; 7],
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, rank: Rank) -> &str {
        &self.names[rank.index()]
    }

    pub fn set(&mut self, rank: Rank, name: impl Into<String>) {
        self.names[rank.index()] = name.into();
    }

    /// True when every rank carries a non-empty name.
    pub fn is_complete(&self) -> bool {
        self.names.iter().all(|name| !name.is_empty())
    }

    /// `(rank, name)` pairs in canonical order, absent ranks included.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &str)> + '_ {
        Rank::ALL
            .into_iter()
            .map(move |rank| (rank, self.get(rank)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_codes_round_trip_in_canonical_order() {
        let codes: Vec<&str> = Rank::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec!["k", "p", "c", "o", "f", "g", "s"]);

        for rank in Rank::ALL {
            assert_eq!(Rank::from_code(rank.code()), Some(rank));
        }
        assert!(Rank::ALL.windows(2).all(|w| w[0] < w[1]), "ALL must be sorted");
    }

    #[test]
    fn test_from_code_rejects_unknown_codes() {
        assert_eq!(Rank::from_code("x"), None);
        assert_eq!(Rank::from_code("K"), None, "codes are case-sensitive");
        assert_eq!(Rank::from_code(" k"), None, "codes are not trimmed");
        assert_eq!(Rank::from_code(""), None);
        assert_eq!(Rank::from_code("d"), None);
    }

    #[test]
    fn test_lineage_get_set_and_completeness() {
        let mut lineage = Lineage::new();
        assert!(!lineage.is_complete());
        assert!(lineage.iter().all(|(_, name)| name.is_empty()));

        for rank in Rank::ALL {
            lineage.set(rank, rank.name());
        }
        assert!(lineage.is_complete());
        assert_eq!(lineage.get(Rank::Genus), "Genus");

        lineage.set(Rank::Order, "");
        assert!(!lineage.is_complete());
    }

    #[test]
    fn test_display_uses_long_name() {
        assert_eq!(Rank::Family.to_string(), "Family");
    }
}
