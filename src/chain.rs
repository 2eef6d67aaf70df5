//! A polymer chain: its residues in sequence order plus the numbering index.

use crate::residue::{NumberingScheme, Residue, ResidueIndex};

/// One chain of a structure. Owns its residues; annotations refer to them
/// by sequence index.
#[derive(Debug, Clone)]
pub struct Chain {
    structure_id: String,
    chain_id: String,
    residues: Vec<Residue>,
    index: ResidueIndex,
}

impl Chain {
    /// Create a chain from residues given in sequence order. Sequence
    /// indices are assigned from the position in `residues`.
    #[must_use]
    pub fn new(
        structure_id: &str,
        chain_id: &str,
        mut residues: Vec<Residue>,
    ) -> Self {
        for (i, residue) in residues.iter_mut().enumerate() {
            residue.set_seq_index(i);
        }
        let index = ResidueIndex::new(&residues);
        Self {
            structure_id: structure_id.to_owned(),
            chain_id: chain_id.to_owned(),
            residues,
            index,
        }
    }

    /// Identifier of the owning structure.
    #[must_use]
    pub fn structure_id(&self) -> &str {
        &self.structure_id
    }

    /// Chain identifier.
    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// All residues in sequence order.
    #[must_use]
    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Residue at a sequence index.
    #[must_use]
    pub fn residue(&self, seq_index: usize) -> Option<&Residue> {
        self.residues.get(seq_index)
    }

    /// Residue whose identifier in `scheme` is `id` (`"52A"`).
    #[must_use]
    pub fn residue_by_id(
        &self,
        scheme: NumberingScheme,
        id: &str,
    ) -> Option<&Residue> {
        self.index
            .lookup(scheme, id)
            .and_then(|i| self.residues.get(i))
    }

    /// Numbering index for this chain.
    #[must_use]
    pub fn index(&self) -> &ResidueIndex {
        &self.index
    }

    /// Number of residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Whether the chain has no residues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// One-letter sequence.
    #[must_use]
    pub fn sequence(&self) -> String {
        self.residues.iter().map(Residue::one_letter).collect()
    }

    /// Whether `residue` belongs to this chain (same position and SEQRES
    /// number).
    #[must_use]
    pub fn contains(&self, residue: &Residue) -> bool {
        self.residues
            .get(residue.seq_index())
            .is_some_and(|r| r.seq_number() == residue.seq_number())
    }
}

#[cfg(test)]
pub(crate) mod test_chains {
    //! Chain fixtures shared by unit tests.

    use super::Chain;
    use crate::residue::{Residue, ResidueNumber};

    /// `len` alanines numbered 1..=len in both schemes.
    pub(crate) fn poly_ala(chain_id: &str, len: i32) -> Chain {
        let residues = (1..=len)
            .map(|n| Residue::new(n, "ALA").observed_as(ResidueNumber::new(n)))
            .collect();
        Chain::new("1ABC", chain_id, residues)
    }

    /// `len` residues that were never modelled (no ATOM numbers).
    pub(crate) fn unobserved(chain_id: &str, len: i32) -> Chain {
        let residues = (1..=len).map(|n| Residue::new(n, "GLY")).collect();
        Chain::new("1ABC", chain_id, residues)
    }
}

#[cfg(test)]
mod tests {
    use super::test_chains::poly_ala;
    use super::*;
    use crate::residue::ResidueNumber;

    #[test]
    fn indices_follow_input_order() {
        let chain = poly_ala("A", 5);
        let indices: Vec<usize> =
            chain.residues().iter().map(Residue::seq_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(chain.sequence(), "AAAAA");
    }

    #[test]
    fn residue_by_id_uses_scheme() {
        let chain = Chain::new(
            "1ABC",
            "A",
            vec![
                Residue::new(1, "MET"),
                Residue::new(2, "LYS")
                    .observed_as(ResidueNumber::with_insertion(5, 'B')),
            ],
        );
        let r = chain.residue_by_id(NumberingScheme::Atom, "5B");
        assert_eq!(r.map(Residue::monomer_id), Some("LYS"));
        assert!(chain.residue_by_id(NumberingScheme::Atom, "1").is_none());
        assert_eq!(
            chain
                .residue_by_id(NumberingScheme::Seqres, "1")
                .map(Residue::one_letter),
            Some('M')
        );
    }

    #[test]
    fn contains_rejects_foreign_residues() {
        let chain = poly_ala("A", 3);
        let other = poly_ala("B", 10);
        assert!(chain.contains(&chain.residues()[2]));
        assert!(!chain.contains(&other.residues()[7]));
    }
}
