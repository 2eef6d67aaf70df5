//! Residues and the numbering schemes used to address them.
//!
//! A residue always has a position in the deposited sequence (SEQRES). It
//! may additionally carry an author/observed number with an insertion code
//! when it was modelled in the structure (ATOM). [`ResidueIndex`] maps
//! between the two.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Residue numbering scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum NumberingScheme {
    /// Deposited sequence order. Every residue has a SEQRES number.
    #[default]
    Seqres,
    /// Observed-in-structure numbering with insertion codes. Unmodelled
    /// residues have no ATOM number.
    Atom,
}

impl fmt::Display for NumberingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seqres => f.write_str("SEQRES"),
            Self::Atom => f.write_str("ATOM"),
        }
    }
}

/// A residue number with an optional insertion code (`52`, `52A`, `-3`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub struct ResidueNumber {
    /// Numeric part.
    pub number: i32,
    /// Insertion code, if any.
    #[serde(default)]
    pub insertion_code: Option<char>,
}

impl ResidueNumber {
    /// Number without insertion code.
    #[must_use]
    pub const fn new(number: i32) -> Self {
        Self {
            number,
            insertion_code: None,
        }
    }

    /// Number with an insertion code.
    #[must_use]
    pub const fn with_insertion(number: i32, insertion_code: char) -> Self {
        Self {
            number,
            insertion_code: Some(insertion_code),
        }
    }
}

impl fmt::Display for ResidueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(code) => write!(f, "{}{code}", self.number),
            None => write!(f, "{}", self.number),
        }
    }
}

impl FromStr for ResidueNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (digits, insertion_code) = match s.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (&s[..s.len() - 1], Some(c)),
            _ => (s, None),
        };
        let number = digits
            .parse::<i32>()
            .map_err(|e| format!("invalid residue number {s:?}: {e}"))?;
        Ok(Self {
            number,
            insertion_code,
        })
    }
}

/// One residue of a chain. Immutable once the owning chain is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    seq_index: usize,
    seq_number: i32,
    observed: Option<ResidueNumber>,
    monomer_id: String,
    one_letter: char,
}

impl Residue {
    /// Create a residue from its SEQRES number and monomer id. The
    /// one-letter code is derived from the monomer id.
    ///
    /// The sequence index is assigned by [`Chain::new`](crate::chain::Chain::new).
    #[must_use]
    pub fn new(seq_number: i32, monomer_id: &str) -> Self {
        let monomer_id = monomer_id.trim().to_uppercase();
        Self {
            seq_index: 0,
            seq_number,
            observed: None,
            one_letter: one_letter_code(&monomer_id),
            monomer_id,
        }
    }

    /// Attach the observed (ATOM) number.
    #[must_use]
    pub fn observed_as(mut self, number: ResidueNumber) -> Self {
        self.observed = Some(number);
        self
    }

    /// Override the one-letter code.
    #[must_use]
    pub fn with_one_letter(mut self, code: char) -> Self {
        self.one_letter = code;
        self
    }

    pub(crate) fn set_seq_index(&mut self, seq_index: usize) {
        self.seq_index = seq_index;
    }

    /// Zero-based position in sequence order.
    #[must_use]
    pub fn seq_index(&self) -> usize {
        self.seq_index
    }

    /// SEQRES number.
    #[must_use]
    pub fn seq_number(&self) -> i32 {
        self.seq_number
    }

    /// Observed (ATOM) number, `None` when the residue was not modelled.
    #[must_use]
    pub fn observed(&self) -> Option<ResidueNumber> {
        self.observed
    }

    /// Chemical component id (three-letter code for amino acids).
    #[must_use]
    pub fn monomer_id(&self) -> &str {
        &self.monomer_id
    }

    /// One-letter code.
    #[must_use]
    pub fn one_letter(&self) -> char {
        self.one_letter
    }

    /// Number of this residue in `scheme`, if it has one.
    #[must_use]
    pub fn number(&self, scheme: NumberingScheme) -> Option<ResidueNumber> {
        match scheme {
            NumberingScheme::Seqres => Some(ResidueNumber::new(self.seq_number)),
            NumberingScheme::Atom => self.observed,
        }
    }

    /// Scheme-specific identifier text (`"52A"`), if the residue exists in
    /// `scheme`.
    #[must_use]
    pub fn id(&self, scheme: NumberingScheme) -> Option<String> {
        self.number(scheme).map(|n| n.to_string())
    }
}

/// One-letter code for a chemical component id. Unknown components map to
/// `X`.
#[must_use]
pub fn one_letter_code(monomer_id: &str) -> char {
    match monomer_id {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        "SEC" => 'U',
        "PYL" => 'O',
        // Nucleotides
        "A" | "DA" => 'A',
        "C" | "DC" => 'C',
        "G" | "DG" => 'G',
        "U" => 'U',
        "DT" => 'T',
        _ => 'X',
    }
}

/// Bidirectional mapping between numbering schemes for one chain.
///
/// SEQRES lookups are total over the chain; ATOM lookups are partial.
#[derive(Debug, Clone, Default)]
pub struct ResidueIndex {
    by_seqres: FxHashMap<i32, usize>,
    by_atom: FxHashMap<ResidueNumber, usize>,
    seqres_order: Vec<usize>,
    atom_order: Vec<usize>,
    numbers: Vec<(i32, Option<ResidueNumber>)>,
}

impl ResidueIndex {
    /// Index residues already in sequence order.
    #[must_use]
    pub fn new(residues: &[Residue]) -> Self {
        let mut index = Self::default();
        for (i, residue) in residues.iter().enumerate() {
            let _ = index.by_seqres.insert(residue.seq_number, i);
            index.seqres_order.push(i);
            if let Some(observed) = residue.observed {
                let _ = index.by_atom.insert(observed, i);
                index.atom_order.push(i);
            }
            index.numbers.push((residue.seq_number, residue.observed));
        }
        index
    }

    /// Sequence index of the residue numbered `number` in `scheme`.
    #[must_use]
    pub fn position(
        &self,
        scheme: NumberingScheme,
        number: ResidueNumber,
    ) -> Option<usize> {
        match scheme {
            NumberingScheme::Seqres => {
                if number.insertion_code.is_some() {
                    return None;
                }
                self.by_seqres.get(&number.number).copied()
            }
            NumberingScheme::Atom => self.by_atom.get(&number).copied(),
        }
    }

    /// Sequence index of the residue whose identifier text in `scheme` is
    /// `id`.
    #[must_use]
    pub fn lookup(&self, scheme: NumberingScheme, id: &str) -> Option<usize> {
        let number = id.parse::<ResidueNumber>().ok()?;
        self.position(scheme, number)
    }

    /// Number of the residue at `seq_index` in `scheme`.
    #[must_use]
    pub fn number(
        &self,
        scheme: NumberingScheme,
        seq_index: usize,
    ) -> Option<ResidueNumber> {
        let (seqres, observed) = *self.numbers.get(seq_index)?;
        match scheme {
            NumberingScheme::Seqres => Some(ResidueNumber::new(seqres)),
            NumberingScheme::Atom => observed,
        }
    }

    /// Translate a residue number from one scheme to another.
    #[must_use]
    pub fn equivalent(
        &self,
        from: NumberingScheme,
        to: NumberingScheme,
        number: ResidueNumber,
    ) -> Option<ResidueNumber> {
        let seq_index = self.position(from, number)?;
        self.number(to, seq_index)
    }

    /// Sequence indices of the residues present in `scheme`, ascending.
    #[must_use]
    pub fn residues_in(&self, scheme: NumberingScheme) -> &[usize] {
        match scheme {
            NumberingScheme::Seqres => &self.seqres_order,
            NumberingScheme::Atom => &self.atom_order,
        }
    }

    /// Number of residues indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residues() -> Vec<Residue> {
        let mut residues = vec![
            Residue::new(1, "MET"),
            Residue::new(2, "ALA").observed_as(ResidueNumber::new(10)),
            Residue::new(3, "GLY")
                .observed_as(ResidueNumber::with_insertion(10, 'A')),
            Residue::new(4, "CYS").observed_as(ResidueNumber::new(11)),
        ];
        for (i, r) in residues.iter_mut().enumerate() {
            r.set_seq_index(i);
        }
        residues
    }

    #[test]
    fn residue_number_parses_insertion_codes() {
        assert_eq!(
            "52A".parse::<ResidueNumber>(),
            Ok(ResidueNumber::with_insertion(52, 'A'))
        );
        assert_eq!("-3".parse::<ResidueNumber>(), Ok(ResidueNumber::new(-3)));
        assert_eq!(" 7 ".parse::<ResidueNumber>(), Ok(ResidueNumber::new(7)));
        assert!("A".parse::<ResidueNumber>().is_err());
        assert!("".parse::<ResidueNumber>().is_err());
    }

    #[test]
    fn residue_number_display_includes_insertion_code() {
        assert_eq!(ResidueNumber::with_insertion(100, 'B').to_string(), "100B");
        assert_eq!(ResidueNumber::new(-1).to_string(), "-1");
    }

    #[test]
    fn seqres_lookup_is_total_atom_lookup_is_partial() {
        let index = ResidueIndex::new(&residues());
        for n in 1..=4 {
            assert!(index
                .position(NumberingScheme::Seqres, ResidueNumber::new(n))
                .is_some());
        }
        assert_eq!(index.number(NumberingScheme::Atom, 0), None);
        assert_eq!(
            index.number(NumberingScheme::Atom, 2),
            Some(ResidueNumber::with_insertion(10, 'A'))
        );
    }

    #[test]
    fn lookup_by_identifier_text() {
        let index = ResidueIndex::new(&residues());
        assert_eq!(index.lookup(NumberingScheme::Atom, "10A"), Some(2));
        assert_eq!(index.lookup(NumberingScheme::Atom, "10"), Some(1));
        assert_eq!(index.lookup(NumberingScheme::Seqres, "10A"), None);
        assert_eq!(index.lookup(NumberingScheme::Seqres, "4"), Some(3));
    }

    #[test]
    fn equivalent_translates_between_schemes() {
        let index = ResidueIndex::new(&residues());
        assert_eq!(
            index.equivalent(
                NumberingScheme::Seqres,
                NumberingScheme::Atom,
                ResidueNumber::new(4)
            ),
            Some(ResidueNumber::new(11))
        );
        assert_eq!(
            index.equivalent(
                NumberingScheme::Seqres,
                NumberingScheme::Atom,
                ResidueNumber::new(1)
            ),
            None
        );
        assert_eq!(
            index.equivalent(
                NumberingScheme::Atom,
                NumberingScheme::Seqres,
                ResidueNumber::with_insertion(10, 'A')
            ),
            Some(ResidueNumber::new(3))
        );
    }

    #[test]
    fn scheme_orders_are_ascending() {
        let index = ResidueIndex::new(&residues());
        assert_eq!(index.residues_in(NumberingScheme::Seqres), &[0, 1, 2, 3]);
        assert_eq!(index.residues_in(NumberingScheme::Atom), &[1, 2, 3]);
    }

    #[test]
    fn one_letter_codes() {
        assert_eq!(Residue::new(1, "trp").one_letter(), 'W');
        assert_eq!(Residue::new(1, "MSE").one_letter(), 'X');
        assert_eq!(Residue::new(1, "MSE").with_one_letter('M').one_letter(), 'M');
    }
}
