//! Fixed-width pagination of a chain's sequence.
//!
//! Residues are laid out in one numbering scheme. A *position* is an index
//! into the residues visible in that scheme (every residue for SEQRES, the
//! observed ones for ATOM); segments are half-open position ranges of
//! `width` columns, the last one possibly shorter.

use std::ops::Range;
use std::sync::Arc;

use crate::annotation::{
    AnnotatedChain, AnnotationGroup, AnnotationRange, Classification,
};
use crate::error::AnnotError;
use crate::residue::{NumberingScheme, Residue};

/// One display line: positions `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Zero-based segment number.
    pub index: usize,
    /// First position.
    pub start: usize,
    /// One past the last position.
    pub end: usize,
}

impl Segment {
    /// Number of columns used.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the segment has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Positions covered.
    #[must_use]
    pub fn positions(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `span` overlaps this segment.
    #[must_use]
    pub fn overlaps(&self, span: &Range<usize>) -> bool {
        span.start < self.end && self.start < span.end
    }
}

/// An annotated chain split into segments in one numbering scheme.
#[derive(Debug)]
pub struct SegmentedSequence {
    annotated: Arc<AnnotatedChain>,
    scheme: NumberingScheme,
    width: usize,
    positions: Vec<usize>,
    segments: Vec<Segment>,
    with_data: Vec<Vec<usize>>,
}

impl SegmentedSequence {
    /// Paginate `annotated` into lines of `width` residues in `scheme`.
    /// Every group is built here.
    ///
    /// # Errors
    ///
    /// - [`AnnotError::InvalidWidth`] for a zero width
    /// - [`AnnotError::SchemeUnavailable`] when no residue of the chain is
    ///   numbered in `scheme`; callers fall back to SEQRES
    pub fn new(
        annotated: Arc<AnnotatedChain>,
        width: usize,
        scheme: NumberingScheme,
    ) -> Result<Self, AnnotError> {
        if width == 0 {
            return Err(AnnotError::InvalidWidth(width));
        }
        let chain = annotated.chain();
        let positions = chain.index().residues_in(scheme).to_vec();
        if positions.is_empty() {
            return Err(AnnotError::SchemeUnavailable {
                chain_id: chain.chain_id().to_owned(),
                scheme,
            });
        }
        let segments: Vec<Segment> = (0..positions.len())
            .step_by(width)
            .enumerate()
            .map(|(index, start)| Segment {
                index,
                start,
                end: (start + width).min(positions.len()),
            })
            .collect();
        let mut sequence = Self {
            annotated,
            scheme,
            width,
            positions,
            with_data: vec![Vec::new(); segments.len()],
            segments,
        };
        sequence.with_data = sequence.index_groups();
        Ok(sequence)
    }

    /// For each segment, the registration-order indices of the groups
    /// with a range overlapping it.
    fn index_groups(&self) -> Vec<Vec<usize>> {
        let mut with_data = vec![Vec::new(); self.segments.len()];
        for (g, group) in self.annotated.groups().enumerate() {
            let mut seen = vec![false; self.segments.len()];
            for span in group.ranges().iter().filter_map(|r| self.scheme_span(r))
            {
                let first = span.start / self.width;
                let last = (span.end - 1) / self.width;
                for flag in &mut seen[first..=last] {
                    *flag = true;
                }
            }
            for (segment, _) in seen.iter().enumerate().filter(|(_, s)| **s) {
                with_data[segment].push(g);
            }
        }
        with_data
    }

    /// The annotated chain.
    #[must_use]
    pub fn annotated(&self) -> &Arc<AnnotatedChain> {
        &self.annotated
    }

    /// Numbering scheme of the layout.
    #[must_use]
    pub fn scheme(&self) -> NumberingScheme {
        self.scheme
    }

    /// Residues per segment.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of positions (residues visible in the scheme).
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; construction rejects an empty scheme.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// All segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Segment containing `position`.
    #[must_use]
    pub fn segment_of(&self, position: usize) -> Option<&Segment> {
        self.segments.get(position / self.width)
    }

    /// Residue displayed at `position`.
    #[must_use]
    pub fn residue_at(&self, position: usize) -> Option<&Residue> {
        let seq_index = *self.positions.get(position)?;
        self.annotated.chain().residue(seq_index)
    }

    /// Scheme identifier (`"52A"`) of the residue at `position`.
    #[must_use]
    pub fn residue_id(&self, position: usize) -> Option<String> {
        self.residue_at(position)?.id(self.scheme)
    }

    /// Position of the residue with sequence index `seq_index`, if it is
    /// visible in the scheme.
    #[must_use]
    pub fn position_of(&self, seq_index: usize) -> Option<usize> {
        self.positions.binary_search(&seq_index).ok()
    }

    /// Half-open positions covered by `range`; `None` when none of its
    /// residues is visible in the scheme.
    #[must_use]
    pub fn scheme_span(&self, range: &AnnotationRange) -> Option<Range<usize>> {
        let lo = self.positions.partition_point(|&s| s < range.start);
        let hi = self.positions.partition_point(|&s| s <= range.end);
        (lo < hi).then_some(lo..hi)
    }

    /// First group in registration order under `classification` that has
    /// data.
    #[must_use]
    pub fn first_annotation_group_with_data(
        &self,
        classification: Classification,
    ) -> Option<&Arc<AnnotationGroup>> {
        self.annotated.first_group_with_data(classification)
    }

    /// Groups with at least one range overlapping segment `segment`, in
    /// registration order.
    pub fn groups_with_data(
        &self,
        segment: usize,
    ) -> impl Iterator<Item = &Arc<AnnotationGroup>> {
        let wanted = self.with_data.get(segment).map_or(&[][..], Vec::as_slice);
        self.annotated
            .groups()
            .enumerate()
            .filter(move |(g, _)| wanted.binary_search(g).is_ok())
            .map(|(_, group)| group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{AnnotationKind, AnnotationRegistry, AnnotationValue};
    use crate::chain::test_chains::unobserved;
    use crate::modification::LigandCache;
    use crate::provider::fixtures::document_json;
    use crate::provider::{DocumentProvider, StructureProvider};

    fn chain_a() -> Arc<AnnotatedChain> {
        let provider: Arc<dyn StructureProvider> =
            Arc::new(DocumentProvider::from_json(&document_json()).unwrap());
        let registry =
            AnnotationRegistry::with_defaults(Arc::new(LigandCache::new()));
        Arc::new(AnnotatedChain::load(&provider, &registry, "1ABC", "A").unwrap())
    }

    #[test]
    fn segments_partition_the_visible_residues() {
        let seqres =
            SegmentedSequence::new(chain_a(), 40, NumberingScheme::Seqres)
                .unwrap();
        let lens: Vec<usize> = seqres.segments().iter().map(Segment::len).collect();
        assert_eq!(lens, vec![40, 40, 20]);
        let atom =
            SegmentedSequence::new(chain_a(), 40, NumberingScheme::Atom).unwrap();
        let lens: Vec<usize> = atom.segments().iter().map(Segment::len).collect();
        assert_eq!(lens, vec![40, 40, 15]);
        assert_eq!(atom.residue_id(0).as_deref(), Some("6"));
        assert_eq!(atom.residue_id(45).as_deref(), Some("50A"));
        assert_eq!(atom.segment_of(45).unwrap().index, 1);
    }

    #[test]
    fn unavailable_scheme_falls_back_to_seqres() {
        let chain = Arc::new(unobserved("C", 12));
        let annotated = Arc::new(AnnotatedChain::from_groups(chain, Vec::new()));
        let err = SegmentedSequence::new(
            Arc::clone(&annotated),
            5,
            NumberingScheme::Atom,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AnnotError::SchemeUnavailable {
                scheme: NumberingScheme::Atom,
                ..
            }
        ));
        let fallback =
            SegmentedSequence::new(annotated, 5, NumberingScheme::Seqres)
                .unwrap();
        assert_eq!(fallback.segment_count(), 3);
        assert_eq!(fallback.segment(2).unwrap().len(), 2);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(
            SegmentedSequence::new(chain_a(), 0, NumberingScheme::Seqres),
            Err(AnnotError::InvalidWidth(0))
        ));
    }

    #[test]
    fn scheme_span_skips_unobserved_residues() {
        let atom =
            SegmentedSequence::new(chain_a(), 40, NumberingScheme::Atom).unwrap();
        let range = |start, end| AnnotationRange {
            value: AnnotationValue::domain("d"),
            start,
            end,
        };
        assert_eq!(atom.scheme_span(&range(0, 9)), Some(0..5));
        assert_eq!(atom.scheme_span(&range(0, 4)), None);
        assert_eq!(atom.scheme_span(&range(95, 99)), Some(90..95));
    }

    #[test]
    fn groups_with_data_per_segment() {
        let seq =
            SegmentedSequence::new(chain_a(), 40, NumberingScheme::Seqres)
                .unwrap();
        let names = |segment| -> Vec<String> {
            seq.groups_with_data(segment)
                .map(|g| g.kind().name().to_owned())
                .collect()
        };
        assert_eq!(
            names(0),
            vec!["Author", "DSSP", "CATH", "Disulfide bond", "Cross-link", "Site"]
        );
        assert_eq!(
            names(1),
            vec!["Author", "CATH", "Cross-link", "Modified residue"]
        );
        assert_eq!(names(2), vec!["CATH", "Cross-link", "Site"]);
        assert!(names(3).is_empty());
        let ss = seq
            .first_annotation_group_with_data(Classification::SecondaryStructure)
            .unwrap();
        assert_eq!(ss.kind().name(), "Author");
    }

    #[test]
    fn empty_groups_have_no_segments() {
        let chain = Arc::new(unobserved("C", 12));
        let kind = Arc::new(AnnotationKind::new(
            "empty",
            Classification::Domain,
            None,
        ));
        let group = AnnotationGroup::with_annotations(
            kind,
            Arc::clone(&chain),
            Vec::new(),
        );
        let annotated = Arc::new(AnnotatedChain::from_groups(chain, [group]));
        let seq =
            SegmentedSequence::new(annotated, 4, NumberingScheme::Seqres).unwrap();
        assert_eq!(seq.groups_with_data(0).count(), 0);
    }
}
