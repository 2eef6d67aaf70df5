//! Per (chain, annotation kind) storage of annotation facts.
//!
//! A group is built once, lazily, by running its kind's construct hook
//! against the structure provider. Everything derived from the facts
//! (ranges, fragment counts, residue counts) is read-only afterwards.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;

use super::kind::AnnotationKind;
use super::value::AnnotationValue;
use crate::chain::Chain;
use crate::error::AnnotError;
use crate::provider::StructureProvider;
use crate::residue::{NumberingScheme, Residue, ResidueNumber};

/// The atomic fact: `value` holds for the residue at `residue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    residue: usize,
    value: AnnotationValue,
}

impl Annotation {
    /// Sequence index of the annotated residue.
    #[must_use]
    pub fn residue(&self) -> usize {
        self.residue
    }

    /// Assigned value.
    #[must_use]
    pub fn value(&self) -> &AnnotationValue {
        &self.value
    }
}

/// Maximal run of consecutive residues sharing one value. `start` and `end`
/// are inclusive sequence indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRange {
    /// Shared value.
    pub value: AnnotationValue,
    /// First sequence index.
    pub start: usize,
    /// Last sequence index (inclusive).
    pub end: usize,
}

impl AnnotationRange {
    /// Number of residues covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one residue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the range covers sequence index `seq_index`.
    #[must_use]
    pub fn contains(&self, seq_index: usize) -> bool {
        (self.start..=self.end).contains(&seq_index)
    }
}

/// Write side of a build: the construct hook records facts here.
///
/// Later facts for the same residue replace earlier ones.
#[derive(Debug)]
pub struct AnnotationCollector<'a> {
    chain: &'a Chain,
    slots: Vec<Option<AnnotationValue>>,
}

impl<'a> AnnotationCollector<'a> {
    fn new(chain: &'a Chain) -> Self {
        Self {
            chain,
            slots: vec![None; chain.len()],
        }
    }

    /// Chain being annotated.
    #[must_use]
    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    /// Record `value` for one residue.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when `residue` is not part of the chain.
    pub fn add_annotation(
        &mut self,
        value: AnnotationValue,
        residue: &Residue,
    ) -> Result<(), AnnotError> {
        if !self.chain.contains(residue) {
            return Err(self.missing(residue.seq_number()));
        }
        self.slots[residue.seq_index()] = Some(value);
        Ok(())
    }

    /// Record `value` for every residue from `start` to `end` inclusive, in
    /// sequence order. A reversed range is normalised.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when either end is not part of the chain.
    pub fn add_annotation_range(
        &mut self,
        value: &AnnotationValue,
        start: &Residue,
        end: &Residue,
    ) -> Result<(), AnnotError> {
        for residue in [start, end] {
            if !self.chain.contains(residue) {
                return Err(self.missing(residue.seq_number()));
            }
        }
        let (lo, hi) = if start.seq_index() <= end.seq_index() {
            (start.seq_index(), end.seq_index())
        } else {
            (end.seq_index(), start.seq_index())
        };
        for slot in &mut self.slots[lo..=hi] {
            *slot = Some(value.clone());
        }
        Ok(())
    }

    /// Record `value` for the residue with SEQRES number `seq_number`.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when no residue has that number.
    pub fn add_at_seq_number(
        &mut self,
        value: AnnotationValue,
        seq_number: i32,
    ) -> Result<(), AnnotError> {
        let residue = self.seqres(seq_number)?;
        self.add_annotation(value, residue)
    }

    /// Record `value` for SEQRES numbers `start..=end`, clipped to the
    /// chain's first and last SEQRES number.
    ///
    /// # Errors
    ///
    /// [`AnnotError::NotFound`] when the range lies entirely outside the
    /// chain.
    pub fn add_seq_number_range(
        &mut self,
        value: &AnnotationValue,
        start: i32,
        end: i32,
    ) -> Result<(), AnnotError> {
        let (lo, hi) = (start.min(end), start.max(end));
        let residues = self.chain.residues();
        let (Some(first), Some(last)) = (residues.first(), residues.last())
        else {
            return Err(self.missing(lo));
        };
        let clipped = (lo.max(first.seq_number()), hi.min(last.seq_number()));
        if clipped.0 > clipped.1 {
            return Err(self.missing(lo));
        }
        if clipped != (lo, hi) {
            log::debug!(
                "{value}: clipping {lo}..={hi} to {}..={} on chain {}",
                clipped.0,
                clipped.1,
                self.chain.chain_id()
            );
        }
        let start = self.seqres(clipped.0)?;
        let end = self.seqres(clipped.1)?;
        self.add_annotation_range(value, start, end)
    }

    fn seqres(&self, seq_number: i32) -> Result<&'a Residue, AnnotError> {
        let chain = self.chain;
        chain
            .index()
            .position(NumberingScheme::Seqres, ResidueNumber::new(seq_number))
            .and_then(|i| chain.residue(i))
            .ok_or_else(|| self.missing(seq_number))
    }

    fn missing(&self, seq_number: i32) -> AnnotError {
        AnnotError::NotFound(format!(
            "residue {seq_number} in chain {}",
            self.chain.chain_id()
        ))
    }

    fn finish(self) -> Vec<Annotation> {
        self.slots
            .into_iter()
            .enumerate()
            .filter_map(|(residue, value)| {
                value.map(|value| Annotation { residue, value })
            })
            .collect()
    }
}

/// Built, immutable state of a group.
#[derive(Debug, Default)]
struct BuiltAnnotations {
    annotations: Vec<Annotation>,
    value_counts: IndexMap<AnnotationValue, usize>,
    residue_counts: IndexMap<AnnotationValue, usize>,
    error: Option<AnnotError>,
}

impl BuiltAnnotations {
    fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut value_counts = IndexMap::new();
        let mut residue_counts = IndexMap::new();
        for range in scan_ranges(&annotations) {
            *value_counts.entry(range.value.clone()).or_insert(0) += 1;
            *residue_counts.entry(range.value).or_insert(0) += range.end
                - range.start
                + 1;
        }
        Self {
            annotations,
            value_counts,
            residue_counts,
            error: None,
        }
    }

    fn failed(error: AnnotError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Single pass over annotations in sequence order, flushing a range
/// whenever the value changes or a residue is skipped.
fn scan_ranges(annotations: &[Annotation]) -> Vec<AnnotationRange> {
    let mut ranges = Vec::new();
    let mut current: Option<AnnotationRange> = None;
    for annotation in annotations {
        if let Some(open) = current.as_mut() {
            if open.value == annotation.value
                && open.end + 1 == annotation.residue
            {
                open.end = annotation.residue;
                continue;
            }
        }
        if let Some(done) = current.replace(AnnotationRange {
            value: annotation.value.clone(),
            start: annotation.residue,
            end: annotation.residue,
        }) {
            ranges.push(done);
        }
    }
    ranges.extend(current);
    ranges
}

/// Annotations of one kind for one chain.
pub struct AnnotationGroup {
    kind: Arc<AnnotationKind>,
    chain: Arc<Chain>,
    provider: Option<Arc<dyn StructureProvider>>,
    built: OnceLock<BuiltAnnotations>,
}

impl std::fmt::Debug for AnnotationGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationGroup")
            .field("kind", &self.kind.name())
            .field("chain", &self.chain.chain_id())
            .field("built", &self.built.get().is_some())
            .finish_non_exhaustive()
    }
}

impl AnnotationGroup {
    /// Group whose facts are constructed lazily from `provider` through the
    /// kind's source.
    #[must_use]
    pub fn new(
        kind: Arc<AnnotationKind>,
        chain: Arc<Chain>,
        provider: Arc<dyn StructureProvider>,
    ) -> Self {
        Self {
            kind,
            chain,
            provider: Some(provider),
            built: OnceLock::new(),
        }
    }

    /// Already-built group from explicit `(seq_index, value)` facts. Later
    /// facts for the same residue win; out-of-range indices are dropped.
    #[must_use]
    pub fn with_annotations(
        kind: Arc<AnnotationKind>,
        chain: Arc<Chain>,
        facts: impl IntoIterator<Item = (usize, AnnotationValue)>,
    ) -> Self {
        let mut collector = AnnotationCollector::new(&chain);
        for (seq_index, value) in facts {
            match chain.residue(seq_index) {
                Some(residue) => {
                    collector.slots[residue.seq_index()] = Some(value);
                }
                None => log::warn!(
                    "{}: dropping fact for residue index {seq_index} outside \
                     chain {}",
                    kind.name(),
                    chain.chain_id()
                ),
            }
        }
        let built = BuiltAnnotations::from_annotations(collector.finish());
        Self {
            kind,
            chain,
            provider: None,
            built: OnceLock::from(built),
        }
    }

    /// Annotation kind.
    #[must_use]
    pub fn kind(&self) -> &Arc<AnnotationKind> {
        &self.kind
    }

    /// Annotated chain.
    #[must_use]
    pub fn chain(&self) -> &Arc<Chain> {
        &self.chain
    }

    /// Build the group if it has not been built yet. Concurrent callers
    /// block until the single build completes.
    ///
    /// # Errors
    ///
    /// The [`AnnotError::Build`] recorded when the construct hook failed.
    /// The group is then empty.
    pub fn build(&self) -> Result<(), &AnnotError> {
        self.built().error.as_ref().map_or(Ok(()), Err)
    }

    /// Error recorded by a failed build, if any.
    #[must_use]
    pub fn build_error(&self) -> Option<&AnnotError> {
        self.built().error.as_ref()
    }

    fn built(&self) -> &BuiltAnnotations {
        self.built.get_or_init(|| self.run_build())
    }

    fn run_build(&self) -> BuiltAnnotations {
        let (Some(source), Some(provider)) =
            (self.kind.source(), self.provider.as_deref())
        else {
            log::debug!(
                "{}: no construct hook; chain {} has no annotations",
                self.kind.name(),
                self.chain.chain_id()
            );
            return BuiltAnnotations::default();
        };
        let mut collector = AnnotationCollector::new(&self.chain);
        match source.construct(provider, &self.chain, &mut collector) {
            Ok(()) => BuiltAnnotations::from_annotations(collector.finish()),
            Err(e) => {
                log::warn!(
                    "{} annotations unavailable for {}:{}: {e}",
                    self.kind.name(),
                    self.chain.structure_id(),
                    self.chain.chain_id()
                );
                let error = match e {
                    AnnotError::Build { .. } => e,
                    other => AnnotError::Build {
                        kind: self.kind.name().to_owned(),
                        reason: other.to_string(),
                    },
                };
                BuiltAnnotations::failed(error)
            }
        }
    }

    /// Annotations in residue sequence order.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.built().annotations
    }

    /// Maximal ranges in sequence order, recomputed by a linear scan.
    #[must_use]
    pub fn ranges(&self) -> Vec<AnnotationRange> {
        scan_ranges(self.annotations())
    }

    /// Number of disjoint ranges per value, in first-appearance order.
    #[must_use]
    pub fn annotation_value_count(&self) -> &IndexMap<AnnotationValue, usize> {
        &self.built().value_counts
    }

    /// Residues carrying each value, in first-appearance order.
    #[must_use]
    pub fn residues_per_annotation_value(
        &self,
    ) -> &IndexMap<AnnotationValue, usize> {
        &self.built().residue_counts
    }

    /// Distinct values in first-appearance order.
    pub fn values(&self) -> impl Iterator<Item = &AnnotationValue> {
        self.built().value_counts.keys()
    }

    /// Value at a sequence index, if annotated.
    #[must_use]
    pub fn value_at(&self, seq_index: usize) -> Option<&AnnotationValue> {
        let annotations = self.annotations();
        annotations
            .binary_search_by_key(&seq_index, Annotation::residue)
            .ok()
            .map(|i| &annotations[i].value)
    }

    /// Whether at least one annotation exists after the build.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.annotations().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::*;
    use crate::annotation::kind::Classification;
    use crate::annotation::source::AnnotationSource;
    use crate::annotation::SsType;
    use crate::chain::test_chains::poly_ala;
    use crate::layout::DrawerKind;
    use crate::modification::Modification;

    const H: AnnotationValue = AnnotationValue::SecondaryStructure(SsType::Helix);
    const E: AnnotationValue =
        AnnotationValue::SecondaryStructure(SsType::Strand);

    fn ss_kind() -> Arc<AnnotationKind> {
        Arc::new(AnnotationKind::new(
            "test-ss",
            Classification::SecondaryStructure,
            Some(DrawerKind::SecondaryStructure),
        ))
    }

    /// Residues 1-100; H on 10-25 and 40-45, E on 60-70 (SEQRES numbers).
    fn scenario_facts() -> Vec<(usize, AnnotationValue)> {
        let mut facts = Vec::new();
        facts.extend((9..=24).map(|i| (i, H)));
        facts.extend((39..=44).map(|i| (i, H)));
        facts.extend((59..=69).map(|i| (i, E)));
        facts
    }

    fn scenario_group() -> AnnotationGroup {
        AnnotationGroup::with_annotations(
            ss_kind(),
            Arc::new(poly_ala("A", 100)),
            scenario_facts(),
        )
    }

    #[test]
    fn scenario_counts() {
        let group = scenario_group();
        let counts = group.annotation_value_count();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&H], 2);
        assert_eq!(counts[&E], 1);
        let residues = group.residues_per_annotation_value();
        assert_eq!(residues[&H], 22);
        assert_eq!(residues[&E], 11);
        let values: Vec<&AnnotationValue> = group.values().collect();
        assert_eq!(values, vec![&H, &E]);
    }

    #[test]
    fn ranges_are_idempotent_and_maximal() {
        let group = scenario_group();
        let first = group.ranges();
        assert_eq!(first, group.ranges());
        assert_eq!(first.len(), 3);
        for range in &first {
            if range.start > 0 {
                assert_ne!(group.value_at(range.start - 1), Some(&range.value));
            }
            assert_ne!(group.value_at(range.end + 1), Some(&range.value));
        }
    }

    #[test]
    fn counts_agree_with_ranges() {
        let group = scenario_group();
        let ranges = group.ranges();
        for (value, &count) in group.annotation_value_count() {
            let of_value: Vec<_> =
                ranges.iter().filter(|r| &r.value == value).collect();
            assert_eq!(of_value.len(), count);
            let covered: usize = of_value.iter().map(|r| r.len()).sum();
            assert_eq!(covered, group.residues_per_annotation_value()[value]);
        }
    }

    #[test]
    fn adjacent_different_values_split() {
        let facts = vec![(0, H), (1, H), (2, E), (3, E), (4, H)];
        let group = AnnotationGroup::with_annotations(
            ss_kind(),
            Arc::new(poly_ala("A", 5)),
            facts,
        );
        let ranges: Vec<(usize, usize)> =
            group.ranges().iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(ranges, vec![(0, 1), (2, 3), (4, 4)]);
        assert_eq!(group.annotation_value_count()[&H], 2);
    }

    #[test]
    fn duplicate_facts_last_write_wins() {
        let group = AnnotationGroup::with_annotations(
            ss_kind(),
            Arc::new(poly_ala("A", 3)),
            vec![(1, H), (1, E), (7, H)],
        );
        assert_eq!(group.annotations().len(), 1);
        assert_eq!(group.value_at(1), Some(&E));
    }

    #[test]
    fn fact_order_does_not_change_ranges() {
        let reference = scenario_group().ranges();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..5 {
            let mut facts = scenario_facts();
            facts.shuffle(&mut rng);
            let group = AnnotationGroup::with_annotations(
                ss_kind(),
                Arc::new(poly_ala("A", 100)),
                facts,
            );
            assert_eq!(group.ranges(), reference);
        }
    }

    #[test]
    fn collector_range_expands_and_normalises() {
        let chain = poly_ala("A", 10);
        let mut collector = AnnotationCollector::new(&chain);
        collector
            .add_annotation_range(
                &H,
                &chain.residues()[6],
                &chain.residues()[3],
            )
            .unwrap();
        collector.add_seq_number_range(&E, 9, 10).unwrap();
        collector.add_at_seq_number(E, 4).unwrap();
        let annotations = collector.finish();
        let indices: Vec<usize> =
            annotations.iter().map(Annotation::residue).collect();
        assert_eq!(indices, vec![3, 4, 5, 6, 8, 9]);
        assert_eq!(annotations[0].value(), &E);
        assert_eq!(annotations[1].value(), &H);
    }

    #[test]
    fn seq_number_ranges_are_clipped_to_the_chain() {
        let chain = poly_ala("A", 10);
        let mut collector = AnnotationCollector::new(&chain);
        collector.add_seq_number_range(&H, 8, 15).unwrap();
        collector.add_seq_number_range(&E, 3, -4).unwrap();
        assert!(matches!(
            collector.add_seq_number_range(&E, 20, 30),
            Err(AnnotError::NotFound(_))
        ));
        let indices: Vec<usize> =
            collector.finish().iter().map(Annotation::residue).collect();
        assert_eq!(indices, vec![0, 1, 2, 7, 8, 9]);
    }

    #[test]
    fn collector_rejects_foreign_residues() {
        let chain = poly_ala("A", 3);
        let other = poly_ala("B", 10);
        let mut collector = AnnotationCollector::new(&chain);
        assert!(matches!(
            collector.add_annotation(H, &other.residues()[8]),
            Err(AnnotError::NotFound(_))
        ));
        assert!(collector.add_at_seq_number(H, 99).is_err());
    }

    #[derive(Debug)]
    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl AnnotationSource for CountingSource {
        fn construct(
            &self,
            _provider: &dyn StructureProvider,
            chain: &Chain,
            out: &mut AnnotationCollector<'_>,
        ) -> Result<(), AnnotError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            out.add_annotation(H, &chain.residues()[0])?;
            if self.fail {
                return Err(AnnotError::NotFound("malformed record".to_owned()));
            }
            Ok(())
        }
    }

    struct NoProvider;

    impl StructureProvider for NoProvider {
        fn chain(
            &self,
            structure_id: &str,
            _chain_id: &str,
        ) -> Result<Arc<Chain>, AnnotError> {
            Err(AnnotError::NotFound(structure_id.to_owned()))
        }

        fn modifications(
            &self,
            _structure_id: &str,
        ) -> Result<Vec<Modification>, AnnotError> {
            Ok(Vec::new())
        }
    }

    fn counting_group(fail: bool) -> (AnnotationGroup, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let kind = AnnotationKind::new(
            "counting",
            Classification::StructuralFeature,
            None,
        )
        .with_source(Arc::new(CountingSource {
            calls: Arc::clone(&calls),
            fail,
        }));
        let group = AnnotationGroup::new(
            Arc::new(kind),
            Arc::new(poly_ala("A", 4)),
            Arc::new(NoProvider),
        );
        (group, calls)
    }

    #[test]
    fn concurrent_first_access_builds_once() {
        let (group, calls) = counting_group(false);
        let group = Arc::new(group);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let group = Arc::clone(&group);
                thread::spawn(move || group.annotations().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(group.build().is_ok());
    }

    #[test]
    fn failed_build_leaves_group_empty() {
        let (group, calls) = counting_group(true);
        assert!(!group.has_data());
        assert!(group.ranges().is_empty());
        assert!(matches!(group.build(), Err(AnnotError::Build { .. })));
        assert!(group.build_error().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
