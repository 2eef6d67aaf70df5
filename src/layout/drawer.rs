//! Track drawers.
//!
//! Each annotation kind declares a [`DrawerKind`]; the [`DrawerRegistry`]
//! resolves the declaration once into a [`Drawer`], the closed set of
//! drawing strategies. Drawers only see pixel bounds and a value; the
//! layout engine decides where fragments go.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::canvas::{Canvas, PixelRect, TextAlign};
use crate::annotation::{AnnotationKind, AnnotationValue, Classification};
use crate::color::{Palette, Rgb};
use crate::error::AnnotError;
use crate::modification::GlyphShape;

/// Pixel centres of drawn cross-link residues, keyed by modification id
/// in first-drawn order. One point per participant residue. Callers use them to connect the participants of
/// one modification; they are never drawn by the engine.
pub type ModificationPoints = IndexMap<u32, Vec<Vec2>>;

/// Drawer declared by an annotation kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DrawerKind {
    /// Helix bars, strand arrows and turn lines joined by a coil line.
    SecondaryStructure,
    /// Coloured boxes with an optional label.
    LabeledBox,
    /// Asterisk per modified residue.
    ModificationPoint,
    /// Participant-count glyphs with midpoint bookkeeping.
    CrossLink,
}

impl DrawerKind {
    /// Identifier used in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SecondaryStructure => "secondary_structure",
            Self::LabeledBox => "labeled_box",
            Self::ModificationPoint => "modification_point",
            Self::CrossLink => "cross_link",
        }
    }
}

impl fmt::Display for DrawerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawerKind {
    type Err = AnnotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "secondary_structure" => Ok(Self::SecondaryStructure),
            "labeled_box" => Ok(Self::LabeledBox),
            "modification_point" => Ok(Self::ModificationPoint),
            "cross_link" => Ok(Self::CrossLink),
            other => Err(AnnotError::DrawerResolution(format!(
                "unknown drawer {other:?}"
            ))),
        }
    }
}

/// One range clipped to one segment, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    /// Value shared by the range.
    pub value: &'a AnnotationValue,
    /// Pixel box of the fragment within its track row.
    pub bounds: PixelRect,
    /// Number of residue columns covered.
    pub residues: usize,
    /// The range began in an earlier segment.
    pub start_is_not_start: bool,
    /// The range continues into a later segment.
    pub end_is_not_end: bool,
}

impl Fragment<'_> {
    /// Pixel width of one residue column.
    #[must_use]
    pub fn column_width(&self) -> f32 {
        self.bounds.width() / self.residues.max(1) as f32
    }

    /// Centre of each residue column.
    pub fn column_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        let w = self.column_width();
        let y = self.bounds.center().y;
        (0..self.residues)
            .map(move |c| Vec2::new(self.bounds.min.x + (c as f32 + 0.5) * w, y))
    }
}

/// What a drawer draws with.
pub struct DrawContext<'a> {
    /// Target surface.
    pub canvas: &'a mut dyn Canvas,
    /// Colours for values, coil and text.
    pub palette: &'a Palette,
    /// Cross-link midpoint bookkeeping.
    pub points: &'a mut ModificationPoints,
    /// Font size for labels.
    pub font_size: f32,
}

impl fmt::Debug for DrawContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawContext")
            .field("points", &self.points)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

/// Drawing capability of a track.
pub trait TrackDrawer {
    /// Whether this drawer can draw annotations of `kind`.
    fn can_draw_annotation(&self, kind: &AnnotationKind) -> bool;

    /// Draw one fragment.
    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    );

    /// Draw the unannotated stretch `bounds` between fragments.
    fn draw_space_between_annotations(
        &self,
        ctx: &mut DrawContext<'_>,
        bounds: PixelRect,
    );

    /// Whether fragments of this track carry their value label.
    fn display_label(&self) -> bool;
}

/// Helix bars with end caps, strand arrows, raised turn lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondaryStructureDrawer;

impl SecondaryStructureDrawer {
    fn helix(ctx: &mut DrawContext<'_>, fragment: &Fragment<'_>, color: Rgb) {
        let b = fragment.bounds;
        let bar = b.inset(0.0, b.height() * 0.15);
        ctx.canvas.fill_rect(bar, bar.height() * 0.3, color);
        let cap = (b.height() * 0.5).min(b.width());
        if !fragment.start_is_not_start {
            ctx.canvas.fill_ellipse(
                PixelRect::from_bounds(b.min.x, b.min.x + cap, b.min.y, b.max.y),
                color,
            );
        }
        if !fragment.end_is_not_end {
            ctx.canvas.fill_ellipse(
                PixelRect::from_bounds(b.max.x - cap, b.max.x, b.min.y, b.max.y),
                color,
            );
        }
    }

    fn strand(ctx: &mut DrawContext<'_>, fragment: &Fragment<'_>, color: Rgb) {
        let b = fragment.bounds;
        let mid = b.center().y;
        let head = if fragment.end_is_not_end {
            0.0
        } else {
            (b.height() * 0.6).min(b.width() * 0.5)
        };
        let body = PixelRect::from_bounds(
            b.min.x,
            b.max.x - head,
            mid - b.height() * 0.25,
            mid + b.height() * 0.25,
        );
        ctx.canvas.fill_rect(body, 0.0, color);
        if head > 0.0 {
            ctx.canvas.fill_polygon(
                &[
                    Vec2::new(b.max.x - head, b.min.y),
                    Vec2::new(b.max.x, mid),
                    Vec2::new(b.max.x - head, b.max.y),
                ],
                color,
            );
        }
    }

    fn turn(ctx: &mut DrawContext<'_>, fragment: &Fragment<'_>, color: Rgb) {
        let b = fragment.bounds;
        let mid = b.center().y;
        let top = b.min.y + b.height() * 0.2;
        let rise = (b.width() * 0.25).min(b.height());
        let start = if fragment.start_is_not_start {
            Vec2::new(b.min.x, top)
        } else {
            Vec2::new(b.min.x, mid)
        };
        let end = if fragment.end_is_not_end {
            Vec2::new(b.max.x, top)
        } else {
            Vec2::new(b.max.x, mid)
        };
        let up = Vec2::new(b.min.x + rise, top);
        let down = Vec2::new(b.max.x - rise, top);
        for (from, to) in [(start, up), (up, down), (down, end)] {
            ctx.canvas.stroke_line(from, to, 2.0, color);
        }
    }
}

impl TrackDrawer for SecondaryStructureDrawer {
    fn can_draw_annotation(&self, kind: &AnnotationKind) -> bool {
        kind.classification() == Classification::SecondaryStructure
    }

    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    ) {
        let color = ctx.palette.color_for(fragment.value);
        match fragment.value {
            AnnotationValue::SecondaryStructure(ss) if ss.is_helix() => {
                Self::helix(ctx, fragment, color);
            }
            AnnotationValue::SecondaryStructure(ss) if ss.is_strand() => {
                Self::strand(ctx, fragment, color);
            }
            _ => Self::turn(ctx, fragment, color),
        }
    }

    fn draw_space_between_annotations(
        &self,
        ctx: &mut DrawContext<'_>,
        bounds: PixelRect,
    ) {
        let y = bounds.center().y;
        ctx.canvas.stroke_line(
            Vec2::new(bounds.min.x, y),
            Vec2::new(bounds.max.x, y),
            1.0,
            ctx.palette.coil(),
        );
    }

    fn display_label(&self) -> bool {
        false
    }
}

/// Coloured box per fragment; the engine labels it when the label fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledBoxDrawer;

impl TrackDrawer for LabeledBoxDrawer {
    fn can_draw_annotation(&self, _kind: &AnnotationKind) -> bool {
        true
    }

    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    ) {
        let b = fragment.bounds.inset(0.0, fragment.bounds.height() * 0.1);
        ctx.canvas.fill_rect(b, 2.0, ctx.palette.color_for(fragment.value));
    }

    fn draw_space_between_annotations(
        &self,
        _ctx: &mut DrawContext<'_>,
        _bounds: PixelRect,
    ) {
    }

    fn display_label(&self) -> bool {
        true
    }
}

/// Asterisk per modified residue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModificationPointDrawer;

impl TrackDrawer for ModificationPointDrawer {
    fn can_draw_annotation(&self, kind: &AnnotationKind) -> bool {
        kind.classification() == Classification::StructuralFeature
    }

    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    ) {
        let color = ctx.palette.color_for(fragment.value);
        let radius = glyph_radius(fragment);
        for center in fragment.column_centers() {
            asterisk(ctx.canvas, center, radius, color);
        }
    }

    fn draw_space_between_annotations(
        &self,
        _ctx: &mut DrawContext<'_>,
        _bounds: PixelRect,
    ) {
    }

    fn display_label(&self) -> bool {
        false
    }
}

/// Glyph chosen from the participant count; records the centre of every
/// drawn residue under its modification id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossLinkDrawer;

impl TrackDrawer for CrossLinkDrawer {
    fn can_draw_annotation(&self, kind: &AnnotationKind) -> bool {
        kind.classification() == Classification::StructuralFeature
    }

    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    ) {
        let color = ctx.palette.color_for(fragment.value);
        let shape = fragment
            .value
            .modification()
            .map_or(GlyphShape::Oval, |m| m.glyph_shape());
        let radius = glyph_radius(fragment);
        for center in fragment.column_centers() {
            draw_glyph(ctx.canvas, shape, center, radius, color);
            if let Some(m) = fragment.value.modification() {
                ctx.points.entry(m.id()).or_default().push(center);
            }
        }
    }

    fn draw_space_between_annotations(
        &self,
        _ctx: &mut DrawContext<'_>,
        _bounds: PixelRect,
    ) {
    }

    fn display_label(&self) -> bool {
        false
    }
}

/// Centre the value label of `fragment` in its box when the text fits.
pub(crate) fn draw_fragment_label(ctx: &mut DrawContext<'_>, fragment: &Fragment<'_>) {
    let label = fragment.value.label();
    let text_width = label.chars().count() as f32 * ctx.font_size * 0.6;
    if text_width + 4.0 > fragment.bounds.width() {
        return;
    }
    let center = fragment.bounds.center();
    ctx.canvas.draw_text(
        Vec2::new(center.x, center.y + ctx.font_size * 0.35),
        label,
        ctx.font_size,
        TextAlign::Middle,
        ctx.palette.text(),
    );
}

fn glyph_radius(fragment: &Fragment<'_>) -> f32 {
    (fragment.column_width().min(fragment.bounds.height()) * 0.45).max(1.0)
}

fn asterisk(canvas: &mut dyn Canvas, center: Vec2, radius: f32, color: Rgb) {
    for angle in [FRAC_PI_2, FRAC_PI_2 + TAU / 6.0, FRAC_PI_2 - TAU / 6.0] {
        let arm = Vec2::from_angle(angle) * radius;
        canvas.stroke_line(center - arm, center + arm, 1.5, color);
    }
}

/// Vertices of a regular `n`-gon around `center`, first vertex on top.
#[must_use]
pub fn regular_polygon(center: Vec2, radius: f32, n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|i| {
            let angle = -FRAC_PI_2 + i as f32 * TAU / n as f32;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

fn draw_glyph(
    canvas: &mut dyn Canvas,
    shape: GlyphShape,
    center: Vec2,
    radius: f32,
    color: Rgb,
) {
    let dot = |c: Vec2, r: f32| {
        PixelRect::new(c - Vec2::splat(r), c + Vec2::splat(r))
    };
    match shape {
        GlyphShape::Asterisk => asterisk(canvas, center, radius, color),
        GlyphShape::Oval => {
            canvas.fill_ellipse(
                PixelRect::new(
                    center - Vec2::new(radius, radius * 0.7),
                    center + Vec2::new(radius, radius * 0.7),
                ),
                color,
            );
        }
        GlyphShape::Line => {
            let left = center - Vec2::new(radius * 0.7, 0.0);
            let right = center + Vec2::new(radius * 0.7, 0.0);
            canvas.stroke_line(left, right, 1.5, color);
            canvas.fill_ellipse(dot(left, radius * 0.3), color);
            canvas.fill_ellipse(dot(right, radius * 0.3), color);
        }
        GlyphShape::Polygon(n) => {
            canvas.fill_polygon(&regular_polygon(center, radius, n), color);
        }
    }
}

/// Resolved drawer: the closed set of drawing strategies.
#[derive(Debug, Clone, Copy)]
pub enum Drawer {
    /// Secondary-structure ribbons.
    SecondaryStructure(SecondaryStructureDrawer),
    /// Labelled boxes.
    LabeledBox(LabeledBoxDrawer),
    /// Modification asterisks.
    ModificationPoint(ModificationPointDrawer),
    /// Cross-link glyphs.
    CrossLink(CrossLinkDrawer),
}

impl Drawer {
    /// Drawer implementing a declaration.
    #[must_use]
    pub fn from_kind(kind: DrawerKind) -> Self {
        match kind {
            DrawerKind::SecondaryStructure => {
                Self::SecondaryStructure(SecondaryStructureDrawer)
            }
            DrawerKind::LabeledBox => Self::LabeledBox(LabeledBoxDrawer),
            DrawerKind::ModificationPoint => {
                Self::ModificationPoint(ModificationPointDrawer)
            }
            DrawerKind::CrossLink => Self::CrossLink(CrossLinkDrawer),
        }
    }

    fn inner(&self) -> &dyn TrackDrawer {
        match self {
            Self::SecondaryStructure(d) => d,
            Self::LabeledBox(d) => d,
            Self::ModificationPoint(d) => d,
            Self::CrossLink(d) => d,
        }
    }
}

impl TrackDrawer for Drawer {
    fn can_draw_annotation(&self, kind: &AnnotationKind) -> bool {
        self.inner().can_draw_annotation(kind)
    }

    fn draw_annotation_fragment(
        &self,
        ctx: &mut DrawContext<'_>,
        fragment: &Fragment<'_>,
    ) {
        self.inner().draw_annotation_fragment(ctx, fragment);
    }

    fn draw_space_between_annotations(
        &self,
        ctx: &mut DrawContext<'_>,
        bounds: PixelRect,
    ) {
        self.inner().draw_space_between_annotations(ctx, bounds);
    }

    fn display_label(&self) -> bool {
        self.inner().display_label()
    }
}

/// Drawers resolved once per annotation kind name.
#[derive(Debug, Clone, Default)]
pub struct DrawerRegistry {
    resolved: FxHashMap<String, Result<Drawer, String>>,
}

impl DrawerRegistry {
    /// Resolve a drawer for every kind.
    pub fn resolve<'a>(
        kinds: impl IntoIterator<Item = &'a AnnotationKind>,
    ) -> Self {
        let mut registry = Self::default();
        for kind in kinds {
            registry.register(kind);
        }
        registry
    }

    /// Resolve and store the drawer for one kind, replacing any earlier
    /// resolution under the same name.
    pub fn register(&mut self, kind: &AnnotationKind) {
        let resolution = match kind.drawer() {
            None => Err(format!("annotation kind {} declares no drawer", kind.name())),
            Some(declared) => {
                let drawer = Drawer::from_kind(declared);
                if drawer.can_draw_annotation(kind) {
                    Ok(drawer)
                } else {
                    Err(format!(
                        "{declared} drawer cannot draw annotation kind {}",
                        kind.name()
                    ))
                }
            }
        };
        let _ = self.resolved.insert(kind.name().to_owned(), resolution);
    }

    /// Drawer for the kind named `kind`.
    ///
    /// # Errors
    ///
    /// [`AnnotError::DrawerResolution`] when the kind is unknown, declares
    /// no drawer, or its drawer refuses it.
    pub fn get(&self, kind: &str) -> Result<Drawer, AnnotError> {
        match self.resolved.get(kind) {
            Some(Ok(drawer)) => Ok(*drawer),
            Some(Err(reason)) => Err(AnnotError::DrawerResolution(reason.clone())),
            None => Err(AnnotError::DrawerResolution(format!(
                "no drawer registered for annotation kind {kind}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::annotation::SsType;
    use crate::layout::canvas::{DrawCommand, RecordingCanvas};
    use crate::modification::{Modification, ModificationCategory, Participant};

    fn draw(drawer: Drawer, fragment: &Fragment<'_>) -> (RecordingCanvas, ModificationPoints) {
        let mut canvas = RecordingCanvas::new();
        let mut points = ModificationPoints::new();
        let palette = Palette::default();
        let mut ctx = DrawContext {
            canvas: &mut canvas,
            palette: &palette,
            points: &mut points,
            font_size: 12.0,
        };
        drawer.draw_annotation_fragment(&mut ctx, fragment);
        if drawer.display_label() {
            draw_fragment_label(&mut ctx, fragment);
        }
        (canvas, points)
    }

    fn fragment(value: &AnnotationValue, residues: usize, ends: (bool, bool)) -> Fragment<'_> {
        Fragment {
            value,
            bounds: PixelRect::from_bounds(0.0, residues as f32 * 10.0, 0.0, 12.0),
            residues,
            start_is_not_start: ends.0,
            end_is_not_end: ends.1,
        }
    }

    #[test]
    fn drawer_kind_names_round_trip() {
        for kind in [
            DrawerKind::SecondaryStructure,
            DrawerKind::LabeledBox,
            DrawerKind::ModificationPoint,
            DrawerKind::CrossLink,
        ] {
            assert_eq!(kind.name().parse::<DrawerKind>().unwrap(), kind);
        }
        assert!(matches!(
            "sparkline".parse::<DrawerKind>(),
            Err(AnnotError::DrawerResolution(_))
        ));
    }

    #[test]
    fn strand_loses_its_head_when_continued() {
        let strand = AnnotationValue::SecondaryStructure(SsType::Strand);
        let drawer = Drawer::from_kind(DrawerKind::SecondaryStructure);
        let (ended, _) = draw(drawer, &fragment(&strand, 5, (false, false)));
        assert!(ended
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Polygon { .. })));
        let (continued, _) = draw(drawer, &fragment(&strand, 5, (false, true)));
        assert!(!continued
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Polygon { .. })));
    }

    #[test]
    fn helix_caps_only_on_true_ends() {
        let helix = AnnotationValue::SecondaryStructure(SsType::Helix);
        let drawer = Drawer::from_kind(DrawerKind::SecondaryStructure);
        let caps = |ends| {
            let (canvas, _) = draw(drawer, &fragment(&helix, 6, ends));
            canvas
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
                .count()
        };
        assert_eq!(caps((false, false)), 2);
        assert_eq!(caps((true, false)), 1);
        assert_eq!(caps((true, true)), 0);
    }

    #[test]
    fn three_participant_cross_link_is_a_triangle() {
        let link = AnnotationValue::Modification(Arc::new(Modification::new(
            7,
            ModificationCategory::CrossLink,
            None,
            vec![
                Participant::new("A", 1),
                Participant::new("A", 5),
                Participant::new("A", 9),
            ],
        )));
        let drawer = Drawer::from_kind(DrawerKind::CrossLink);
        let f = fragment(&link, 1, (false, false));
        let (canvas, points) = draw(drawer, &f);
        let [DrawCommand::Polygon { points: vertices, .. }] = canvas.commands() else {
            panic!("expected one polygon, got {:?}", canvas.commands());
        };
        assert_eq!(vertices.len(), 3);
        assert_eq!(points[&7], vec![f.bounds.center()]);
    }

    #[test]
    fn labels_only_when_they_fit() {
        let domain = AnnotationValue::domain("3.40.50.300");
        let drawer = Drawer::from_kind(DrawerKind::LabeledBox);
        let has_text = |residues| {
            let (canvas, _) = draw(drawer, &fragment(&domain, residues, (false, false)));
            canvas
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { .. }))
        };
        assert!(has_text(20));
        assert!(!has_text(3));
    }

    #[test]
    fn only_labelled_boxes_show_value_labels() {
        assert!(Drawer::from_kind(DrawerKind::LabeledBox).display_label());
        let domain = AnnotationValue::domain("wide enough label");
        let link = AnnotationValue::Modification(Arc::new(Modification::new(
            4,
            ModificationCategory::CrossLink,
            None,
            vec![Participant::new("A", 1), Participant::new("A", 2)],
        )));
        for (kind, value) in [
            (DrawerKind::SecondaryStructure, &domain),
            (DrawerKind::ModificationPoint, &domain),
            (DrawerKind::CrossLink, &link),
        ] {
            let drawer = Drawer::from_kind(kind);
            assert!(!drawer.display_label());
            let (canvas, _) = draw(drawer, &fragment(value, 40, (false, false)));
            assert!(!canvas
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Text { .. })));
        }
    }

    #[test]
    fn adjacent_cross_link_residues_record_a_point_each() {
        let link = AnnotationValue::Modification(Arc::new(Modification::new(
            9,
            ModificationCategory::CrossLink,
            None,
            vec![
                Participant::new("A", 2),
                Participant::new("A", 3),
                Participant::new("A", 4),
            ],
        )));
        let drawer = Drawer::from_kind(DrawerKind::CrossLink);
        let f = fragment(&link, 3, (false, false));
        let (canvas, points) = draw(drawer, &f);
        let centers: Vec<Vec2> = f.column_centers().collect();
        assert_eq!(points[&9], centers);
        let triangles = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { points, .. } if points.len() == 3))
            .count();
        assert_eq!(triangles, 3);
    }

    #[test]
    fn modified_residue_draws_an_asterisk_per_column() {
        let value = AnnotationValue::custom("phospho", Some('*'));
        let drawer = Drawer::from_kind(DrawerKind::ModificationPoint);
        let (canvas, _) = draw(drawer, &fragment(&value, 2, (false, false)));
        assert_eq!(canvas.commands().len(), 6);
    }

    #[test]
    fn registry_records_why_resolution_failed() {
        let ss_on_domain = AnnotationKind::new(
            "CATH",
            Classification::Domain,
            Some(DrawerKind::SecondaryStructure),
        );
        let undrawable =
            AnnotationKind::new("hidden", Classification::Domain, None);
        let boxes = AnnotationKind::new(
            "SCOP",
            Classification::Domain,
            Some(DrawerKind::LabeledBox),
        );
        let registry = DrawerRegistry::resolve([&ss_on_domain, &undrawable, &boxes]);
        assert!(matches!(registry.get("SCOP"), Ok(Drawer::LabeledBox(_))));
        for name in ["CATH", "hidden", "unknown"] {
            assert!(matches!(
                registry.get(name),
                Err(AnnotError::DrawerResolution(_))
            ));
        }
    }

    #[test]
    fn polygon_vertices_lie_on_the_circle() {
        let vertices = regular_polygon(Vec2::new(5.0, 5.0), 2.0, 5);
        assert_eq!(vertices.len(), 5);
        for v in vertices {
            assert!(((v - Vec2::new(5.0, 5.0)).length() - 2.0).abs() < 1e-5);
        }
        assert!((regular_polygon(Vec2::ZERO, 1.0, 3)[0] - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }
}
