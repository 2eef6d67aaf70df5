//! Pixel placement of annotation tracks and their rendering.
//!
//! Each segment becomes a block: the sequence row, then one row per
//! track. A track keeps the same row in every block so tracks line up
//! down the image. Column `c` of a segment spans
//! `[left + c * w, left + (c + 1) * w)` for column width `w`.

use std::ops::Range;
use std::sync::Arc;

use glam::Vec2;

use super::canvas::{Canvas, PixelRect, TextAlign};
use super::drawer::{
    draw_fragment_label, DrawContext, Drawer, DrawerRegistry, Fragment,
    ModificationPoints, TrackDrawer,
};
use crate::annotation::{AnnotationGroup, AnnotationRegistry, AnnotationValue};
use crate::color::Palette;
use crate::error::AnnotError;
use crate::options::{LayoutOptions, Options};
use crate::segment::{Segment, SegmentedSequence};

/// A drawable track: a group with data and its resolved drawer.
#[derive(Debug, Clone)]
pub struct Track {
    /// Annotation group drawn on this track.
    pub group: Arc<AnnotationGroup>,
    /// Resolved drawer.
    pub drawer: Drawer,
    /// Row within each segment block.
    pub slot: usize,
}

/// A range clipped to one segment and placed in pixels.
#[derive(Debug, Clone)]
pub struct PlacedFragment {
    /// Index into [`Layout::tracks`].
    pub track: usize,
    /// Segment the fragment is drawn in.
    pub segment: usize,
    /// Segment-relative columns covered.
    pub columns: Range<usize>,
    /// Value of the range.
    pub value: AnnotationValue,
    /// Pixel box.
    pub bounds: PixelRect,
    /// The range began in an earlier segment.
    pub start_is_not_start: bool,
    /// The range continues into a later segment.
    pub end_is_not_end: bool,
}

impl PlacedFragment {
    /// Drawer view of this fragment.
    #[must_use]
    pub fn fragment(&self) -> Fragment<'_> {
        Fragment {
            value: &self.value,
            bounds: self.bounds,
            residues: self.columns.len(),
            start_is_not_start: self.start_is_not_start,
            end_is_not_end: self.end_is_not_end,
        }
    }
}

/// Result of the placement pass.
#[derive(Debug)]
pub struct Layout {
    /// Surface size.
    pub size: Vec2,
    /// Drawable tracks in registration order.
    pub tracks: Vec<Track>,
    /// Fragments ordered by segment, track, then column.
    pub fragments: Vec<PlacedFragment>,
    /// Tracks skipped because no drawer could be resolved.
    pub skipped: Vec<AnnotError>,
}

/// Summary of a render pass.
#[derive(Debug)]
pub struct RenderReport {
    /// Surface size used.
    pub size: Vec2,
    /// Number of fragments drawn.
    pub fragments: usize,
    /// Tracks skipped, with the reason.
    pub skipped: Vec<AnnotError>,
    /// Cross-link midpoints keyed by modification id.
    pub modification_points: ModificationPoints,
}

/// Places annotation ranges of a [`SegmentedSequence`] in pixels and draws
/// them onto a [`Canvas`].
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    options: LayoutOptions,
    palette: Palette,
    drawers: DrawerRegistry,
}

impl LayoutEngine {
    /// Engine with drawers resolved for every kind of `registry`.
    #[must_use]
    pub fn new(options: &Options, registry: &AnnotationRegistry) -> Self {
        Self::with_drawers(
            options.layout.clone(),
            Palette::new(&options.colors),
            DrawerRegistry::resolve(registry.kinds().map(|kind| &**kind)),
        )
    }

    /// Engine from explicit parts.
    #[must_use]
    pub fn with_drawers(
        options: LayoutOptions,
        palette: Palette,
        drawers: DrawerRegistry,
    ) -> Self {
        Self {
            options,
            palette,
            drawers,
        }
    }

    /// Layout options in use.
    #[must_use]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Palette in use.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn block_height(&self, tracks: usize) -> f32 {
        let o = &self.options;
        o.line_height
            + tracks as f32 * (o.track_height + o.track_gap)
            + o.track_gap
            + o.segment_gap
    }

    fn block_top(&self, segment: &Segment, tracks: usize) -> f32 {
        self.options.margin_top + segment.index as f32 * self.block_height(tracks)
    }

    fn track_top(&self, segment: &Segment, tracks: usize, slot: usize) -> f32 {
        let o = &self.options;
        self.block_top(segment, tracks)
            + o.line_height
            + o.track_gap
            + slot as f32 * (o.track_height + o.track_gap)
    }

    fn column_x(&self, column: usize) -> f32 {
        self.options.margin_left + column as f32 * self.options.char_width
    }

    fn size_for(&self, seq: &SegmentedSequence, tracks: usize) -> Vec2 {
        let o = &self.options;
        Vec2::new(
            o.margin_left + seq.width() as f32 * o.char_width + o.margin_right,
            o.margin_top + seq.segment_count() as f32 * self.block_height(tracks),
        )
    }

    /// Drawable tracks and the errors of tracks that were skipped.
    #[must_use]
    pub fn tracks(&self, seq: &SegmentedSequence) -> (Vec<Track>, Vec<AnnotError>) {
        let mut tracks = Vec::new();
        let mut skipped = Vec::new();
        for group in seq.annotated().groups() {
            let visible = group.ranges().iter().any(|r| seq.scheme_span(r).is_some());
            if !visible {
                continue;
            }
            match self.drawers.get(group.kind().name()) {
                Ok(drawer) => tracks.push(Track {
                    group: Arc::clone(group),
                    drawer,
                    slot: tracks.len(),
                }),
                Err(e) => {
                    log::warn!("skipping track {}: {e}", group.kind().name());
                    skipped.push(e);
                }
            }
        }
        (tracks, skipped)
    }

    /// Surface size needed to render `seq`.
    #[must_use]
    pub fn image_size(&self, seq: &SegmentedSequence) -> Vec2 {
        let (tracks, _) = self.tracks(seq);
        self.size_for(seq, tracks.len())
    }

    /// Place every range of every drawable track. Pure; nothing is drawn.
    #[must_use]
    pub fn layout(&self, seq: &SegmentedSequence) -> Layout {
        let (tracks, skipped) = self.tracks(seq);
        let mut fragments = Vec::new();
        for (t, track) in tracks.iter().enumerate() {
            self.place_track(seq, tracks.len(), t, track, &mut fragments);
        }
        fragments.sort_by_key(|f| (f.segment, f.track, f.columns.start));
        Layout {
            size: self.size_for(seq, tracks.len()),
            tracks,
            fragments,
            skipped,
        }
    }

    fn place_track(
        &self,
        seq: &SegmentedSequence,
        track_count: usize,
        t: usize,
        track: &Track,
        out: &mut Vec<PlacedFragment>,
    ) {
        let width = seq.width();
        for range in track.group.ranges() {
            let Some(span) = seq.scheme_span(&range) else {
                log::debug!(
                    "{}: range {}..={} has no residue in {}",
                    track.group.kind().name(),
                    range.start,
                    range.end,
                    seq.scheme()
                );
                continue;
            };
            let first = span.start / width;
            let last = (span.end - 1) / width;
            for segment in &seq.segments()[first..=last] {
                let lo = span.start.max(segment.start) - segment.start;
                let hi = span.end.min(segment.end) - segment.start;
                let top = self.track_top(segment, track_count, track.slot);
                out.push(PlacedFragment {
                    track: t,
                    segment: segment.index,
                    columns: lo..hi,
                    value: range.value.clone(),
                    bounds: PixelRect::from_bounds(
                        self.column_x(lo),
                        self.column_x(hi),
                        top,
                        top + self.options.track_height,
                    ),
                    start_is_not_start: span.start < segment.start,
                    end_is_not_end: span.end > segment.end,
                });
            }
        }
    }

    /// Lay out `seq` and draw it onto `canvas`.
    pub fn render(
        &self,
        seq: &SegmentedSequence,
        canvas: &mut dyn Canvas,
    ) -> RenderReport {
        let layout = self.layout(seq);
        let mut points = ModificationPoints::new();
        let mut ctx = DrawContext {
            canvas,
            palette: &self.palette,
            points: &mut points,
            font_size: self.options.font_size,
        };
        let mut remaining = layout.fragments.as_slice();
        for segment in seq.segments() {
            self.draw_sequence_row(&mut ctx, seq, segment, layout.tracks.len());
            for (t, track) in layout.tracks.iter().enumerate() {
                let count = remaining
                    .iter()
                    .take_while(|f| f.segment == segment.index && f.track == t)
                    .count();
                let (here, rest) = remaining.split_at(count);
                remaining = rest;
                let has_data = seq
                    .groups_with_data(segment.index)
                    .any(|g| Arc::ptr_eq(g, &track.group));
                if has_data {
                    self.draw_track_row(&mut ctx, segment, &layout, track, here);
                }
            }
        }
        RenderReport {
            size: layout.size,
            fragments: layout.fragments.len(),
            skipped: layout.skipped,
            modification_points: points,
        }
    }

    fn draw_sequence_row(
        &self,
        ctx: &mut DrawContext<'_>,
        seq: &SegmentedSequence,
        segment: &Segment,
        track_count: usize,
    ) {
        let o = &self.options;
        let baseline = self.block_top(segment, track_count) + o.line_height * 0.75;
        let text = ctx.palette.text();
        if let Some(id) = seq.residue_id(segment.start) {
            ctx.canvas.draw_text(
                Vec2::new(o.margin_left - 6.0, baseline),
                &id,
                o.font_size,
                TextAlign::End,
                text,
            );
        }
        for (c, position) in segment.positions().enumerate() {
            let Some(residue) = seq.residue_at(position) else {
                continue;
            };
            let mut buf = [0u8; 4];
            ctx.canvas.draw_text(
                Vec2::new(self.column_x(c) + o.char_width * 0.5, baseline),
                residue.one_letter().encode_utf8(&mut buf),
                o.font_size,
                TextAlign::Middle,
                text,
            );
        }
    }

    fn draw_track_row(
        &self,
        ctx: &mut DrawContext<'_>,
        segment: &Segment,
        layout: &Layout,
        track: &Track,
        fragments: &[PlacedFragment],
    ) {
        let o = &self.options;
        let top = self.track_top(segment, layout.tracks.len(), track.slot);
        let bottom = top + o.track_height;
        ctx.canvas.draw_text(
            Vec2::new(o.margin_left - 6.0, (top + bottom) * 0.5 + o.font_size * 0.35),
            track.group.kind().name(),
            o.font_size,
            TextAlign::End,
            ctx.palette.text(),
        );
        let mut cursor = 0;
        for placed in fragments {
            if placed.columns.start > cursor {
                track.drawer.draw_space_between_annotations(
                    ctx,
                    PixelRect::from_bounds(
                        self.column_x(cursor),
                        self.column_x(placed.columns.start),
                        top,
                        bottom,
                    ),
                );
            }
            let fragment = placed.fragment();
            track.drawer.draw_annotation_fragment(ctx, &fragment);
            if track.drawer.display_label() {
                draw_fragment_label(ctx, &fragment);
            }
            cursor = cursor.max(placed.columns.end);
        }
        if cursor < segment.len() {
            track.drawer.draw_space_between_annotations(
                ctx,
                PixelRect::from_bounds(
                    self.column_x(cursor),
                    self.column_x(segment.len()),
                    top,
                    bottom,
                ),
            );
        }
    }
}
