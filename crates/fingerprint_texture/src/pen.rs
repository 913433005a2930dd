//! The drawing surface contract and a recording implementation.
//!
//! The generator only talks to a [`Pen`]: it reads the logical position, draws
//! a line to a new point, or jumps without drawing. [`RecordingPen`] keeps the
//! resulting strokes as a list of [`PenCommand`]s in output space, after an
//! ordered chain of [`Transform`]s.
use glam::DVec2;
use mint::Point2;

/// Drawing surface driven by the generator.
pub trait Pen {
    /// Current logical position, before any presentation transform.
    fn position(&self) -> Point2<f64>;

    /// Moves with the pen down, drawing a segment from the current position.
    fn line_to(&mut self, p: Point2<f64>);

    /// Lifts the pen, moves to `p` and lowers it again. Nothing is drawn.
    fn jump(&mut self, p: Point2<f64>);
}

/// Presentation transform applied to logical points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Scale(f64),
    Translate(DVec2),
}

impl Transform {
    #[inline]
    pub fn apply(self, p: DVec2) -> DVec2 {
        match self {
            Transform::Scale(s) => p * s,
            Transform::Translate(t) => p + t,
        }
    }
}

/// A recorded pen operation, in output space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenCommand {
    Jump(DVec2),
    Line(DVec2),
}

impl PenCommand {
    pub fn point(&self) -> DVec2 {
        match *self {
            PenCommand::Jump(p) | PenCommand::Line(p) => p,
        }
    }
}

/// Default longest output-space segment before a line is split.
pub const DEFAULT_MAX_SEGMENT: f64 = 2.0;

/// Pen that records its strokes instead of rendering them.
///
/// Lines longer than `max_segment` in output space are split at their logical
/// midpoint until every piece is short enough.
#[derive(Debug, Clone)]
pub struct RecordingPen {
    logical: DVec2,
    output: DVec2,
    transforms: Vec<Transform>,
    max_segment: Option<f64>,
    commands: Vec<PenCommand>,
}

impl Default for RecordingPen {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPen {
    /// Pen at the origin with no transforms.
    pub fn new() -> Self {
        Self {
            logical: DVec2::ZERO,
            output: DVec2::ZERO,
            transforms: Vec::new(),
            max_segment: Some(DEFAULT_MAX_SEGMENT),
            commands: Vec::new(),
        }
    }

    /// Appends a transform and re-jumps to the current logical position.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        let p = self.logical;
        self.jump_to(p);
        self
    }

    /// Sets the split threshold; `None` disables splitting.
    pub fn with_max_segment(mut self, max_segment: Option<f64>) -> Self {
        self.max_segment = max_segment.filter(|m| *m > 0.0);
        self
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Applies the transform chain in order.
    pub fn apply_transforms(&self, p: DVec2) -> DVec2 {
        self.transforms.iter().fold(p, |acc, t| t.apply(acc))
    }

    pub fn logical_position(&self) -> DVec2 {
        self.logical
    }

    pub fn commands(&self) -> &[PenCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PenCommand> {
        self.commands
    }

    /// Number of recorded line commands.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PenCommand::Line(_)))
            .count()
    }

    /// Output-space bounding box of all recorded points as `(min, max)`.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut points = self.commands.iter().map(PenCommand::point);
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Drops all recorded commands; the position is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn jump_to(&mut self, p: DVec2) {
        self.logical = p;
        self.output = self.apply_transforms(p);
        self.commands.push(PenCommand::Jump(self.output));
    }

    fn line_to_point(&mut self, p: DVec2) {
        let target = self.apply_transforms(p);
        if let Some(max) = self.max_segment {
            if self.output.distance_squared(target) > max * max {
                let mid = (self.logical + p) / 2.0;
                self.line_to_point(mid);
                self.line_to_point(p);
                return;
            }
        }
        self.logical = p;
        self.output = target;
        self.commands.push(PenCommand::Line(target));
    }
}

impl Pen for RecordingPen {
    fn position(&self) -> Point2<f64> {
        self.logical.into()
    }

    fn line_to(&mut self, p: Point2<f64>) {
        self.line_to_point(DVec2::from(p));
    }

    fn jump(&mut self, p: Point2<f64>) {
        self.jump_to(DVec2::from(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2<f64> {
        Point2 { x, y }
    }

    #[test]
    fn records_lines_and_jumps() {
        let mut pen = RecordingPen::new();
        pen.line_to(pt(1.0, 0.0));
        pen.jump(pt(5.0, 5.0));
        pen.line_to(pt(5.5, 5.0));
        assert_eq!(
            pen.commands(),
            &[
                PenCommand::Line(DVec2::new(1.0, 0.0)),
                PenCommand::Jump(DVec2::new(5.0, 5.0)),
                PenCommand::Line(DVec2::new(5.5, 5.0)),
            ]
        );
        assert_eq!(pen.line_count(), 2);
        assert_eq!(DVec2::from(pen.position()), DVec2::new(5.5, 5.0));
    }

    #[test]
    fn transforms_apply_in_order() {
        let pen = RecordingPen::new()
            .with_transform(Transform::Scale(2.0))
            .with_transform(Transform::Translate(DVec2::new(10.0, 0.0)));
        assert_eq!(
            pen.apply_transforms(DVec2::new(1.0, 1.0)),
            DVec2::new(12.0, 2.0)
        );
        assert_eq!(pen.transforms().len(), 2);
        // Each added transform re-jumps to the logical position.
        assert_eq!(pen.commands().len(), 2);
        assert_eq!(pen.commands()[1], PenCommand::Jump(DVec2::new(10.0, 0.0)));
    }

    #[test]
    fn position_stays_logical_under_transforms() {
        let mut pen = RecordingPen::new().with_transform(Transform::Scale(2.5));
        pen.line_to(pt(0.5, 0.0));
        assert_eq!(DVec2::from(pen.position()), DVec2::new(0.5, 0.0));
        assert_eq!(pen.commands().last(), Some(&PenCommand::Line(DVec2::new(1.25, 0.0))));
    }

    #[test]
    fn long_lines_are_split_in_output_space() {
        let mut pen = RecordingPen::new().with_transform(Transform::Scale(2.5));
        pen.clear();
        pen.line_to(pt(1.6, 0.0));
        // 4.0 output units with a 2.0 limit: one split into two 2.0 pieces.
        assert_eq!(
            pen.commands(),
            &[
                PenCommand::Line(DVec2::new(2.0, 0.0)),
                PenCommand::Line(DVec2::new(4.0, 0.0)),
            ]
        );
        assert_eq!(pen.logical_position(), DVec2::new(1.6, 0.0));
    }

    #[test]
    fn jumps_are_never_split() {
        let mut pen = RecordingPen::new();
        pen.jump(pt(100.0, 100.0));
        assert_eq!(pen.commands().len(), 1);
    }

    #[test]
    fn splitting_can_be_disabled() {
        let mut pen = RecordingPen::new().with_max_segment(None);
        pen.line_to(pt(50.0, 0.0));
        assert_eq!(pen.commands().len(), 1);
    }

    #[test]
    fn bounds_cover_all_points() {
        let mut pen = RecordingPen::new();
        assert!(pen.bounds().is_none());
        pen.jump(pt(-3.0, 4.0));
        pen.line_to(pt(-2.0, 5.5));
        pen.jump(pt(7.0, -1.0));
        assert_eq!(
            pen.bounds(),
            Some((DVec2::new(-3.0, -1.0), DVec2::new(7.0, 5.5)))
        );
    }
}
