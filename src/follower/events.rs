use crate::world::AnchorId;

/// Receives segment enter/exit notifications from [`PathFollower::move_by`](super::PathFollower::move_by).
pub trait SegmentEvents {
    /// The traveler left the segment anchored at `anchor`.
    fn on_exit_segment(&mut self, anchor: AnchorId);

    /// The traveler entered the segment anchored at `anchor`.
    fn on_visit_segment(&mut self, anchor: AnchorId);
}

/// A recorded segment notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEvent {
    Exited(AnchorId),
    Visited(AnchorId),
}

impl SegmentEvents for Vec<SegmentEvent> {
    fn on_exit_segment(&mut self, anchor: AnchorId) {
        self.push(SegmentEvent::Exited(anchor));
    }

    fn on_visit_segment(&mut self, anchor: AnchorId) {
        self.push(SegmentEvent::Visited(anchor));
    }
}

/// Discards every notification.
impl SegmentEvents for () {
    fn on_exit_segment(&mut self, _anchor: AnchorId) {}

    fn on_visit_segment(&mut self, _anchor: AnchorId) {}
}
