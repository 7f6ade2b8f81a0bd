use crate::{
    ApiError,
    Space,
};

pub enum SweepReport {
    /// A space is about to be cleared.
    SpaceStarted(Space),

    /// A requested space is not accessible to the user.
    UnknownSpace(String),

    TrashListed {
        space_id: String,
        block_count: usize,
    },

    /// The trash of the current space is empty.
    NoBlocks,

    Deleted(Vec<String>),
    WouldDelete(Vec<String>),
    DeleteFailed {
        block_ids: Vec<String>,
        error: ApiError,
    },
}

pub trait SweepReportConsumer {
    fn consume_report(&mut self, report: SweepReport);
}

pub struct VoidSweepReportConsumer;
impl SweepReportConsumer for VoidSweepReportConsumer {
    fn consume_report(&mut self, _report: SweepReport) {}
}

/// Collects every report, mostly useful for inspecting a run afterwards.
impl SweepReportConsumer for Vec<SweepReport> {
    fn consume_report(&mut self, report: SweepReport) {
        self.push(report)
    }
}
