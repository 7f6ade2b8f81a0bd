use crate::{
    delete_permanently,
    enumerate_spaces,
    list_trashed_blocks_with,
    ApiError,
    DeleteOptions,
    SearchOptions,
    Session,
    Space,
    SweepReport,
    SweepReportConsumer,
    VoidSweepReportConsumer,
};

pub struct SweepOptions {
    pub delete: DeleteOptions,
    pub search: SearchOptions,

    /// Only clear the trash of these spaces. Every accessible space is cleared when empty.
    pub spaces: Vec<String>,

    pub report_consumer: Box<dyn SweepReportConsumer>,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            delete: DeleteOptions::default(),
            search: SearchOptions::default(),
            spaces: Vec::new(),
            report_consumer: Box::new(VoidSweepReportConsumer),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub spaces: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Empty the trash of every space, one space after another.
///
/// Failing delete requests are reported and skipped. A failing trash search
/// aborts the sweep.
pub fn sweep<S: Session + ?Sized>(
    session: &S,
    mut options: SweepOptions,
) -> Result<SweepSummary, ApiError> {
    let spaces = select_spaces(
        enumerate_spaces(session)?,
        &options.spaces,
        options.report_consumer.as_mut(),
    );

    let mut summary = SweepSummary::default();
    for space in spaces {
        log::debug!("Clearing trash of space {} ({})", space.name, space.id);
        let space_id = space.id.clone();
        options
            .report_consumer
            .consume_report(SweepReport::SpaceStarted(space));

        let block_ids = list_trashed_blocks_with(session, &space_id, &options.search)?;
        options.report_consumer.consume_report(SweepReport::TrashListed {
            space_id,
            block_count: block_ids.len(),
        });

        let outcome = delete_permanently(
            session,
            &block_ids,
            &options.delete,
            options.report_consumer.as_mut(),
        );

        summary.spaces += 1;
        summary.deleted += outcome.deleted;
        summary.failed += outcome.failed;
    }

    Ok(summary)
}

fn select_spaces(
    spaces: Vec<Space>,
    requested: &[String],
    report_consumer: &mut dyn SweepReportConsumer,
) -> Vec<Space> {
    if requested.is_empty() {
        return spaces;
    }

    for space_id in requested {
        if !spaces.iter().any(|space| &space.id == space_id) {
            log::warn!("Space {} is not accessible, skipping it", space_id);
            report_consumer.consume_report(SweepReport::UnknownSpace(space_id.clone()));
        }
    }

    spaces
        .into_iter()
        .filter(|space| requested.contains(&space.id))
        .collect()
}
