use std::num::NonZeroUsize;

use serde_json::json;

use crate::{
    Session,
    SweepReport,
    SweepReportConsumer,
};

pub const DELETE_ENDPOINT: &str = "deleteBlocks";
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
pub struct DeleteOptions {
    /// Maximum number of block ids per delete request.
    pub chunk_size: NonZeroUsize,

    /// Do not actually delete anything. Just report what would be deleted.
    pub dry_run: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            dry_run: false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: usize,
    pub failed: usize,
}

/// Split `items` into consecutive chunks of at most `chunk_size` elements.
/// Only the last chunk may be shorter.
pub fn partition<T>(items: &[T], chunk_size: NonZeroUsize) -> impl Iterator<Item = &[T]> {
    items.chunks(chunk_size.get())
}

/// Permanently delete `block_ids`, one request per chunk.
///
/// A failing chunk is reported and the remaining chunks are still attempted.
/// An empty list issues no request at all.
pub fn delete_permanently<S: Session + ?Sized>(
    session: &S,
    block_ids: &[String],
    options: &DeleteOptions,
    report_consumer: &mut dyn SweepReportConsumer,
) -> DeleteOutcome {
    let mut outcome = DeleteOutcome::default();
    if block_ids.is_empty() {
        report_consumer.consume_report(SweepReport::NoBlocks);
        return outcome;
    }

    for chunk in partition(block_ids, options.chunk_size) {
        if options.dry_run {
            report_consumer.consume_report(SweepReport::WouldDelete(chunk.to_vec()));
            continue;
        }

        let payload = json!({
            "blockIds": chunk,
            "permanentlyDelete": true,
        });

        match session.post(DELETE_ENDPOINT, &payload) {
            Ok(_) => {
                log::debug!("Deleted {} blocks", chunk.len());
                outcome.deleted += chunk.len();
                report_consumer.consume_report(SweepReport::Deleted(chunk.to_vec()));
            }
            Err(error) => {
                log::warn!("Failed to delete {:?}: {:#}", chunk, error);
                outcome.failed += chunk.len();
                report_consumer.consume_report(SweepReport::DeleteFailed {
                    block_ids: chunk.to_vec(),
                    error,
                });
            }
        }
    }

    outcome
}
