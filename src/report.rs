use std::io::Write;

use crossterm::style::{
    style,
    Color,
    Stylize,
};
use nclean::{
    SweepReport,
    SweepReportConsumer,
};

/// Prints the sweep progress as plain text lines.
pub struct ConsoleReporter<W: Write> {
    output: W,
    colored: bool,
    started: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(output: W, colored: bool) -> Self {
        Self {
            output,
            colored,
            started: false,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_report(&mut self, report: SweepReport) -> std::io::Result<()> {
        match report {
            SweepReport::SpaceStarted(space) => {
                if self.started {
                    writeln!(self.output)?;
                }
                self.started = true;
                if self.colored {
                    writeln!(self.output, "{}", style(&space.name).bold())
                } else {
                    writeln!(self.output, "{}", space.name)
                }
            }
            SweepReport::UnknownSpace(space_id) => {
                let message = format!("Space {} is not accessible, skipping it", space_id);
                let message = self.paint(&message, Color::Yellow);
                writeln!(self.output, "{}", message)
            }
            SweepReport::TrashListed { block_count, .. } => {
                log::debug!("Found {} trashed pages", block_count);
                Ok(())
            }
            SweepReport::NoBlocks => writeln!(self.output, "\tNo pages found"),
            SweepReport::Deleted(block_ids) => {
                let label = self.paint("Deleted:", Color::Green);
                writeln!(self.output, "\t{} {:?}", label, block_ids)
            }
            SweepReport::WouldDelete(block_ids) => {
                let label = self.paint("Would delete:", Color::Cyan);
                writeln!(self.output, "\t{} {:?}", label, block_ids)
            }
            SweepReport::DeleteFailed { block_ids, error } => {
                let label = self.paint("Couldn't delete:", Color::Red);
                writeln!(self.output, "\t{} {:?} ({:#})", label, block_ids, error)
            }
        }
    }
}

impl<W: Write> SweepReportConsumer for ConsoleReporter<W> {
    fn consume_report(&mut self, report: SweepReport) {
        if let Err(error) = self.write_report(report) {
            log::warn!("Failed to print progress: {:#}", error);
        }
    }
}
