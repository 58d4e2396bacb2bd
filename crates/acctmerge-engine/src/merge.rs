//! Bounded fan-out merge: read rows, enrich them concurrently, write them back.
//!
//! Blocking stream I/O never runs on the async workers. A blocking reader
//! thread feeds rows to the dispatch loop through a bounded channel, and a
//! single blocking writer thread owns the output and drains enriched rows from
//! a second channel. Between them, every row acquires a permit from a counting
//! semaphore before its lookup task is spawned and holds it until its output
//! row has been handed to the writer, so at most `max_concurrent_lookups`
//! rows are ever in flight. Rows are written in completion order.

use std::io::{Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use acctmerge_client::AccountLookup;
use acctmerge_types::{InputRow, OutputRow};
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::codec::{RecordReader, RecordWriter};
use crate::errors::MergeError;
use crate::result::MergeSummary;

/// Outstanding lookup cap used unless overridden.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Rows the reader thread may decode ahead of dispatch.
const READ_AHEAD_ROWS: usize = 16;

type RowFrame = Result<InputRow, MergeError>;

/// Why the dispatch loop stopped.
enum ReadOutcome {
    EndOfInput,
    /// Cancelled externally or by a fatal row error.
    Halted,
    Failed(MergeError),
}

/// Per-run state shared between the dispatch loop, row tasks and the writer.
struct RunState {
    /// Write-once: the first fatal error wins.
    fatal: Mutex<Option<MergeError>>,
    halt: CancellationToken,
    rows_written: AtomicU64,
    lookups_failed: AtomicU64,
}

impl RunState {
    fn new(halt: CancellationToken) -> Self {
        Self {
            fatal: Mutex::new(None),
            halt,
            rows_written: AtomicU64::new(0),
            lookups_failed: AtomicU64::new(0),
        }
    }

    /// Record a fatal error and stop further dispatch.
    fn fail(&self, err: MergeError) {
        let mut slot = self.fatal.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            tracing::error!(error = %err, "Row processing failed; halting dispatch");
            *slot = Some(err);
        } else {
            tracing::error!(error = %err, "Additional row failure after first fatal error");
        }
        drop(slot);
        self.halt.cancel();
    }

    fn take_fatal(&self) -> Option<MergeError> {
        self.fatal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Run blocking stream work off the async workers.
async fn run_blocking<T, F>(what: &'static str, work: F) -> Result<T, MergeError>
where
    F: FnOnce() -> Result<T, MergeError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| MergeError::TaskFailed(format!("{what} task panicked: {e}")))?
}

/// Enriches account rows with status data from an [`AccountLookup`].
#[derive(Clone)]
pub struct MergeEngine {
    lookup: Arc<dyn AccountLookup>,
    max_concurrent_lookups: usize,
}

impl MergeEngine {
    pub fn new(lookup: Arc<dyn AccountLookup>) -> Self {
        Self {
            lookup,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    /// Cap the number of lookups in flight at once. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit.max(1);
        self
    }

    pub fn max_concurrent_lookups(&self) -> usize {
        self.max_concurrent_lookups
    }

    /// Merge `input` into `output`, enriching every row.
    ///
    /// Lookup failures are not errors: the row is written with blank status
    /// fields and the failure is logged. Nothing is written to `output` when
    /// the input header is invalid. On any other error, `output` may hold
    /// partial data and should be discarded by the caller.
    ///
    /// Cancelling `cancel` stops dispatching, even while the reader thread is
    /// blocked on input. Rows already dispatched finish their lookups and are
    /// written before the run reports [`MergeError::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`MergeError`]. A read failure takes
    /// precedence over row failures observed while draining.
    pub async fn merge<R, W>(
        &self,
        input: R,
        output: W,
        cancel: &CancellationToken,
    ) -> Result<MergeSummary, MergeError>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let start = Instant::now();

        let reader = run_blocking("header read", move || {
            let mut reader = RecordReader::new(input);
            reader.read_header()?;
            Ok(reader)
        })
        .await?;

        let writer = run_blocking("header write", move || {
            let mut writer = RecordWriter::new(output);
            writer.write_header()?;
            Ok(writer)
        })
        .await?;

        let halt = cancel.child_token();
        let state = Arc::new(RunState::new(halt.clone()));
        let budget = Arc::new(Semaphore::new(self.max_concurrent_lookups));

        let (row_tx, mut row_rx) = mpsc::channel::<RowFrame>(READ_AHEAD_ROWS);
        let mut reader_task = {
            let halt = halt.clone();
            tokio::task::spawn_blocking(move || read_rows(reader, row_tx, &halt))
        };

        let (out_tx, out_rx) = mpsc::channel::<OutputRow>(self.max_concurrent_lookups);
        let writer_task = {
            let state = Arc::clone(&state);
            tokio::task::spawn_blocking(move || write_rows(writer, out_rx, &state))
        };

        let mut tasks = JoinSet::new();
        let mut rows_read: u64 = 0;

        tracing::info!(
            max_concurrent_lookups = self.max_concurrent_lookups,
            "Starting account merge"
        );

        let outcome = loop {
            let next = tokio::select! {
                biased;
                () = halt.cancelled() => break ReadOutcome::Halted,
                next = row_rx.recv() => next,
            };
            let row = match next {
                Some(Ok(row)) => row,
                Some(Err(err)) => break ReadOutcome::Failed(err),
                // Channel closed: the reader thread returned or panicked.
                None => match (&mut reader_task).await {
                    Ok(()) => break ReadOutcome::EndOfInput,
                    Err(e) => {
                        break ReadOutcome::Failed(MergeError::TaskFailed(format!(
                            "reader task panicked: {e}"
                        )))
                    }
                },
            };

            let permit = tokio::select! {
                biased;
                () = halt.cancelled() => break ReadOutcome::Halted,
                permit = budget.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    // The budget is never closed while the loop runs.
                    Err(_) => break ReadOutcome::Halted,
                },
            };
            rows_read += 1;

            tasks.spawn(enrich_row(
                row,
                permit,
                Arc::clone(&self.lookup),
                Arc::clone(&state),
                out_tx.clone(),
            ));
        };

        // Unblocks a reader parked on a full channel. A reader parked inside
        // `read` is left to finish on its own.
        drop(row_rx);
        drop(out_tx);

        while let Some(joined) = tasks.join_next().await {
            if let Err(join_err) = joined {
                state.fail(MergeError::TaskFailed(join_err.to_string()));
            }
        }

        let writer = match writer_task.await {
            Ok(writer) => writer,
            Err(join_err) => {
                state.fail(MergeError::TaskFailed(format!(
                    "writer task panicked: {join_err}"
                )));
                None
            }
        };

        match (outcome, state.take_fatal()) {
            (ReadOutcome::Failed(read_err), drain_err) => {
                if let Some(drain_err) = drain_err {
                    tracing::error!(error = %drain_err, "Could not process data");
                }
                return Err(read_err);
            }
            (_, Some(err)) => return Err(err),
            (ReadOutcome::Halted, None) => {
                tracing::warn!(rows_read, "Merge cancelled; dispatched rows drained");
                return Err(MergeError::Cancelled);
            }
            (ReadOutcome::EndOfInput, None) => {}
        }

        let writer = writer
            .ok_or_else(|| MergeError::TaskFailed("output writer stopped early".into()))?;
        run_blocking("flush", move || writer.finish().map(drop)).await?;

        let summary = MergeSummary {
            rows_read,
            rows_written: state.rows_written.load(Ordering::Relaxed),
            lookups_failed: state.lookups_failed.load(Ordering::Relaxed),
            duration_secs: start.elapsed().as_secs_f64(),
        };

        tracing::info!(
            rows_read = summary.rows_read,
            rows_written = summary.rows_written,
            lookups_failed = summary.lookups_failed,
            duration_secs = summary.duration_secs,
            "Account merge completed"
        );

        Ok(summary)
    }
}

/// Reader thread body: decode rows and hand them to the dispatch loop.
///
/// Stops after the first read error, at end of input, once `halt` is
/// cancelled, or when the dispatch loop drops its receiver.
fn read_rows<R: Read>(
    mut reader: RecordReader<R>,
    rows: mpsc::Sender<RowFrame>,
    halt: &CancellationToken,
) {
    while !halt.is_cancelled() {
        let frame = match reader.read_row() {
            Ok(Some(row)) => Ok(row),
            Ok(None) => return,
            Err(err) => Err(err),
        };
        let last = frame.is_err();
        if rows.blocking_send(frame).is_err() || last {
            return;
        }
    }
}

/// Writer thread body: the only owner of the output sink.
///
/// Returns the writer once every sender is gone, or `None` after recording a
/// write failure.
fn write_rows<W: Write>(
    mut writer: RecordWriter<W>,
    mut rows: mpsc::Receiver<OutputRow>,
    state: &RunState,
) -> Option<RecordWriter<W>> {
    while let Some(row) = rows.blocking_recv() {
        if let Err(err) = writer.write_row(&row) {
            state.fail(err);
            return None;
        }
        state.rows_written.fetch_add(1, Ordering::Relaxed);
    }
    Some(writer)
}

/// Look up one row's account and queue the resulting output row.
///
/// The permit is held until the row is queued, and released on every exit path.
async fn enrich_row(
    row: InputRow,
    permit: OwnedSemaphorePermit,
    lookup: Arc<dyn AccountLookup>,
    state: Arc<RunState>,
    output: mpsc::Sender<OutputRow>,
) {
    let mut out = OutputRow::unenriched(&row);

    match lookup.get_account(&row.account_id).await {
        Ok(account) => out.enrich(&account),
        Err(err) => {
            state.lookups_failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                account_id = %row.account_id,
                kind = %err.kind(),
                error = %err,
                "Could not look up account id"
            );
        }
    }

    // A closed queue means the writer already failed and recorded why.
    if output.send(out).await.is_err() {
        tracing::debug!(account_id = %row.account_id, "Output closed; row dropped");
    }
    drop(permit);
}
