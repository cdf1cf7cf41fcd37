use std::{path::PathBuf, time::Duration};

pub enum Update {
    StartProcessing(PathBuf),
    /// Source path, written icon or the failure message, time taken.
    FinishedProcessing(PathBuf, Result<PathBuf, String>, Duration),
    QueueCompleted(Duration),
}
