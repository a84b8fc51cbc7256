//! Progress checkpoints of the transfer state machine.

pub const PROGRESS_QUEUED: u8 = 0;
pub const PROGRESS_DOWNLOADING: u8 = 10;
pub const PROGRESS_PROCESSING_START: u8 = 30;
pub const PROGRESS_PROCESSING_END: u8 = 80;
pub const PROGRESS_UPLOADING: u8 = 85;
pub const PROGRESS_COMPLETED: u8 = 100;

/// Maps page `current` of `total` onto the processing band (30..=80).
pub fn processing_progress(current: u32, total: u32) -> u8 {
    if total == 0 {
        return PROGRESS_PROCESSING_START;
    }
    let current = current.min(total) as u64;
    let span = (PROGRESS_PROCESSING_END - PROGRESS_PROCESSING_START) as u64;
    PROGRESS_PROCESSING_START + (span * current / total as u64) as u8
}
