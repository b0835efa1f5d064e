//! Background compression so rotation never blocks a log call on gzip.
//!
//! One thread per writer, fed over a channel. Dropping the `Mill` closes the
//! channel and waits for queued archives to finish.

use super::compress::compress_file;
use crate::internal;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

pub(super) struct Mill {
    tx: Option<Sender<Vec<PathBuf>>>,
    handle: Option<JoinHandle<()>>,
}

impl Mill {
    pub(super) fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Vec<PathBuf>>();
        let handle = thread::Builder::new()
            .name("splitlog-compress".to_string())
            .spawn(move || {
                for batch in rx {
                    for path in batch {
                        // Retention may have deleted it since it was queued.
                        if !path.exists() {
                            continue;
                        }
                        match compress_file(&path) {
                            Ok(saved) => internal::debug(
                                "COMPRESS",
                                &format!("Compressed {} ({saved} bytes saved)", path.display()),
                            ),
                            Err(e) => internal::error(
                                "COMPRESS",
                                &format!("Failed to compress {}: {e}", path.display()),
                            ),
                        }
                    }
                }
            })?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    pub(super) fn submit(&self, batch: Vec<PathBuf>) {
        if batch.is_empty() {
            return;
        }
        if let Some(tx) = &self.tx
            && tx.send(batch).is_err()
        {
            internal::error("COMPRESS", "Compression thread is gone");
        }
    }
}

impl Drop for Mill {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
