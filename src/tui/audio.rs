//! Submission confirmation tone on a dedicated audio thread.
//!
//! rodio's `OutputStream` is `!Send`, so it must live on a single OS
//! thread. `TonePlayer` spawns a persistent `std::thread` that owns the
//! audio output and receives commands via `std::sync::mpsc`. The tone
//! itself is synthesized (two short sine notes), so no audio assets are
//! shipped.

use std::sync::mpsc as sync_mpsc;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

/// Commands sent from the async TUI to the audio thread.
enum ToneCommand {
    PlaySuccess,
    Shutdown,
}

/// Non-blocking tone player backed by a dedicated OS thread. Volume
/// is fixed at construction from config.
pub struct TonePlayer {
    cmd_tx: sync_mpsc::Sender<ToneCommand>,
}

impl TonePlayer {
    /// Spawn the audio thread and return a handle.
    pub fn new(volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        let (cmd_tx, cmd_rx) = sync_mpsc::channel();

        std::thread::Builder::new()
            .name("tone-playback".into())
            .spawn(move || audio_thread(cmd_rx, volume))
            .expect("failed to spawn audio thread");

        Self { cmd_tx }
    }

    /// Play the short success tone. Fire-and-forget; a missing audio
    /// device degrades to silence.
    pub fn play_success(&self) {
        let _ = self.cmd_tx.send(ToneCommand::PlaySuccess);
    }
}

impl Drop for TonePlayer {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(ToneCommand::Shutdown);
    }
}

fn audio_thread(cmd_rx: sync_mpsc::Receiver<ToneCommand>, volume: f32) {
    // Initialize audio output once for the thread's lifetime. A missing
    // device is logged once; subsequent play commands are ignored.
    let output = match OutputStream::try_default() {
        Ok((stream, handle)) => Some((stream, handle)),
        Err(e) => {
            log::warn!("No audio output, confirmation tone disabled: {e}");
            None
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            ToneCommand::PlaySuccess => {
                let Some((ref _stream, ref handle)) = output else {
                    continue;
                };
                match Sink::try_new(handle) {
                    Ok(sink) => {
                        // Two quick ascending notes.
                        sink.set_volume(volume);
                        sink.append(
                            SineWave::new(880.0).take_duration(Duration::from_millis(90)),
                        );
                        sink.append(
                            SineWave::new(1318.5).take_duration(Duration::from_millis(110)),
                        );
                        sink.detach();
                    }
                    Err(e) => log::warn!("Audio sink error: {e}"),
                }
            }
            ToneCommand::Shutdown => break,
        }
    }
}
