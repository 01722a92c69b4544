//! Beep sink implementation using rodio.
//!
//! The rodio output stream is not `Send`, so it lives on a dedicated audio
//! thread. The sink itself only holds the sending half of a crossbeam
//! channel and can be shared freely with the timer engine.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Sender};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::NotifyError;
use super::{LogSink, NotificationKind, NotificationSink, Tone};

/// Output gain applied to every tone.
const TONE_GAIN: f32 = 0.3;

/// A notification sink that plays a short sine tone per cue.
pub struct RodioBeepSink {
    /// Tones queued for the audio thread.
    tone_tx: Sender<Tone>,
}

impl RodioBeepSink {
    /// Starts the audio thread and opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::DeviceNotAvailable` if no audio output device
    /// is available, or `NotifyError::StreamError` if the thread cannot be
    /// spawned.
    pub fn spawn() -> Result<Self, NotifyError> {
        let (tone_tx, tone_rx) = unbounded::<Tone>();
        let (ready_tx, ready_rx) = bounded::<Result<(), NotifyError>>(1);

        thread::Builder::new()
            .name("interval-timer-audio".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        let _ = ready_tx.send(Err(NotifyError::DeviceNotAvailable(e.to_string())));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                debug!("Audio output stream initialized");

                for tone in tone_rx.iter() {
                    if let Err(e) = play_tone(&handle, tone) {
                        warn!("Failed to play tone: {}", e);
                    }
                }
                debug!("Audio thread exiting");
            })
            .map_err(|e| NotifyError::StreamError(e.to_string()))?;

        ready_rx.recv().map_err(|_| NotifyError::Disconnected)??;

        Ok(Self { tone_tx })
    }

    /// Queues a tone on the audio thread. Returns immediately.
    pub fn play(&self, tone: Tone) -> Result<(), NotifyError> {
        self.tone_tx.send(tone).map_err(|_| NotifyError::Disconnected)
    }
}

impl NotificationSink for RodioBeepSink {
    fn notify(&self, kind: NotificationKind) -> Result<(), NotifyError> {
        debug!("Beep for {}", kind.as_str());
        self.play(kind.tone())
    }
}

impl std::fmt::Debug for RodioBeepSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioBeepSink").finish_non_exhaustive()
    }
}

/// Plays one tone on a detached sink so it keeps sounding after return.
fn play_tone(handle: &OutputStreamHandle, tone: Tone) -> Result<(), NotifyError> {
    let sink = Sink::try_new(handle).map_err(|e| NotifyError::StreamError(e.to_string()))?;

    sink.append(
        SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration())
            .amplify(TONE_GAIN),
    );
    sink.detach();
    Ok(())
}

/// Creates the beep sink, falling back to a log-only sink when audio is
/// unavailable.
#[must_use]
pub fn try_create_sink() -> Arc<dyn NotificationSink> {
    match RodioBeepSink::spawn() {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            warn!("Audio not available, cues will only be logged: {}", e);
            Arc::new(LogSink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests may run without audio hardware (e.g., CI containers) and
    // return early when the device cannot be opened.

    #[test]
    fn test_notify_queues_tone() {
        let sink = match RodioBeepSink::spawn() {
            Ok(s) => s,
            Err(_) => return,
        };

        assert!(sink.notify(NotificationKind::WorkStarted).is_ok());
        assert!(sink.play(Tone::new(440.0, 10)).is_ok());
    }

    #[test]
    fn test_debug_impl() {
        let sink = match RodioBeepSink::spawn() {
            Ok(s) => s,
            Err(_) => return,
        };

        assert!(format!("{:?}", sink).contains("RodioBeepSink"));
    }

    #[test]
    fn test_try_create_sink_never_fails() {
        let sink = try_create_sink();
        let _ = sink.notify(NotificationKind::WorkoutComplete);
    }
}
