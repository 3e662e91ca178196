//! Real playback through `rodio`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::error::{Error, Result};
use crate::sound::AudioBackend;
use crate::state::SoundHandle;

type Clip = Buffered<Decoder<BufReader<File>>>;

/// Default output device with one sink per loaded clip.
///
/// Released entries are left as `None` and reused by the next load.
pub struct RodioBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Vec<Option<(Clip, Option<Sink>)>>,
}

impl RodioBackend {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Audio`] when no output device is available.
    pub fn open_default() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().map_err(|err| Error::Audio(err.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            clips: Vec::new(),
        })
    }

    /// The default device as a boxed backend, or `None` if there is none.
    #[must_use]
    pub fn detect() -> Option<Box<dyn AudioBackend>> {
        Self::open_default()
            .ok()
            .map(|backend| Box::new(backend) as Box<dyn AudioBackend>)
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<SoundHandle> {
        let file = File::open(path)?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|err| Error::Audio(format!("{}: {err}", path.display())))?;
        let entry = Some((decoder.buffered(), None));
        let index = match self.clips.iter().position(Option::is_none) {
            Some(index) => {
                self.clips[index] = entry;
                index
            }
            None => {
                self.clips.push(entry);
                self.clips.len() - 1
            }
        };
        Ok(SoundHandle::new(index))
    }

    fn restart(&mut self, handle: SoundHandle) -> Result<()> {
        let (clip, playing) = self
            .clips
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::Audio(format!("unknown clip {}", handle.index())))?;
        if let Some(sink) = playing.take() {
            sink.stop();
        }
        let sink = Sink::try_new(&self.handle).map_err(|err| Error::Audio(err.to_string()))?;
        sink.append(clip.clone());
        *playing = Some(sink);
        Ok(())
    }

    fn release(&mut self, handle: SoundHandle) {
        if let Some((_, Some(sink))) = self.clips.get_mut(handle.index()).and_then(Option::take) {
            sink.stop();
        }
    }
}
