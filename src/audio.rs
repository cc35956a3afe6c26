//! Sound cues
//!
//! The simulation never plays audio itself: it pushes `Cue`s, and the
//! `AudioManager` forwards them to whatever backend the host provides.

use serde::{Deserialize, Serialize};

use crate::settings::AudioSettings;

/// Sound effect requests emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Menu highlight moved
    Select,
    /// Menu choice confirmed / ball served
    Confirm,
    /// Pause toggled
    Pause,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a wall
    WallHit,
    /// Ball hits a brick
    BrickHit,
    /// Last brick cleared
    Victory,
    /// Heart restored
    Recover,
    /// Ball lost / bird crashed
    Hurt,
    /// Bird crashed into something
    Explosion,
    /// Health reached zero
    GameOver,
    /// New leaderboard entry
    HighScore,
    /// Bird flapped
    Jump,
    /// Pipe pair passed
    Score,
}

impl Cue {
    /// Relative loudness of each cue
    pub fn gain(self) -> f32 {
        match self {
            Cue::Select | Cue::Pause => 0.5,
            Cue::WallHit => 0.3,
            Cue::PaddleHit | Cue::BrickHit => 0.6,
            Cue::Jump => 0.4,
            Cue::Explosion | Cue::Hurt => 0.8,
            _ => 1.0,
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Fire-and-forget playback at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: Cue, volume: f32);

    /// Pause or resume background music
    fn set_music_paused(&mut self, _paused: bool) {}
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: Cue, volume: f32) {
        log::debug!("cue {:?} at volume {:.2}", cue, volume);
    }

    fn set_music_paused(&mut self, paused: bool) {
        log::debug!("music {}", if paused { "paused" } else { "resumed" });
    }
}

/// Routes simulation cues to a backend at the configured levels
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    levels: AudioSettings,
    music_paused: bool,
}

impl AudioManager {
    /// Manager at default levels
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self::from_settings(&AudioSettings::default(), backend)
    }

    pub fn from_settings(settings: &AudioSettings, backend: Box<dyn AudioBackend>) -> Self {
        let mut manager = Self {
            backend,
            levels: settings.clone(),
            music_paused: false,
        };
        // Files may hold anything; keep levels in range
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager
    }

    /// Current levels after clamping
    pub fn levels(&self) -> &AudioSettings {
        &self.levels
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.levels.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.levels.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Final playback volume for a cue; `None` when it would be inaudible
    pub fn volume_for(&self, cue: Cue) -> Option<f32> {
        let levels = &self.levels;
        let volume = levels.master_volume * levels.sfx_volume * cue.gain();
        (!levels.muted && volume > 0.0).then_some(volume)
    }

    pub fn play(&mut self, cue: Cue) {
        if let Some(volume) = self.volume_for(cue) {
            self.backend.play(cue, volume);
        }
    }

    /// Play every cue in order
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = Cue>) {
        for cue in cues {
            self.play(cue);
        }
    }

    /// Follow the session's pause flag, telling the backend only on changes
    pub fn sync_music(&mut self, paused: bool) {
        if paused != self.music_paused {
            self.music_paused = paused;
            self.backend.set_music_paused(paused);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend that records what it was asked to do
    #[derive(Clone, Default)]
    pub(crate) struct Recorder {
        pub played: Rc<RefCell<Vec<(Cue, f32)>>>,
        pub music: Rc<RefCell<Vec<bool>>>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, cue: Cue, volume: f32) {
            self.played.borrow_mut().push((cue, volume));
        }

        fn set_music_paused(&mut self, paused: bool) {
            self.music.borrow_mut().push(paused);
        }
    }

    #[test]
    fn test_volume_scales_by_gain() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.play(Cue::Victory);
        audio.play(Cue::WallHit);

        let played = recorder.played.borrow();
        assert_eq!(played.len(), 2);
        assert!((played[0].1 - 0.5).abs() < 1e-6);
        assert!((played[1].1 - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let settings = AudioSettings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings, Box::new(recorder.clone()));
        audio.play_all([Cue::Score, Cue::Jump]);
        assert!(recorder.played.borrow().is_empty());
    }

    #[test]
    fn test_music_sync_only_on_change() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.sync_music(false);
        audio.sync_music(true);
        audio.sync_music(true);
        audio.sync_music(false);
        assert_eq!(*recorder.music.borrow(), vec![true, false]);
    }
}
