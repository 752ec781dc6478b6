//! Notification cue playback.
//!
//! `AudioOutput` is the audio subsystem handle: it is created once when the
//! app starts, owns every player process it spawns, and releases them when
//! dropped. `SoundCue` pairs it with the cue asset and is what the reminder
//! action plays through.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SoundConfig;
use crate::todo::CuePlayer;

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("no audio player available")]
    NoPlayer,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
struct Player {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Player {
    fn command(&self, asset: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        if cfg!(windows) {
            // The asset path is embedded into the PowerShell script.
            let script = format!(
                "(New-Object Media.SoundPlayer '{}').PlaySync()",
                asset.display().to_string().replace('\'', "''")
            );
            cmd.args(&self.args).arg(script);
        } else {
            cmd.args(&self.args).arg(asset);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

#[derive(Debug)]
pub struct AudioOutput {
    player: Option<Player>,
    playing: Vec<Child>,
}

impl AudioOutput {
    /// Probe `PATH` for a player program for this platform.
    pub fn init() -> Self {
        let player = PLAYERS.iter().find_map(|(name, args)| {
            find_on_path(name).map(|program| Player {
                program,
                args: args.iter().map(OsString::from).collect(),
            })
        });
        match &player {
            Some(p) => info!(player = %p.program.display(), "audio output ready"),
            None => warn!("no audio player found on PATH; cues will be silent"),
        }
        Self {
            player,
            playing: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            player: None,
            playing: Vec::new(),
        }
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    /// Start playing `asset` and return without waiting for it to finish.
    pub fn play(&mut self, asset: &Path) -> Result<(), SoundError> {
        self.reap();
        let player = self.player.as_ref().ok_or(SoundError::NoPlayer)?;
        let child = player
            .command(asset)
            .spawn()
            .map_err(|source| SoundError::Spawn {
                program: player.program.display().to_string(),
                source,
            })?;
        debug!(pid = child.id(), asset = %asset.display(), "playback started");
        self.playing.push(child);
        Ok(())
    }

    /// Drop finished players, logging any that failed. Returns how many
    /// failed.
    fn reap(&mut self) -> usize {
        let mut failed = 0;
        self.playing.retain_mut(|child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) if status.success() => false,
            Ok(Some(status)) => {
                warn!(pid = child.id(), %status, "sound player exited with an error");
                failed += 1;
                false
            }
            Err(err) => {
                warn!(pid = child.id(), error = %err, "lost track of sound player");
                failed += 1;
                false
            }
        });
        failed
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        for child in &mut self.playing {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

/// The default notification cue: an audio handle plus the asset to play.
#[derive(Debug)]
pub struct SoundCue {
    audio: AudioOutput,
    asset: Option<PathBuf>,
    enabled: bool,
}

impl SoundCue {
    pub fn new(audio: AudioOutput, config: &SoundConfig) -> Self {
        let asset = config.path.clone().or_else(default_cue_path);
        Self {
            audio,
            asset,
            enabled: config.enabled,
        }
    }

    pub fn asset(&self) -> Option<&Path> {
        self.asset.as_deref()
    }

    /// Play the cue if its asset exists. Never fails: a missing asset or a
    /// playback error is logged and dropped.
    pub fn play_default_cue(&mut self) {
        if !self.enabled {
            debug!("sound cue disabled");
            return;
        }
        let Some(asset) = self.asset.as_deref() else {
            warn!("no default notification sound for this platform");
            return;
        };
        if !asset.is_file() {
            warn!(path = %asset.display(), "default sound file not found");
            return;
        }
        if let Err(err) = self.audio.play(asset) {
            warn!(error = %err, "error playing sound");
        }
    }
}

impl CuePlayer for SoundCue {
    fn play_cue(&mut self) {
        self.play_default_cue();
    }
}

/// Conventional location of the platform's notification sound.
pub fn default_cue_path() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var_os("WINDIR")
            .map(|dir| PathBuf::from(dir).join("Media").join("ding.wav"))
    } else if cfg!(target_os = "macos") {
        Some(PathBuf::from("/System/Library/Sounds/Glass.aiff"))
    } else {
        Some(PathBuf::from(
            "/usr/share/sounds/freedesktop/stereo/complete.oga",
        ))
    }
}

#[cfg(windows)]
const PLAYERS: &[(&str, &[&str])] = &[(
    "powershell.exe",
    &["-NoProfile", "-NonInteractive", "-Command"],
)];

#[cfg(target_os = "macos")]
const PLAYERS: &[(&str, &[&str])] = &[("afplay", &[])];

#[cfg(not(any(windows, target_os = "macos")))]
// aplay only decodes WAV, and the default asset here is Ogg Vorbis.
const PLAYERS: &[(&str, &[&str])] = &[("paplay", &[]), ("pw-play", &[])];

fn find_on_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
