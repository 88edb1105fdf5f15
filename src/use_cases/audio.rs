// Two-channel audio direction: the hall's global theme and the per-artwork
// theme, crossfaded as the user moves in and out of detail views.
//
// The director never touches playback itself. It emits commands that the
// client applies to its own players, keeping the loop free of audio I/O.

use tracing::debug;

use crate::domain::entities::MusicSource;
use crate::domain::tuning::AudioTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioChannel {
    Global,
    Art,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Load {
        channel: AudioChannel,
        source: MusicSource,
    },
    Play {
        channel: AudioChannel,
    },
    /// Pause keeps the position so a later fade-in resumes where it left off.
    Pause {
        channel: AudioChannel,
    },
    SetVolume {
        channel: AudioChannel,
        volume: f32,
    },
}

/// An in-flight volume ramp on one channel. A channel holds at most one; a
/// new fade replaces the old ramp mid-flight rather than stacking on it.
#[derive(Debug, Clone)]
struct Fade {
    from: f32,
    to: f32,
    steps_done: u32,
    next_step_at_ms: u64,
    step_interval_ms: u64,
    pause_at_end: bool,
}

#[derive(Debug, Clone)]
struct ChannelState {
    channel: AudioChannel,
    source: MusicSource,
    playing: bool,
    volume: f32,
    fade: Option<Fade>,
    /// Source to load and fade in once the current fade-out lands.
    pending: Option<MusicSource>,
}

impl ChannelState {
    fn new(channel: AudioChannel) -> Self {
        Self {
            channel,
            source: MusicSource::None,
            playing: false,
            volume: 0.0,
            fade: None,
            pending: None,
        }
    }
}

/// Ease-in-out quadratic, the ramp shape for every fade.
fn ease(p: f32) -> f32 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        -1.0 + (4.0 - 2.0 * p) * p
    }
}

pub struct AudioDirector {
    cfg: AudioTuning,
    master_volume: f32,
    global: ChannelState,
    art: ChannelState,
}

impl AudioDirector {
    pub fn new(cfg: AudioTuning, master_volume: f32) -> Self {
        Self {
            cfg,
            master_volume,
            global: ChannelState::new(AudioChannel::Global),
            art: ChannelState::new(AudioChannel::Art),
        }
    }

    /// Sets the global hall theme. Swaps with a fade when it is audible,
    /// otherwise silently reloads so the next fade-in picks it up.
    pub fn set_global_source(
        &mut self,
        source: MusicSource,
        now_ms: u64,
        out: &mut Vec<AudioCommand>,
    ) {
        if self.global.source == source {
            return;
        }
        if self.global.playing {
            // Audible theme ramps out first; the swap (or silence, when the
            // new source is unconfigured) follows once the fade lands.
            self.global.pending = Some(source);
            start_fade(&mut self.global, self.cfg, now_ms, 0.0, true);
        } else {
            self.global.source = source.clone();
            self.global.pending = None;
            out.push(AudioCommand::Load {
                channel: AudioChannel::Global,
                source,
            });
            if self.global.source.is_configured() && !self.art.playing {
                play_faded_in(&mut self.global, self.cfg, self.master_volume, now_ms, out);
            }
        }
    }

    /// Called when the detail view opens, closes or navigates. `art_music` is
    /// the music of the now-open artwork, or None when the view closed.
    pub fn on_artwork_changed(
        &mut self,
        art_music: Option<&MusicSource>,
        now_ms: u64,
        out: &mut Vec<AudioCommand>,
    ) {
        match art_music {
            Some(music) if music.is_configured() => {
                if self.art.playing && self.art.source == *music {
                    return;
                }
                if self.global.playing {
                    start_fade(&mut self.global, self.cfg, now_ms, 0.0, true);
                }
                if self.art.playing {
                    // Same channel: the old theme must ramp out before the
                    // new one loads, so queue the swap.
                    self.art.pending = Some(music.clone());
                    start_fade(&mut self.art, self.cfg, now_ms, 0.0, true);
                } else {
                    self.art.source = music.clone();
                    out.push(AudioCommand::Load {
                        channel: AudioChannel::Art,
                        source: music.clone(),
                    });
                    play_faded_in(&mut self.art, self.cfg, self.master_volume, now_ms, out);
                }
            }
            _ => {
                // No artwork theme to play: ramp the art channel out and
                // bring the hall theme back.
                if self.art.playing {
                    self.art.pending = None;
                    start_fade(&mut self.art, self.cfg, now_ms, 0.0, true);
                }
                if self.global.source.is_configured() && !self.global.playing {
                    play_faded_in(&mut self.global, self.cfg, self.master_volume, now_ms, out);
                }
            }
        }
    }

    /// User volume change. An in-flight ramp stays authoritative until it
    /// completes; idle audible channels jump immediately.
    pub fn set_volume(&mut self, volume: f32, out: &mut Vec<AudioCommand>) {
        let volume = volume.clamp(0.0, 1.0);
        self.master_volume = volume;
        for ch in [&mut self.global, &mut self.art] {
            if ch.fade.is_some() || !ch.playing {
                continue;
            }
            ch.volume = volume;
            out.push(AudioCommand::SetVolume {
                channel: ch.channel,
                volume,
            });
        }
    }

    /// Advances any in-flight fades up to `now_ms`.
    pub fn tick(&mut self, now_ms: u64, out: &mut Vec<AudioCommand>) {
        let master = self.master_volume;
        let cfg = self.cfg;
        for ch in [&mut self.global, &mut self.art] {
            tick_channel(ch, cfg, master, now_ms, out);
        }
    }

    #[cfg(test)]
    fn is_fading(&self, channel: AudioChannel) -> bool {
        match channel {
            AudioChannel::Global => self.global.fade.is_some(),
            AudioChannel::Art => self.art.fade.is_some(),
        }
    }
}

fn start_fade(ch: &mut ChannelState, cfg: AudioTuning, now_ms: u64, to: f32, pause_at_end: bool) {
    let step_interval_ms = (cfg.fade_duration_ms / cfg.fade_steps as u64).max(1);
    debug!(channel = ?ch.channel, from = ch.volume, to, "starting fade");
    ch.fade = Some(Fade {
        from: ch.volume,
        to,
        steps_done: 0,
        next_step_at_ms: now_ms + step_interval_ms,
        step_interval_ms,
        pause_at_end,
    });
}

fn play_faded_in(
    ch: &mut ChannelState,
    cfg: AudioTuning,
    master: f32,
    now_ms: u64,
    out: &mut Vec<AudioCommand>,
) {
    ch.volume = 0.0;
    ch.playing = true;
    out.push(AudioCommand::SetVolume {
        channel: ch.channel,
        volume: 0.0,
    });
    out.push(AudioCommand::Play {
        channel: ch.channel,
    });
    start_fade(ch, cfg, now_ms, master, false);
}

fn tick_channel(
    ch: &mut ChannelState,
    cfg: AudioTuning,
    master: f32,
    now_ms: u64,
    out: &mut Vec<AudioCommand>,
) {
    loop {
        let Some(fade) = &mut ch.fade else {
            return;
        };
        if now_ms < fade.next_step_at_ms {
            return;
        }

        fade.steps_done += 1;
        fade.next_step_at_ms += fade.step_interval_ms;
        let p = fade.steps_done as f32 / cfg.fade_steps as f32;
        let volume = if fade.steps_done >= cfg.fade_steps {
            fade.to
        } else {
            fade.from + (fade.to - fade.from) * ease(p)
        };
        ch.volume = volume;
        out.push(AudioCommand::SetVolume {
            channel: ch.channel,
            volume,
        });

        if fade.steps_done >= cfg.fade_steps {
            let pause = fade.pause_at_end;
            ch.fade = None;
            if pause {
                ch.playing = false;
                out.push(AudioCommand::Pause {
                    channel: ch.channel,
                });
                if let Some(source) = ch.pending.take() {
                    ch.source = source.clone();
                    out.push(AudioCommand::Load {
                        channel: ch.channel,
                        source,
                    });
                    if ch.source.is_configured() {
                        play_faded_in(ch, cfg, master, now_ms, out);
                    }
                }
            }
        }
    }
}
