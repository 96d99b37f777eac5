//! Playback surface state: scrubbing player or third-party embed
//!
//! Everything here is transient UI state. Nothing in this module touches the
//! interaction stores. Time is always passed in explicitly so the overlays and
//! the double-tap window can be driven deterministically.

use std::time::{Duration, Instant};

use super::types::MediaSource;

pub const SEEK_STEP_MS: u32 = 5_000;
pub const FEEDBACK_TTL: Duration = Duration::from_millis(500);
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
const SIDE_ZONE_FRACTION: f32 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
    Buffering,
    /// Media reported an unrecoverable error; a play command retries
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekDirection {
    Back,
    Forward,
}

/// Horizontal interaction zone of the player
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapZone {
    Left,
    Center,
    Right,
}

impl TapZone {
    /// Zone for a tap `offset` columns into a player `width` columns wide.
    pub fn from_offset(offset: u16, width: u16) -> Self {
        if width == 0 {
            return TapZone::Center;
        }
        let fraction = offset as f32 / width as f32;
        if fraction < SIDE_ZONE_FRACTION {
            TapZone::Left
        } else if fraction >= 1.0 - SIDE_ZONE_FRACTION {
            TapZone::Right
        } else {
            TapZone::Center
        }
    }

    fn seek_direction(self) -> Option<SeekDirection> {
        match self {
            TapZone::Left => Some(SeekDirection::Back),
            TapZone::Right => Some(SeekDirection::Forward),
            TapZone::Center => None,
        }
    }
}

/// Signals from the native media element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Autoplay,
    /// Playback stalled waiting for data
    Waiting,
    /// Enough data to resume
    CanPlay,
    Error(String),
}

/// Instructions for the native media element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaCommand {
    Play,
    Pause,
    Seek { position_ms: u32 },
}

#[derive(Clone, Copy, Debug)]
struct Transient<T> {
    value: T,
    since: Instant,
}

impl<T: Copy> Transient<T> {
    fn new(value: T, since: Instant) -> Self {
        Self { value, since }
    }

    fn live(&self, now: Instant, ttl: Duration) -> Option<T> {
        (now.saturating_duration_since(self.since) < ttl).then_some(self.value)
    }
}

/// Playback position that advances with wall time while running
#[derive(Clone, Copy, Debug)]
pub struct MediaClock {
    position_ms: u32,
    anchored_at: Instant,
    running: bool,
    duration_ms: u32,
}

impl MediaClock {
    pub fn new(duration_ms: u32, now: Instant) -> Self {
        Self {
            position_ms: 0,
            anchored_at: now,
            running: false,
            duration_ms,
        }
    }

    pub fn position_at(&self, now: Instant) -> u32 {
        if self.running {
            let elapsed = now.saturating_duration_since(self.anchored_at).as_millis();
            let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
            self.position_ms.saturating_add(elapsed).min(self.duration_ms)
        } else {
            self.position_ms
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn set_running(&mut self, running: bool, now: Instant) {
        self.position_ms = self.position_at(now);
        self.anchored_at = now;
        self.running = running;
    }

    fn seek_to(&mut self, position_ms: u32, now: Instant) {
        self.position_ms = position_ms.min(self.duration_ms);
        self.anchored_at = now;
    }

    fn at_end(&self, now: Instant) -> bool {
        self.duration_ms > 0 && self.position_at(now) >= self.duration_ms
    }
}

/// App-controlled player for first-party media
#[derive(Clone, Debug)]
pub struct ScrubbingPlayer {
    url: String,
    state: PlaybackState,
    clock: MediaClock,
    /// State entered by the last play/pause toggle
    toggle_feedback: Option<Transient<PlaybackState>>,
    seek_feedback: Option<Transient<SeekDirection>>,
    failure: Option<String>,
}

impl ScrubbingPlayer {
    fn new(url: String, duration_ms: u32, now: Instant) -> Self {
        Self {
            url,
            state: PlaybackState::Paused,
            clock: MediaClock::new(duration_ms, now),
            toggle_feedback: None,
            seek_feedback: None,
            failure: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    fn enter(&mut self, state: PlaybackState, now: Instant) {
        self.clock.set_running(state == PlaybackState::Playing, now);
        self.state = state;
    }

    fn toggle(&mut self, now: Instant) -> MediaCommand {
        let (next, command) = match self.state {
            PlaybackState::Playing | PlaybackState::Buffering => (PlaybackState::Paused, MediaCommand::Pause),
            PlaybackState::Paused => (PlaybackState::Playing, MediaCommand::Play),
            PlaybackState::Failed => {
                self.failure = None;
                (PlaybackState::Buffering, MediaCommand::Play)
            }
        };
        self.enter(next, now);
        let shown = if command == MediaCommand::Play {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        self.toggle_feedback = Some(Transient::new(shown, now));
        command
    }

    fn seek(&mut self, direction: SeekDirection, now: Instant) -> MediaCommand {
        let position = self.clock.position_at(now);
        let target = match direction {
            SeekDirection::Back => position.saturating_sub(SEEK_STEP_MS),
            SeekDirection::Forward => position.saturating_add(SEEK_STEP_MS),
        };
        self.clock.seek_to(target, now);
        self.seek_feedback = Some(Transient::new(direction, now));
        MediaCommand::Seek {
            position_ms: self.clock.position_at(now),
        }
    }

    fn on_media_event(&mut self, event: MediaEvent, now: Instant) {
        match (self.state, event) {
            (PlaybackState::Paused, MediaEvent::Autoplay) => self.enter(PlaybackState::Playing, now),
            (PlaybackState::Playing | PlaybackState::Paused, MediaEvent::Waiting) => {
                self.enter(PlaybackState::Buffering, now)
            }
            (PlaybackState::Buffering, MediaEvent::CanPlay) => self.enter(PlaybackState::Playing, now),
            (_, MediaEvent::Error(message)) => {
                tracing::warn!(url = %self.url, error = %message, "Media playback failed");
                self.failure = Some(message);
                self.enter(PlaybackState::Failed, now);
            }
            (state, event) => tracing::trace!(?state, ?event, "Media event ignored"),
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.toggle_feedback.is_some_and(|f| f.live(now, FEEDBACK_TTL).is_none()) {
            self.toggle_feedback = None;
        }
        if self.seek_feedback.is_some_and(|f| f.live(now, FEEDBACK_TTL).is_none()) {
            self.seek_feedback = None;
        }
        if self.state == PlaybackState::Playing && self.clock.at_end(now) {
            tracing::debug!(url = %self.url, "Reached end of media");
            self.enter(PlaybackState::Paused, now);
        }
    }

    fn view(&self, now: Instant) -> ScrubbingView {
        let buffering = self.state == PlaybackState::Buffering;
        ScrubbingView {
            state: self.state,
            position_ms: self.clock.position_at(now),
            duration_ms: self.clock.duration_ms(),
            toggle_feedback: self
                .toggle_feedback
                .and_then(|f| f.live(now, FEEDBACK_TTL))
                .filter(|_| !buffering),
            seek_feedback: self.seek_feedback.and_then(|f| f.live(now, FEEDBACK_TTL)),
            show_center_play: self.state == PlaybackState::Paused,
            failure: self.failure.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum SurfaceMode {
    Scrubbing(ScrubbingPlayer),
    /// Third-party player; no playback state is tracked
    Embedded { url: String },
    /// Neither locator present
    Unavailable,
}

/// What the player area should draw at a given instant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrubbingView {
    pub state: PlaybackState,
    pub position_ms: u32,
    pub duration_ms: u32,
    pub toggle_feedback: Option<PlaybackState>,
    pub seek_feedback: Option<SeekDirection>,
    pub show_center_play: bool,
    pub failure: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    Scrubbing(ScrubbingView),
    Embedded { url: String },
    Unavailable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceView {
    pub kind: SurfaceKind,
    pub fullscreen: bool,
}

/// Dual-mode video presentation component
#[derive(Clone, Debug)]
pub struct PlaybackSurface {
    mode: SurfaceMode,
    fullscreen: bool,
    pending_tap: Option<Transient<TapZone>>,
}

impl PlaybackSurface {
    pub fn new(source: Option<&MediaSource>, duration_ms: u32, now: Instant) -> Self {
        let mode = match source {
            Some(MediaSource::Native(url)) => {
                SurfaceMode::Scrubbing(ScrubbingPlayer::new(url.clone(), duration_ms, now))
            }
            Some(MediaSource::Embed(url)) => SurfaceMode::Embedded { url: url.clone() },
            None => SurfaceMode::Unavailable,
        };
        Self {
            mode,
            fullscreen: false,
            pending_tap: None,
        }
    }

    pub fn unavailable() -> Self {
        Self::new(None, 0, Instant::now())
    }

    pub fn mode(&self) -> &SurfaceMode {
        &self.mode
    }

    pub fn state(&self) -> Option<PlaybackState> {
        match &self.mode {
            SurfaceMode::Scrubbing(player) => Some(player.state()),
            _ => None,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Only platform notifications change the fullscreen flag.
    pub fn on_fullscreen_change(&mut self, active: bool) {
        self.fullscreen = active;
    }

    fn player_mut(&mut self) -> Option<&mut ScrubbingPlayer> {
        match &mut self.mode {
            SurfaceMode::Scrubbing(player) => Some(player),
            _ => None,
        }
    }

    pub fn toggle_play(&mut self, now: Instant) -> Option<MediaCommand> {
        self.player_mut().map(|player| player.toggle(now))
    }

    pub fn seek(&mut self, direction: SeekDirection, now: Instant) -> Option<MediaCommand> {
        self.player_mut().map(|player| player.seek(direction, now))
    }

    /// Side zones wait out the double-tap window before acting as a single
    /// tap. A center tap, or a tap in the other side zone, drops a pending one.
    pub fn tap(&mut self, zone: TapZone, now: Instant) -> Vec<MediaCommand> {
        if self.player_mut().is_none() {
            return Vec::new();
        }
        let mut commands: Vec<MediaCommand> = self.resolve_pending_tap(now).into_iter().collect();

        match zone.seek_direction() {
            None => {
                self.pending_tap = None;
                commands.extend(self.toggle_play(now));
            }
            Some(direction) => match self.pending_tap.take() {
                Some(pending) if pending.value == zone => commands.extend(self.seek(direction, now)),
                _ => self.pending_tap = Some(Transient::new(zone, now)),
            },
        }
        commands
    }

    fn resolve_pending_tap(&mut self, now: Instant) -> Option<MediaCommand> {
        let pending = self.pending_tap?;
        if pending.live(now, DOUBLE_TAP_WINDOW).is_some() {
            return None;
        }
        self.pending_tap = None;
        self.toggle_play(now)
    }

    pub fn on_media_event(&mut self, event: MediaEvent, now: Instant) {
        if let Some(player) = self.player_mut() {
            player.on_media_event(event, now);
        }
    }

    /// Expire transient feedback and confirm pending single taps.
    pub fn tick(&mut self, now: Instant) -> Option<MediaCommand> {
        let command = self.resolve_pending_tap(now);
        if let Some(player) = self.player_mut() {
            player.tick(now);
        }
        command
    }

    pub fn view(&self, now: Instant) -> SurfaceView {
        let kind = match &self.mode {
            SurfaceMode::Scrubbing(player) => SurfaceKind::Scrubbing(player.view(now)),
            SurfaceMode::Embedded { url } => SurfaceKind::Embedded { url: url.clone() },
            SurfaceMode::Unavailable => SurfaceKind::Unavailable,
        };
        SurfaceView {
            kind,
            fullscreen: self.fullscreen,
        }
    }
}

/// Parse a `m:ss` or `h:mm:ss` display label into milliseconds.
pub fn parse_duration_label(label: &str) -> Option<u32> {
    let parts: Vec<u32> = label
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let seconds = match parts.as_slice() {
        [s] => *s,
        [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s)?,
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)?
            .checked_add(m * 60 + s)?,
        _ => return None,
    };
    seconds.checked_mul(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE_MS: u32 = 60_000;

    fn native(now: Instant) -> PlaybackSurface {
        PlaybackSurface::new(Some(&MediaSource::Native("https://cdn/v.mp4".to_string())), MINUTE_MS, now)
    }

    fn scrubbing(surface: &PlaybackSurface, now: Instant) -> ScrubbingView {
        match surface.view(now).kind {
            SurfaceKind::Scrubbing(view) => view,
            other => panic!("expected scrubbing player, got {:?}", other),
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn zones_split_35_30_35() {
        assert_eq!(TapZone::from_offset(0, 100), TapZone::Left);
        assert_eq!(TapZone::from_offset(34, 100), TapZone::Left);
        assert_eq!(TapZone::from_offset(35, 100), TapZone::Center);
        assert_eq!(TapZone::from_offset(64, 100), TapZone::Center);
        assert_eq!(TapZone::from_offset(65, 100), TapZone::Right);
        assert_eq!(TapZone::from_offset(99, 100), TapZone::Right);
        assert_eq!(TapZone::from_offset(0, 0), TapZone::Center);
    }

    #[test]
    fn play_pause_cycle_with_transient_glyph() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        assert_eq!(surface.state(), Some(PlaybackState::Paused));
        assert!(scrubbing(&surface, t0).show_center_play);

        assert_eq!(surface.toggle_play(t0), Some(MediaCommand::Play));
        let view = scrubbing(&surface, t0 + ms(100));
        assert_eq!(view.state, PlaybackState::Playing);
        assert_eq!(view.toggle_feedback, Some(PlaybackState::Playing));
        assert!(!view.show_center_play);

        surface.tick(t0 + ms(600));
        assert_eq!(scrubbing(&surface, t0 + ms(600)).toggle_feedback, None);

        assert_eq!(surface.toggle_play(t0 + ms(700)), Some(MediaCommand::Pause));
        assert_eq!(
            scrubbing(&surface, t0 + ms(700)).toggle_feedback,
            Some(PlaybackState::Paused)
        );
    }

    #[test]
    fn stall_and_resume() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.toggle_play(t0);
        surface.on_media_event(MediaEvent::Waiting, t0 + ms(100));
        assert_eq!(surface.state(), Some(PlaybackState::Buffering));

        let view = scrubbing(&surface, t0 + ms(200));
        assert_eq!(view.toggle_feedback, None, "glyph suppressed while buffering");
        assert!(!view.show_center_play);

        surface.on_media_event(MediaEvent::CanPlay, t0 + ms(300));
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn autoplay_only_starts_from_paused() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.on_media_event(MediaEvent::Autoplay, t0);
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
        assert_eq!(scrubbing(&surface, t0).toggle_feedback, None);

        surface.on_media_event(MediaEvent::CanPlay, t0);
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn clock_runs_only_while_playing() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        assert_eq!(scrubbing(&surface, t0 + ms(2_000)).position_ms, 0);

        surface.toggle_play(t0);
        assert_eq!(scrubbing(&surface, t0 + ms(2_000)).position_ms, 2_000);

        surface.on_media_event(MediaEvent::Waiting, t0 + ms(2_000));
        assert_eq!(scrubbing(&surface, t0 + ms(9_000)).position_ms, 2_000);
    }

    #[test]
    fn seek_keeps_play_state_and_clamps() {
        let t0 = Instant::now();
        let mut surface = native(t0);

        assert_eq!(
            surface.seek(SeekDirection::Back, t0),
            Some(MediaCommand::Seek { position_ms: 0 })
        );
        assert_eq!(
            surface.seek(SeekDirection::Forward, t0),
            Some(MediaCommand::Seek { position_ms: 5_000 })
        );
        assert_eq!(surface.state(), Some(PlaybackState::Paused));
        assert_eq!(scrubbing(&surface, t0).seek_feedback, Some(SeekDirection::Forward));

        surface.toggle_play(t0);
        surface.seek(SeekDirection::Forward, t0 + ms(1_000));
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
        assert_eq!(scrubbing(&surface, t0 + ms(1_000)).position_ms, 11_000);

        for _ in 0..20 {
            surface.seek(SeekDirection::Forward, t0 + ms(1_000));
        }
        assert_eq!(scrubbing(&surface, t0 + ms(1_000)).position_ms, MINUTE_MS);
    }

    #[test]
    fn seek_indicator_clears_after_ttl() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.seek(SeekDirection::Back, t0);
        assert_eq!(scrubbing(&surface, t0 + ms(499)).seek_feedback, Some(SeekDirection::Back));
        surface.tick(t0 + ms(500));
        assert_eq!(scrubbing(&surface, t0 + ms(500)).seek_feedback, None);
    }

    #[test]
    fn double_tap_on_side_seeks_without_toggling() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.toggle_play(t0);

        assert!(surface.tap(TapZone::Right, t0 + ms(1_000)).is_empty());
        let commands = surface.tap(TapZone::Right, t0 + ms(1_150));
        assert_eq!(commands, vec![MediaCommand::Seek { position_ms: 6_150 }]);
        assert_eq!(surface.state(), Some(PlaybackState::Playing));

        assert_eq!(surface.tick(t0 + ms(2_000)), None);
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn single_side_tap_toggles_after_window() {
        let t0 = Instant::now();
        let mut surface = native(t0);

        assert!(surface.tap(TapZone::Left, t0).is_empty());
        assert_eq!(surface.tick(t0 + ms(100)), None);
        assert_eq!(surface.state(), Some(PlaybackState::Paused));

        assert_eq!(surface.tick(t0 + ms(300)), Some(MediaCommand::Play));
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn late_second_tap_is_two_single_taps() {
        let t0 = Instant::now();
        let mut surface = native(t0);

        surface.tap(TapZone::Left, t0);
        let commands = surface.tap(TapZone::Left, t0 + ms(400));
        assert_eq!(commands, vec![MediaCommand::Play]);
        assert_eq!(surface.tick(t0 + ms(800)), Some(MediaCommand::Pause));
    }

    #[test]
    fn center_tap_toggles_immediately_and_drops_pending() {
        let t0 = Instant::now();
        let mut surface = native(t0);

        surface.tap(TapZone::Right, t0);
        assert_eq!(surface.tap(TapZone::Center, t0 + ms(50)), vec![MediaCommand::Play]);
        assert_eq!(surface.tick(t0 + ms(1_000)), None);
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn reaching_the_end_pauses() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.toggle_play(t0);
        surface.tick(t0 + ms(61_000));
        assert_eq!(surface.state(), Some(PlaybackState::Paused));
        assert_eq!(scrubbing(&surface, t0 + ms(70_000)).position_ms, MINUTE_MS);
    }

    #[test]
    fn media_error_fails_and_play_retries() {
        let t0 = Instant::now();
        let mut surface = native(t0);
        surface.toggle_play(t0);
        surface.on_media_event(MediaEvent::Error("network lost".to_string()), t0 + ms(10));

        let view = scrubbing(&surface, t0 + ms(20));
        assert_eq!(view.state, PlaybackState::Failed);
        assert_eq!(view.failure.as_deref(), Some("network lost"));

        assert_eq!(surface.toggle_play(t0 + ms(30)), Some(MediaCommand::Play));
        assert_eq!(surface.state(), Some(PlaybackState::Buffering));
        surface.on_media_event(MediaEvent::CanPlay, t0 + ms(40));
        assert_eq!(surface.state(), Some(PlaybackState::Playing));
        assert_eq!(scrubbing(&surface, t0 + ms(50)).failure, None);
    }

    #[test]
    fn embed_mode_ignores_playback_but_tracks_fullscreen() {
        let t0 = Instant::now();
        let mut surface =
            PlaybackSurface::new(Some(&MediaSource::Embed("https://embed/x".to_string())), 0, t0);
        assert_eq!(surface.toggle_play(t0), None);
        assert_eq!(surface.seek(SeekDirection::Forward, t0), None);
        assert!(surface.tap(TapZone::Left, t0).is_empty());
        assert_eq!(surface.state(), None);

        surface.on_fullscreen_change(true);
        let view = surface.view(t0);
        assert!(view.fullscreen);
        assert_eq!(view.kind, SurfaceKind::Embedded { url: "https://embed/x".to_string() });
    }

    #[test]
    fn fullscreen_follows_notifications_only() {
        let mut surface = native(Instant::now());
        surface.on_fullscreen_change(true);
        assert!(surface.is_fullscreen());
        surface.on_fullscreen_change(false);
        assert!(!surface.is_fullscreen());
    }

    #[test]
    fn duration_labels() {
        assert_eq!(parse_duration_label("12:34"), Some(754_000));
        assert_eq!(parse_duration_label("1:02:03"), Some(3_723_000));
        assert_eq!(parse_duration_label("0:58"), Some(58_000));
        assert_eq!(parse_duration_label("1:75"), None);
        assert_eq!(parse_duration_label("live"), None);
    }

    #[test]
    fn oversized_duration_labels_are_rejected() {
        assert_eq!(parse_duration_label("99999999:00"), None);
        assert_eq!(parse_duration_label("2000000:00:00"), None);
        assert_eq!(parse_duration_label("4294967:00"), None);
    }
}
