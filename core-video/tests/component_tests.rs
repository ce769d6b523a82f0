//! End-to-end tests for the video component: timer event reactions,
//! media application, drift correction and disposal, all observed
//! through recording fakes at the host boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use core_runtime::TimerEventBus;
use core_video::{SyncOffset, VideoComponent, VideoError, VideoSettings};
use host_traits::{
    LayoutMode, LogNotifier, MediaLocator, PlaybackControl, SettingsStore, TimerEvent, TimerPhase,
    TimerSource, VideoSurface,
};

/// Runs one host update tick with representative layout bounds.
async fn tick(component: &VideoComponent) {
    component.update(300.0, 200.0, LayoutMode::Horizontal).await;
}

// ============================================================================
// Fakes
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Load(String),
    Play,
    Pause,
    Stop,
    SetPosition(f64),
    SetMuted(bool),
}

/// Shared observation handle for a [`RecordingControl`].
#[derive(Clone, Default)]
struct ControlProbe {
    commands: Arc<Mutex<Vec<Command>>>,
    faulted: Arc<AtomicBool>,
    disposed: Arc<AtomicBool>,
}

impl ControlProbe {
    fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }

    fn set_faulted(&self) {
        self.faulted.store(true, Ordering::SeqCst);
    }
}

struct RecordingControl(ControlProbe);

impl RecordingControl {
    fn create() -> (Box<dyn PlaybackControl>, ControlProbe) {
        let probe = ControlProbe::default();
        (Box::new(RecordingControl(probe.clone())), probe)
    }

    fn record(&mut self, command: Command) -> host_traits::Result<()> {
        self.0.commands.lock().unwrap().push(command);
        Ok(())
    }
}

impl PlaybackControl for RecordingControl {
    fn load(&mut self, locator: &MediaLocator) -> host_traits::Result<()> {
        self.record(Command::Load(locator.clone()))
    }
    fn play(&mut self) -> host_traits::Result<()> {
        self.record(Command::Play)
    }
    fn pause(&mut self) -> host_traits::Result<()> {
        self.record(Command::Pause)
    }
    fn stop(&mut self) -> host_traits::Result<()> {
        self.record(Command::Stop)
    }
    fn set_position_secs(&mut self, seconds: f64) -> host_traits::Result<()> {
        self.record(Command::SetPosition(seconds))
    }
    fn set_muted(&mut self, muted: bool) -> host_traits::Result<()> {
        self.record(Command::SetMuted(muted))
    }
    fn is_faulted(&self) -> bool {
        self.0.faulted.load(Ordering::SeqCst)
    }
    fn is_disposed(&self) -> bool {
        self.0.disposed.load(Ordering::SeqCst)
    }
}

struct FakeTimer(Mutex<Duration>);

impl FakeTimer {
    fn at_secs(secs: u64) -> Arc<Self> {
        Arc::new(FakeTimer(Mutex::new(Duration::from_secs(secs))))
    }
}

impl TimerSource for FakeTimer {
    fn current_time(&self) -> Duration {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
struct FakeSurface {
    created: AtomicBool,
    visibility: Mutex<Vec<bool>>,
}

impl FakeSurface {
    fn created() -> Arc<Self> {
        let surface = FakeSurface::default();
        surface.created.store(true, Ordering::SeqCst);
        Arc::new(surface)
    }

    fn visibility(&self) -> Vec<bool> {
        self.visibility.lock().unwrap().clone()
    }
}

impl VideoSurface for FakeSurface {
    fn is_created(&self) -> bool {
        self.created.load(Ordering::SeqCst)
    }
    fn set_visible(&self, visible: bool) {
        self.visibility.lock().unwrap().push(visible);
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    component: Arc<VideoComponent>,
    probe: ControlProbe,
    surface: Arc<FakeSurface>,
    store: Arc<host_traits::MemorySettingsStore>,
}

impl Harness {
    fn new(timer: Arc<dyn TimerSource>, settings: VideoSettings) -> Self {
        let (control, probe) = RecordingControl::create();
        let surface = FakeSurface::created();
        let document = settings.to_document().unwrap();
        let store = Arc::new(host_traits::MemorySettingsStore::with_document(document));

        let component = VideoComponent::new(
            Ok(control),
            timer,
            Arc::clone(&surface) as Arc<dyn VideoSurface>,
            Arc::clone(&store) as Arc<dyn SettingsStore>,
            &LogNotifier,
        );
        Harness {
            component,
            probe,
            surface,
            store,
        }
    }

    /// Runs one update tick so the component attaches and picks up the
    /// stored settings.
    async fn attach(&self) {
        tick(&self.component).await;
        assert_eq!(self.component.lifecycle(), core_video::Lifecycle::Attached);
    }

    async fn write_settings(&self, settings: &VideoSettings) {
        self.store.write(settings.to_document().unwrap()).await.unwrap();
    }
}

fn settings_with_mrl(mrl: &str) -> VideoSettings {
    VideoSettings {
        mrl: mrl.to_string(),
        ..VideoSettings::default()
    }
}

// ============================================================================
// Timer events
// ============================================================================

#[tokio::test]
async fn start_plays_then_positions_exactly_once() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;
    harness.probe.clear();

    harness.component.on_timer_start().await;
    harness.component.flush_commands().await.unwrap();

    let commands = harness.probe.commands();
    let plays = commands.iter().filter(|c| **c == Command::Play).count();
    let positions = commands
        .iter()
        .filter(|c| matches!(c, Command::SetPosition(_)))
        .count();
    assert_eq!(plays, 1);
    assert_eq!(positions, 1);

    let play_at = commands.iter().position(|c| *c == Command::Play).unwrap();
    let pos_at = commands
        .iter()
        .position(|c| matches!(c, Command::SetPosition(_)))
        .unwrap();
    assert!(play_at < pos_at, "play must precede the position command");

    assert_eq!(harness.surface.visibility().last(), Some(&true));
}

#[tokio::test]
async fn pause_and_resume_forward_to_control() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;
    harness.probe.clear();

    harness.component.on_timer_pause().await;
    harness.component.on_timer_resume().await;
    harness.component.flush_commands().await.unwrap();

    assert_eq!(harness.probe.commands(), vec![Command::Pause, Command::Play]);
}

#[tokio::test]
async fn reset_stops_and_hides_regardless_of_phase() {
    let harness = Harness::new(FakeTimer::at_secs(42), VideoSettings::default());
    harness.attach().await;

    for phase in [TimerPhase::Ended, TimerPhase::Running, TimerPhase::NotRunning] {
        harness.probe.clear();
        harness.component.on_timer_reset(phase).await;
        harness.component.flush_commands().await.unwrap();

        assert_eq!(harness.probe.commands(), vec![Command::Stop]);
        assert_eq!(harness.surface.visibility().last(), Some(&false));
    }
}

#[tokio::test]
async fn events_from_the_bus_drive_the_component() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;
    harness.probe.clear();

    let bus = TimerEventBus::default();
    harness.component.attach_to(&bus).await;

    bus.emit(TimerEvent::Started).unwrap();
    bus.emit(TimerEvent::Paused).unwrap();
    bus.emit(TimerEvent::Reset {
        phase: TimerPhase::Ended,
    })
    .unwrap();

    // Let the subscription pump deliver all three events.
    tokio::time::sleep(Duration::from_millis(50)).await;
    harness.component.flush_commands().await.unwrap();

    let commands = harness.probe.commands();
    assert!(commands.contains(&Command::Play));
    assert!(commands.contains(&Command::Pause));
    assert!(commands.contains(&Command::Stop));
}

// ============================================================================
// Synchronization
// ============================================================================

#[tokio::test]
async fn commanded_position_sums_timer_extra_and_configured_offset() {
    let settings = VideoSettings {
        offset: SyncOffset::from_millis(-1_500),
        ..VideoSettings::default()
    };
    let harness = Harness::new(FakeTimer::at_secs(60), settings);
    harness.attach().await;
    harness.probe.clear();

    harness.component.synchronize(SyncOffset::from_millis(500)).await;
    harness.component.flush_commands().await.unwrap();

    assert_eq!(
        harness.probe.commands(),
        vec![Command::SetPosition(60.0 + 0.5 - 1.5)]
    );
}

#[tokio::test(start_paused = true)]
async fn drift_cycle_resynchronizes_periodically() {
    let settings = VideoSettings {
        drift_interval_ms: 5_000,
        ..VideoSettings::default()
    };
    let harness = Harness::new(FakeTimer::at_secs(10), settings);
    harness.attach().await;
    harness.probe.clear();

    harness.component.synchronize(SyncOffset::ZERO).await;
    harness.component.flush_commands().await.unwrap();
    assert_eq!(harness.probe.commands().len(), 1);

    // Each elapsed interval re-arms through synchronize, so exactly one
    // extra position command lands per period. The short sleep lets the
    // firing's spawned task settle under the paused clock.
    tokio::time::advance(Duration::from_millis(5_100)).await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    harness.component.flush_commands().await.unwrap();
    assert_eq!(harness.probe.commands().len(), 2);

    tokio::time::advance(Duration::from_millis(5_100)).await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    harness.component.flush_commands().await.unwrap();
    assert_eq!(harness.probe.commands().len(), 3);
}

// After a reset there is no running timer to align with, so the drift
// cycle must not keep repositioning the stopped player.
#[tokio::test(start_paused = true)]
async fn drift_cycle_stops_on_reset_and_dispose() {
    let harness = Harness::new(FakeTimer::at_secs(10), VideoSettings::default());
    harness.attach().await;

    harness.component.synchronize(SyncOffset::ZERO).await;
    harness.component.on_timer_reset(TimerPhase::Ended).await;
    harness.component.flush_commands().await.unwrap();
    harness.probe.clear();

    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    harness.component.flush_commands().await.unwrap();
    assert_eq!(harness.probe.commands(), Vec::<Command>::new());

    harness.component.synchronize(SyncOffset::ZERO).await;
    harness.component.dispose().await;
    harness.component.flush_commands().await.unwrap();
    harness.probe.clear();

    tokio::time::advance(Duration::from_secs(60)).await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(harness.probe.commands(), Vec::<Command>::new());
}

// ============================================================================
// Update tick and media application
// ============================================================================

#[tokio::test]
async fn media_loads_once_per_distinct_locator() {
    let harness = Harness::new(FakeTimer::at_secs(0), settings_with_mrl("file:///a.mp4"));
    harness.attach().await;
    harness.probe.clear();

    tick(&harness.component).await;
    tick(&harness.component).await;
    harness.component.flush_commands().await.unwrap();

    let loads: Vec<_> = harness
        .probe
        .commands()
        .into_iter()
        .filter(|c| matches!(c, Command::Load(_)))
        .collect();
    assert_eq!(loads, vec![Command::Load("file:///a.mp4".to_string())]);

    harness
        .write_settings(&settings_with_mrl("file:///b.mp4"))
        .await;
    harness.probe.clear();
    tick(&harness.component).await;
    harness.component.flush_commands().await.unwrap();

    let loads: Vec<_> = harness
        .probe
        .commands()
        .into_iter()
        .filter(|c| matches!(c, Command::Load(_)))
        .collect();
    assert_eq!(loads, vec![Command::Load("file:///b.mp4".to_string())]);
}

#[tokio::test]
async fn empty_locator_is_never_loaded() {
    let harness = Harness::new(FakeTimer::at_secs(0), settings_with_mrl(""));
    harness.attach().await;
    harness.probe.clear();

    tick(&harness.component).await;
    harness.component.flush_commands().await.unwrap();

    assert!(!harness
        .probe
        .commands()
        .iter()
        .any(|c| matches!(c, Command::Load(_))));
}

#[tokio::test]
async fn every_attached_tick_reasserts_muting() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;
    harness.probe.clear();

    tick(&harness.component).await;
    tick(&harness.component).await;
    tick(&harness.component).await;
    harness.component.flush_commands().await.unwrap();

    let mutes = harness
        .probe
        .commands()
        .iter()
        .filter(|c| **c == Command::SetMuted(true))
        .count();
    assert_eq!(mutes, 3);
}

#[tokio::test]
async fn surface_stays_visible_until_created() {
    let (control, probe) = RecordingControl::create();
    let surface = Arc::new(FakeSurface::default());
    let store = Arc::new(host_traits::MemorySettingsStore::new());
    let component = VideoComponent::new(
        Ok(control),
        FakeTimer::at_secs(0),
        Arc::clone(&surface) as Arc<dyn VideoSurface>,
        store as Arc<dyn SettingsStore>,
        &LogNotifier,
    );

    tick(&component).await;
    assert_eq!(component.lifecycle(), core_video::Lifecycle::Uninitialized);
    assert_eq!(surface.visibility(), vec![true]);

    surface.created.store(true, Ordering::SeqCst);
    tick(&component).await;
    assert_eq!(component.lifecycle(), core_video::Lifecycle::Attached);
    assert_eq!(surface.visibility(), vec![true, false]);

    // Before attachment no media or mute commands were issued.
    component.flush_commands().await.unwrap();
    assert!(probe
        .commands()
        .iter()
        .all(|c| !matches!(c, Command::Load(_) | Command::SetMuted(_))));
}

#[tokio::test]
async fn settings_edits_show_up_in_sizing() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;
    let before = harness.component.settings_fingerprint().await;

    let settings = VideoSettings {
        width: 640.0,
        height: 360.0,
        ..VideoSettings::default()
    };
    harness.write_settings(&settings).await;
    tick(&harness.component).await;

    assert_eq!(harness.component.horizontal_width().await, 640.0);
    assert_eq!(harness.component.vertical_height().await, 360.0);
    assert_ne!(harness.component.settings_fingerprint().await, before);
}

// ============================================================================
// Fault handling and disposal
// ============================================================================

#[tokio::test]
async fn faulted_control_disposes_component_on_render_pass() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;

    harness.probe.set_faulted();
    let result = harness.component.draw_horizontal(200.0).await;
    assert!(matches!(result, Err(VideoError::ControlFaulted)));
    assert_eq!(harness.component.lifecycle(), core_video::Lifecycle::Disposed);

    // Later render passes on the disposed component stay quiet.
    assert!(harness.component.draw_horizontal(200.0).await.is_ok());
}

#[tokio::test]
async fn dispose_racing_synchronize_leaves_drift_disarmed() {
    // Exercise several interleavings of the two tasks; whatever order
    // the lifecycle swap and the drift re-arm land in, the disposed
    // component must end up with no outstanding cycle.
    for _ in 0..16 {
        let harness = Harness::new(FakeTimer::at_secs(5), VideoSettings::default());
        harness.attach().await;

        tokio::join!(
            harness.component.synchronize(SyncOffset::ZERO),
            harness.component.dispose(),
        );

        assert_eq!(harness.component.lifecycle(), core_video::Lifecycle::Disposed);
        assert!(!harness.component.is_drift_armed());
    }
}

#[tokio::test]
async fn disposed_component_issues_no_further_commands() {
    let harness = Harness::new(FakeTimer::at_secs(0), VideoSettings::default());
    harness.attach().await;

    let bus = TimerEventBus::default();
    harness.component.attach_to(&bus).await;
    harness.component.dispose().await;
    harness.component.dispose().await;
    harness.probe.clear();

    harness.component.on_timer_start().await;
    harness.component.on_timer_pause().await;
    harness.component.synchronize(SyncOffset::ZERO).await;
    tick(&harness.component).await;
    harness.component.flush_commands().await.unwrap();

    assert_eq!(harness.probe.commands(), Vec::<Command>::new());
    assert_eq!(bus.subscriber_count(), 0);
}
