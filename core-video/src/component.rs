//! # Video Component
//!
//! Keeps an embedded native video control in lockstep with the host's
//! run timer. Timer events command playback transitions, update ticks
//! apply pending media and enforce muting, and a drift correction timer
//! periodically re-aligns the playback position.
//!
//! ## Concurrency
//!
//! Every playback command runs on a single owner loop (see
//! [`core_runtime::OwnerDispatcher`]) and takes the control mutex, so
//! commands reach the native control strictly one at a time and in the
//! order they were enqueued.
//!
//! ## Failure
//!
//! A control that reports itself faulted is handled on the next render
//! pass: the component disposes itself first, then returns
//! [`VideoError::ControlFaulted`] so the host can drop the component.

use std::sync::{Arc, Weak};

use core_runtime::{OwnerDispatcher, TimerEventBus, TimerSubscription};
use host_traits::{
    FaultedControl, LayoutMode, MediaLocator, PlaybackControl, SettingsStore, TimerEvent,
    TimerPhase, TimerSource, UserNotifier, VideoSurface,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::drift::DriftTimer;
use crate::error::{Result, VideoError};
use crate::lifecycle::{Lifecycle, LifecycleCell};
use crate::settings::{SyncOffset, VideoSettings};

/// Component name shown by the host.
pub const COMPONENT_NAME: &str = "Video";

/// Smallest width the host may shrink the component to.
pub const MINIMUM_WIDTH: f32 = 10.0;
/// Smallest height the host may shrink the component to.
pub const MINIMUM_HEIGHT: f32 = 10.0;

pub struct VideoComponent {
    self_weak: Weak<VideoComponent>,
    control: Arc<Mutex<Box<dyn PlaybackControl>>>,
    timer: Arc<dyn TimerSource>,
    surface: Arc<dyn VideoSurface>,
    store: Arc<dyn SettingsStore>,
    dispatcher: OwnerDispatcher,
    drift: DriftTimer,
    lifecycle: LifecycleCell,
    settings: RwLock<VideoSettings>,
    /// Locator last handed to the control. Loads are only issued when
    /// the configured locator differs from this.
    applied_locator: Mutex<MediaLocator>,
    subscription: Mutex<Option<TimerSubscription>>,
}

impl VideoComponent {
    /// Builds the component around a freshly created native control.
    ///
    /// A construction failure is survivable: the user is notified once,
    /// a permanently faulted placeholder stands in for the control, and
    /// the next render pass disposes the component. Must be called from
    /// within a tokio runtime; the owner loop is spawned here.
    pub fn new(
        control: host_traits::Result<Box<dyn PlaybackControl>>,
        timer: Arc<dyn TimerSource>,
        surface: Arc<dyn VideoSurface>,
        store: Arc<dyn SettingsStore>,
        notifier: &dyn UserNotifier,
    ) -> Arc<Self> {
        let control: Box<dyn PlaybackControl> = match control {
            Ok(control) => control,
            Err(err) => {
                warn!(error = %err, "native video control could not be created");
                notifier.notify_error(
                    "Video Component Could Not Be Loaded",
                    "Something went wrong loading the video component.",
                );
                Box::new(FaultedControl)
            }
        };

        let (dispatcher, _owner_task) = OwnerDispatcher::spawn();

        Arc::new_cyclic(|weak| VideoComponent {
            self_weak: weak.clone(),
            control: Arc::new(Mutex::new(control)),
            timer,
            surface,
            store,
            dispatcher,
            drift: DriftTimer::new(),
            lifecycle: LifecycleCell::new(),
            settings: RwLock::new(VideoSettings::default()),
            applied_locator: Mutex::new(MediaLocator::new()),
            subscription: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &'static str {
        COMPONENT_NAME
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    // ========================================================================
    // Timer events
    // ========================================================================

    /// Subscribes to the host's timer event bus. The previous
    /// subscription, if any, is revoked first.
    pub async fn attach_to(&self, bus: &TimerEventBus) {
        let weak = self.self_weak.clone();
        let subscription = bus.attach(move |event| {
            let weak = weak.clone();
            async move {
                if let Some(component) = weak.upgrade() {
                    component.handle_timer_event(event).await;
                }
            }
        });

        let previous = self.subscription.lock().await.replace(subscription);
        if let Some(old) = previous {
            old.revoke().await;
        }
    }

    async fn handle_timer_event(&self, event: TimerEvent) {
        debug!(event = event.description(), "timer event");
        match event {
            TimerEvent::Started => self.on_timer_start().await,
            TimerEvent::Paused => self.on_timer_pause().await,
            TimerEvent::Resumed => self.on_timer_resume().await,
            TimerEvent::Reset { phase } => self.on_timer_reset(phase).await,
        }
    }

    /// Starts playback, reveals the surface and aligns the position
    /// with the freshly started run timer.
    pub async fn on_timer_start(&self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        let reveal = self.lifecycle.is_attached();
        let surface = Arc::clone(&self.surface);
        self.enqueue_command("play", move |control| {
            control.play()?;
            if reveal {
                surface.set_visible(true);
            }
            Ok(())
        });
        self.synchronize(SyncOffset::ZERO).await;
    }

    pub async fn on_timer_pause(&self) {
        self.enqueue_command("pause", |control| control.pause());
    }

    pub async fn on_timer_resume(&self) {
        self.enqueue_command("play", |control| control.play());
    }

    /// Stops playback and hides the surface. The phase the run was in
    /// is context only; the reset behaves the same for every phase.
    ///
    /// The drift timer is disarmed too: after a reset there is no
    /// running timer to align with, so a stopped player must not keep
    /// being repositioned. The next `on_timer_start` re-arms it through
    /// `synchronize`.
    pub async fn on_timer_reset(&self, phase: TimerPhase) {
        if self.lifecycle.is_disposed() {
            return;
        }
        debug!(?phase, "run reset");
        let hide = self.lifecycle.is_attached();
        let surface = Arc::clone(&self.surface);
        self.enqueue_command("stop", move |control| {
            control.stop()?;
            if hide {
                surface.set_visible(false);
            }
            Ok(())
        });
        self.drift.disarm();
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Aligns the playback position with the run timer.
    ///
    /// The commanded position is the timer's current time plus `extra`
    /// plus the configured offset. The drift cycle is cancelled before
    /// the position is computed and re-armed afterwards, so a pending
    /// drift firing never races a manual synchronization.
    pub async fn synchronize(&self, extra: SyncOffset) {
        if self.lifecycle.is_disposed() {
            return;
        }

        self.drift.disarm();

        let settings = self.settings.read().await.clone();
        let elapsed = self.timer.current_time();
        let target =
            elapsed.as_secs_f64() + extra.as_secs_f64() + settings.offset.as_secs_f64();

        debug!(target_secs = target, "synchronizing playback position");
        self.enqueue_command("set_position", move |control| {
            control.set_position_secs(target)
        });

        if !self.lifecycle.is_disposed() {
            let weak = self.self_weak.clone();
            self.drift.arm(settings.drift_interval(), move || {
                if let Some(component) = weak.upgrade() {
                    tokio::spawn(Self::drift_resync(component));
                }
            });
            // A concurrent dispose may have disarmed between the check
            // and the arm. Disposed is terminal, so one re-check keeps
            // the timer from outliving the component.
            if self.lifecycle.is_disposed() {
                self.drift.disarm();
            }
        }
    }

    /// Boxed entry point for the drift timer's recursive call back into
    /// [`Self::synchronize`]. The explicit boxed return type breaks the
    /// `Send` auto-trait inference cycle the recursion would otherwise
    /// create.
    fn drift_resync(
        component: Arc<Self>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        Box::pin(async move {
            component.synchronize(SyncOffset::ZERO).await;
        })
    }

    /// Whether a drift correction cycle is currently outstanding.
    pub fn is_drift_armed(&self) -> bool {
        self.drift.is_armed()
    }

    // ========================================================================
    // Update tick
    // ========================================================================

    /// Host update tick. Re-reads settings, completes one-time
    /// attachment once the native surface exists, applies a changed
    /// media locator and re-asserts muting. The native control renders
    /// itself, so the passed bounds and layout mode are not consumed
    /// here.
    pub async fn update(&self, _width: f32, _height: f32, _mode: LayoutMode) {
        if self.lifecycle.is_disposed() {
            return;
        }
        if self.control.lock().await.is_disposed() {
            return;
        }

        match VideoSettings::load(self.store.as_ref()).await {
            Ok(settings) => *self.settings.write().await = settings,
            Err(err) => warn!(error = %err, "settings could not be read; keeping previous"),
        }

        if self.lifecycle.get() == Lifecycle::Uninitialized {
            let created = self.surface.is_created();
            // The surface stays visible until the native handle exists,
            // then rendering is handed to the control.
            self.surface.set_visible(!created);
            if created && self.lifecycle.attach() {
                info!("video surface created; component attached");
            }
        } else {
            self.apply_pending_media().await;
        }
    }

    /// Loads the configured media if it changed since the last tick and
    /// re-asserts muting. Loads are skipped for an empty locator; the
    /// mute command runs every tick because the native control can
    /// unmute itself on media changes.
    async fn apply_pending_media(&self) {
        let desired = self.settings.read().await.mrl.clone();

        {
            let mut applied = self.applied_locator.lock().await;
            if desired != *applied && !desired.is_empty() {
                let locator = desired.clone();
                info!(%locator, "loading media");
                self.enqueue_command("load", move |control| control.load(&locator));
            }
            *applied = desired;
        }

        self.enqueue_command("set_muted", |control| control.set_muted(true));
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render pass for a vertical layout. The native control paints
    /// itself; this only runs the fault guard.
    pub async fn draw_vertical(&self, _width: f32) -> Result<()> {
        self.guard_render_pass().await
    }

    /// Render pass for a horizontal layout.
    pub async fn draw_horizontal(&self, _height: f32) -> Result<()> {
        self.guard_render_pass().await
    }

    /// Disposes the component and reports the fault if the control
    /// faulted without being disposed. Disposal completes before the
    /// error is returned, so the host observes a fully released
    /// component.
    async fn guard_render_pass(&self) -> Result<()> {
        if self.lifecycle.is_disposed() {
            return Ok(());
        }
        let (faulted, disposed) = {
            let control = self.control.lock().await;
            (control.is_faulted(), control.is_disposed())
        };

        if faulted && !disposed {
            warn!("native control faulted; disposing video component");
            self.dispose().await;
            return Err(VideoError::ControlFaulted);
        }
        Ok(())
    }

    pub async fn horizontal_width(&self) -> f32 {
        self.settings.read().await.width
    }

    pub async fn vertical_height(&self) -> f32 {
        self.settings.read().await.height
    }

    pub fn minimum_width(&self) -> f32 {
        MINIMUM_WIDTH
    }

    pub fn minimum_height(&self) -> f32 {
        MINIMUM_HEIGHT
    }

    /// Layout-dependent extent the host should reserve.
    pub async fn extent(&self, mode: LayoutMode) -> f32 {
        match mode {
            LayoutMode::Vertical => self.settings.read().await.height,
            LayoutMode::Horizontal => self.settings.read().await.width,
        }
    }

    pub async fn settings_fingerprint(&self) -> u64 {
        self.settings.read().await.fingerprint()
    }

    // ========================================================================
    // Disposal
    // ========================================================================

    /// Releases the component. Idempotent: the drift cycle is
    /// cancelled, the timer subscription revoked and the lifecycle
    /// moved to its terminal state exactly once.
    pub async fn dispose(&self) {
        if !self.lifecycle.dispose() {
            return;
        }
        info!("disposing video component");

        self.drift.disarm();
        let subscription = self.subscription.lock().await.take();
        if let Some(subscription) = subscription {
            subscription.revoke().await;
        }
    }

    // ========================================================================
    // Command marshaling
    // ========================================================================

    /// Hands a playback command to the owner loop. Commands are dropped
    /// once the component is disposed; commands already in the queue
    /// are allowed to drain.
    fn enqueue_command<F>(&self, op: &'static str, command: F)
    where
        F: FnOnce(&mut dyn PlaybackControl) -> host_traits::Result<()> + Send + 'static,
    {
        if self.lifecycle.is_disposed() {
            debug!(op, "command skipped; component disposed");
            return;
        }

        let control = Arc::clone(&self.control);
        let queued = self.dispatcher.invoke(async move {
            let mut guard = control.lock().await;
            if guard.is_disposed() {
                debug!(op, "command skipped; control disposed");
                return;
            }
            if let Err(err) = command(guard.as_mut()) {
                warn!(op, error = %err, "playback command failed");
            }
        });
        if !queued {
            debug!(op, "owner loop gone; command dropped");
        }
    }

    /// Waits until every previously enqueued playback command has run.
    /// Fails only when the owner loop is gone.
    pub async fn flush_commands(&self) -> Result<()> {
        self.dispatcher.invoke_wait(async {}).await?;
        Ok(())
    }
}

impl std::fmt::Debug for VideoComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoComponent")
            .field("lifecycle", &self.lifecycle.get())
            .finish_non_exhaustive()
    }
}
