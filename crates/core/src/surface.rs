//! Input surfaces and the mediator that writes authoritative values back into them.
//!
//! Widget toolkits usually fire a surface's change handler when its value is
//! set programmatically. The mediator raises a guard for the duration of every
//! write-back so that the controller can recognise and drop those echoes.

use std::cell::{Cell, RefCell};

use tnav_transport::StepSize;

/// The interactive inputs a navigation controller keeps in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    PositionSlider,
    TimeText,
    WindowSize,
    SegmentSelector,
    StepSelector,
    StepButtons,
    /// Programmatic writes from the embedding application.
    Host,
}

impl Surface {
    /// Surfaces that display a value and are written back by the mediator.
    pub const DISPLAYED: &'static [Surface] = &[
        Surface::SegmentSelector,
        Surface::StepSelector,
        Surface::PositionSlider,
        Surface::TimeText,
        Surface::WindowSize,
    ];

    /// Whether a rejected candidate from this surface restores its displayed value.
    /// The time field is left as typed since the user may still be editing it.
    pub fn reverts_on_reject(&self) -> bool {
        matches!(
            self,
            Surface::PositionSlider | Surface::WindowSize | Surface::SegmentSelector
        )
    }
}

/// Write access to the host's widgets.
pub trait SurfaceSink {
    fn set_slider_max(&mut self, max_frame: i64);
    fn set_slider_value(&mut self, frame: i64);
    fn set_time_text(&mut self, text: &str);
    fn set_window_seconds(&mut self, seconds: f64);
    fn set_segment(&mut self, segment_index: usize);
    fn set_step_size(&mut self, _step: StepSize) {}
}

/// Display values derived from the authoritative state.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceValues {
    pub slider_value: i64,
    pub slider_max: i64,
    pub time_text: String,
    pub window_seconds: f64,
    pub segment_index: usize,
    pub step: StepSize,
}

impl SurfaceValues {
    fn write(&self, surface: Surface, sink: &mut dyn SurfaceSink) {
        match surface {
            Surface::PositionSlider => {
                sink.set_slider_max(self.slider_max);
                sink.set_slider_value(self.slider_value);
            }
            Surface::TimeText => sink.set_time_text(&self.time_text),
            Surface::WindowSize => sink.set_window_seconds(self.window_seconds),
            Surface::SegmentSelector => sink.set_segment(self.segment_index),
            Surface::StepSelector => sink.set_step_size(self.step),
            Surface::StepButtons | Surface::Host => {}
        }
    }
}

/// Which surfaces a write-back touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targets {
    All,
    AllExcept(Surface),
    Only(Surface),
}

impl Targets {
    fn includes(&self, surface: Surface) -> bool {
        match *self {
            Targets::All => true,
            Targets::AllExcept(origin) => surface != origin,
            Targets::Only(target) => surface == target,
        }
    }
}

/// Raises the echo guard and restores its previous state on drop, so the
/// guard is lowered on every exit path including unwinding.
struct PushGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> PushGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for PushGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

#[derive(Default)]
pub struct SyncMediator {
    pushing: Cell<bool>,
    sink: RefCell<Option<Box<dyn SurfaceSink>>>,
}

impl SyncMediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a write-back is in progress.
    pub fn is_pushing(&self) -> bool {
        self.pushing.get()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.try_borrow().map(|s| s.is_some()).unwrap_or(true)
    }

    /// Replace the attached widgets, returning the previous ones.
    pub fn attach(&self, sink: Box<dyn SurfaceSink>) -> Option<Box<dyn SurfaceSink>> {
        self.sink.borrow_mut().replace(sink)
    }

    pub fn detach(&self) -> Option<Box<dyn SurfaceSink>> {
        self.sink.borrow_mut().take()
    }

    pub fn push(&self, values: &SurfaceValues, targets: Targets) {
        let _guard = PushGuard::engage(&self.pushing);

        let Ok(mut sink) = self.sink.try_borrow_mut() else {
            log::warn!("surface write-back skipped: widgets are busy");
            return;
        };
        let Some(sink) = sink.as_mut() else {
            return;
        };

        for surface in Surface::DISPLAYED {
            if targets.includes(*surface) {
                values.write(*surface, sink.as_mut());
            }
        }
    }
}

impl std::fmt::Debug for SyncMediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncMediator")
            .field("pushing", &self.pushing.get())
            .field("has_sink", &self.has_sink())
            .finish()
    }
}
