//! The time navigation controller.
//!
//! Every surface handler builds a candidate and funnels it through
//! [`PositionState::propose`]. Accepted positions are written back into the
//! other surfaces and published to viewport listeners; rejected ones leave the
//! state untouched.

use std::cell::RefCell;

use tnav_transport::{
    Direction, Position, Recording, RecordingError, StepError, StepSize, format_time,
    time_to_frame,
};

use crate::notify::{ListenerId, Notifier};
use crate::position::{PositionState, Rejection, Transition};
use crate::segment::segment_entry;
use crate::settings::ControllerSettings;
use crate::surface::{Surface, SurfaceSink, SurfaceValues, SyncMediator, Targets};
use crate::window::WindowSize;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid recording: {0}")]
    Recording(#[from] RecordingError),

    #[error("initial time range ({start}, {end}) is not finite")]
    NonFiniteTimeRange { start: f64, end: f64 },

    #[error("initial time range is outside segment 0: {0}")]
    InitialRange(Rejection),
}

/// What a surface event did to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Position),
    Rejected(Rejection),
    /// The event carried no usable value.
    Ignored,
    /// The event was an echo of a write-back and was dropped.
    Suppressed,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

#[derive(Debug)]
struct NavState {
    position: PositionState,
    window: WindowSize,
    step: StepSize,
}

/// Keeps the slider, time field, window field, segment selector and step
/// controls consistent with one viewport.
///
/// Handlers take `&self` so that widgets firing change events while being
/// written to can call straight back into the controller; such calls are
/// recognised as echoes and return [`Outcome::Suppressed`].
#[derive(Debug)]
pub struct NavigationController {
    settings: ControllerSettings,
    state: RefCell<NavState>,
    mediator: SyncMediator,
    viewport: Notifier<Position>,
}

impl NavigationController {
    pub fn new(
        recording: Recording,
        initial_time_range: (f64, f64),
        settings: ControllerSettings,
    ) -> Result<Self, ControllerError> {
        let (start, end) = initial_time_range;
        if !start.is_finite() || !end.is_finite() {
            return Err(ControllerError::NonFiniteTimeRange { start, end });
        }

        let fs = recording.sampling_frequency();
        let start_frame = time_to_frame(start, fs);
        let end_frame = time_to_frame(end, fs);
        let window =
            WindowSize::from_frames(end_frame - start_frame, fs, &settings.window_bounds)
                .ok_or(ControllerError::NonFiniteTimeRange { start, end })?;

        let initial = Position::new(start_frame, start_frame + window.frames(fs), 0);
        let position =
            PositionState::new(recording, initial).map_err(ControllerError::InitialRange)?;

        log::debug!("navigation starts at {}", position.current());

        Ok(Self {
            state: RefCell::new(NavState {
                position,
                window,
                step: settings.step,
            }),
            settings,
            mediator: SyncMediator::new(),
            viewport: Notifier::new(),
        })
    }

    pub fn from_durations(
        segment_durations: &[f64],
        sampling_frequency: f64,
        initial_time_range: (f64, f64),
        settings: ControllerSettings,
    ) -> Result<Self, ControllerError> {
        let recording = Recording::from_durations(segment_durations, sampling_frequency)?;
        Self::new(recording, initial_time_range, settings)
    }

    pub fn position(&self) -> Position {
        self.state.borrow().position.current()
    }

    pub fn window_seconds(&self) -> f64 {
        self.state.borrow().window.seconds()
    }

    pub fn step_size(&self) -> StepSize {
        self.state.borrow().step
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.state.borrow().position.recording().sampling_frequency()
    }

    pub fn num_segments(&self) -> usize {
        self.state.borrow().position.recording().num_segments()
    }

    pub fn segment_length(&self, segment_index: usize) -> Option<i64> {
        self.state.borrow().position.recording().segment_length(segment_index)
    }

    pub fn surface_values(&self) -> SurfaceValues {
        let state = self.state.borrow();
        let position = state.position.current();
        let recording = state.position.recording();

        SurfaceValues {
            slider_value: position.start_frame,
            slider_max: recording
                .segment_length(position.segment_index)
                .unwrap_or_default(),
            time_text: format_time(recording.frame_to_time(position.start_frame)),
            window_seconds: state.window.seconds(),
            segment_index: position.segment_index,
            step: state.step,
        }
    }

    /// Attach the host's widgets and bring all of them up to date.
    pub fn attach_surfaces(&self, sink: Box<dyn SurfaceSink>) {
        self.mediator.attach(sink);
        self.mediator.push(&self.surface_values(), Targets::All);
    }

    pub fn detach_surfaces(&self) -> Option<Box<dyn SurfaceSink>> {
        self.mediator.detach()
    }

    pub fn subscribe(&self, listener: impl Fn(&Position) + 'static) -> ListenerId {
        self.viewport.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.viewport.unsubscribe(id)
    }

    /// Rewrite every surface and republish the current viewport.
    pub fn refresh(&self) {
        self.mediator.push(&self.surface_values(), Targets::All);
        self.viewport.publish(&self.position());
    }

    /// The slider was released at `frame`.
    pub fn on_slider_released(&self, frame: i64) -> Outcome {
        if self.is_echo(Surface::PositionSlider) {
            return Outcome::Suppressed;
        }
        let (candidate, window) = self.candidate_at(frame);
        self.commit(Surface::PositionSlider, candidate, window)
    }

    /// The time field now reads `text`. Anything that is not a finite number of
    /// seconds is ignored and the field is left as typed.
    pub fn on_time_text(&self, text: &str) -> Outcome {
        if self.is_echo(Surface::TimeText) {
            return Outcome::Suppressed;
        }
        let Some(seconds) = text.trim().parse::<f64>().ok().filter(|s| s.is_finite()) else {
            log::debug!("ignoring time text {text:?}");
            return Outcome::Ignored;
        };

        let frame = time_to_frame(seconds, self.sampling_frequency());
        let (candidate, window) = self.candidate_at(frame);
        self.commit(Surface::TimeText, candidate, window)
    }

    /// The window field now reads `seconds`. Values outside the bounds are
    /// clamped and the clamped value is written back into the field.
    pub fn on_window_changed(&self, seconds: f64) -> Outcome {
        if self.is_echo(Surface::WindowSize) {
            return Outcome::Suppressed;
        }
        let Some(window) = WindowSize::new(seconds, &self.settings.window_bounds) else {
            log::debug!("ignoring window size {seconds}");
            self.mediator
                .push(&self.surface_values(), Targets::Only(Surface::WindowSize));
            return Outcome::Ignored;
        };

        let current = self.position();
        let candidate = Position::new(
            current.start_frame,
            current.start_frame + window.frames(self.sampling_frequency()),
            current.segment_index,
        );
        let outcome = self.commit(Surface::WindowSize, candidate, window);

        if outcome.is_accepted() && window.seconds() != seconds {
            log::debug!("window size {seconds} clamped to {}", window.seconds());
            self.mediator
                .push(&self.surface_values(), Targets::Only(Surface::WindowSize));
        }
        outcome
    }

    /// The segment selector now reads `segment_index`.
    pub fn on_segment_selected(&self, segment_index: usize) -> Outcome {
        if self.is_echo(Surface::SegmentSelector) {
            return Outcome::Suppressed;
        }
        let window = self.state.borrow().window;
        let candidate = segment_entry(segment_index, window, self.sampling_frequency());
        self.commit(Surface::SegmentSelector, candidate, window)
    }

    /// The step selector now reads `token`.
    pub fn on_step_size_selected(&self, token: &str) -> Result<StepSize, StepError> {
        if self.is_echo(Surface::StepSelector) {
            return Ok(self.step_size());
        }
        let step = token.parse::<StepSize>()?;
        self.state.borrow_mut().step = step;
        Ok(step)
    }

    /// Change the step size from the host, updating the step selector.
    pub fn set_step_size(&self, step: StepSize) {
        self.state.borrow_mut().step = step;
        self.mediator
            .push(&self.surface_values(), Targets::Only(Surface::StepSelector));
    }

    /// Move the viewport by one step, keeping the window size.
    pub fn step(&self, direction: Direction) -> Outcome {
        if self.is_echo(Surface::StepButtons) {
            return Outcome::Suppressed;
        }
        let (start, delta) = {
            let state = self.state.borrow();
            let fs = state.position.recording().sampling_frequency();
            (state.position.current().start_frame, state.step.frame_delta(direction, fs))
        };
        let (candidate, window) = self.candidate_at(start.saturating_add(delta));
        self.commit(Surface::StepButtons, candidate, window)
    }

    pub fn move_left(&self) -> Outcome {
        self.step(Direction::Backward)
    }

    pub fn move_right(&self) -> Outcome {
        self.step(Direction::Forward)
    }

    /// Set the viewport directly. The window size follows the candidate's
    /// span, clamped to its bounds; the end is recomputed if clamping changed it.
    pub fn set_position(&self, candidate: Position) -> Outcome {
        if self.is_echo(Surface::Host) {
            return Outcome::Suppressed;
        }

        let (current, current_window, valid) = {
            let state = self.state.borrow();
            (
                state.position.current(),
                state.window,
                state.position.validate(candidate).is_ok(),
            )
        };
        // Invalid candidates and re-submissions keep the window as it is.
        if !valid || candidate == current {
            return self.commit(Surface::Host, candidate, current_window);
        }

        let fs = self.sampling_frequency();
        let bounds = &self.settings.window_bounds;
        let Some(window) = WindowSize::from_frames(candidate.len(), fs, bounds) else {
            return Outcome::Ignored;
        };
        let candidate = Position {
            end_frame: candidate.start_frame + window.frames(fs),
            ..candidate
        };
        self.commit(Surface::Host, candidate, window)
    }

    fn is_echo(&self, surface: Surface) -> bool {
        let echo = self.mediator.is_pushing();
        if echo {
            log::trace!("suppressed echo from {surface:?}");
        }
        echo
    }

    /// Candidate starting at `start_frame` in the current segment with the current window.
    fn candidate_at(&self, start_frame: i64) -> (Position, WindowSize) {
        let state = self.state.borrow();
        let fs = state.position.recording().sampling_frequency();
        let current = state.position.current();
        let candidate = Position::new(
            start_frame,
            start_frame.saturating_add(state.window.frames(fs)),
            current.segment_index,
        );
        (candidate, state.window)
    }

    fn commit(&self, origin: Surface, candidate: Position, window: WindowSize) -> Outcome {
        let transition = {
            let mut state = self.state.borrow_mut();
            let transition = state.position.propose(candidate);
            if transition.is_accepted() {
                state.window = window;
            }
            transition
        };

        match transition {
            Transition::Accepted(position) => {
                log::debug!("{origin:?} moved viewport to {position}");
                self.mediator
                    .push(&self.surface_values(), Targets::AllExcept(origin));
                self.viewport.publish(&position);
                Outcome::Accepted(position)
            }
            Transition::Rejected(rejection) => {
                log::debug!("{origin:?} candidate {candidate} rejected: {rejection}");
                if origin.reverts_on_reject() {
                    self.mediator
                        .push(&self.surface_values(), Targets::Only(origin));
                }
                Outcome::Rejected(rejection)
            }
        }
    }
}
