//! Wires the navigation controllers to a headless widget set and collects
//! everything they publish as printable lines.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tnav_core::{
    ChannelSelector, ControllerSettings, DisplayMode, DisplayOptions, NavigationController,
    Outcome, ScaleControl, StepSize, SurfaceSink, UnitSelection,
};
use tnav_project::LoadedRecording;

use crate::events::Event;

type Output = Rc<RefCell<Vec<String>>>;

/// Stand-in for real widgets; write-backs only show up in the debug log.
struct HeadlessSurfaces;

impl SurfaceSink for HeadlessSurfaces {
    fn set_slider_max(&mut self, max_frame: i64) {
        log::trace!("slider max <- {max_frame}");
    }

    fn set_slider_value(&mut self, frame: i64) {
        log::debug!("slider <- {frame}");
    }

    fn set_time_text(&mut self, text: &str) {
        log::debug!("time field <- {text}");
    }

    fn set_window_seconds(&mut self, seconds: f64) {
        log::debug!("window field <- {seconds}");
    }

    fn set_segment(&mut self, segment_index: usize) {
        log::debug!("segment selector <- {segment_index}");
    }

    fn set_step_size(&mut self, step: StepSize) {
        log::debug!("step selector <- {step}");
    }
}

pub struct Session {
    pub navigation: NavigationController,
    pub channels: Option<ChannelSelector>,
    pub scale: ScaleControl,
    pub units: UnitSelection,
    pub display: Option<DisplayOptions>,
    output: Output,
}

impl Session {
    pub fn new(loaded: &LoadedRecording, settings: ControllerSettings) -> Result<Self> {
        let output: Output = Rc::new(RefCell::new(Vec::new()));

        let navigation = NavigationController::new(
            loaded.recording.clone(),
            loaded.file.initial_time_range,
            settings,
        )
        .with_context(|| format!("cannot navigate '{}'", loaded.file.name))?;
        navigation.attach_surfaces(Box::new(HeadlessSurfaces));
        {
            let out = output.clone();
            navigation.subscribe(move |p| {
                out.borrow_mut().push(format!(
                    "viewport {} {} {}",
                    p.start_frame, p.end_frame, p.segment_index
                ))
            });
        }

        let channels = loaded.file.num_channels.map(ChannelSelector::new);
        if let Some(channels) = &channels {
            let out = output.clone();
            channels.subscribe(move |r| {
                out.borrow_mut()
                    .push(format!("channels {} {}", r.start, r.end))
            });
        }

        let scale = ScaleControl::new(settings.scale_factor)?;
        {
            let out = output.clone();
            scale.subscribe(move |g| out.borrow_mut().push(format!("scale {g}")));
        }

        let units = UnitSelection::new(loaded.file.unit_ids.clone());
        {
            let out = output.clone();
            units.subscribe(move |ids| out.borrow_mut().push(format!("units {}", ids.join(" "))));
        }

        let layer_keys = loaded.file.layer_keys.clone();
        let display = match DisplayOptions::new(layer_keys, DisplayMode::Line, false) {
            Ok(display) => {
                let out = output.clone();
                display.subscribe(move |d| {
                    out.borrow_mut().push(format!(
                        "display {} {:?} all_layers={}",
                        d.layer_key, d.mode, d.all_layers
                    ))
                });
                Some(display)
            }
            Err(_) => None,
        };

        Ok(Self {
            navigation,
            channels,
            scale,
            units,
            display,
            output,
        })
    }

    pub fn apply(&mut self, event: Event) -> Result<()> {
        let nav = &self.navigation;
        let outcome = match event {
            Event::Slider(frame) => nav.on_slider_released(frame),
            Event::TimeText(text) => nav.on_time_text(&text),
            Event::Window(seconds) => nav.on_window_changed(seconds),
            Event::Segment(index) => nav.on_segment_selected(index),
            Event::StepSize(token) => {
                let step = nav.on_step_size_selected(&token)?;
                log::info!("step size is now {step}");
                return Ok(());
            }
            Event::Left => nav.move_left(),
            Event::Right => nav.move_right(),
            Event::Goto(position) => nav.set_position(position),
            Event::Refresh => {
                nav.refresh();
                return Ok(());
            }
            Event::Channels(lo, hi) => {
                let channels = self.channels.as_mut().context("recording has no channel count")?;
                channels.set_range(lo, hi)?;
                return Ok(());
            }
            Event::ScaleUp => {
                self.scale.increase();
                return Ok(());
            }
            Event::ScaleDown => {
                self.scale.decrease();
                return Ok(());
            }
            Event::ScaleReset => {
                self.scale.reset();
                return Ok(());
            }
            Event::Units(ids) => {
                self.units.select(ids);
                return Ok(());
            }
            Event::Layer(key) => {
                self.display_mut()?.set_layer(&key)?;
                return Ok(());
            }
            Event::Mode(mode) => {
                self.display_mut()?.set_mode(mode);
                return Ok(());
            }
            Event::AllLayers(on) => {
                self.display_mut()?.set_all_layers(on);
                return Ok(());
            }
        };

        match outcome {
            Outcome::Rejected(reason) => log::info!("position unchanged: {reason}"),
            Outcome::Ignored => log::info!("event ignored"),
            Outcome::Accepted(_) | Outcome::Suppressed => {}
        }
        Ok(())
    }

    /// Lines published since the last call.
    pub fn drain_output(&self) -> Vec<String> {
        std::mem::take(&mut *self.output.borrow_mut())
    }

    fn display_mut(&mut self) -> Result<&mut DisplayOptions> {
        self.display.as_mut().context("recording has no layers")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::parse_line;
    use tnav_project::RecordingFile;

    fn session() -> Session {
        let mut file = RecordingFile::new("test", 30000.0, vec![10.0, 2.0]);
        file.num_channels = Some(8);
        file.unit_ids = vec!["1".into(), "2".into(), "3".into()];
        file.layer_keys = vec!["raw".into(), "filtered".into()];
        let loaded = LoadedRecording {
            recording: file.recording().unwrap(),
            file,
        };
        Session::new(&loaded, ControllerSettings::default()).unwrap()
    }

    fn run(session: &mut Session, script: &str) -> Vec<String> {
        for line in script.lines() {
            if let Some(event) = parse_line(line).unwrap() {
                let _ = session.apply(event);
            }
        }
        session.drain_output()
    }

    #[test]
    fn test_step_right_publishes_viewport() {
        let mut session = session();
        assert_eq!(run(&mut session, "right"), vec!["viewport 30000 60000 0"]);
    }

    #[test]
    fn test_rejected_events_publish_nothing() {
        let mut session = session();
        assert!(run(&mut session, "left\nsegment 5\ntime abc").is_empty());
    }

    #[test]
    fn test_script_replay() {
        let mut session = session();
        let script = "
            window 40        # clamped to 30 s
            segment 1
            step 100 ms
            right
            goto 0 15000 0
        ";

        assert_eq!(
            run(&mut session, script),
            vec![
                "viewport 0 300000 0",
                "viewport 0 60000 1",
                "viewport 3000 60000 1",
                "viewport 0 15000 0",
            ]
        );
        assert_eq!(session.navigation.window_seconds(), 0.5);
    }

    #[test]
    fn test_auxiliary_controls() {
        let mut session = session();
        let output = run(
            &mut session,
            "channels 2 4\nscale up\nunits 3 1\nlayer filtered\nmode map",
        );

        assert_eq!(
            output,
            vec![
                "channels 2 4",
                "scale 1.2",
                "units 1 3",
                "display filtered Line all_layers=false",
                "display filtered Map all_layers=false",
            ]
        );
    }

    #[test]
    fn test_errors_are_reported() {
        let mut session = session();
        let unknown_step = parse_line("step 6 h").unwrap().unwrap();
        let bad_layer = parse_line("layer spikes").unwrap().unwrap();
        let inverted = parse_line("channels 5 1").unwrap().unwrap();

        assert!(session.apply(unknown_step).is_err());
        assert!(session.apply(bad_layer).is_err());
        assert!(session.apply(inverted).is_err());
        assert!(session.drain_output().is_empty());
    }
}
