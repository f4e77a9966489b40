pub mod channels;
pub mod controller;
pub mod display;
pub mod notify;
pub mod position;
pub mod scale;
pub mod segment;
pub mod settings;
pub mod surface;
pub mod units;
pub mod window;

pub use channels::{ChannelSelector, InvertedRange};
pub use controller::{ControllerError, NavigationController, Outcome};
pub use display::{DisplayError, DisplayMode, DisplayOptions, DisplaySettings};
pub use notify::{ListenerId, Notifier};
pub use position::{PositionState, Rejection, Transition};
pub use scale::{InvalidScaleFactor, ScaleControl};
pub use segment::segment_entry;
pub use settings::ControllerSettings;
pub use surface::{Surface, SurfaceSink, SurfaceValues, SyncMediator, Targets};
pub use units::UnitSelection;
pub use window::WindowSize;

pub use tnav_transport::{
    Direction, Position, Recording, RecordingError, StepError, StepSize, WindowBounds,
};
