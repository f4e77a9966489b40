//! Text form of the UI events the driver replays, one per line.
//!
//! ```text
//! slider 45000        # slider released at a frame
//! time 2.5            # time field edited
//! window 4            # window field edited (seconds)
//! segment 1           # segment selected
//! step 100 ms         # step size selected
//! left | right        # step buttons
//! goto 0 30000 0      # host sets start, end and segment
//! channels 0 16
//! scale up | down | reset
//! units 3 7 12
//! layer filtered
//! mode line | map
//! all-layers on | off
//! refresh
//! ```

use anyhow::{Context, Result, anyhow, bail};
use tnav_core::{DisplayMode, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Slider(i64),
    TimeText(String),
    Window(f64),
    Segment(usize),
    StepSize(String),
    Left,
    Right,
    Goto(Position),
    Channels(usize, usize),
    ScaleUp,
    ScaleDown,
    ScaleReset,
    Units(Vec<String>),
    Layer(String),
    Mode(DisplayMode),
    AllLayers(bool),
    Refresh,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Event>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let event = match command {
        "slider" => Event::Slider(single(&args, command)?.parse().context("slider frame")?),
        // The raw text goes to the controller, which decides whether it is a time.
        "time" => Event::TimeText(rest.to_string()),
        "window" => Event::Window(single(&args, command)?.parse().context("window seconds")?),
        "segment" => Event::Segment(single(&args, command)?.parse().context("segment index")?),
        "step" => {
            if rest.is_empty() {
                bail!("step needs a size such as \"1 s\"");
            }
            Event::StepSize(rest.to_string())
        }
        "left" => Event::Left,
        "right" => Event::Right,
        "goto" => match args.as_slice() {
            [start, end, segment] => Event::Goto(Position::new(
                start.parse().context("goto start frame")?,
                end.parse().context("goto end frame")?,
                segment.parse().context("goto segment")?,
            )),
            _ => bail!("goto needs <start> <end> <segment>"),
        },
        "channels" => match args.as_slice() {
            [lo, hi] => Event::Channels(
                lo.parse().context("first channel")?,
                hi.parse().context("channel end")?,
            ),
            _ => bail!("channels needs <lo> <hi>"),
        },
        "scale" => match single(&args, command)? {
            "up" => Event::ScaleUp,
            "down" => Event::ScaleDown,
            "reset" => Event::ScaleReset,
            other => bail!("unknown scale action '{other}'"),
        },
        "units" => Event::Units(args.iter().map(|s| s.to_string()).collect()),
        "layer" => Event::Layer(single(&args, command)?.to_string()),
        "mode" => Event::Mode(single(&args, command)?.parse()?),
        "all-layers" => Event::AllLayers(match single(&args, command)? {
            "on" => true,
            "off" => false,
            other => bail!("all-layers takes on/off, got '{other}'"),
        }),
        "refresh" => Event::Refresh,
        other => return Err(anyhow!("unknown command '{other}'")),
    };

    Ok(Some(event))
}

fn single<'a>(args: &[&'a str], command: &str) -> Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        _ => bail!("{command} takes exactly one argument"),
    }
}
