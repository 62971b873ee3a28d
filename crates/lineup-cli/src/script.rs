use crate::trace_host::TraceHost;
use anyhow::{bail, Context};
use lineup_core::{Session, SessionConfig};
use std::path::Path;

/// Replay a practice-session script against the tracing host.
///
/// One directive per line, `#` starts a comment:
///
/// ```text
/// round                       # round-started event
/// pos 10 20 30 0 90 0         # set pawn location and look angles
/// moving on|off               # set horizontal-movement flag
/// crouched on|off             # set crouch flag
/// throw <classifier>          # grenade-thrown event
/// fire                        # weapon-fired event
/// say <chat line>             # chat-message event
/// tick [n]                    # run n update cycles (default 1)
/// ```
pub fn run(script: &Path, config: Option<&Path>, map: &str, json: bool) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => SessionConfig::default(),
    };

    let text = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script '{}'", script.display()))?;

    let host = TraceHost::new(map.to_string(), json);
    let mut session = Session::new(host, config);

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        apply(&mut session, line).with_context(|| format!("script line {}: '{raw}'", idx + 1))?;
    }

    Ok(())
}

fn apply(session: &mut Session<TraceHost>, line: &str) -> anyhow::Result<()> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "say" => session.chat_line(rest),
        "throw" => {
            let classifier = if rest.is_empty() {
                "smokegrenade_projectile"
            } else {
                rest
            };
            session.grenade_thrown(classifier);
        }
        "fire" => session.weapon_fired(),
        "round" => session.round_started(),
        "tick" => {
            let count: u32 = if rest.is_empty() {
                1
            } else {
                rest.parse().context("tick count must be an integer")?
            };
            for _ in 0..count {
                session.tick();
            }
        }
        "pos" => {
            let values: Vec<f32> = rest
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .context("pos expects numeric fields")?;
            let [x, y, z, pitch, yaw, roll] = match values.len() {
                5 => [values[0], values[1], values[2], values[3], values[4], 0.0],
                6 => [values[0], values[1], values[2], values[3], values[4], values[5]],
                n => bail!("pos expects 5 or 6 numbers (x y z pitch yaw [roll]), got {n}"),
            };
            let host = session.host_mut();
            host.location = lineup_core::types::Vec3::new(x, y, z);
            host.angles = lineup_core::types::EulerAngles::new(pitch, yaw, roll);
        }
        "moving" => session.host_mut().moving = parse_flag(rest)?,
        "crouched" => session.host_mut().crouched = parse_flag(rest)?,
        other => bail!("unknown directive '{other}'"),
    }

    Ok(())
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value {
        "on" => Ok(true),
        "off" => Ok(false),
        other => bail!("expected 'on' or 'off', got '{other}'"),
    }
}
