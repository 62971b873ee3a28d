use crate::command::{self, Command};
use crate::error::{ErrorKind, LineupError, Result};
use crate::help;
use crate::host::Host;
use crate::session::{Runtime, Sched};
use crate::types::SoundCue;

// ---------------------------------------------------------------------------
// Dispatch boundary
// ---------------------------------------------------------------------------

/// Parse and run one chat command. Every failure is rendered here; nothing
/// escapes to the caller, so a broken command can never stop the tick loop.
pub fn dispatch<H: Host + 'static>(rt: &mut Runtime<H>, sched: &mut Sched<H>, line: &str) {
    let cmd = command::parse_line(line, rt.config.command_prefix);
    tracing::debug!(command = %cmd.name, args = cmd.args.len(), "dispatching chat command");

    if let Err(err) = run_command(rt, sched, &cmd, line) {
        render_error(rt, &cmd.name, err);
    }
}

fn first_arg(cmd: &Command) -> &str {
    cmd.args.first().map(String::as_str).unwrap_or("")
}

fn run_command<H: Host + 'static>(
    rt: &mut Runtime<H>,
    sched: &mut Sched<H>,
    cmd: &Command,
    raw: &str,
) -> Result<()> {
    match cmd.name.as_str() {
        "help" => {
            help::print_help(rt);
            Ok(())
        }
        "demo" => {
            help::print_demo_link(rt, sched);
            Ok(())
        }
        "cleanup" | "cu" => rt.cleanup(),
        "rethrow" | "rt" => rt.rethrow(),
        "crouch" | "c" => rt.toggle_crouch(),
        "autoadd" | "a" => rt.auto_add(sched, first_arg(cmd)),
        "addlastthrow" | "alt" => rt.add_using_current_position(
            first_arg(cmd),
            "Annotated the last-thrown grenade using the current position",
        ),
        "addnextthrow" | "ant" => rt.prime_next_throw(first_arg(cmd)),
        "addshot" | "as" => rt.prime_next_shot(first_arg(cmd)),
        "addspot" | "spot" => rt.add_spot(),
        "addtext" | "text" => {
            command::require_args(cmd, 1)?;
            let title = first_arg(cmd);
            let description = cmd.args.get(1).map(String::as_str).unwrap_or("");
            rt.add_text(title, description)
        }
        "undo" => rt.undo_last(),
        "clearall" => rt.clear_all(),
        "save" => {
            // Anything beyond the bare command probably meant /saveas; refuse
            // rather than silently saving to the current file.
            let squashed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            if squashed != format!("{}save", rt.config.command_prefix) {
                return Err(LineupError::SaveTakesNoParameters);
            }
            rt.save_current()
        }
        "saveas" => {
            command::require_args(cmd, 1)?;
            rt.save_as(&cmd.args[0])
        }
        "load" => {
            command::require_args(cmd, 1)?;
            rt.load_file(&cmd.args[0])
        }
        "loaddefault" => rt.load_default(),
        "preset" => rt.append_preset(),
        "reload" => rt.reload(),
        "append" => {
            command::require_args(cmd, 1)?;
            rt.append_file(&cmd.args[0])
        }
        "discard" => rt.discard_changes(),
        "files" => {
            help::print_files_path(rt, sched);
            Ok(())
        }
        "radar" => {
            rt.host.toggle_radar()?;
            rt.panel.notify("Toggled radar visibility.");
            Ok(())
        }
        "restart" => {
            rt.host.restart_match()?;
            rt.panel.notify("Restarting match...");
            Ok(())
        }
        "debug" => {
            let shown = rt.panel.toggle_debug();
            rt.panel.notify(if shown {
                "Debug values displayed"
            } else {
                "Debug values hidden"
            });
            Ok(())
        }
        other => Err(LineupError::UnknownCommand(other.to_string())),
    }
}

fn render_error<H: Host>(rt: &mut Runtime<H>, command: &str, err: LineupError) {
    if matches!(err, LineupError::UnknownCommand(_)) {
        rt.panel.set_error(err.to_string());
        rt.host.play(SoundCue::Error);
        return;
    }

    match err.kind() {
        ErrorKind::Validation => {
            tracing::debug!(command, %err, "command rejected");
            rt.panel.set_error(format!(
                "Failed to run /{command}. Type /help in chat for usage details.\n{err}"
            ));
            rt.host.play(SoundCue::Error);
        }
        ErrorKind::Unexpected => {
            tracing::error!(command, %err, "command failed unexpectedly");
            rt.panel.set_error(format!(
                "Failed to run /{command}. Check /debug for details."
            ));
            rt.panel.set_detailed_error(err.to_string());
            rt.host.play(SoundCue::Error);
        }
    }
}
